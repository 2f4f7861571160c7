use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::history::ActionRecord;

/// A betting decision. Amount-carrying moves hold their chips in the
/// variant, so a check with an amount cannot be expressed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid when the bet level is already matched)
    Check,
    /// Match the current bet level
    Call,
    /// Put the given number of chips in now
    Raise(u32),
    /// Put the whole remaining stack in
    AllIn,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Raise(_) => ActionKind::Raise,
            Action::AllIn => ActionKind::AllIn,
        }
    }

    /// Builds an action from a kind/amount pair as sent by a transport.
    /// Only raises take an amount.
    pub fn from_kind(kind: ActionKind, amount: u32) -> Result<Action, GameError> {
        match (kind, amount) {
            (ActionKind::Raise, amount) => Ok(Action::Raise(amount)),
            (ActionKind::Blind, _) => Err(GameError::InvalidAction(
                "blinds are posted by the engine".to_string(),
            )),
            (kind, 0) => Ok(match kind {
                ActionKind::Fold => Action::Fold,
                ActionKind::Check => Action::Check,
                ActionKind::Call => Action::Call,
                _ => Action::AllIn,
            }),
            (kind, amount) => Err(GameError::InvalidAction(format!(
                "{kind} does not take an amount (got {amount})"
            ))),
        }
    }
}

/// Kind tag of a recorded action. `Blind` only ever appears in records.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Blind,
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Blind => "blind",
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all_in",
        };
        f.write_str(s)
    }
}

/// Seat position relative to the dealer button.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    Middle,
}

/// Opponent style: how often it participates, raises and bluffs. All three
/// are probabilities in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub participation: f64,
    pub aggression: f64,
    pub bluff: f64,
}

impl Style {
    pub const TIGHT: Style = Style {
        participation: 0.20,
        aggression: 0.30,
        bluff: 0.05,
    };
    pub const LOOSE: Style = Style {
        participation: 0.45,
        aggression: 0.25,
        bluff: 0.15,
    };
    pub const AGGRESSIVE: Style = Style {
        participation: 0.35,
        aggression: 0.60,
        bluff: 0.25,
    };

    pub fn named(name: &str) -> Option<Style> {
        match name.to_ascii_lowercase().as_str() {
            "tight" => Some(Style::TIGHT),
            "loose" => Some(Style::LOOSE),
            "aggressive" => Some(Style::AGGRESSIVE),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.participation, self.aggression, self.bluff]
            .iter()
            .all(|p| (0.0..=1.0).contains(p))
    }
}

/// A seated player and their stake in the current hand.
///
/// The betting methods form the stake ledger: chips only ever move from the
/// stack into the contribution counters (and back via [`Player::win_pot`]).
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    /// Chips behind
    stack: u32,
    /// Hole cards, empty or exactly two
    hole: Vec<Card>,
    /// Chips put in on the current street
    street_contribution: u32,
    /// Chips put in over the whole hand
    total_contribution: u32,
    folded: bool,
    all_in: bool,
    /// Everything this player did this hand, in order
    actions: Vec<ActionRecord>,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32) -> Self {
        Self {
            name: name.into(),
            stack,
            hole: Vec::with_capacity(2),
            street_contribution: 0,
            total_contribution: 0,
            folded: false,
            all_in: false,
            actions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }
    pub fn street_contribution(&self) -> u32 {
        self.street_contribution
    }
    pub fn total_contribution(&self) -> u32 {
        self.total_contribution
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Whether this player still takes turns this hand.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    pub fn reset_for_hand(&mut self) {
        self.hole.clear();
        self.street_contribution = 0;
        self.total_contribution = 0;
        self.folded = false;
        self.all_in = false;
        self.actions.clear();
    }

    pub fn reset_street(&mut self) {
        self.street_contribution = 0;
    }

    pub fn receive_hole(&mut self, cards: [Card; 2]) {
        self.hole = cards.to_vec();
    }

    /// Sits the player out of the current hand without dealing them in.
    pub fn sit_out(&mut self) {
        self.folded = true;
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    /// Moves up to `requested` chips from the stack into the contribution
    /// counters and returns what actually moved. A player whose stack hits
    /// zero is all-in.
    ///
    /// ```
    /// use trainer_engine::player::Player;
    ///
    /// let mut p = Player::new("Short", 50);
    /// assert_eq!(p.place_bet(80), 50);
    /// assert_eq!(p.stack(), 0);
    /// assert!(p.is_all_in());
    /// ```
    pub fn place_bet(&mut self, requested: u32) -> u32 {
        let actual = requested.min(self.stack);
        self.stack -= actual;
        self.street_contribution += actual;
        self.total_contribution += actual;
        if self.stack == 0 {
            self.all_in = true;
        }
        actual
    }

    /// Credits won chips. The caller guarantees the amount came out of the pot.
    pub fn win_pot(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub(crate) fn record(&mut self, action: ActionRecord) {
        self.actions.push(action);
    }
}
