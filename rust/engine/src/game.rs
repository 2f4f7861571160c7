use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{Player, Position};

/// Represents a betting street in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Community cards dealt when this street opens.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seat that opens the betting on `street`: the first seat after the big
/// blind preflop, the first seat after the dealer on later streets.
///
/// ```
/// use trainer_engine::game::{first_to_act, Street};
///
/// assert_eq!(first_to_act(Street::Preflop, 0, 4), 3);
/// assert_eq!(first_to_act(Street::Flop, 0, 4), 1);
/// ```
pub fn first_to_act(street: Street, dealer: usize, seats: usize) -> usize {
    match street {
        Street::Preflop => (dealer + 3) % seats,
        _ => (dealer + 1) % seats,
    }
}

pub fn position_of(seat: usize, dealer: usize, seats: usize) -> Position {
    match (seat + seats - dealer % seats) % seats {
        0 => Position::Button,
        1 => Position::SmallBlind,
        2 => Position::BigBlind,
        3 => Position::UnderTheGun,
        _ => Position::Middle,
    }
}

/// Tracks the dealer button and moves it between hands.
#[derive(Debug, Clone)]
pub struct Button {
    seat: usize,
}

impl Button {
    pub fn new(seat: usize) -> Self {
        Self { seat }
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    /// Moves the button to the next seat that still has chips.
    pub fn rotate(&mut self, players: &[Player]) {
        let n = players.len();
        for step in 1..=n {
            let candidate = (self.seat + step) % n;
            if players[candidate].stack() > 0 {
                self.seat = candidate;
                return;
            }
        }
    }
}

/// What an opponent gets to see when it is asked for a decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub street: Street,
    pub pot: u32,
    /// Highest street contribution anyone has to match
    pub bet_level: u32,
    pub board: Vec<Card>,
    pub seat: usize,
    pub position: Position,
    /// Acting player's chips behind
    pub stack: u32,
    /// Acting player's chips already in on this street
    pub contribution: u32,
}

impl GameSnapshot {
    pub fn to_call(&self) -> u32 {
        self.bet_level.saturating_sub(self.contribution)
    }
}

/// Public view of one seat. Hole cards are only filled in for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatView {
    pub name: String,
    pub stack: u32,
    pub street_contribution: u32,
    pub folded: bool,
    pub all_in: bool,
    pub hole: Option<Vec<Card>>,
}

/// Read-only table state handed to a transport layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub street: Street,
    pub pot: u32,
    pub bet_level: u32,
    pub board: Vec<Card>,
    pub dealer: usize,
    pub players: Vec<SeatView>,
}
