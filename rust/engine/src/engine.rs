use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::betting::{BettingRound, RoundStatus};
use crate::cards::Card;
use crate::config::{TableConfig, MAX_SEATS};
use crate::deck::Deck;
use crate::errors::{EngineFault, GameError};
use crate::game::{position_of, Button, GameSnapshot, SeatView, Street, TableView};
use crate::hand::{evaluate, HandScore};
use crate::history::{ActionRecord, HandHistory, HandRecord, RecordBuilder, ShowdownResult, ShownHand};
use crate::player::{Action, ActionKind, Player};
use crate::pot::{chips_on_table, verify_conservation, Pot};
use crate::rules::validate_action;
use crate::seat::{Controller, Seat};

pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;
/// Mixed into the table seed for the decision stream so it differs from the deck's.
const DECISION_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

pub const HUMAN_RATIONALE: &str = "Player decision";

/// What the caller has to do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Progress {
    /// A human seat must act through [`Engine::apply_human_action`]
    AwaitingHuman { seat: usize },
    /// A scripted seat is next; call [`Engine::run_opponent_turns`]
    AwaitingOpponents { seat: usize },
    /// Betting on `street` is over; call [`Engine::advance_street`]
    StreetComplete { street: Street },
    HandComplete(ShowdownResult),
}

#[derive(Debug)]
enum Phase {
    Idle,
    Betting(BettingRound),
    StreetComplete,
    Complete,
}

/// Runs hands at one table: deals, posts blinds, sequences the streets,
/// asks scripted seats for decisions and pauses for the human.
///
/// The engine is a plain value owned by its caller. The only suspension point
/// is a human turn; everything else runs to completion inside the call that
/// triggered it.
///
/// # Examples
///
/// ```
/// use trainer_engine::config::TableConfig;
/// use trainer_engine::engine::{Engine, Progress};
/// use trainer_engine::player::Action;
/// use trainer_engine::seat::Seat;
///
/// let config = TableConfig { seed: Some(7), ..TableConfig::default() };
/// let seats = vec![Seat::human("You"), Seat::human("Friend")];
/// let mut engine = Engine::new(&config, seats).unwrap();
///
/// // Heads-up: seat 1 has the button and the big blind, seat 0 posts the small blind
/// assert_eq!(engine.start_hand().unwrap(), Progress::AwaitingHuman { seat: 0 });
/// match engine.apply_human_action(Action::Fold).unwrap() {
///     Progress::HandComplete(result) => assert_eq!(result.winner, 1),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
///
/// # Faults
///
/// A street allows three actions per seat. Legal play can exceed that: a
/// table that keeps re-raising by the minimum trips
/// [`EngineFault::ActionCeilingExceeded`] on the next action. A fault is
/// fatal; every later call returns the same [`GameError::Fault`] and the
/// table has to be rebuilt.
#[derive(Debug)]
pub struct Engine {
    small_blind: u32,
    big_blind: u32,
    players: Vec<Player>,
    controllers: Vec<Controller>,
    deck: Deck,
    /// Randomness handed to scripted seats
    rng: ChaCha20Rng,
    seed: u64,
    board: Vec<Card>,
    pot: Pot,
    button: Button,
    street: Street,
    phase: Phase,
    hand_number: u32,
    record: Option<RecordBuilder>,
    history: HandHistory,
    /// Stacks plus pot at the start of the current hand
    chips_in_play: u64,
    fault: Option<EngineFault>,
    last_result: Option<ShowdownResult>,
}

impl Engine {
    pub fn new(config: &TableConfig, seats: Vec<Seat>) -> Result<Self, GameError> {
        if seats.len() < 2 {
            return Err(GameError::NotEnoughPlayers {
                minimum: 2,
                actual: seats.len(),
            });
        }
        if seats.len() > MAX_SEATS {
            return Err(GameError::InvalidConfig(format!(
                "at most {MAX_SEATS} seats, got {}",
                seats.len()
            )));
        }
        if config.small_blind == 0 || config.big_blind < config.small_blind {
            return Err(GameError::InvalidConfig(
                "blinds must be positive with big_blind >= small_blind".into(),
            ));
        }
        if u64::from(config.starting_stack) * seats.len() as u64 > u64::from(u32::MAX) {
            return Err(GameError::InvalidConfig(format!(
                "{} seats of {} chips overflow the pot",
                seats.len(),
                config.starting_stack
            )));
        }

        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        let (players, controllers) = seats
            .into_iter()
            .map(|s| (Player::new(s.name, config.starting_stack), s.controller))
            .unzip();
        Ok(Self {
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            players,
            controllers,
            deck: Deck::new_with_seed(seed),
            rng: ChaCha20Rng::seed_from_u64(seed ^ DECISION_STREAM_SALT),
            seed,
            board: Vec::with_capacity(5),
            pot: Pot::default(),
            button: Button::new(0),
            street: Street::Preflop,
            phase: Phase::Idle,
            hand_number: 0,
            record: None,
            history: HandHistory::new(),
            chips_in_play: 0,
            fault: None,
            last_result: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pot(&self) -> u32 {
        self.pot.total()
    }
    pub fn dealer(&self) -> usize {
        self.button.seat()
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }
    pub fn history(&self) -> &HandHistory {
        &self.history
    }
    pub fn last_record(&self) -> Option<&HandRecord> {
        self.history.last()
    }
    pub fn last_result(&self) -> Option<&ShowdownResult> {
        self.last_result.as_ref()
    }
    pub fn fault(&self) -> Option<&EngineFault> {
        self.fault.as_ref()
    }
    pub fn is_human(&self, seat: usize) -> bool {
        self.controllers.get(seat).is_some_and(Controller::is_human)
    }

    /// Current table bet level, zero outside a betting round.
    pub fn bet_level(&self) -> u32 {
        match &self.phase {
            Phase::Betting(round) => round.bet_level(),
            _ => 0,
        }
    }

    /// Resets per-hand state, moves the button, deals hole cards and posts
    /// the blinds. Seats without chips sit the hand out.
    pub fn start_hand(&mut self) -> Result<Progress, GameError> {
        self.guard()?;
        if matches!(self.phase, Phase::Betting(_) | Phase::StreetComplete) {
            return Err(GameError::HandInProgress);
        }
        let funded = self.players.iter().filter(|p| p.stack() > 0).count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers {
                minimum: 2,
                actual: funded,
            });
        }

        for p in &mut self.players {
            p.reset_for_hand();
            if p.stack() == 0 {
                p.sit_out();
            }
        }
        self.deck.shuffle();
        self.board.clear();
        self.pot = Pot::default();
        self.street = Street::Preflop;
        self.last_result = None;
        self.button.rotate(&self.players);
        self.hand_number += 1;
        self.chips_in_play = chips_on_table(&self.players);

        let dealer = self.dealer();
        let hand_id = self.history.next_id();
        info!(
            hand_id = %hand_id,
            hand = self.hand_number,
            dealer,
            players = funded,
            "hand started"
        );
        let mut record = RecordBuilder::open(
            hand_id,
            self.hand_number,
            Some(self.seed),
            dealer,
            &self.players,
        );
        record.open_street(Street::Preflop, &self.board);
        self.record = Some(record);

        for p in self.players.iter_mut().filter(|p| !p.is_folded()) {
            let hole = self.deck.deal(2)?;
            if let [a, b] = hole.as_slice() {
                p.receive_hole([*a, *b]);
            }
        }

        let sb_seat = self.next_funded(dealer);
        let bb_seat = self.next_funded(sb_seat);
        self.post_blind(sb_seat, self.small_blind, "Small Blind");
        self.post_blind(bb_seat, self.big_blind, "Big Blind");
        self.check_conservation()?;

        self.phase = Phase::Betting(BettingRound::new(
            Street::Preflop,
            dealer,
            &self.players,
            self.big_blind,
        ));
        self.settle()
    }

    /// Lets scripted seats act until a human must decide, the street closes
    /// or the hand ends.
    pub fn run_opponent_turns(&mut self) -> Result<Progress, GameError> {
        self.guard()?;
        loop {
            let seat = match self.status()? {
                Progress::AwaitingOpponents { seat } => seat,
                other => return Ok(other),
            };
            let snapshot = self.snapshot_of(seat, &self.players[seat]);
            let decision = match &self.controllers[seat] {
                Controller::Scripted(source) => {
                    source.decide(&snapshot, self.players[seat].hole_cards(), &mut self.rng)
                }
                Controller::Human => return Err(GameError::NoHumanToAct),
            };
            self.apply_action(seat, decision.action, decision.rationale)?;
            self.settle()?;
        }
    }

    /// Applies the human's action, then lets scripted seats continue.
    ///
    /// # Errors
    ///
    /// Rejected actions leave the engine unchanged: the same human is still
    /// waiting to act.
    pub fn apply_human_action(&mut self, action: Action) -> Result<Progress, GameError> {
        self.guard()?;
        let seat = match self.status()? {
            Progress::AwaitingHuman { seat } => seat,
            Progress::StreetComplete { street } => return Err(GameError::StreetClosed { street }),
            Progress::HandComplete(_) => return Err(GameError::HandAlreadyComplete),
            Progress::AwaitingOpponents { .. } => return Err(GameError::NoHumanToAct),
        };

        let player = &self.players[seat];
        let to_call = self.bet_level().saturating_sub(player.street_contribution());
        let action = match validate_action(player.stack(), to_call, action) {
            Ok(action) => action,
            Err(err) => {
                warn!(seat, street = %self.street, ?action, error = %err, "rejected human action");
                return Err(err);
            }
        };

        self.apply_action(seat, action, HUMAN_RATIONALE.to_string())?;
        self.settle()?;
        self.run_opponent_turns()
    }

    /// Deals the next street once betting on the current one is over.
    pub fn advance_street(&mut self) -> Result<Progress, GameError> {
        self.guard()?;
        match self.phase {
            Phase::Idle => return Err(GameError::NoHandInProgress),
            Phase::Complete => return Err(GameError::HandAlreadyComplete),
            Phase::Betting(_) => {
                return Err(GameError::StreetInProgress {
                    street: self.street,
                })
            }
            Phase::StreetComplete => {}
        }
        let next = match self.street.next() {
            Some(next) => next,
            None => return self.showdown(),
        };

        let dealt = self.deck.deal(next.cards_dealt())?;
        self.board.extend(dealt);
        for p in &mut self.players {
            p.reset_street();
        }
        self.street = next;
        if let Some(record) = self.record.as_mut() {
            record.open_street(next, &self.board);
        }
        debug!(street = %next, board = ?self.board, "street dealt");

        self.phase = Phase::Betting(BettingRound::new(next, self.dealer(), &self.players, 0));
        self.settle()
    }

    /// Plays scripted seats and deals streets until a human must act or the
    /// hand is over.
    pub fn drive(&mut self) -> Result<Progress, GameError> {
        loop {
            match self.run_opponent_turns()? {
                Progress::StreetComplete { .. } => {
                    self.advance_street()?;
                }
                other => return Ok(other),
            }
        }
    }

    pub fn status(&self) -> Result<Progress, GameError> {
        self.guard()?;
        match &self.phase {
            Phase::Idle => Err(GameError::NoHandInProgress),
            Phase::Betting(round) => Ok(match round.status(&self.players) {
                RoundStatus::ToAct(seat) if self.controllers[seat].is_human() => {
                    Progress::AwaitingHuman { seat }
                }
                RoundStatus::ToAct(seat) => Progress::AwaitingOpponents { seat },
                RoundStatus::Complete | RoundStatus::FoldedOut(_) => Progress::StreetComplete {
                    street: self.street,
                },
            }),
            Phase::StreetComplete => Ok(Progress::StreetComplete {
                street: self.street,
            }),
            Phase::Complete => match &self.last_result {
                Some(result) => Ok(Progress::HandComplete(result.clone())),
                None => Err(GameError::NoHandInProgress),
            },
        }
    }

    /// Table state as seen from `viewer`. Hole cards of other seats stay
    /// hidden; pass `None` for a spectator view.
    pub fn view(&self, viewer: Option<usize>) -> TableView {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| SeatView {
                name: p.name().to_string(),
                stack: p.stack(),
                street_contribution: p.street_contribution(),
                folded: p.is_folded(),
                all_in: p.is_all_in(),
                hole: (viewer == Some(seat)).then(|| p.hole_cards().to_vec()),
            })
            .collect();
        TableView {
            street: self.street,
            pot: self.pot.total(),
            bet_level: self.bet_level(),
            board: self.board.clone(),
            dealer: self.dealer(),
            players,
        }
    }

    /// What a scripted seat is shown when asked to decide. `None` for a seat
    /// that does not exist.
    pub fn snapshot(&self, seat: usize) -> Option<GameSnapshot> {
        self.players.get(seat).map(|player| self.snapshot_of(seat, player))
    }

    fn snapshot_of(&self, seat: usize, player: &Player) -> GameSnapshot {
        GameSnapshot {
            street: self.street,
            pot: self.pot.total(),
            bet_level: self.bet_level(),
            board: self.board.clone(),
            seat,
            position: position_of(seat, self.dealer(), self.players.len()),
            stack: player.stack(),
            contribution: player.street_contribution(),
        }
    }

    fn guard(&self) -> Result<(), GameError> {
        match &self.fault {
            Some(fault) => Err(GameError::Fault(fault.clone())),
            None => Ok(()),
        }
    }

    fn halt(&mut self, fault: EngineFault) -> GameError {
        error!(hand = self.hand_number, street = %self.street, %fault, "engine halted");
        self.fault = Some(fault.clone());
        GameError::Fault(fault)
    }

    fn check_conservation(&mut self) -> Result<(), GameError> {
        if let Err(fault) = verify_conservation(&self.players, &self.pot, self.chips_in_play) {
            return Err(self.halt(fault));
        }
        Ok(())
    }

    /// Next seat after `seat` that is dealt in.
    fn next_funded(&self, seat: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|step| (seat + step) % n)
            .find(|&s| !self.players[s].is_folded())
            .unwrap_or(seat)
    }

    fn post_blind(&mut self, seat: usize, amount: u32, label: &str) {
        let chips = self.players[seat].place_bet(amount);
        self.pot.add(chips);
        self.log_action(seat, ActionKind::Blind, chips, label.to_string());
    }

    fn log_action(&mut self, seat: usize, kind: ActionKind, amount: u32, rationale: String) {
        let entry = ActionRecord {
            seat,
            player: self.players[seat].name().to_string(),
            street: self.street,
            kind,
            amount,
            rationale,
        };
        debug!(
            seat,
            player = %entry.player,
            street = %entry.street,
            kind = %entry.kind,
            chips = amount,
            rationale = %entry.rationale,
            "action"
        );
        if let Some(record) = self.record.as_mut() {
            record.push_action(entry.clone());
        }
        self.players[seat].record(entry);
    }

    fn apply_action(&mut self, seat: usize, action: Action, rationale: String) -> Result<(), GameError> {
        let round = match &mut self.phase {
            Phase::Betting(round) => round,
            _ => return Err(GameError::StreetClosed { street: self.street }),
        };
        let applied = match round.apply(seat, &mut self.players, action) {
            Ok(applied) => applied,
            Err(GameError::Fault(fault)) => return Err(self.halt(fault)),
            Err(err) => return Err(err),
        };
        self.pot.add(applied.chips);
        self.log_action(seat, applied.kind, applied.chips, rationale);
        self.check_conservation()
    }

    /// Moves past a betting round that has nothing left to do.
    fn settle(&mut self) -> Result<Progress, GameError> {
        let status = match &self.phase {
            Phase::Betting(round) => round.status(&self.players),
            _ => return self.status(),
        };
        match status {
            RoundStatus::ToAct(_) => self.status(),
            RoundStatus::FoldedOut(seat) => self.award_uncontested(seat),
            RoundStatus::Complete if self.street == Street::River => self.showdown(),
            RoundStatus::Complete => {
                self.phase = Phase::StreetComplete;
                debug!(street = %self.street, pot = self.pot.total(), "betting closed");
                self.status()
            }
        }
    }

    fn award_uncontested(&mut self, seat: usize) -> Result<Progress, GameError> {
        let result = ShowdownResult {
            winner: seat,
            winner_name: self.players[seat].name().to_string(),
            winning_category: None,
            pot: self.pot.total(),
            hands: Vec::new(),
            notes: None,
        };
        self.finish(result)
    }

    fn showdown(&mut self) -> Result<Progress, GameError> {
        let mut hands = Vec::new();
        for (seat, p) in self.players.iter().enumerate() {
            if p.is_folded() {
                continue;
            }
            let mut cards = p.hole_cards().to_vec();
            cards.extend_from_slice(&self.board);
            hands.push(ShownHand {
                seat,
                player: p.name().to_string(),
                hole: p.hole_cards().to_vec(),
                score: evaluate(&cards)?,
            });
        }

        let best: Option<&HandScore> = hands.iter().map(|h| &h.score).max();
        let tied: Vec<&ShownHand> = hands.iter().filter(|h| Some(&h.score) == best).collect();
        let Some(winner) = tied.first() else {
            return Err(GameError::NoHandInProgress);
        };
        let notes = (tied.len() > 1).then(|| {
            let names: Vec<&str> = tied.iter().map(|h| h.player.as_str()).collect();
            format!(
                "tie between {}; pot awarded to {} by seat order",
                names.join(", "),
                winner.player
            )
        });
        let result = ShowdownResult {
            winner: winner.seat,
            winner_name: winner.player.clone(),
            winning_category: Some(winner.score.category),
            pot: self.pot.total(),
            hands: hands.clone(),
            notes,
        };
        self.finish(result)
    }

    fn finish(&mut self, result: ShowdownResult) -> Result<Progress, GameError> {
        let won = self.pot.take();
        self.players[result.winner].win_pot(won);
        self.check_conservation()?;

        info!(
            hand = self.hand_number,
            winner = %result.winner_name,
            pot = won,
            category = ?result.winning_category,
            "hand complete"
        );
        if let Some(record) = self.record.take() {
            self.history.push(record.seal(&self.players, result.clone()));
        }
        self.phase = Phase::Complete;
        self.last_result = Some(result.clone());
        Ok(Progress::HandComplete(result))
    }
}
