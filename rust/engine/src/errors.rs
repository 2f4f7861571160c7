use thiserror::Error;

use crate::game::Street;

/// Rejected operations. Apart from [`GameError::Fault`], every variant means
/// the caller misused the engine and the engine state was left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("hand evaluation needs {expected} cards, got {actual}")]
    InvalidCardCount { expected: usize, actual: usize },
    #[error("cannot deal {requested} cards, only {remaining} left in the deck")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("invalid card notation: {0:?}")]
    InvalidCard(String),
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("cannot check while facing a bet of {to_call}")]
    CheckFacingBet { to_call: u32 },
    #[error("{0}")]
    InvalidAction(String),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("a hand is already in progress")]
    HandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Player {seat} already folded")]
    PlayerAlreadyFolded { seat: usize },
    #[error("Player {seat} is all-in")]
    PlayerAllIn { seat: usize },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("no human seat is waiting to act")]
    NoHumanToAct,
    #[error("betting on the {street} is still open")]
    StreetInProgress { street: Street },
    #[error("betting on the {street} is closed")]
    StreetClosed { street: Street },
    #[error("need at least {minimum} players with chips, found {actual}")]
    NotEnoughPlayers { minimum: usize, actual: usize },
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("engine halted: {0}")]
    Fault(#[from] EngineFault),
}

/// Broken engine invariants. Once one is raised the engine refuses to
/// continue; pot accounting can no longer be trusted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineFault {
    #[error("betting on the {street} exceeded the ceiling of {ceiling} actions")]
    ActionCeilingExceeded { street: Street, ceiling: usize },
    #[error("chip conservation violated: {expected} chips in play, {found} accounted for")]
    ChipsNotConserved { expected: u64, found: u64 },
}
