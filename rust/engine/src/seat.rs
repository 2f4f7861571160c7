use std::fmt;

use rand::RngCore;

use crate::cards::Card;
use crate::game::GameSnapshot;
use crate::player::Action;

/// An action chosen by a scripted opponent together with its reasoning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub rationale: String,
}

impl Decision {
    pub fn new(action: Action, rationale: impl Into<String>) -> Self {
        Self {
            action,
            rationale: rationale.into(),
        }
    }
}

/// Anything that can pick an action for a seat without outside input.
///
/// Implementations must draw all randomness from `rng` so that a seeded
/// table replays identically.
pub trait DecisionSource: Send {
    fn decide(&self, snapshot: &GameSnapshot, hole: &[Card], rng: &mut dyn RngCore) -> Decision;

    fn label(&self) -> &str;
}

/// Who decides for a seat.
pub enum Controller {
    /// The engine pauses and waits for [`crate::engine::Engine::apply_human_action`]
    Human,
    Scripted(Box<dyn DecisionSource>),
}

impl Controller {
    pub fn is_human(&self) -> bool {
        matches!(self, Controller::Human)
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Human => f.write_str("Human"),
            Controller::Scripted(source) => f.debug_tuple("Scripted").field(&source.label()).finish(),
        }
    }
}

/// A seat at the table before the engine takes ownership of it.
#[derive(Debug)]
pub struct Seat {
    pub name: String,
    pub controller: Controller,
}

impl Seat {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
        }
    }

    pub fn scripted(name: impl Into<String>, source: Box<dyn DecisionSource>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Scripted(source),
        }
    }
}
