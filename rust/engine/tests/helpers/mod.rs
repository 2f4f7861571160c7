#![allow(dead_code)]

use rand::RngCore;
use trainer_engine::cards::Card;
use trainer_engine::config::TableConfig;
use trainer_engine::engine::Engine;
use trainer_engine::game::GameSnapshot;
use trainer_engine::player::Action;
use trainer_engine::seat::{Decision, DecisionSource, Seat};

/// Checks when it can, calls otherwise.
pub struct AlwaysCall;

impl DecisionSource for AlwaysCall {
    fn decide(&self, snapshot: &GameSnapshot, _hole: &[Card], _rng: &mut dyn RngCore) -> Decision {
        if snapshot.to_call() == 0 {
            Decision::new(Action::Check, "nothing to call")
        } else {
            Decision::new(Action::Call, "calling station")
        }
    }

    fn label(&self) -> &str {
        "always-call"
    }
}

/// Folds to any bet, checks otherwise.
pub struct AlwaysFold;

impl DecisionSource for AlwaysFold {
    fn decide(&self, snapshot: &GameSnapshot, _hole: &[Card], _rng: &mut dyn RngCore) -> Decision {
        if snapshot.to_call() == 0 {
            Decision::new(Action::Check, "free card")
        } else {
            Decision::new(Action::Fold, "gives up")
        }
    }

    fn label(&self) -> &str {
        "always-fold"
    }
}

/// Re-raises by a fixed increment forever.
pub struct MinRaiser(pub u32);

impl DecisionSource for MinRaiser {
    fn decide(&self, snapshot: &GameSnapshot, _hole: &[Card], _rng: &mut dyn RngCore) -> Decision {
        Decision::new(Action::Raise(snapshot.to_call() + self.0), "keeps raising")
    }

    fn label(&self) -> &str {
        "min-raiser"
    }
}

pub fn config(seed: u64) -> TableConfig {
    TableConfig {
        seed: Some(seed),
        ..TableConfig::default()
    }
}

/// Human in seat 0, scripted callers in the remaining seats.
pub fn human_vs_callers(seed: u64, callers: usize) -> Engine {
    let mut seats = vec![Seat::human("You")];
    for i in 0..callers {
        seats.push(Seat::scripted(format!("Caller{}", i + 1), Box::new(AlwaysCall)));
    }
    Engine::new(&config(seed), seats).expect("valid table")
}

pub fn total_chips(engine: &Engine) -> u64 {
    engine
        .players()
        .iter()
        .map(|p| u64::from(p.stack()))
        .sum::<u64>()
        + u64::from(engine.pot())
}
