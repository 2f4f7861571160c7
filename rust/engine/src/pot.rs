use serde::Serialize;

use crate::errors::EngineFault;
use crate::player::Player;

/// Chips wagered this hand. Only the orchestrator adds to it; the whole pot
/// goes to one winner at the end of the hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pot {
    total: u32,
}

impl Pot {
    pub fn add(&mut self, chips: u32) {
        self.total += chips;
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Empties the pot and returns what was in it.
    pub fn take(&mut self) -> u32 {
        std::mem::take(&mut self.total)
    }
}

pub fn chips_on_table(players: &[Player]) -> u64 {
    players.iter().map(|p| u64::from(p.stack())).sum()
}

/// Checks that stacks plus pot still add up to the chips the hand started with.
pub fn verify_conservation(players: &[Player], pot: &Pot, expected: u64) -> Result<(), EngineFault> {
    let found = chips_on_table(players) + u64::from(pot.total());
    if found == expected {
        Ok(())
    } else {
        Err(EngineFault::ChipsNotConserved { expected, found })
    }
}
