use std::collections::VecDeque;

use crate::errors::{EngineFault, GameError};
use crate::game::{first_to_act, Street};
use crate::player::{Action, ActionKind, Player};

/// Where a betting round stands after the last applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// This seat acts next
    ToAct(usize),
    /// Betting on the street is over
    Complete,
    /// Everyone else folded; the seat wins without a showdown
    FoldedOut(usize),
}

/// The effect of one applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub seat: usize,
    pub kind: ActionKind,
    /// Chips that moved from the stack into the pot
    pub chips: u32,
}

/// Action order and bet level for one street.
///
/// Seats still owing an action sit in a queue. Acting removes a seat from
/// the queue; raising the bet level refills it with every seat after the
/// raiser that can still act. The street is over once the queue drains.
#[derive(Debug, Clone)]
pub struct BettingRound {
    street: Street,
    bet_level: u32,
    last_aggressor: Option<usize>,
    pending: VecDeque<usize>,
    actions_taken: usize,
    ceiling: usize,
}

impl BettingRound {
    /// Opens a round. Preflop `bet_level` is the big blind, already posted.
    pub fn new(street: Street, dealer: usize, players: &[Player], bet_level: u32) -> Self {
        let n = players.len();
        let start = first_to_act(street, dealer, n);
        let pending = (0..n)
            .map(|i| (start + i) % n)
            .filter(|&seat| players[seat].can_act())
            .collect();
        Self {
            street,
            bet_level,
            last_aggressor: None,
            pending,
            actions_taken: 0,
            ceiling: 3 * n,
        }
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn bet_level(&self) -> u32 {
        self.bet_level
    }

    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }

    pub fn actions_taken(&self) -> usize {
        self.actions_taken
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn status(&self, players: &[Player]) -> RoundStatus {
        let mut live = players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_folded());
        match (live.next(), live.next()) {
            (Some((seat, _)), None) => return RoundStatus::FoldedOut(seat),
            (None, _) => return RoundStatus::Complete,
            _ => {}
        }

        let mut actionable = players.iter().filter(|p| p.can_act());
        match (actionable.next(), actionable.next()) {
            (None, _) => return RoundStatus::Complete,
            // a lone player who already matched has nobody left to bet against
            (Some(p), None) if p.street_contribution() >= self.bet_level => {
                return RoundStatus::Complete;
            }
            _ => {}
        }

        match self.pending.iter().copied().find(|&s| players[s].can_act()) {
            Some(seat) => RoundStatus::ToAct(seat),
            None => RoundStatus::Complete,
        }
    }

    /// Applies `action` for `seat`. Amounts larger than the stack are
    /// clamped by the ledger.
    pub fn apply(
        &mut self,
        seat: usize,
        players: &mut [Player],
        action: Action,
    ) -> Result<Applied, GameError> {
        let player = players
            .get(seat)
            .ok_or_else(|| GameError::InvalidAction(format!("no player in seat {seat}")))?;
        if player.is_folded() {
            return Err(GameError::PlayerAlreadyFolded { seat });
        }
        if player.is_all_in() {
            return Err(GameError::PlayerAllIn { seat });
        }
        let expected = match self.status(players) {
            RoundStatus::ToAct(expected) => expected,
            _ => {
                return Err(GameError::StreetClosed {
                    street: self.street,
                })
            }
        };
        if expected != seat {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }
        let to_call = self.bet_level.saturating_sub(player.street_contribution());
        if action == Action::Check && to_call > 0 {
            return Err(GameError::CheckFacingBet { to_call });
        }
        if self.actions_taken >= self.ceiling {
            return Err(EngineFault::ActionCeilingExceeded {
                street: self.street,
                ceiling: self.ceiling,
            }
            .into());
        }

        let player = &mut players[seat];
        let chips = match action {
            Action::Fold => {
                player.fold();
                0
            }
            Action::Check => 0,
            Action::Call => player.place_bet(to_call),
            Action::Raise(amount) => player.place_bet(amount),
            Action::AllIn => {
                let stack = player.stack();
                player.place_bet(stack)
            }
        };
        self.actions_taken += 1;

        let contribution = players[seat].street_contribution();
        if contribution > self.bet_level {
            self.bet_level = contribution;
            self.last_aggressor = Some(seat);
            let n = players.len();
            self.pending = (1..n)
                .map(|i| (seat + i) % n)
                .filter(|&s| players[s].can_act())
                .collect();
        } else {
            self.pending.retain(|&s| s != seat);
        }

        Ok(Applied {
            seat,
            kind: action.kind(),
            chips,
        })
    }
}
