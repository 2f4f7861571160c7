//! Style-driven opponent.
//!
//! A fixed decision cascade over hand strength, pot size and the amount to
//! call. The style triple only changes how often the random branches fire,
//! so new personalities are new parameters rather than new code.

use rand::{Rng, RngCore};
use trainer_engine::cards::Card;
use trainer_engine::game::GameSnapshot;
use trainer_engine::player::{Action, Style};
use trainer_engine::seat::{Decision, DecisionSource};

use crate::strength::hand_strength;

const ALL_IN_THRESHOLD: f64 = 0.6;
const OVERBET_FRACTION: f64 = 0.8;
const OVERBET_FOLD_BELOW: f64 = 0.5;
const VALUE_BET_THRESHOLD: f64 = 0.6;
const STRONG: f64 = 0.7;
const MEDIUM: f64 = 0.4;
/// Added to every decision: the policy plays each seat as if it held the
/// button, whatever position the snapshot reports.
const BUTTON_BONUS: f64 = 0.1;

/// Scripted opponent playing a [`Style`].
#[derive(Debug, Clone)]
pub struct StyledOpponent {
    label: String,
    style: Style,
}

impl StyledOpponent {
    pub fn new(label: impl Into<String>, style: Style) -> Self {
        Self {
            label: label.into(),
            style,
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

impl DecisionSource for StyledOpponent {
    fn decide(&self, snapshot: &GameSnapshot, hole: &[Card], rng: &mut dyn RngCore) -> Decision {
        decide(snapshot, hole, &self.style, rng)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Picks an action for the acting seat.
///
/// Random draws are taken lazily, only when a branch needs one, so the
/// number of values consumed from `rng` depends on the situation. Replaying
/// the same snapshots against the same stream gives the same decisions.
///
/// Raises carry the chips to put in now. A raise the stack cannot cover is
/// skipped in favour of the next branch.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
/// use trainer_ai::heuristic::decide;
/// use trainer_engine::cards::parse_cards;
/// use trainer_engine::game::{GameSnapshot, Street};
/// use trainer_engine::player::{Action, Position, Style};
///
/// let snapshot = GameSnapshot {
///     street: Street::Preflop,
///     pot: 100,
///     bet_level: 100,
///     board: vec![],
///     seat: 2,
///     position: Position::BigBlind,
///     stack: 1000,
///     contribution: 0,
/// };
/// let hole = parse_cards("7c 2d").unwrap();
/// let mut rng = ChaCha20Rng::seed_from_u64(1);
/// let decision = decide(&snapshot, &hole, &Style::LOOSE, &mut rng);
/// assert_eq!(decision.action, Action::Fold);
/// ```
pub fn decide(snapshot: &GameSnapshot, hole: &[Card], style: &Style, rng: &mut dyn RngCore) -> Decision {
    let strength = hand_strength(hole, &snapshot.board);
    let adjusted = strength + BUTTON_BONUS;

    let stack = snapshot.stack;
    let to_call = snapshot.to_call();
    let pot = f64::from(snapshot.pot);
    let call = f64::from(to_call);

    if to_call > stack {
        return if adjusted > ALL_IN_THRESHOLD {
            Decision::new(Action::AllIn, format!("strong hand ({strength:.2}), going all-in"))
        } else {
            Decision::new(
                Action::Fold,
                format!("weak hand ({strength:.2}), not worth the whole stack"),
            )
        };
    }

    let pot_odds = if pot + call > 0.0 { call / (pot + call) } else { 0.0 };

    if call > pot * OVERBET_FRACTION && adjusted < OVERBET_FOLD_BELOW {
        return Decision::new(
            Action::Fold,
            format!("big bet (${to_call}) against a weak hand ({strength:.2})"),
        );
    }

    if to_call == 0 {
        if rng.random::<f64>() < style.bluff {
            let amount = (pot * 0.5) as u32;
            if amount <= stack {
                return Decision::new(Action::Raise(amount), "bluff raise (half the pot)");
            }
        }
        if adjusted > VALUE_BET_THRESHOLD && rng.random::<f64>() < style.aggression {
            let amount = (pot * 0.7) as u32;
            if amount <= stack {
                return Decision::new(
                    Action::Raise(amount),
                    format!("strong hand ({strength:.2}), betting for value"),
                );
            }
        }
        return Decision::new(Action::Check, "checking to see what comes");
    }

    if adjusted > STRONG {
        if rng.random::<f64>() < style.aggression {
            let amount = to_call + (pot * 0.6) as u32;
            if amount <= stack {
                return Decision::new(
                    Action::Raise(amount),
                    format!("strong hand ({strength:.2}), raising"),
                );
            }
        }
        Decision::new(Action::Call, format!("strong hand ({strength:.2}), calling"))
    } else if adjusted > MEDIUM {
        if pot_odds < 0.3 || rng.random::<f64>() < 0.6 {
            Decision::new(Action::Call, format!("medium hand ({strength:.2}), calling"))
        } else {
            Decision::new(
                Action::Fold,
                format!("medium hand ({strength:.2}) but the pot odds are poor"),
            )
        }
    } else if call < pot * 0.2 && rng.random::<f64>() < 0.3 {
        Decision::new(
            Action::Call,
            format!("weak hand ({strength:.2}) but cheap enough to call"),
        )
    } else {
        Decision::new(Action::Fold, format!("weak hand ({strength:.2}), folding"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainer_engine::cards::parse_cards;
    use trainer_engine::game::Street;
    use trainer_engine::player::Position;

    /// Panics on any draw.
    struct NoDraws;

    impl RngCore for NoDraws {
        fn next_u32(&mut self) -> u32 {
            panic!("unexpected random draw")
        }
        fn next_u64(&mut self) -> u64 {
            panic!("unexpected random draw")
        }
        fn fill_bytes(&mut self, _dst: &mut [u8]) {
            panic!("unexpected random draw")
        }
    }

    /// Every draw yields the same word: 0 draws 0.0, `u64::MAX` draws just under 1.0.
    struct Fixed(u64);

    impl RngCore for Fixed {
        fn next_u32(&mut self) -> u32 {
            (self.0 >> 32) as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(self.0 as u8);
        }
    }

    fn always() -> Fixed {
        Fixed(0)
    }

    fn never() -> Fixed {
        Fixed(u64::MAX)
    }

    fn snapshot(pot: u32, bet_level: u32, stack: u32, board: &str) -> GameSnapshot {
        let board = parse_cards(board).unwrap();
        GameSnapshot {
            street: if board.is_empty() { Street::Preflop } else { Street::Flop },
            pot,
            bet_level,
            board,
            seat: 1,
            position: Position::Middle,
            stack,
            contribution: 0,
        }
    }

    fn run(snap: &GameSnapshot, hole: &str, style: &Style, rng: &mut dyn RngCore) -> Action {
        decide(snap, &parse_cards(hole).unwrap(), style, rng).action
    }

    #[test]
    fn seven_deuce_folds_to_a_pot_sized_bet() {
        let snap = snapshot(100, 100, 1000, "");
        for style in [Style::TIGHT, Style::LOOSE, Style::AGGRESSIVE] {
            assert_eq!(run(&snap, "7c 2d", &style, &mut NoDraws), Action::Fold);
        }
    }

    #[test]
    fn short_stack_shoves_strong_and_folds_weak() {
        let snap = snapshot(300, 500, 200, "");
        assert_eq!(run(&snap, "As Ad", &Style::TIGHT, &mut NoDraws), Action::AllIn);
        assert_eq!(run(&snap, "7c 2d", &Style::TIGHT, &mut NoDraws), Action::Fold);
    }

    #[test]
    fn button_bonus_applies_away_from_the_button() {
        // 66 is 0.55; only the bonus lifts it over the all-in line
        let snap = snapshot(300, 500, 200, "");
        for position in [Position::SmallBlind, Position::BigBlind, Position::Middle, Position::Button] {
            let seated = GameSnapshot { position, ..snap.clone() };
            assert_eq!(run(&seated, "6s 6d", &Style::TIGHT, &mut NoDraws), Action::AllIn);
        }

        // J3 is 0.47: the bonus keeps it out of the overbet fold and in the medium branch
        let overbet = snapshot(100, 90, 1000, "");
        assert_eq!(run(&overbet, "Jc 3d", &Style::TIGHT, &mut always()), Action::Call);
    }

    #[test]
    fn check_option_bluffs_value_bets_or_checks() {
        let snap = snapshot(100, 0, 1000, "");
        assert_eq!(run(&snap, "7c 2d", &Style::LOOSE, &mut always()), Action::Raise(50));
        assert_eq!(run(&snap, "7c 2d", &Style::LOOSE, &mut never()), Action::Check);
        assert_eq!(run(&snap, "Kc Kd", &Style::AGGRESSIVE, &mut never()), Action::Check);

        let no_bluffs = Style {
            bluff: 0.0,
            ..Style::AGGRESSIVE
        };
        assert_eq!(run(&snap, "Kc Kd", &no_bluffs, &mut always()), Action::Raise(70));
    }

    #[test]
    fn unaffordable_bluff_checks() {
        let snap = snapshot(1000, 0, 100, "");
        let style = Style {
            aggression: 0.0,
            ..Style::LOOSE
        };
        assert_eq!(run(&snap, "7c 2d", &style, &mut always()), Action::Check);
    }

    #[test]
    fn strong_hand_facing_a_bet_raises_or_calls() {
        let snap = snapshot(200, 40, 1000, "");
        assert_eq!(
            run(&snap, "Qs Qd", &Style::AGGRESSIVE, &mut always()),
            Action::Raise(40 + 120)
        );
        assert_eq!(run(&snap, "Qs Qd", &Style::AGGRESSIVE, &mut never()), Action::Call);
    }

    #[test]
    fn medium_hand_calls_on_good_odds_without_drawing() {
        let snap = snapshot(100, 20, 1000, "");
        assert_eq!(run(&snap, "6s 6d", &Style::TIGHT, &mut NoDraws), Action::Call);

        // odds 60 / 160 are poor, so the 0.6 roll decides
        let snap = snapshot(100, 60, 1000, "");
        assert_eq!(run(&snap, "6s 6d", &Style::TIGHT, &mut never()), Action::Fold);
        assert_eq!(run(&snap, "6s 6d", &Style::TIGHT, &mut always()), Action::Call);
    }

    #[test]
    fn weak_hand_only_calls_when_cheap() {
        let expensive = snapshot(100, 40, 1000, "");
        assert_eq!(run(&expensive, "6c 2d", &Style::LOOSE, &mut NoDraws), Action::Fold);

        let cheap = snapshot(100, 10, 1000, "");
        assert_eq!(run(&cheap, "6c 2d", &Style::LOOSE, &mut always()), Action::Call);
        assert_eq!(run(&cheap, "6c 2d", &Style::LOOSE, &mut never()), Action::Fold);
    }

    #[test]
    fn flop_strength_comes_from_the_made_hand() {
        // a pair on the flop is 0.2: weak
        let snap = snapshot(100, 40, 1000, "Ah 7d 2c");
        assert_eq!(run(&snap, "As 9s", &Style::AGGRESSIVE, &mut NoDraws), Action::Fold);
        // a straight is 0.5: medium
        let snap = snapshot(100, 20, 1000, "Tc Jd Qh");
        assert_eq!(run(&snap, "9s 8h", &Style::AGGRESSIVE, &mut NoDraws), Action::Call);
    }

    #[test]
    fn every_decision_explains_itself() {
        let snap = snapshot(100, 0, 1000, "");
        let d = decide(&snap, &parse_cards("Ah Kh").unwrap(), &Style::TIGHT, &mut never());
        assert_eq!(d.action, Action::Check);
        assert!(!d.rationale.is_empty());
    }
}
