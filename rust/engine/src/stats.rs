use serde::{Deserialize, Serialize};

use crate::game::Street;
use crate::history::HandRecord;
use crate::player::ActionKind;

/// Session summary for one player. Percentages are rounded to one decimal.
///
/// Posting a blind is not voluntary play: a hand where the player only posted
/// a blind counts toward `total_hands` but not `hands_played`. `win_rate` is
/// taken over every hand dealt rather than hands played, so a player who wins
/// blind-only walks can never exceed 100%. Both differ from a plain count of
/// hands with any recorded action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_hands: u32,
    /// Hands with at least one action besides posting a blind
    pub hands_played: u32,
    pub hands_won: u32,
    /// Voluntarily put chips in, percent of all hands
    pub vpip: f64,
    /// Preflop raise, percent of all hands
    pub pfr: f64,
    /// Hands won, percent of all hands
    pub win_rate: f64,
    pub total_profit: i64,
    /// Hands folded, percent of hands played
    pub fold_rate: f64,
}

impl PlayerStats {
    /// Computes stats over every record `name` was seated in. Returns `None`
    /// if the player appears in none of them.
    ///
    /// ```
    /// use trainer_engine::stats::PlayerStats;
    ///
    /// assert_eq!(PlayerStats::from_history(&[], "You"), None);
    /// ```
    pub fn from_history(records: &[HandRecord], name: &str) -> Option<PlayerStats> {
        let mut total_hands = 0u32;
        let mut hands_played = 0u32;
        let mut hands_won = 0u32;
        let mut preflop_raises = 0u32;
        let mut folds = 0u32;
        let mut total_profit = 0i64;

        for record in records {
            let Some(seat) = record.seat_of(name) else {
                continue;
            };
            total_hands += 1;
            total_profit += i64::from(seat.chips_end) - i64::from(seat.chips_start);
            if record.result.winner_name == name {
                hands_won += 1;
            }

            let voluntary: Vec<_> = record
                .actions_of(name)
                .filter(|a| a.kind != ActionKind::Blind)
                .collect();
            if voluntary.is_empty() {
                continue;
            }
            hands_played += 1;
            if voluntary
                .iter()
                .any(|a| a.street == Street::Preflop && matches!(a.kind, ActionKind::Raise | ActionKind::AllIn))
            {
                preflop_raises += 1;
            }
            if voluntary.iter().any(|a| a.kind == ActionKind::Fold) {
                folds += 1;
            }
        }

        if total_hands == 0 {
            return None;
        }
        Some(PlayerStats {
            total_hands,
            hands_played,
            hands_won,
            vpip: percent(hands_played, total_hands),
            pfr: percent(preflop_raises, total_hands),
            win_rate: percent(hands_won, total_hands),
            total_profit,
            fold_rate: percent(folds, hands_played),
        })
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (f64::from(part) / f64::from(whole) * 1000.0).round() / 10.0
}
