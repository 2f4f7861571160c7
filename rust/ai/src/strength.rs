//! Hand strength estimates on a `0.0..=1.0` scale.
//!
//! Preflop uses a static table keyed on the two hole cards. Once three or
//! more board cards are out the estimate is the made-hand category divided
//! by ten, so every hand in a category scores the same.

use trainer_engine::cards::{Card, Rank};
use trainer_engine::hand::best_of;

/// Strength for the cards the player can see right now.
pub fn hand_strength(hole: &[Card], board: &[Card]) -> f64 {
    if board.len() >= 3 {
        postflop_strength(hole, board)
    } else {
        preflop_strength(hole)
    }
}

/// Static two-card estimate. Anything but exactly two cards is 0.5.
pub fn preflop_strength(hole: &[Card]) -> f64 {
    let [a, b] = hole else {
        return 0.5;
    };
    let (high, low) = if a.rank >= b.rank {
        (a.rank, b.rank)
    } else {
        (b.rank, a.rank)
    };

    if high == low {
        return match high {
            Rank::Ace => 1.0,
            Rank::King => 0.95,
            Rank::Queen => 0.90,
            Rank::Jack => 0.85,
            Rank::Ten => 0.80,
            Rank::Nine => 0.70,
            Rank::Eight => 0.65,
            Rank::Seven => 0.60,
            Rank::Six => 0.55,
            _ => 0.50,
        };
    }

    match high {
        Rank::Ace if low >= Rank::King => 0.85,
        Rank::Ace if low >= Rank::Jack => 0.75,
        Rank::Ace => 0.60,
        Rank::King if low >= Rank::Queen => 0.75,
        Rank::King if low >= Rank::Jack => 0.65,
        Rank::King => 0.50,
        _ => {
            let suited = if a.suit == b.suit { 0.05 } else { 0.0 };
            let connected = if high.value() - low.value() <= 2 { 0.05 } else { 0.0 };
            let base = f64::from(high.value()) / 14.0 * 0.6;
            (base + suited + connected).min(1.0)
        }
    }
}

/// Category ordinal of the best hand from hole plus board, over ten.
pub fn postflop_strength(hole: &[Card], board: &[Card]) -> f64 {
    let cards: Vec<Card> = hole.iter().chain(board).copied().collect();
    match best_of(&cards) {
        Ok(score) => f64::from(score.category.ordinal()) / 10.0,
        Err(_) => preflop_strength(hole),
    }
}
