use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Hand categories from weakest to strongest. The discriminant is the
/// 1-based ordinal used by opponents for their postflop strength estimate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A totally ordered hand rank: category first, then the tie-break ranks
/// element-wise. The derived ordering relies on that field order.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandScore {
    pub category: Category,
    // rank values, most significant first
    pub tiebreak: Vec<u8>,
}

/// Scores exactly seven cards (two hole cards plus a full board).
///
/// # Errors
///
/// [`GameError::InvalidCardCount`] for any other number of cards.
///
/// # Examples
///
/// ```
/// use trainer_engine::cards::parse_cards;
/// use trainer_engine::hand::{evaluate, Category};
///
/// let cards = parse_cards("As Ah Ad Ac Ks 9h 8h").unwrap();
/// let score = evaluate(&cards).unwrap();
/// assert_eq!(score.category, Category::FourOfAKind);
/// assert_eq!(score.tiebreak, vec![14, 13]);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandScore, GameError> {
    if cards.len() != 7 {
        return Err(GameError::InvalidCardCount {
            expected: 7,
            actual: cards.len(),
        });
    }
    best_of(cards)
}

/// Best five-card score among 5, 6 or 7 cards, found by scoring every
/// five-card subset.
pub fn best_of(cards: &[Card]) -> Result<HandScore, GameError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(GameError::InvalidCardCount {
            expected: 7,
            actual: n,
        });
    }
    let mut best: Option<HandScore> = None;
    for five in five_card_subsets(cards) {
        let score = score_five(&five);
        match &best {
            Some(b) if *b >= score => {}
            _ => best = Some(score),
        }
    }
    best.ok_or(GameError::InvalidCardCount {
        expected: 7,
        actual: n,
    })
}

/// Every five-card subset, produced by leaving out `len - 5` cards.
fn five_card_subsets(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    let mut out = Vec::with_capacity(21);
    let mut push_without = |skip: &[usize]| {
        let kept: Vec<Card> = (0..n)
            .filter(|i| !skip.contains(i))
            .map(|i| cards[i])
            .collect();
        if let Ok(five) = <[Card; 5]>::try_from(kept) {
            out.push(five);
        }
    };
    match n {
        5 => push_without(&[]),
        6 => {
            for a in 0..n {
                push_without(&[a]);
            }
        }
        _ => {
            for a in 0..n {
                for b in (a + 1)..n {
                    push_without(&[a, b]);
                }
            }
        }
    }
    out
}

/// Scores a single five-card hand.
pub fn score_five(cards: &[Card; 5]) -> HandScore {
    let mut ranks: [u8; 5] = cards.map(|c| c.rank.value());
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_order(&ranks);

    if let (true, Some(order)) = (flush, straight) {
        let category = if order[0] == 14 {
            Category::RoyalFlush
        } else {
            Category::StraightFlush
        };
        return HandScore {
            category,
            tiebreak: order.to_vec(),
        };
    }

    let groups = rank_groups(&ranks);
    let shape: Vec<u8> = groups.iter().map(|&(count, _)| count).collect();
    let lead: Vec<u8> = groups.iter().map(|&(_, rank)| rank).collect();

    let (category, tiebreak) = match shape.as_slice() {
        [4, 1] => (Category::FourOfAKind, lead),
        [3, 2] => (Category::FullHouse, lead),
        _ if flush => (Category::Flush, ranks.to_vec()),
        _ if straight.is_some() => (
            Category::Straight,
            straight.map(|o| o.to_vec()).unwrap_or_default(),
        ),
        [3, 1, 1] => (Category::ThreeOfAKind, lead),
        [2, 2, 1] => (Category::TwoPair, lead),
        [2, 1, 1, 1] => (Category::OnePair, lead),
        _ => (Category::HighCard, ranks.to_vec()),
    };
    HandScore { category, tiebreak }
}

pub fn compare_hands(a: &HandScore, b: &HandScore) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tiebreak.cmp(&b.tiebreak),
        ord => ord,
    }
}

/// Groups descending ranks into (count, rank) pairs ordered by count, then
/// rank, both descending.
fn rank_groups(ranks: &[u8; 5]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for &r in ranks {
        match groups.iter_mut().find(|(_, rank)| *rank == r) {
            Some(g) => g.0 += 1,
            None => groups.push((1, r)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));
    groups
}

/// For five descending ranks forming a straight, returns them in straight
/// order. The wheel plays its ace low: `[5, 4, 3, 2, 14]`.
fn straight_order(desc: &[u8; 5]) -> Option<[u8; 5]> {
    let distinct = desc.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if desc[0] - desc[4] == 4 {
        return Some(*desc);
    }
    if *desc == [14, 5, 4, 3, 2] {
        return Some([5, 4, 3, 2, 14]);
    }
    None
}
