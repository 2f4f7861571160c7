use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A 52-card deck driven by a seeded ChaCha stream, so the same seed always
/// yields the same sequence of shuffles.
///
/// # Examples
///
/// ```
/// use trainer_engine::deck::Deck;
///
/// let mut deck = Deck::new_with_seed(42);
/// deck.shuffle();
/// let hole = deck.deal(2).expect("fresh deck has cards");
/// assert_eq!(hole.len(), 2);
/// assert_eq!(deck.remaining(), 50);
/// ```
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Restores all 52 cards in suit-major order.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    /// Restores all 52 cards and shuffles them with the deck's stream.
    pub fn shuffle(&mut self) {
        self.reset();
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the next `n` cards.
    ///
    /// # Errors
    ///
    /// [`GameError::DeckExhausted`] when fewer than `n` cards remain; the
    /// deck is left untouched in that case.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let dealt = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(dealt)
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
