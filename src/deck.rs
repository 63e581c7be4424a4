//! Deck of 48 cards (12 groups × 4 variants), drawn without replacement.

use crate::card::{Card, Group, VARIANTS_PER_GROUP};
use crate::rng::RngState;

/// Cards in one full deck.
pub const DECK_SIZE: usize = Group::ALL.len() * VARIANTS_PER_GROUP as usize;

#[derive(Debug, Clone, Default)]
pub struct Deck {
    draw: Vec<Card>,
}

impl Deck {
    /// Full, shuffled deck.
    pub fn new(rng: &mut RngState) -> Self {
        let mut deck = Self::default();
        deck.reset(rng);
        deck
    }

    /// Rebuild all 48 cards and shuffle them.
    pub fn reset(&mut self, rng: &mut RngState) {
        self.draw.clear();
        self.draw.reserve(DECK_SIZE);
        for group in Group::ALL {
            for variant in 0..VARIANTS_PER_GROUP {
                self.draw.push(Card::new(group, variant));
            }
        }
        rng.shuffle(&mut self.draw);
    }

    /// Take the top card; an empty deck is reshuffled from full first.
    pub fn draw(&mut self, rng: &mut RngState) -> Card {
        loop {
            if let Some(card) = self.draw.pop() {
                return card;
            }
            log::debug!("deck exhausted, reshuffling");
            self.reset(rng);
        }
    }

    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn fresh_deck_is_full() {
        let mut rng = RngState::from_seed(3);
        let deck = Deck::new(&mut rng);
        assert_eq!(deck.remaining(), DECK_SIZE);
        assert_eq!(DECK_SIZE, 48);
    }

    #[test]
    fn every_window_of_48_draws_is_a_full_deck() {
        let mut rng = RngState::from_seed(42);
        let mut deck = Deck::new(&mut rng);
        let draws: Vec<Card> = (0..200).map(|_| deck.draw(&mut rng)).collect();
        for window in draws.chunks(DECK_SIZE) {
            let mut seen: HashMap<Card, usize> = HashMap::new();
            for card in window {
                *seen.entry(*card).or_default() += 1;
            }
            assert!(seen.values().all(|&n| n == 1), "duplicate inside one shuffle cycle");
            if window.len() == DECK_SIZE {
                assert_eq!(seen.len(), DECK_SIZE);
            }
        }
        // 200 draws = four complete cycles plus 8 cards.
        let mut totals: HashMap<Card, usize> = HashMap::new();
        for card in &draws[..4 * DECK_SIZE] {
            *totals.entry(*card).or_default() += 1;
        }
        assert_eq!(totals.len(), DECK_SIZE);
        assert!(totals.values().all(|&n| n == 4));
    }

    #[test]
    fn draw_from_empty_reshuffles() {
        let mut rng = RngState::from_seed(9);
        let mut deck = Deck::default();
        assert!(deck.is_empty());
        let _ = deck.draw(&mut rng);
        assert_eq!(deck.remaining(), DECK_SIZE - 1);
    }
}
