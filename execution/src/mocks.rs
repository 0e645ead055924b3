//! Test helpers for building hands, decks and machines.

use crate::slots::{Deck, GameRng, RandomSource, SlotsState};
use pokerslots_types::slots::{Card, HAND_SIZE};

/// Parse five space-separated cards, e.g. `hand("10S JS QS KS AS")`. A lone
/// `J` is a wildcard.
pub fn hand(text: &str) -> [Card; HAND_SIZE] {
    let cards = cards(text);
    cards
        .try_into()
        .unwrap_or_else(|cards: Vec<Card>| panic!("expected {HAND_SIZE} cards, got {}", cards.len()))
}

/// Parse any number of space-separated cards.
pub fn cards(text: &str) -> Vec<Card> {
    text.split_whitespace()
        .map(|card| card.parse().expect("Failed to parse card"))
        .collect()
}

/// Deterministic RNG for a test game.
pub fn create_rng(seed: u64) -> GameRng {
    GameRng::new(seed, 0, 0)
}

/// Default machine with the given wager.
pub fn create_state(bet: u64, bet_lines: usize) -> SlotsState {
    let mut state = SlotsState::default();
    state.set_bet(bet).expect("Failed to set bet");
    state.set_bet_lines(bet_lines).expect("Failed to set bet lines");
    state
}

/// A deck whose first grid shows a spade royal flush across the middle row.
/// Pair it with [`IdentityRng`] so shuffling leaves it in place.
pub fn stacked_deck() -> Deck {
    Deck::from_cards(cards(
        "2H 10S 3D \
         4H JS 5D \
         6H QS 7D \
         8H KS 9D \
         2C AS 3C \
         4C 5C 6C",
    ))
}

/// Random source whose Fisher-Yates shuffle is the identity permutation.
pub struct IdentityRng;

impl RandomSource for IdentityRng {
    fn next_bounded(&mut self, max: usize) -> usize {
        max.saturating_sub(1)
    }
}
