//! The shoe cards are dealt from.
//!
//! A fresh deck holds the 52 standard cards in suit-major order followed by the
//! wildcards. The top of the deck is the front of the sequence.

use pokerslots_types::slots::{
    Card, Grid, Suit, DEFAULT_WILDCARDS, GRID_SIZE, MAX_RANK, MAX_SHUFFLES, MIN_RANK,
    STANDARD_DECK_SIZE,
};
use std::fmt;

use super::{RandomSource, SlotsError};

/// Cards per line in the text rendering.
const CARDS_PER_LINE: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    wildcards: usize,
}

impl Deck {
    /// A full deck padded with `wildcards` wildcards.
    pub fn new(wildcards: usize) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(STANDARD_DECK_SIZE + wildcards),
            wildcards,
        };
        deck.reset();
        deck
    }

    /// A deck holding exactly `cards`, top first. [`Deck::reset`] rebuilds a
    /// full deck with as many wildcards as `cards` contained.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let wildcards = cards.iter().filter(|c| c.is_wildcard()).count();
        Self { cards, wildcards }
    }

    /// Restore the full composition in construction order.
    pub fn reset(&mut self) {
        self.cards.clear();
        for suit in Suit::STANDARD {
            for rank in MIN_RANK..=MAX_RANK {
                if let Ok(card) = Card::new(rank, suit) {
                    self.cards.push(card);
                }
            }
        }
        self.cards
            .extend(std::iter::repeat(Card::wildcard()).take(self.wildcards));
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Wildcards in a full deck.
    pub fn wildcards(&self) -> usize {
        self.wildcards
    }

    /// Remaining cards, top first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle the remaining cards `times` times in place.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R, times: u8) -> Result<(), SlotsError> {
        if times == 0 || times > MAX_SHUFFLES {
            return Err(SlotsError::InvalidShuffleCount(times));
        }
        for _ in 0..times {
            rng.shuffle(&mut self.cards);
        }
        Ok(())
    }

    /// Take the top card.
    pub fn deal(&mut self) -> Result<Card, SlotsError> {
        if self.cards.is_empty() {
            return Err(SlotsError::EmptyDeck);
        }
        Ok(self.cards.remove(0))
    }

    /// Take the first instance of `card`, wherever it sits.
    pub fn deal_card(&mut self, card: Card) -> Result<Card, SlotsError> {
        let position = self
            .cards
            .iter()
            .position(|c| *c == card)
            .ok_or(SlotsError::CardNotInDeck(card))?;
        Ok(self.cards.remove(position))
    }

    /// Deal a full grid off the top, column-major. Deals nothing if fewer than
    /// `GRID_SIZE` cards remain.
    pub fn deal_grid(&mut self) -> Result<Grid, SlotsError> {
        if self.cards.len() < GRID_SIZE {
            return Err(SlotsError::DeckExhausted {
                needed: GRID_SIZE,
                remaining: self.cards.len(),
            });
        }
        let mut dealt = [Card::wildcard(); GRID_SIZE];
        for (slot, card) in dealt.iter_mut().zip(self.cards.drain(..GRID_SIZE)) {
            *slot = card;
        }
        Ok(Grid::from_dealt(dealt))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(DEFAULT_WILDCARDS)
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.cards.chunks(CARDS_PER_LINE).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let text: Vec<String> = line.iter().map(Card::to_string).collect();
            f.write_str(&text.join(" "))?;
        }
        Ok(())
    }
}
