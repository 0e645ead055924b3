//! Slot machine execution.
//!
//! A spin debits the wager, shuffles and deals a fresh [`Grid`] from the
//! [`Deck`], evaluates the hand on every active payline and credits the sum of
//! the line wins. All state is owned by [`SlotsState`] and a [`Ledger`]; nothing
//! is global.
//!
//! [`Grid`]: pokerslots_types::slots::Grid

pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod ledger;
pub mod logging;
pub mod paytable;

use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;
use pokerslots_types::slots::{Card, CardError, MAX_SHUFFLES};
use rand::{rngs::StdRng, Rng};
use thiserror::Error;

pub use deck::Deck;
pub use engine::{auto_spin, spin, AutoSpin, DeckPolicy, LineResult, SlotsState, SpinOutcome};
pub use evaluator::evaluate;
pub use ledger::{Balance, Ledger};
pub use paytable::{line_win, payout};

/// Uniform integer source used for shuffling.
pub trait RandomSource {
    /// A value uniform in `[0, max)`. Returns 0 when `max` is 0.
    fn next_bounded(&mut self, max: usize) -> usize;

    /// Fisher-Yates shuffle of `slice` in place.
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_bounded(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Deterministic random number generator.
///
/// Uses a SHA256 hash chain so that a spin can be replayed exactly from
/// `(seed, game_id, spin)`.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    /// Create a new RNG for one spin of one game.
    pub fn new(seed: u64, game_id: u64, spin: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&seed.to_be_bytes());
        hasher.update(&game_id.to_be_bytes());
        hasher.update(&spin.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            // Rehash to get more bytes
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        for byte in bytes.iter_mut() {
            *byte = self.next_byte();
        }
        u32::from_be_bytes(bytes)
    }
}

impl RandomSource for GameRng {
    fn next_bounded(&mut self, max: usize) -> usize {
        if max <= 1 {
            return 0;
        }
        let max = u32::try_from(max).unwrap_or(u32::MAX);
        // Rejection sampling for an unbiased draw
        let limit = u32::MAX - (u32::MAX % max);
        loop {
            let value = self.next_u32();
            if value < limit {
                return (value % max) as usize;
            }
        }
    }
}

impl RandomSource for StdRng {
    fn next_bounded(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        self.gen_range(0..max)
    }
}

/// Errors raised by deck handling and the spin engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotsError {
    #[error("invalid card: {0}")]
    InvalidCard(#[from] CardError),
    #[error("insufficient funds (required={required}, available={available})")]
    InsufficientFunds { required: u64, available: u64 },
    #[error("deck exhausted (needed={needed}, remaining={remaining})")]
    DeckExhausted { needed: usize, remaining: usize },
    #[error("deck is empty")]
    EmptyDeck,
    #[error("card not in deck: {0}")]
    CardNotInDeck(Card),
    #[error("shuffle count out of range (got={0}, max={max})", max = MAX_SHUFFLES)]
    InvalidShuffleCount(u8),
    #[error("invalid wager (bet={bet}, bet_lines={bet_lines}, max_lines={max_lines})")]
    InvalidWager {
        bet: u64,
        bet_lines: usize,
        max_lines: usize,
    },
}
