//! Pokerslots execution layer.
//!
//! This crate contains the deterministic spin logic: the deck, the wildcard-aware
//! hand evaluator, the paytable and the spin engine that ties them to a credit
//! [`Ledger`](slots::Ledger).
//!
//! ## Determinism requirements
//! - Do not use wall-clock time inside execution.
//! - Only derive randomness from the [`RandomSource`](slots::RandomSource) handed
//!   to a spin. [`GameRng`] replays a spin exactly from `(seed, game_id, spin)`.
//!
//! ## Minimal spin (example)
//! ```rust
//! use pokerslots_execution::slots::{spin, Balance, GameRng, SlotsState};
//!
//! let mut state = SlotsState::default();
//! let mut ledger = Balance::default();
//! let mut rng = GameRng::new(42, 1, state.spins());
//! let outcome = spin(&mut state, &mut ledger, &mut rng).expect("spin");
//! assert_eq!(outcome.wagered, 1);
//! ```

pub mod slots;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use slots::{
    auto_spin, evaluate, payout, spin, Balance, Deck, DeckPolicy, GameRng, Ledger,
    RandomSource, SlotsError, SlotsState, SpinOutcome,
};
