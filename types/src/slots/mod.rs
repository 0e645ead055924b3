//! Slot machine domain types.
//!
//! Defines the card model, hand categories, payline catalog and grid used by the
//! execution layer and by hosts presenting spin results.

mod card;
mod constants;
mod grid;
mod hand;
mod payline;

pub use card::*;
pub use constants::*;
pub use grid::*;
pub use hand::*;
pub use payline::*;
