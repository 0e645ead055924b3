//! Common types for the poker slot machine.
//!
//! Everything here is plain data: cards, hand results, paylines and the dealt
//! grid, each with a binary encoding. Game logic lives in `pokerslots-execution`.

pub mod slots;
