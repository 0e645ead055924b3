/// Rows visible on each reel.
pub const ROWS: usize = 3;

/// Reels on the machine. A poker hand is one card per reel.
pub const COLUMNS: usize = 5;

/// Cards in one evaluated hand.
pub const HAND_SIZE: usize = COLUMNS;

/// Cells on the grid, and therefore cards dealt per spin.
pub const GRID_SIZE: usize = ROWS * COLUMNS;

/// Every possible payline (`ROWS ^ COLUMNS`).
pub const TOTAL_BET_LINES: usize = 243;

/// Standard cards in a deck (4 suits x 13 ranks).
pub const STANDARD_DECK_SIZE: usize = 52;

/// Wildcards padded onto a fresh deck. Enough for a full board of wildcards plus
/// one extra reel.
pub const DEFAULT_WILDCARDS: usize = GRID_SIZE + COLUMNS;

/// Rank sentinel carried by every wildcard. Never compared as a real rank.
pub const WILDCARD_RANK: u8 = 1;

/// Lowest standard rank.
pub const MIN_RANK: u8 = 2;

/// Face card and ace ranks.
pub const JACK: u8 = 11;
pub const QUEEN: u8 = 12;
pub const KING: u8 = 13;
pub const ACE: u8 = 14;

/// Highest standard rank (ace high).
pub const MAX_RANK: u8 = ACE;

/// Default number of shuffle passes before each deal.
pub const SHUFFLES: u8 = 3;

/// Upper bound on shuffle passes accepted by the deck.
pub const MAX_SHUFFLES: u8 = 10;

/// Default game values for a new machine.
pub const INITIAL_BET_LINES: usize = 1;
pub const INITIAL_BET: u64 = 1;
pub const INITIAL_BALANCE: u64 = 1_000;
