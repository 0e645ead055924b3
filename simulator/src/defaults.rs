use pokerslots_types::slots::{
    DEFAULT_WILDCARDS, INITIAL_BALANCE, INITIAL_BET, INITIAL_BET_LINES, SHUFFLES,
};

pub const DEFAULT_SEED: u64 = 0;
pub const DEFAULT_SESSIONS: usize = 100;
pub const DEFAULT_SPINS_PER_SESSION: u32 = 1_000;
pub const DEFAULT_INITIAL_BALANCE: u64 = INITIAL_BALANCE;
pub const DEFAULT_BET: u64 = INITIAL_BET;
pub const DEFAULT_BET_LINES: usize = INITIAL_BET_LINES;
pub const DEFAULT_WILDCARD_COUNT: usize = DEFAULT_WILDCARDS;
pub const DEFAULT_SHUFFLES: u8 = SHUFFLES;
pub const DEFAULT_LOG_LEVEL: &str = "warn";
