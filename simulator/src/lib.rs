//! Batch simulator for the poker slot machine.
//!
//! Plays many independent sessions from a single seed and reports the observed
//! return to player. Each session owns its own machine, ledger and RNG, so any
//! session can be replayed from `(seed, session)`.

use pokerslots_execution::slots::{Deck, DeckPolicy, SlotsError, SlotsState};
use pokerslots_types::slots::{PaylineTable, MAX_SHUFFLES};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

pub mod defaults;
mod session;
mod stats;

pub use session::{run, run_session, SessionReport, StopReason};
pub use stats::{Stats, Summary};

/// Which payline catalog the machine plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaylineSet {
    #[default]
    Curated,
    Full,
}

impl PaylineSet {
    pub fn table(self) -> PaylineTable {
        match self {
            PaylineSet::Curated => PaylineTable::curated(),
            PaylineSet::Full => PaylineTable::full(),
        }
    }
}

/// Serialized form of [`DeckPolicy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckPolicySetting {
    #[default]
    Deplete,
    Replenish,
}

impl From<DeckPolicySetting> for DeckPolicy {
    fn from(value: DeckPolicySetting) -> Self {
        match value {
            DeckPolicySetting::Deplete => DeckPolicy::Deplete,
            DeckPolicySetting::Replenish => DeckPolicy::Replenish,
        }
    }
}

/// Simulator configuration, as read from YAML.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_sessions")]
    pub sessions: usize,
    #[serde(default = "default_spins_per_session")]
    pub spins_per_session: u32,
    #[serde(default = "default_initial_balance")]
    pub initial_balance: u64,
    #[serde(default = "default_bet")]
    pub bet: u64,
    #[serde(default = "default_bet_lines")]
    pub bet_lines: usize,
    #[serde(default = "default_wildcards")]
    pub wildcards: usize,
    #[serde(default = "default_shuffles")]
    pub shuffles: u8,
    #[serde(default)]
    pub deck_policy: DeckPolicySetting,
    #[serde(default)]
    pub paylines: PaylineSet,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            sessions: default_sessions(),
            spins_per_session: default_spins_per_session(),
            initial_balance: default_initial_balance(),
            bet: default_bet(),
            bet_lines: default_bet_lines(),
            wildcards: default_wildcards(),
            shuffles: default_shuffles(),
            deck_policy: DeckPolicySetting::default(),
            paylines: PaylineSet::default(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("bet_lines must be at most {max} for the {paylines:?} table (got {value})")]
    BetLinesOutOfRange {
        value: usize,
        max: usize,
        paylines: PaylineSet,
    },
    #[error("shuffles must be between 1 and {max} (got {value})", max = MAX_SHUFFLES)]
    InvalidShuffles { value: u8 },
}

/// Configuration checked and converted into machine types.
#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub seed: u64,
    pub sessions: usize,
    pub spins_per_session: u32,
    pub initial_balance: u64,
    pub bet: u64,
    pub bet_lines: usize,
    pub wildcards: usize,
    pub shuffles: u8,
    pub deck_policy: DeckPolicy,
    pub paylines: PaylineSet,
    pub log_level: Level,
}

impl Config {
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        ensure_nonzero("sessions", self.sessions as u64)?;
        ensure_nonzero("spins_per_session", self.spins_per_session.into())?;
        ensure_nonzero("initial_balance", self.initial_balance)?;
        ensure_nonzero("bet", self.bet)?;
        ensure_nonzero("bet_lines", self.bet_lines as u64)?;
        let max = self.paylines.table().len();
        if self.bet_lines > max {
            return Err(ConfigError::BetLinesOutOfRange {
                value: self.bet_lines,
                max,
                paylines: self.paylines,
            });
        }
        if self.shuffles == 0 || self.shuffles > MAX_SHUFFLES {
            return Err(ConfigError::InvalidShuffles {
                value: self.shuffles,
            });
        }
        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        Ok(ValidatedConfig {
            seed: self.seed,
            sessions: self.sessions,
            spins_per_session: self.spins_per_session,
            initial_balance: self.initial_balance,
            bet: self.bet,
            bet_lines: self.bet_lines,
            wildcards: self.wildcards,
            shuffles: self.shuffles,
            deck_policy: self.deck_policy.into(),
            paylines: self.paylines,
            log_level,
        })
    }
}

impl ValidatedConfig {
    /// A fresh machine with the configured deck, table and wager.
    pub fn new_state(&self) -> Result<SlotsState, SlotsError> {
        let mut state = SlotsState::new(Deck::new(self.wildcards), self.paylines.table())
            .with_policy(self.deck_policy);
        state.set_bet(self.bet)?;
        state.set_bet_lines(self.bet_lines)?;
        state.set_shuffles(self.shuffles)?;
        Ok(state)
    }
}

fn ensure_nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidNonZero { field, value });
    }
    Ok(())
}

fn default_seed() -> u64 {
    defaults::DEFAULT_SEED
}

fn default_sessions() -> usize {
    defaults::DEFAULT_SESSIONS
}

fn default_spins_per_session() -> u32 {
    defaults::DEFAULT_SPINS_PER_SESSION
}

fn default_initial_balance() -> u64 {
    defaults::DEFAULT_INITIAL_BALANCE
}

fn default_bet() -> u64 {
    defaults::DEFAULT_BET
}

fn default_bet_lines() -> usize {
    defaults::DEFAULT_BET_LINES
}

fn default_wildcards() -> usize {
    defaults::DEFAULT_WILDCARD_COUNT
}

fn default_shuffles() -> u8 {
    defaults::DEFAULT_SHUFFLES
}

fn default_log_level() -> String {
    defaults::DEFAULT_LOG_LEVEL.to_string()
}
