//! Tunables for one game session, read from TOML.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{SECS_PER_MINUTE, Seconds};
use crate::commands::DEFAULT_RETRY_INTERVAL;
use crate::inn::{DEFAULT_CHARISMA, DEFAULT_MONEY, DEFAULT_REBUKE_LIMIT};
use crate::scheduler::DEFAULT_INBOX_CAPACITY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Inclusive range of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondsRange {
    pub min: Seconds,
    pub max: Seconds,
}

impl SecondsRange {
    pub const fn new(min: Seconds, max: Seconds) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Seconds {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed seed for reproducible sessions. Drawn from entropy when unset.
    pub seed: Option<u64>,
    pub start_hour: u64,
    /// Seconds a busy patron waits before trying to leave again.
    pub retry_interval: Seconds,
    /// Patrons already arriving when the game starts.
    pub starters: usize,
    pub arrival: SecondsRange,
    pub stay: SecondsRange,
    pub hero_money: u32,
    pub hero_charisma: i32,
    pub rebuke_limit: u32,
    pub inbox_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_hour: 6,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            starters: 2,
            arrival: SecondsRange::new(3 * SECS_PER_MINUTE, 60 * SECS_PER_MINUTE),
            stay: SecondsRange::new(10 * SECS_PER_MINUTE, 30 * SECS_PER_MINUTE),
            hero_money: DEFAULT_MONEY,
            hero_charisma: DEFAULT_CHARISMA,
            rebuke_limit: DEFAULT_REBUKE_LIMIT,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry_interval == 0 {
            return Err(ConfigError::Invalid(
                "retry_interval must be at least 1 second".into(),
            ));
        }
        if self.start_hour >= 24 {
            return Err(ConfigError::Invalid("start_hour must be below 24".into()));
        }
        for (field, range) in [("arrival", self.arrival), ("stay", self.stay)] {
            if range.min > range.max {
                return Err(ConfigError::Invalid(format!(
                    "{field}: min {} exceeds max {}",
                    range.min, range.max
                )));
            }
        }
        if self.rebuke_limit == 0 {
            return Err(ConfigError::Invalid("rebuke_limit must be at least 1".into()));
        }
        if self.inbox_capacity == 0 {
            return Err(ConfigError::Invalid("inbox_capacity must be at least 1".into()));
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
