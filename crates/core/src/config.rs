//! Session configuration
//!
//! Everything a session needs before the first tick: RNG seed, starting level
//! and auto-repeat timing. Values come from defaults or from `TETRIS_*`
//! environment variables.

use thiserror::Error;

use crate::input::TimingConfig;
use crate::types::{MAX_START_LEVEL, MIN_START_LEVEL};

pub const ENV_SEED: &str = "TETRIS_SEED";
pub const ENV_START_LEVEL: &str = "TETRIS_START_LEVEL";
pub const ENV_DAS_MS: &str = "TETRIS_DAS_MS";
pub const ENV_ARR_MS: &str = "TETRIS_ARR_MS";
pub const ENV_SOFT_DROP_DAS_MS: &str = "TETRIS_SOFT_DROP_DAS_MS";
pub const ENV_SOFT_DROP_ARR_MS: &str = "TETRIS_SOFT_DROP_ARR_MS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "starting level {level} is outside {min}..={max}",
        min = MIN_START_LEVEL,
        max = MAX_START_LEVEL
    )]
    StartLevelOutOfRange { level: u32 },

    #[error("{name} repeat interval must be non-zero (got {value_ms}ms)")]
    InvalidRepeatInterval { name: &'static str, value_ms: u32 },

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnvValue { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u32,
    pub starting_level: u32,
    pub timing: TimingConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            starting_level: MIN_START_LEVEL,
            timing: TimingConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Read the configuration from the process environment.
    ///
    /// Unset variables keep their defaults; set but unparseable ones are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let timing = defaults.timing;

        let read = |key: &'static str, default: u32| -> Result<u32> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnvValue { key, value: raw }),
            }
        };

        Ok(Self {
            seed: read(ENV_SEED, defaults.seed)?,
            starting_level: read(ENV_START_LEVEL, defaults.starting_level)?,
            timing: TimingConfig {
                das_us: ms_to_us(read(ENV_DAS_MS, timing.das_us / 1000)?),
                arr_us: ms_to_us(read(ENV_ARR_MS, timing.arr_us / 1000)?),
                soft_drop_das_us: ms_to_us(read(
                    ENV_SOFT_DROP_DAS_MS,
                    timing.soft_drop_das_us / 1000,
                )?),
                soft_drop_arr_us: ms_to_us(read(
                    ENV_SOFT_DROP_ARR_MS,
                    timing.soft_drop_arr_us / 1000,
                )?),
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_START_LEVEL..=MAX_START_LEVEL).contains(&self.starting_level) {
            return Err(ConfigError::StartLevelOutOfRange {
                level: self.starting_level,
            });
        }
        if self.timing.arr_us == 0 {
            return Err(ConfigError::InvalidRepeatInterval {
                name: "horizontal",
                value_ms: 0,
            });
        }
        if self.timing.soft_drop_arr_us == 0 {
            return Err(ConfigError::InvalidRepeatInterval {
                name: "soft drop",
                value_ms: 0,
            });
        }
        Ok(())
    }
}

fn ms_to_us(ms: u32) -> u32 {
    ms.saturating_mul(1000)
}
