//! CLI defaults loaded from environment variables.
//!
//! Command-line flags take precedence over these values.

use anyhow::{Context, Result};
use premia_core::constants::{DEFAULT_DECAY_PERCENT, DEFAULT_SAMPLES_PER_UNIT, SECONDS_PER_DAY};

#[derive(Clone, Debug, PartialEq)]
pub struct CliConfig {
    /// Per-period decay in percent.
    pub decay_percent: f64,
    /// Length of one decay period in seconds.
    pub period_secs: f64,
    /// Samples taken per chart unit.
    pub samples_per_unit: u32,
    /// Log level filter string (e.g. "info", "premia_decay=debug").
    pub log_level: String,
    /// Log output format ("text" or "json").
    pub log_format: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            decay_percent: DEFAULT_DECAY_PERCENT,
            period_secs: SECONDS_PER_DAY as f64,
            samples_per_unit: DEFAULT_SAMPLES_PER_UNIT,
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from `PREMIA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let decay_percent = match lookup("PREMIA_DECAY_PERCENT") {
            Some(v) => v
                .parse()
                .context("PREMIA_DECAY_PERCENT must be a number between 0 and 100")?,
            None => defaults.decay_percent,
        };

        let period_secs = match lookup("PREMIA_PERIOD_SECS") {
            Some(v) => v
                .parse()
                .context("PREMIA_PERIOD_SECS must be a positive number")?,
            None => defaults.period_secs,
        };

        let samples_per_unit = match lookup("PREMIA_SAMPLES_PER_UNIT") {
            Some(v) => v
                .parse()
                .context("PREMIA_SAMPLES_PER_UNIT must be a positive integer")?,
            None => defaults.samples_per_unit,
        };

        let log_level = lookup("PREMIA_LOG_LEVEL").unwrap_or(defaults.log_level);
        let log_format = lookup("PREMIA_LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            decay_percent,
            period_secs,
            samples_per_unit,
            log_level,
            log_format,
        })
    }
}
