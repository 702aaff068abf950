// config.rs - Startup settings and their validation

use std::time::Duration;

use thiserror::Error;

use crate::grid::EdgePolicy;
use crate::rules::{RuleParseError, RuleSet};

pub const MAX_DIMENSION: i64 = 1000;

pub const DEFAULT_LENGTH:   i64 = 50;
pub const DEFAULT_WIDTH:    i64 = 50;
pub const DEFAULT_INTERVAL: i64 = 100;                 // milliseconds
pub const DEFAULT_RULE:     &str = "b3/s23";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("length must be from 1 to {max}, got {0}", max = MAX_DIMENSION)]
    Length(i64),

    #[error("width must be from 1 to {max}, got {0}", max = MAX_DIMENSION)]
    Width(i64),

    #[error("incorrect interval {0}, must not be negative")]
    Interval(i64),

    #[error(transparent)]
    Rule(#[from] RuleParseError),
}

/// Options as given on the command line, not yet checked.
///
/// Numbers are signed so that negative input is reported by
/// [`Settings::validate`] rather than lost in conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub length:      i64,
    pub width:       i64,
    pub interval_ms: i64,
    pub rule:        String,
    pub edges:       EdgePolicy,
    pub seed:        Option<u64>,
    pub generations: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            length:      DEFAULT_LENGTH,
            width:       DEFAULT_WIDTH,
            interval_ms: DEFAULT_INTERVAL,
            rule:        DEFAULT_RULE.to_string(),
            edges:       EdgePolicy::default(),
            seed:        None,
            generations: None,
        }
    }
}

impl Settings {
    /// Check bounds, then parse the rule.
    pub fn validate(self) -> Result<Config, ConfigError> {
        let interval = u64::try_from(self.interval_ms).map_err(|_| ConfigError::Interval(self.interval_ms))?;
        let length = dimension(self.length).ok_or(ConfigError::Length(self.length))?;
        let width = dimension(self.width).ok_or(ConfigError::Width(self.width))?;
        let rule = RuleSet::parse(&self.rule)?;

        Ok(Config {
            length,
            width,
            interval: Duration::from_millis(interval),
            rule,
            edges: self.edges,
            seed: self.seed,
            generations: self.generations,
        })
    }
}

fn dimension(value: i64) -> Option<usize> {
    (1..=MAX_DIMENSION)
        .contains(&value)
        .then(|| value as usize)
}

/// Validated simulation parameters, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Columns.
    pub length: usize,
    /// Rows.
    pub width: usize,
    /// Pause before each generation is computed.
    pub interval: Duration,
    pub rule: RuleSet,
    pub edges: EdgePolicy,
    /// Seed for the initial random fill; fresh entropy when `None`.
    pub seed: Option<u64>,
    /// Stop after this many generations; run forever when `None`.
    pub generations: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length:      DEFAULT_LENGTH as usize,
            width:       DEFAULT_WIDTH as usize,
            interval:    Duration::from_millis(DEFAULT_INTERVAL as u64),
            rule:        RuleSet::conway(),
            edges:       EdgePolicy::default(),
            seed:        None,
            generations: None,
        }
    }
}
