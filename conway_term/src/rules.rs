// rules.rs - Birth/survival rule sets for life-like automata

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Reasons a rule string fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("incorrect rule, must be b<nums>/s<nums>: missing '/' separator")]
    MissingSeparator,

    #[error("incorrect rule, must be b<nums>/s<nums>: more than one '/' separator")]
    ExtraSeparator,

    #[error("incorrect rule, must be b<nums>/s<nums>: segment must start with '{prefix}'")]
    MissingPrefix { prefix: char },

    #[error("incorrect rule, must be b<nums>/s<nums>: '{found}' is not a digit")]
    NotADigit { found: char },
}

/// Neighbour counts that give birth to a dead cell or keep a live one alive.
///
/// Counts keep the order and multiplicity they were written with, so
/// `b33/s2` holds two `3` entries. A `9` parses but can never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleSet {
    born: Vec<u8>,
    survive: Vec<u8>,
}

impl RuleSet {
    /// Parse `b<digits>/s<digits>`, e.g. `b3/s23`.
    pub fn parse(rule: &str) -> Result<Self, RuleParseError> {
        let (born, survive) = rule.split_once('/').ok_or(RuleParseError::MissingSeparator)?;
        if survive.contains('/') {
            return Err(RuleParseError::ExtraSeparator);
        }

        Ok(Self {
            born:    parse_segment(born, 'b')?,
            survive: parse_segment(survive, 's')?,
        })
    }

    /// Classic Life, b3/s23.
    pub fn conway() -> Self {
        Self { born: vec![3], survive: vec![2, 3] }
    }

    /// Day & Night, b3678/s34678.
    pub fn day_and_night() -> Self {
        Self { born: vec![3, 6, 7, 8], survive: vec![3, 4, 6, 7, 8] }
    }

    /// Seeds, b2/s. Every live cell dies each generation.
    pub fn seeds() -> Self {
        Self { born: vec![2], survive: vec![] }
    }

    pub fn born(&self) -> &[u8] {
        &self.born
    }

    pub fn survive(&self) -> &[u8] {
        &self.survive
    }

    /// State of a cell in the next generation.
    ///
    /// Birth wins over survival: a count listed in `born` makes the cell
    /// alive whatever its current state.
    pub fn next_state(&self, alive: bool, neighbours: u8) -> bool {
        self.born.contains(&neighbours) || (alive && self.survive.contains(&neighbours))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

impl FromStr for RuleSet {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("b")?;
        for count in &self.born {
            write!(f, "{count}")?;
        }
        f.write_str("/s")?;
        for count in &self.survive {
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

fn parse_segment(segment: &str, prefix: char) -> Result<Vec<u8>, RuleParseError> {
    let digits = segment
        .strip_prefix(prefix)
        .ok_or(RuleParseError::MissingPrefix { prefix })?;

    digits
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => Ok(d as u8),
            None    => Err(RuleParseError::NotADigit { found: c }),
        })
        .collect()
}
