//! One-time instance configuration
//!
//! A mattress is configured once with a display name and the labels of its
//! two sides; none of these can be edited afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default label for the first side
pub const DEFAULT_SIDE_1_NAME: &str = "Side A";

/// Default label for the second side
pub const DEFAULT_SIDE_2_NAME: &str = "Side B";

/// Errors from validating a new configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("mattress name cannot be empty")]
    EmptyName,

    #[error("side names cannot be empty")]
    EmptySideName,

    #[error("side names must be distinct, got {0:?} for both sides")]
    DuplicateSideNames(String),
}

/// Configuration of one tracked mattress, immutable after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MattressConfig {
    /// Display label for the mattress and its device
    pub mattress_name: String,

    /// Label of the first side; the side a new instance starts on
    #[serde(default = "default_side_1")]
    pub side_1_name: String,

    /// Label of the second side
    #[serde(default = "default_side_2")]
    pub side_2_name: String,
}

fn default_side_1() -> String {
    DEFAULT_SIDE_1_NAME.to_string()
}

fn default_side_2() -> String {
    DEFAULT_SIDE_2_NAME.to_string()
}

impl MattressConfig {
    /// Create a validated configuration
    pub fn new(
        mattress_name: impl Into<String>,
        side_1_name: impl Into<String>,
        side_2_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            mattress_name: mattress_name.into(),
            side_1_name: side_1_name.into(),
            side_2_name: side_2_name.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration with the default side labels
    pub fn with_default_sides(mattress_name: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(mattress_name, DEFAULT_SIDE_1_NAME, DEFAULT_SIDE_2_NAME)
    }

    /// Check the configuration invariants: non-empty labels, distinct sides
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mattress_name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.side_1_name.trim().is_empty() || self.side_2_name.trim().is_empty() {
            return Err(ConfigError::EmptySideName);
        }
        if self.side_1_name == self.side_2_name {
            return Err(ConfigError::DuplicateSideNames(self.side_1_name.clone()));
        }
        Ok(())
    }

    /// Both side labels, in configured order
    pub fn side_names(&self) -> (&str, &str) {
        (&self.side_1_name, &self.side_2_name)
    }

    /// Whether `side` is one of the two configured labels
    pub fn is_valid_side(&self, side: &str) -> bool {
        side == self.side_1_name || side == self.side_2_name
    }

    /// The label a flip moves to from `current`
    ///
    /// Anything other than side 1 (including a foreign restored value)
    /// toggles to side 1.
    pub fn other_side(&self, current: &str) -> &str {
        if current == self.side_1_name {
            &self.side_2_name
        } else {
            &self.side_1_name
        }
    }
}
