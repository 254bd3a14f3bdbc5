//! Rotation orientation of the mattress

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// State string for the orientation with the top end at the head of the bed
pub const ROTATION_TOP_HEAD: &str = "Top at Head";

/// State string for the orientation with the top end at the foot of the bed
pub const ROTATION_TOP_FOOT: &str = "Top at Foot";

/// Error type for rotation values outside the two fixed orientations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid rotation {value:?} (valid options: {}, {})", ROTATION_TOP_HEAD, ROTATION_TOP_FOOT)]
pub struct InvalidRotation {
    /// The rejected value
    pub value: String,
}

/// Which end of the mattress is at the top of the bed
///
/// Serialized as its state string ("Top at Head" / "Top at Foot"), the
/// form the host platform displays and persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rotation {
    /// Top end of the mattress at the head of the bed
    #[default]
    TopAtHead,
    /// Top end of the mattress at the foot of the bed
    TopAtFoot,
}

impl Rotation {
    /// The opposite orientation
    pub fn toggled(self) -> Self {
        match self {
            Rotation::TopAtHead => Rotation::TopAtFoot,
            Rotation::TopAtFoot => Rotation::TopAtHead,
        }
    }

    /// The state string for this orientation
    pub fn as_str(self) -> &'static str {
        match self {
            Rotation::TopAtHead => ROTATION_TOP_HEAD,
            Rotation::TopAtFoot => ROTATION_TOP_FOOT,
        }
    }
}

impl FromStr for Rotation {
    type Err = InvalidRotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROTATION_TOP_HEAD => Ok(Rotation::TopAtHead),
            ROTATION_TOP_FOOT => Ok(Rotation::TopAtFoot),
            _ => Err(InvalidRotation {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Rotation {
    type Error = InvalidRotation;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rotation> for String {
    fn from(rotation: Rotation) -> String {
        rotation.as_str().to_string()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled() {
        assert_eq!(Rotation::TopAtHead.toggled(), Rotation::TopAtFoot);
        assert_eq!(Rotation::TopAtFoot.toggled(), Rotation::TopAtHead);
        assert_eq!(Rotation::TopAtHead.toggled().toggled(), Rotation::TopAtHead);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Top at Head".parse::<Rotation>(), Ok(Rotation::TopAtHead));
        assert_eq!("Top at Foot".parse::<Rotation>(), Ok(Rotation::TopAtFoot));
    }

    #[test]
    fn test_parse_invalid() {
        let err = "Sideways".parse::<Rotation>().unwrap_err();
        assert_eq!(err.value, "Sideways");

        // Case-sensitive, like the host's state strings
        assert!("top at head".parse::<Rotation>().is_err());
    }

    #[test]
    fn test_default() {
        assert_eq!(Rotation::default(), Rotation::TopAtHead);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rotation::TopAtHead.to_string(), ROTATION_TOP_HEAD);
        assert_eq!(Rotation::TopAtFoot.to_string(), ROTATION_TOP_FOOT);
    }
}
