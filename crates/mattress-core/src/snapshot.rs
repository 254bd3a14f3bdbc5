//! Persisted per-entity state strings
//!
//! The host platform persists each entity's last known state as an opaque
//! string and hands it back after a restart. A StateSnapshot collects the
//! raw strings for the four sensor entities of one instance; field-level
//! parsing happens during [`MattressState::restore`].
//!
//! [`MattressState::restore`]: crate::MattressState::restore

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::StateField;

/// Marker the host stores for an entity whose state was never set
pub const STATE_UNKNOWN: &str = "unknown";

/// Marker the host stores for an entity that was unavailable
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// Raw persisted state strings for the four sensor entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Last persisted state of the current-side sensor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_side: Option<String>,

    /// Last persisted state of the current-rotation sensor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_rotation: Option<String>,

    /// Last persisted state of the last-flipped sensor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_flipped: Option<String>,

    /// Last persisted state of the last-rotated sensor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_rotated: Option<String>,
}

impl StateSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the persisted string for one sensor field
    pub fn insert(&mut self, field: StateField, raw: impl Into<String>) {
        let slot = match field {
            StateField::CurrentSide => &mut self.current_side,
            StateField::CurrentRotation => &mut self.current_rotation,
            StateField::LastFlipped => &mut self.last_flipped,
            StateField::LastRotated => &mut self.last_rotated,
        };
        *slot = Some(raw.into());
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, field: StateField, raw: impl Into<String>) -> Self {
        self.insert(field, raw);
        self
    }

    /// The recorded string for `field`, with absent markers filtered out
    pub fn present(&self, field: StateField) -> Option<&str> {
        let raw = match field {
            StateField::CurrentSide => self.current_side.as_deref(),
            StateField::CurrentRotation => self.current_rotation.as_deref(),
            StateField::LastFlipped => self.last_flipped.as_deref(),
            StateField::LastRotated => self.last_rotated.as_deref(),
        }?;
        if raw.is_empty() || raw == STATE_UNKNOWN || raw == STATE_UNAVAILABLE {
            None
        } else {
            Some(raw)
        }
    }
}

/// Parse a persisted date string, logging and discarding malformed input
pub(crate) fn parse_restored_date(field: StateField, raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(?field, value = raw, %err, "could not restore date state");
            None
        }
    }
}
