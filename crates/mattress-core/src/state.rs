//! The mattress state aggregate
//!
//! MattressState owns the four mutable fields of one tracked mattress and
//! every operation that changes them. Each trigger surface (service call,
//! button press, restored snapshot) funnels into these operations; none of
//! them reaches into individual entity values directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::snapshot::parse_restored_date;
use crate::{InvalidRotation, MattressConfig, Rotation, StateSnapshot};

/// Error type for side values outside the configured pair
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid side {value:?} (valid options: {side_1}, {side_2})")]
pub struct InvalidSide {
    /// The rejected value
    pub value: String,
    /// First configured side label
    pub side_1: String,
    /// Second configured side label
    pub side_2: String,
}

/// The four exposed values of one instance, one sensor entity each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateField {
    /// Which side is currently facing up
    CurrentSide,
    /// Date of the most recent flip
    LastFlipped,
    /// Which end is currently at the top of the bed
    CurrentRotation,
    /// Date of the most recent rotation
    LastRotated,
}

impl StateField {
    /// All four fields, in entity-listing order
    pub const ALL: [StateField; 4] = [
        StateField::CurrentSide,
        StateField::LastFlipped,
        StateField::CurrentRotation,
        StateField::LastRotated,
    ];
}

/// State of one tracked mattress
///
/// Holds the instance configuration plus the four mutable fields. A flip
/// always moves `current_side` and `last_flipped` together, a rotation
/// always moves `current_rotation` and `last_rotated` together; the pairs
/// never diverge within one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MattressState {
    config: MattressConfig,
    current_side: String,
    current_rotation: Rotation,
    last_flipped: Option<NaiveDate>,
    last_rotated: Option<NaiveDate>,
}

impl MattressState {
    /// Create the initial state: side 1 up, top at head, no recorded dates
    pub fn new(config: MattressConfig) -> Self {
        let current_side = config.side_1_name.clone();
        Self {
            config,
            current_side,
            current_rotation: Rotation::default(),
            last_flipped: None,
            last_rotated: None,
        }
    }

    /// The instance configuration
    pub fn config(&self) -> &MattressConfig {
        &self.config
    }

    /// The side currently facing up
    pub fn current_side(&self) -> &str {
        &self.current_side
    }

    /// The current rotation orientation
    pub fn current_rotation(&self) -> Rotation {
        self.current_rotation
    }

    /// Date of the most recent flip, if any
    pub fn last_flipped(&self) -> Option<NaiveDate> {
        self.last_flipped
    }

    /// Date of the most recent rotation, if any
    pub fn last_rotated(&self) -> Option<NaiveDate> {
        self.last_rotated
    }

    /// Turn the mattress over to its other side on `on`
    pub fn flip(&mut self, on: NaiveDate) {
        self.current_side = self.config.other_side(&self.current_side).to_string();
        self.last_flipped = Some(on);
    }

    /// Swap which end is at the top of the bed on `on`
    pub fn rotate(&mut self, on: NaiveDate) {
        self.current_rotation = self.current_rotation.toggled();
        self.last_rotated = Some(on);
    }

    /// Set the side facing up to a specific configured label
    ///
    /// Rejects anything outside the configured pair without touching any
    /// field. Setting the already-current side is a no-op for the side but
    /// still records `on` as the flip date, matching the unconditional
    /// date update of [`flip`](Self::flip).
    pub fn set_side(&mut self, side: &str, on: NaiveDate) -> Result<(), InvalidSide> {
        if !self.config.is_valid_side(side) {
            return Err(InvalidSide {
                value: side.to_string(),
                side_1: self.config.side_1_name.clone(),
                side_2: self.config.side_2_name.clone(),
            });
        }
        self.current_side = side.to_string();
        self.last_flipped = Some(on);
        Ok(())
    }

    /// Set the rotation to a specific orientation by its state string
    ///
    /// Same contract as [`set_side`](Self::set_side): invalid values change
    /// nothing, and a value-equal set still records the rotation date.
    pub fn set_rotation(&mut self, rotation: &str, on: NaiveDate) -> Result<(), InvalidRotation> {
        self.current_rotation = rotation.parse()?;
        self.last_rotated = Some(on);
        Ok(())
    }

    /// Adopt persisted values from a snapshot, field by field
    ///
    /// Malformed values are logged and skipped without touching their
    /// field; the other fields are still adopted. Never fails the caller.
    /// Side strings are adopted as persisted, even outside the configured
    /// pair; the next flip toggles such a value back to side 1.
    pub fn restore(&mut self, snapshot: &StateSnapshot) {
        if let Some(side) = snapshot.present(StateField::CurrentSide) {
            self.current_side = side.to_string();
        }
        if let Some(raw) = snapshot.present(StateField::CurrentRotation) {
            match raw.parse::<Rotation>() {
                Ok(rotation) => self.current_rotation = rotation,
                Err(err) => warn!(value = raw, %err, "could not restore rotation state"),
            }
        }
        if let Some(raw) = snapshot.present(StateField::LastFlipped) {
            if let Some(date) = parse_restored_date(StateField::LastFlipped, raw) {
                self.last_flipped = Some(date);
            }
        }
        if let Some(raw) = snapshot.present(StateField::LastRotated) {
            if let Some(date) = parse_restored_date(StateField::LastRotated, raw) {
                self.last_rotated = Some(date);
            }
        }
    }
}
