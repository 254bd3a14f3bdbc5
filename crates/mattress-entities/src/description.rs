//! Entity naming and device metadata
//!
//! All six entities of an instance share one naming scheme: display name
//! "{mattress} {label}", unique id "{entry_id}_{label_slug}", and the
//! instance's device. A single description struct plus free functions
//! replaces per-entity base classes.

use mattress_core::{MattressConfig, StateField, DOMAIN};
use serde::Serialize;

use crate::button::ButtonKind;

/// Manufacturer recorded on the instance's device
pub const MANUFACTURER: &str = "Custom";

/// Device metadata shared by all entities of one instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// (domain, entry_id) pair identifying the device
    pub identifiers: (String, String),
    /// Device display name (the mattress name)
    pub name: String,
    /// Manufacturer label
    pub manufacturer: String,
}

/// Naming and registry metadata for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDescription {
    /// Display name, "{mattress} {label}"
    pub name: String,
    /// Stable unique id, "{entry_id}_{label_slug}"
    pub unique_id: String,
    /// Device this entity belongs to
    pub device: DeviceInfo,
}

/// Display label for a sensor field
pub fn sensor_label(field: StateField) -> &'static str {
    match field {
        StateField::CurrentSide => "Current Side",
        StateField::LastFlipped => "Last Flipped",
        StateField::CurrentRotation => "Current Rotation",
        StateField::LastRotated => "Last Rotated",
    }
}

/// Description for one of the four sensors
pub fn sensor_description(
    config: &MattressConfig,
    entry_id: &str,
    field: StateField,
) -> EntityDescription {
    describe(config, entry_id, sensor_label(field))
}

/// Description for one of the two buttons
pub fn button_description(
    config: &MattressConfig,
    entry_id: &str,
    kind: ButtonKind,
) -> EntityDescription {
    describe(config, entry_id, kind.label())
}

fn describe(config: &MattressConfig, entry_id: &str, label: &str) -> EntityDescription {
    EntityDescription {
        name: format!("{} {}", config.mattress_name, label),
        unique_id: format!("{}_{}", entry_id, label.to_lowercase().replace(' ', "_")),
        device: DeviceInfo {
            identifiers: (DOMAIN.to_string(), entry_id.to_string()),
            name: config.mattress_name.clone(),
            manufacturer: MANUFACTURER.to_string(),
        },
    }
}
