//! Sensor surface for the four exposed values
//!
//! Sensors are read-only to the platform: they render the aggregate's
//! current fields as state strings and collect the host's persisted
//! strings back into a snapshot on restart.

use std::sync::Arc;

use chrono::NaiveDate;
use mattress_core::{Context, MattressState, StateField, StateSnapshot, STATE_UNKNOWN};
use mattress_registry::MattressInstance;
use tracing::debug;

use crate::description::{sensor_description, EntityDescription};

/// Host-side classification of a sensor's state value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorDeviceClass {
    /// State is an ISO-8601 calendar date
    Date,
}

/// One of the four read-only sensors of an instance
pub struct MattressSensor {
    instance: Arc<MattressInstance>,
    field: StateField,
    description: EntityDescription,
}

impl MattressSensor {
    /// Create the sensor for one state field
    pub fn new(instance: Arc<MattressInstance>, field: StateField) -> Self {
        let description = sensor_description(instance.config(), instance.entry_id(), field);
        Self {
            instance,
            field,
            description,
        }
    }

    /// The field this sensor exposes
    pub fn field(&self) -> StateField {
        self.field
    }

    /// Naming and device metadata
    pub fn description(&self) -> &EntityDescription {
        &self.description
    }

    /// Device class for the host's presentation of this sensor
    pub fn device_class(&self) -> Option<SensorDeviceClass> {
        match self.field {
            StateField::LastFlipped | StateField::LastRotated => Some(SensorDeviceClass::Date),
            StateField::CurrentSide | StateField::CurrentRotation => None,
        }
    }

    /// The current state string
    pub async fn state(&self) -> String {
        render_field(&self.instance.state().await, self.field)
    }
}

/// All four sensors of an instance, in entity-listing order
pub fn sensors_for(instance: &Arc<MattressInstance>) -> Vec<MattressSensor> {
    StateField::ALL
        .iter()
        .map(|field| MattressSensor::new(instance.clone(), *field))
        .collect()
}

/// Render one field of the state as its host-facing state string
pub fn render_field(state: &MattressState, field: StateField) -> String {
    match field {
        StateField::CurrentSide => state.current_side().to_string(),
        StateField::CurrentRotation => state.current_rotation().to_string(),
        StateField::LastFlipped => render_date(state.last_flipped()),
        StateField::LastRotated => render_date(state.last_rotated()),
    }
}

fn render_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => STATE_UNKNOWN.to_string(),
    }
}

/// Feed the host's persisted per-sensor strings back into the instance
///
/// Collects whatever the host still has for this instance's sensors into
/// a snapshot and restores it. Missing and malformed values fall back to
/// defaults per field; this never fails.
pub async fn restore_sensors(
    instance: &MattressInstance,
    persisted: impl IntoIterator<Item = (StateField, String)>,
    context: Context,
) {
    let mut snapshot = StateSnapshot::new();
    for (field, raw) in persisted {
        snapshot.insert(field, raw);
    }
    debug!(entry_id = %instance.entry_id(), "restoring sensors from persisted states");
    instance.restore(&snapshot, context).await;
}
