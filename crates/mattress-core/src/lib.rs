//! Core types for the mattress tracker
//!
//! This crate provides the fundamental types of the integration: the
//! one-time instance configuration, the Rotation orientation, the
//! MattressState aggregate with its flip/rotate operations, the persisted
//! snapshot used to restore state across restarts, and the Clock and
//! Context types shared by the trigger surfaces.

mod clock;
mod config;
mod context;
mod rotation;
mod snapshot;
mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, MattressConfig, DEFAULT_SIDE_1_NAME, DEFAULT_SIDE_2_NAME};
pub use context::Context;
pub use rotation::{InvalidRotation, Rotation, ROTATION_TOP_FOOT, ROTATION_TOP_HEAD};
pub use snapshot::{StateSnapshot, STATE_UNAVAILABLE, STATE_UNKNOWN};
pub use state::{InvalidSide, MattressState, StateField};

/// Integration domain, used for service names and device identifiers
pub const DOMAIN: &str = "mattress_tracker";
