//! Instance registry and lifecycle for configured mattresses
//!
//! One MattressInstance exists per configuration entry. The registry owns
//! the entry-id index, rejects duplicate mattress names, resolves device
//! identifiers to instances for service calls, and removes instances when
//! their configuration entry goes away.

mod instance;
mod registry;

pub use instance::{MattressInstance, StateUpdate, UPDATE_CHANNEL_CAPACITY};
pub use registry::{InstanceRegistry, RegistryError};
