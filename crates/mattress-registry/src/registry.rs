//! Registry of configured mattress instances
//!
//! An explicit, process-owned map from configuration entry id to instance,
//! with a unique-name index for duplicate prevention and a device index
//! for resolving service-call targets.

use std::sync::Arc;

use dashmap::DashMap;
use mattress_core::{Clock, ConfigError, MattressConfig, SystemClock};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use ulid::Ulid;

use crate::instance::MattressInstance;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no instance for entry {0}")]
    NotFound(String),

    #[error("a mattress named {0:?} is already configured")]
    AlreadyExists(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Registry of all configured instances, keyed by entry id
///
/// Instances are independent of each other; the registry only routes
/// lookups and owns create/remove lifecycle.
pub struct InstanceRegistry {
    /// Primary index: entry_id -> instance
    instances: DashMap<String, Arc<MattressInstance>>,
    /// Unique index: mattress name -> entry_id
    by_name: DashMap<String, String>,
    /// Device index: device_id -> entry_id
    devices: DashMap<String, String>,
    /// Clock handed to every created instance
    clock: Arc<dyn Clock>,
}

impl InstanceRegistry {
    /// Create an empty registry using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty registry with a specific clock (fixed in tests)
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            instances: DashMap::new(),
            by_name: DashMap::new(),
            devices: DashMap::new(),
            clock,
        }
    }

    /// Create a new instance from a one-time configuration
    ///
    /// Validates the configuration and rejects a second mattress with the
    /// same name. Returns the created instance.
    #[instrument(skip(self, config), fields(mattress = %config.mattress_name))]
    pub fn create(&self, config: MattressConfig) -> Result<Arc<MattressInstance>, RegistryError> {
        config.validate()?;

        if self.by_name.contains_key(&config.mattress_name) {
            warn!("mattress name already configured");
            return Err(RegistryError::AlreadyExists(config.mattress_name));
        }

        let entry_id = Ulid::new().to_string();
        let instance = Arc::new(MattressInstance::new(
            entry_id.clone(),
            config.clone(),
            self.clock.clone(),
        ));

        self.by_name.insert(config.mattress_name, entry_id.clone());
        self.instances.insert(entry_id.clone(), instance.clone());

        info!(entry_id = %entry_id, "created mattress instance");
        Ok(instance)
    }

    /// Look up an instance by its entry id
    pub fn get(&self, entry_id: &str) -> Option<Arc<MattressInstance>> {
        self.instances.get(entry_id).map(|i| i.value().clone())
    }

    /// Remove an instance and everything indexed under it
    #[instrument(skip(self))]
    pub fn remove(&self, entry_id: &str) -> Result<(), RegistryError> {
        let (_, instance) = self
            .instances
            .remove(entry_id)
            .ok_or_else(|| RegistryError::NotFound(entry_id.to_string()))?;

        self.by_name.remove(&instance.config().mattress_name);
        self.devices.retain(|_, entry| entry.as_str() != entry_id);

        info!("removed mattress instance");
        Ok(())
    }

    /// Associate a host device identifier with an entry
    pub fn link_device(
        &self,
        device_id: impl Into<String>,
        entry_id: &str,
    ) -> Result<(), RegistryError> {
        if !self.instances.contains_key(entry_id) {
            return Err(RegistryError::NotFound(entry_id.to_string()));
        }
        let device_id = device_id.into();
        debug!(device_id = %device_id, entry_id, "linked device");
        self.devices.insert(device_id, entry_id.to_string());
        Ok(())
    }

    /// Resolve a host device identifier to its owning instance
    pub fn resolve_device(&self, device_id: &str) -> Option<Arc<MattressInstance>> {
        let entry_id = self.devices.get(device_id)?;
        self.get(entry_id.value())
    }

    /// Number of configured instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// All configured instances
    pub fn all(&self) -> Vec<Arc<MattressInstance>> {
        self.instances.iter().map(|i| i.value().clone()).collect()
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
