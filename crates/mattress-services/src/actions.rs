//! The four remote actions
//!
//! Every action targets one instance through the device identifier in its
//! call data. Validation failures and unknown devices abort the single
//! call with a logged error; they never unregister the action or touch
//! other instances.

use std::sync::Arc;

use chrono::NaiveDate;
use mattress_core::DOMAIN;
use mattress_registry::{InstanceRegistry, MattressInstance};
use tracing::{info, warn};

use crate::call::ServiceCall;
use crate::registry::{ServiceError, ServiceRegistry, ServiceResult};

/// Flip to the other side
pub const SERVICE_FLIP: &str = "flip";
/// Rotate head-to-foot
pub const SERVICE_ROTATE: &str = "rotate";
/// Set the side facing up to a specific label
pub const SERVICE_SET_SIDE: &str = "set_side";
/// Set the rotation to a specific orientation
pub const SERVICE_SET_ROTATION: &str = "set_rotation";

/// Device identifier of the target instance (required on every action)
pub const ATTR_DEVICE_ID: &str = "device_id";
/// Optional calendar date, defaults to today
pub const ATTR_DATE: &str = "date";
/// Side label for set_side
pub const ATTR_SIDE: &str = "side";
/// Rotation state string for set_rotation
pub const ATTR_ROTATION: &str = "rotation";

/// Register the four actions against an instance registry
pub fn register_actions(services: &ServiceRegistry, registry: Arc<InstanceRegistry>) {
    let instances = registry.clone();
    services.register(DOMAIN, SERVICE_FLIP, move |call: ServiceCall| {
        let instances = instances.clone();
        async move {
            let instance = target_instance(&instances, &call)?;
            let on = date_arg(&call)?;
            instance.flip(on, call.context.clone()).await;
            Ok(())
        }
    });

    let instances = registry.clone();
    services.register(DOMAIN, SERVICE_ROTATE, move |call: ServiceCall| {
        let instances = instances.clone();
        async move {
            let instance = target_instance(&instances, &call)?;
            let on = date_arg(&call)?;
            instance.rotate(on, call.context.clone()).await;
            Ok(())
        }
    });

    let instances = registry.clone();
    services.register(DOMAIN, SERVICE_SET_SIDE, move |call: ServiceCall| {
        let instances = instances.clone();
        async move {
            let instance = target_instance(&instances, &call)?;
            let side = required_str(&call, ATTR_SIDE)?;
            let on = date_arg(&call)?;
            instance
                .set_side(side, on, call.context.clone())
                .await
                .map_err(|err| {
                    warn!(entry_id = %instance.entry_id(), %err, "set_side rejected");
                    ServiceError::InvalidData(err.to_string())
                })
        }
    });

    let instances = registry;
    services.register(DOMAIN, SERVICE_SET_ROTATION, move |call: ServiceCall| {
        let instances = instances.clone();
        async move {
            let instance = target_instance(&instances, &call)?;
            let rotation = required_str(&call, ATTR_ROTATION)?;
            let on = date_arg(&call)?;
            instance
                .set_rotation(rotation, on, call.context.clone())
                .await
                .map_err(|err| {
                    warn!(entry_id = %instance.entry_id(), %err, "set_rotation rejected");
                    ServiceError::InvalidData(err.to_string())
                })
        }
    });

    info!("mattress tracker services registered");
}

/// Resolve the call's device_id to its owning instance
fn target_instance(
    registry: &InstanceRegistry,
    call: &ServiceCall,
) -> Result<Arc<MattressInstance>, ServiceError> {
    let device_id = required_str(call, ATTR_DEVICE_ID)?;
    registry.resolve_device(device_id).ok_or_else(|| {
        warn!(service = %call.service_id(), device_id, "no mattress for device");
        ServiceError::CallFailed(format!("no mattress for device {}", device_id))
    })
}

fn required_str<'a>(call: &'a ServiceCall, key: &str) -> Result<&'a str, ServiceError> {
    call.get_str(key).ok_or_else(|| {
        warn!(service = %call.service_id(), field = key, "missing required field");
        ServiceError::InvalidData(format!("{} is required", key))
    })
}

/// Parse the optional date field; absent means today
fn date_arg(call: &ServiceCall) -> Result<Option<NaiveDate>, ServiceError> {
    let Some(value) = call.data.get(ATTR_DATE) else {
        return Ok(None);
    };
    let raw = value.as_str().ok_or_else(|| {
        warn!(service = %call.service_id(), "date must be a string");
        ServiceError::InvalidData("date must be an ISO-8601 date string".to_string())
    })?;
    match raw.parse::<NaiveDate>() {
        Ok(date) => Ok(Some(date)),
        Err(err) => {
            warn!(service = %call.service_id(), value = raw, %err, "invalid date");
            Err(ServiceError::InvalidData(format!(
                "invalid date {:?}: {}",
                raw, err
            )))
        }
    }
}
