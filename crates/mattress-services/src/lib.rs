//! Remote actions for the mattress tracker
//!
//! The four actions (flip, rotate, set_side, set_rotation) are registered
//! into an async dispatch table under the integration domain. Every call
//! targets one instance through its device identifier; bad input aborts
//! only that call.

mod actions;
mod call;
mod registry;

pub use actions::{
    register_actions, ATTR_DATE, ATTR_DEVICE_ID, ATTR_ROTATION, ATTR_SIDE, SERVICE_FLIP,
    SERVICE_ROTATE, SERVICE_SET_ROTATION, SERVICE_SET_SIDE,
};
pub use call::ServiceCall;
pub use registry::{ServiceError, ServiceRegistry, ServiceResult};
