//! Service call value passed to action handlers

use mattress_core::Context;
use serde::{Deserialize, Serialize};

/// One invocation of a remote action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCall {
    /// Domain the action belongs to
    pub domain: String,

    /// Action name (e.g. "flip", "set_side")
    pub service: String,

    /// Call data as supplied by the host (device_id, date, ...)
    pub data: serde_json::Value,

    /// Context tracking who initiated this call
    pub context: Context,
}

impl ServiceCall {
    /// Create a new service call
    pub fn new(
        domain: impl Into<String>,
        service: impl Into<String>,
        data: serde_json::Value,
        context: Context,
    ) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            data,
            context,
        }
    }

    /// The full action identifier (domain.service)
    pub fn service_id(&self) -> String {
        format!("{}.{}", self.domain, self.service)
    }

    /// Get a typed value from the call data
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Get a string value from the call data
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_id() {
        let call = ServiceCall::new("mattress_tracker", "flip", json!({}), Context::new());
        assert_eq!(call.service_id(), "mattress_tracker.flip");
    }

    #[test]
    fn test_get_typed() {
        let call = ServiceCall::new(
            "mattress_tracker",
            "set_side",
            json!({"device_id": "device1", "side": "Side B"}),
            Context::new(),
        );

        assert_eq!(call.get::<String>("side"), Some("Side B".to_string()));
        assert_eq!(call.get_str("device_id"), Some("device1"));
        assert_eq!(call.get_str("missing"), None);
    }

    #[test]
    fn test_get_wrong_type() {
        let call = ServiceCall::new(
            "mattress_tracker",
            "flip",
            json!({"device_id": 7}),
            Context::new(),
        );
        assert_eq!(call.get_str("device_id"), None);
    }
}
