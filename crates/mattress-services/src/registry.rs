//! Async dispatch table for remote actions
//!
//! Stands in for the host's service dispatch: actions register a handler
//! under "domain.service", calls route to it. A failed handler reports its
//! error to the caller and nothing else; other actions and instances are
//! unaffected.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use dashmap::DashMap;
use mattress_core::Context;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::call::ServiceCall;

/// Result type for action calls
pub type ServiceResult = Result<(), ServiceError>;

/// Future type for async action handlers
pub type ServiceFuture = Pin<Box<dyn Future<Output = ServiceResult> + Send>>;

/// Action handler function type
pub type ServiceHandler = Arc<dyn Fn(ServiceCall) -> ServiceFuture + Send + Sync>;

/// Errors reported to the surface that submitted a call
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("service not found: {domain}.{service}")]
    NotFound { domain: String, service: String },

    #[error("invalid service data: {0}")]
    InvalidData(String),

    #[error("service call failed: {0}")]
    CallFailed(String),
}

/// The dispatch table of registered actions
pub struct ServiceRegistry {
    /// Handlers indexed by "domain.service" key
    services: DashMap<String, ServiceHandler>,
}

impl ServiceRegistry {
    /// Create an empty dispatch table
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    /// Register an action handler
    pub fn register<F, Fut>(&self, domain: impl Into<String>, service: impl Into<String>, handler: F)
    where
        F: Fn(ServiceCall) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ServiceResult> + Send + 'static,
    {
        let key = format!("{}.{}", domain.into(), service.into());
        debug!(service = %key, "registering service");

        let handler: ServiceHandler = Arc::new(move |call| Box::pin(handler(call)) as ServiceFuture);
        self.services.insert(key, handler);
    }

    /// Call an action with the given data
    #[instrument(skip(self, data, context))]
    pub async fn call(
        &self,
        domain: &str,
        service: &str,
        data: serde_json::Value,
        context: Context,
    ) -> ServiceResult {
        let key = format!("{}.{}", domain, service);

        let handler = match self.services.get(&key) {
            Some(registered) => registered.clone(),
            None => {
                warn!(service = %key, "service not found");
                return Err(ServiceError::NotFound {
                    domain: domain.to_string(),
                    service: service.to_string(),
                });
            }
        };

        debug!(service = %key, "calling service");
        handler(ServiceCall::new(domain, service, data, context)).await
    }

    /// Whether an action is registered
    pub fn has_service(&self, domain: &str, service: &str) -> bool {
        self.services.contains_key(&format!("{}.{}", domain, service))
    }

    /// Number of registered actions
    pub fn service_count(&self) -> usize {
        self.services.len()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_register_and_call() {
        let registry = ServiceRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        registry.register("test", "ping", move |_call: ServiceCall| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        registry
            .call("test", "ping", json!({}), Context::new())
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_service_not_found() {
        let registry = ServiceRegistry::new();
        let result = registry
            .call("nonexistent", "service", json!({}), Context::new())
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_handler_error_is_reported() {
        let registry = ServiceRegistry::new();
        registry.register("test", "fail", |_call: ServiceCall| async move {
            Err(ServiceError::CallFailed("intentional failure".to_string()))
        });

        let result = registry
            .call("test", "fail", json!({}), Context::new())
            .await;
        assert!(matches!(result, Err(ServiceError::CallFailed(_))));
    }

    #[test]
    fn test_has_service() {
        let registry = ServiceRegistry::new();
        registry.register("test", "ping", |_: ServiceCall| async { Ok(()) });

        assert!(registry.has_service("test", "ping"));
        assert!(!registry.has_service("test", "pong"));
        assert_eq!(registry.service_count(), 1);
    }
}
