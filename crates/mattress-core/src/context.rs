//! Context type for tracking the origin of a state mutation

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identifies who triggered a mutation
///
/// Every service call and button press carries a Context; the update
/// notifications a mutation emits carry the same Context, so the host
/// surface can attribute the change to its trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Unique identifier for this context (ULID)
    pub id: String,

    /// User that initiated the action, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Context {
    /// Create a new context with a fresh ULID
    pub fn new() -> Self {
        Self {
            id: Ulid::new().to_string(),
            user_id: None,
        }
    }

    /// Create a new context attributed to a specific user
    pub fn with_user(user_id: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            user_id: Some(user_id.into()),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_ids_are_unique() {
        assert_ne!(Context::new().id, Context::new().id);
    }

    #[test]
    fn test_with_user() {
        let ctx = Context::with_user("abc123");
        assert_eq!(ctx.user_id.as_deref(), Some("abc123"));
    }
}
