//! Defaults applied when a recognized command omits `action` or `function`.
//!
//! Neither default is inferred from the command; they are fixed guesses kept
//! here so callers can see and override them.

use serde::{Deserialize, Serialize};
use tasktalk_core::Action;

use crate::PolicyError;

/// Action assigned to commands that have no `action` field.
pub const DEFAULT_ACTION: Action = Action::FunctionCall;

/// Function assigned to commands that have neither a `function` field nor a
/// task-operation `action`.
pub const DEFAULT_FUNCTION: &str = "create_task";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandPolicy {
    pub default_action: Action,
    pub default_function: String,
}

impl Default for CommandPolicy {
    fn default() -> Self {
        Self {
            default_action: DEFAULT_ACTION,
            default_function: DEFAULT_FUNCTION.to_string(),
        }
    }
}

impl CommandPolicy {
    /// Load a policy from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        if policy.default_function.trim().is_empty() {
            return Err(PolicyError::EmptyDefaultFunction);
        }
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let policy = CommandPolicy::default();
        assert_eq!(policy.default_action, Action::FunctionCall);
        assert_eq!(policy.default_function, "create_task");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let policy = CommandPolicy::from_json(r#"{"default_function": "update_task"}"#).unwrap();
        assert_eq!(policy.default_action, Action::FunctionCall);
        assert_eq!(policy.default_function, "update_task");
    }

    #[test]
    fn empty_object_is_default_policy() {
        assert_eq!(CommandPolicy::from_json("{}").unwrap(), CommandPolicy::default());
    }

    #[test]
    fn blank_default_function_rejected() {
        assert!(matches!(
            CommandPolicy::from_json(r#"{"default_function": " "}"#),
            Err(PolicyError::EmptyDefaultFunction)
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            CommandPolicy::from_json("default_function = x"),
            Err(PolicyError::Json(_))
        ));
    }
}
