//! Command types shared between the interpreter and the task service layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The three task operations a model response may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOperation {
    Create,
    Update,
    Delete,
}

impl TaskOperation {
    pub const ALL: [TaskOperation; 3] = [Self::Create, Self::Update, Self::Delete];

    /// Wire name, e.g. `"create_task"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create_task",
            Self::Update => "update_task",
            Self::Delete => "delete_task",
        }
    }

    /// Look up an operation by its wire name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `action` field of a normalized command.
///
/// `Other` keeps whatever string an explicit `action` field carried when it is
/// none of the known values, so callers can still see (and reject) it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    CreateTask,
    UpdateTask,
    DeleteTask,
    FunctionCall,
    Other(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CreateTask => "create_task",
            Self::UpdateTask => "update_task",
            Self::DeleteTask => "delete_task",
            Self::FunctionCall => "function_call",
            Self::Other(s) => s,
        }
    }

    /// The task operation this action names directly, if any.
    pub fn task_operation(&self) -> Option<TaskOperation> {
        match self {
            Self::CreateTask => Some(TaskOperation::Create),
            Self::UpdateTask => Some(TaskOperation::Update),
            Self::DeleteTask => Some(TaskOperation::Delete),
            Self::FunctionCall | Self::Other(_) => None,
        }
    }
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        match s {
            "create_task" => Self::CreateTask,
            "update_task" => Self::UpdateTask,
            "delete_task" => Self::DeleteTask,
            "function_call" => Self::FunctionCall,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        match Action::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<TaskOperation> for Action {
    fn from(op: TaskOperation) -> Self {
        match op {
            TaskOperation::Create => Self::CreateTask,
            TaskOperation::Update => Self::UpdateTask,
            TaskOperation::Delete => Self::DeleteTask,
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized command extracted from a model response.
///
/// `action` and `function` are always populated. A string `due_date` in
/// `parameters` has already been resolved against the reference time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub action: Action,
    pub function: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl ActionDescriptor {
    /// The task operation targeted by this command.
    ///
    /// `function` is authoritative; `action` is the fallback for commands whose
    /// function names something other than a task operation.
    pub fn task_operation(&self) -> Option<TaskOperation> {
        TaskOperation::from_name(&self.function).or_else(|| self.action.task_operation())
    }

    /// The resolved `due_date` parameter, when it is a string.
    pub fn due_date(&self) -> Option<&str> {
        self.parameters.get("due_date").and_then(Value::as_str)
    }
}

/// Classification of one model response.
///
/// Serialized with a `type` tag of `"text"` or `"function_call"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParsedResult {
    #[serde(rename = "text")]
    PlainText { content: String },
    #[serde(rename = "function_call")]
    Command {
        raw_text: String,
        action: ActionDescriptor,
    },
}

impl ParsedResult {
    pub fn plain(content: impl Into<String>) -> Self {
        Self::PlainText {
            content: content.into(),
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command { .. })
    }

    /// The command descriptor, if this response carried one.
    pub fn command(&self) -> Option<&ActionDescriptor> {
        match self {
            Self::Command { action, .. } => Some(action),
            Self::PlainText { .. } => None,
        }
    }

    /// The original response text, whichever variant this is.
    pub fn text(&self) -> &str {
        match self {
            Self::PlainText { content } => content,
            Self::Command { raw_text, .. } => raw_text,
        }
    }
}
