//! Task payloads exchanged with the task service layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::command::{ActionDescriptor, TaskOperation};

/// A task as shown to the model in the prompt context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub title: String,
    #[serde(default)]
    pub is_done: bool,
    /// ISO 8601 timestamp string.
    #[serde(default)]
    pub due_date: Option<String>,
}

/// A dated task as shown on the calendar: a zero-length event at its due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "allDay", default)]
    pub all_day: bool,
}

impl CalendarEvent {
    /// `None` when the task has no due date.
    pub fn from_task(id: &str, task: &TaskSummary) -> Option<Self> {
        let due = task.due_date.as_deref()?;
        Some(Self {
            id: id.to_string(),
            title: task.title.clone(),
            start: due.to_string(),
            end: due.to_string(),
            all_day: false,
        })
    }
}

/// Calendar events for every `(id, task)` pair that has a due date, in order.
pub fn calendar_events<'a>(
    tasks: impl IntoIterator<Item = (&'a str, &'a TaskSummary)>,
) -> Vec<CalendarEvent> {
    tasks
        .into_iter()
        .filter_map(|(id, task)| CalendarEvent::from_task(id, task))
        .collect()
}

/// Fields for creating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_done: bool,
    /// ISO 8601 timestamp string.
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Partial update; only set fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Typed view of a task command, ready for the service layer to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskRequest {
    Create(NewTask),
    Update { id: String, patch: TaskPatch },
    Delete { id: String },
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("command `{0}` is not a task operation")]
    NotATaskOperation(String),

    #[error("{0} requires an `id` parameter")]
    MissingId(TaskOperation),

    #[error("invalid {operation} parameters: {source}")]
    InvalidParameters {
        operation: TaskOperation,
        #[source]
        source: serde_json::Error,
    },
}

/// Parameter keys accepted as the target task id.
const ID_KEYS: &[&str] = &["id", "task_id"];

impl ActionDescriptor {
    /// Interpret the parameters as a task request.
    ///
    /// Only the shape is checked; whether the task exists is the caller's concern.
    pub fn to_task_request(&self) -> Result<TaskRequest, TaskError> {
        let operation = self
            .task_operation()
            .ok_or_else(|| TaskError::NotATaskOperation(self.function.clone()))?;

        match operation {
            TaskOperation::Create => {
                let task = from_parameters(&self.parameters, operation)?;
                Ok(TaskRequest::Create(task))
            }
            TaskOperation::Update => {
                let id = task_id(&self.parameters).ok_or(TaskError::MissingId(operation))?;
                let patch = from_parameters(&self.parameters, operation)?;
                Ok(TaskRequest::Update { id, patch })
            }
            TaskOperation::Delete => {
                let id = task_id(&self.parameters).ok_or(TaskError::MissingId(operation))?;
                Ok(TaskRequest::Delete { id })
            }
        }
    }
}

fn from_parameters<T: serde::de::DeserializeOwned>(
    parameters: &Map<String, Value>,
    operation: TaskOperation,
) -> Result<T, TaskError> {
    serde_json::from_value(Value::Object(parameters.clone()))
        .map_err(|source| TaskError::InvalidParameters { operation, source })
}

/// Ids come back from models as strings or bare numbers.
fn task_id(parameters: &Map<String, Value>) -> Option<String> {
    ID_KEYS
        .iter()
        .find_map(|key| match parameters.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}
