//! Classification and normalization of model responses.
//!
//! A response is a command when its embedded JSON object has an `action` of
//! `function_call` or a task operation, or carries both `function` and
//! `parameters`. Everything else, including replies whose JSON cannot be
//! parsed, is plain text.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use tasktalk_core::{Action, ActionDescriptor, ParsedResult, TaskOperation, resolve_date};
use tracing::debug;

use crate::extract::extract_object;
use crate::{CommandPolicy, InterpretError};

/// Outcome of interpreting one response.
#[derive(Debug)]
pub struct Interpretation {
    pub result: ParsedResult,
    /// Why the response was read as plain text, when it was.
    pub diagnostic: Option<InterpretError>,
}

/// Turns raw model output into a [`ParsedResult`].
///
/// Holds no per-call state, so one instance can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct ResponseInterpreter {
    policy: CommandPolicy,
}

impl ResponseInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CommandPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CommandPolicy {
        &self.policy
    }

    /// Classify `raw`, resolving relative due dates against `now`.
    ///
    /// Never fails: anything that is not a recognizable command is
    /// [`ParsedResult::PlainText`] carrying the full input.
    pub fn parse(&self, raw: &str, now: NaiveDateTime) -> ParsedResult {
        self.interpret(raw, now).result
    }

    /// Like [`parse`](Self::parse), but also reports why a response fell back
    /// to plain text.
    pub fn interpret(&self, raw: &str, now: NaiveDateTime) -> Interpretation {
        match command_object(raw) {
            Ok(object) => {
                let action = self.normalize(object, now);
                debug!(
                    action = %action.action,
                    function = %action.function,
                    "model response carries a command"
                );
                Interpretation {
                    result: ParsedResult::Command {
                        raw_text: raw.to_string(),
                        action,
                    },
                    diagnostic: None,
                }
            }
            Err(reason) => {
                debug!(%reason, len = raw.len(), "treating model response as plain text");
                Interpretation {
                    result: ParsedResult::plain(raw),
                    diagnostic: Some(reason),
                }
            }
        }
    }

    /// Fill in missing fields and resolve the due date.
    ///
    /// Top-level fields other than `action`, `function` and `parameters` are
    /// folded into `parameters`; explicit `parameters` entries take precedence.
    fn normalize(&self, mut object: Map<String, Value>, now: NaiveDateTime) -> ActionDescriptor {
        let action = match object.remove("action") {
            Some(Value::String(s)) => Action::from(s),
            _ => self.policy.default_action.clone(),
        };

        let function = match object.remove("function") {
            Some(Value::String(s)) => s,
            _ => match action.task_operation() {
                Some(op) => op.as_str().to_string(),
                None => self.policy.default_function.clone(),
            },
        };

        let mut parameters = match object.remove("parameters") {
            Some(Value::Object(map)) => map,
            Some(other) => {
                debug!(kind = json_kind(&other), "dropping non-object `parameters`");
                Map::new()
            }
            None => Map::new(),
        };
        for (key, value) in object {
            parameters.entry(key).or_insert(value);
        }

        if let Some(Value::String(due)) = parameters.get_mut("due_date") {
            *due = resolve_date(due, now);
        }

        ActionDescriptor {
            action,
            function,
            parameters,
        }
    }
}

/// Extract the embedded object and check it has a command shape.
fn command_object(raw: &str) -> Result<Map<String, Value>, InterpretError> {
    let object = extract_object(raw)?;
    if is_command(&object) {
        Ok(object)
    } else {
        Err(InterpretError::NotACommand {
            keys: object.keys().map(String::as_str).collect::<Vec<_>>().join(", "),
        })
    }
}

fn is_command(object: &Map<String, Value>) -> bool {
    let action = object.get("action").and_then(Value::as_str);
    if action == Some("function_call") {
        return true;
    }
    if action.and_then(TaskOperation::from_name).is_some() {
        return true;
    }
    object.contains_key("function") && object.contains_key("parameters")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
