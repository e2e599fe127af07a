//! Prompt assembly for the task assistant.
//!
//! The reply format asked for here is the one [`ResponseInterpreter`](crate::ResponseInterpreter)
//! recognizes, so the two must change together.

use serde::{Deserialize, Serialize};
use tasktalk_core::TaskSummary;

pub const SYSTEM_PROMPT: &str = "\
You are a helpful assistant for a task management app.
When users ask you to create, update, or delete tasks, respond with a JSON object:

For creating tasks:
{\"action\": \"create_task\", \"title\": \"task name\", \"due_date\": \"tomorrow\"}

For updating tasks:
{\"action\": \"update_task\", \"id\": \"task id\", \"is_done\": true}

For deleting tasks:
{\"action\": \"delete_task\", \"id\": \"task id\"}

For other questions, respond normally in plain text.
IMPORTANT: If you create a task, ONLY return the JSON object, no other text.";

pub const NO_TASKS_CONTEXT: &str = "The user has no tasks currently.";

/// A user question plus optional context about their tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub prompt: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// Render the user's tasks as prompt context.
///
/// One line per task: `- <title> (Status: Done|Pending, Due: <date>|No Date)`.
/// An empty list is stated explicitly so the model does not guess at tasks.
pub fn render_task_context(tasks: &[TaskSummary]) -> String {
    if tasks.is_empty() {
        return NO_TASKS_CONTEXT.to_string();
    }

    let lines: Vec<String> = tasks
        .iter()
        .map(|task| {
            format!(
                "- {title} (Status: {status}, Due: {due})",
                title = task.title,
                status = if task.is_done { "Done" } else { "Pending" },
                due = task.due_date.as_deref().unwrap_or("No Date"),
            )
        })
        .collect();

    format!("User's Current Tasks:\n{}", lines.join("\n"))
}

/// Build the single-message prompt sent to the model.
pub fn build_prompt(request: &AssistantRequest) -> String {
    format!(
        "{SYSTEM_PROMPT}\n\nContext:\n{context}\n\nUser: {prompt}",
        context = request.context.as_deref().unwrap_or(""),
        prompt = request.prompt,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, is_done: bool, due_date: Option<&str>) -> TaskSummary {
        TaskSummary {
            title: title.into(),
            is_done,
            due_date: due_date.map(String::from),
        }
    }

    #[test]
    fn context_lists_tasks() {
        let ctx = render_task_context(&[
            task("Buy milk", false, Some("2025-03-15T09:30:00")),
            task("File taxes", true, None),
        ]);
        assert_eq!(
            ctx,
            "User's Current Tasks:\n\
             - Buy milk (Status: Pending, Due: 2025-03-15T09:30:00)\n\
             - File taxes (Status: Done, Due: No Date)"
        );
    }

    #[test]
    fn empty_context() {
        assert_eq!(render_task_context(&[]), "The user has no tasks currently.");
        let prompt = build_prompt(&AssistantRequest {
            prompt: "what's on my list?".into(),
            context: Some(render_task_context(&[])),
        });
        assert!(prompt.contains("\n\nContext:\nThe user has no tasks currently.\n\nUser: "));
    }

    #[test]
    fn prompt_layout() {
        let prompt = build_prompt(&AssistantRequest {
            prompt: "Remind me to call mum tomorrow".into(),
            context: Some("User's Current Tasks:\n- A (Status: Pending, Due: No Date)".into()),
        });
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.contains("\n\nContext:\nUser's Current Tasks:\n- A"));
        assert!(prompt.ends_with("\n\nUser: Remind me to call mum tomorrow"));
    }

    #[test]
    fn prompt_without_context() {
        let prompt = build_prompt(&AssistantRequest {
            prompt: "hi".into(),
            context: None,
        });
        assert!(prompt.ends_with("\n\nContext:\n\n\nUser: hi"));
    }

    #[test]
    fn system_prompt_examples_are_commands() {
        use crate::ResponseInterpreter;
        use chrono::NaiveDate;

        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let interpreter = ResponseInterpreter::new();
        let examples: Vec<&str> = SYSTEM_PROMPT
            .lines()
            .filter(|line| line.starts_with('{'))
            .collect();
        assert_eq!(examples.len(), 3);
        for example in examples {
            assert!(
                interpreter.parse(example, now).is_command(),
                "prompt example not recognized: {example}"
            );
        }
    }
}
