//! Output rendering for interpreted replies.

use tasktalk_core::ParsedResult;

const SUMMARY_PREVIEW_CHARS: usize = 60;

/// Serialize a result as pretty (or single-line) JSON.
pub fn render_json(result: &ParsedResult, compact: bool) -> anyhow::Result<String> {
    let json = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    Ok(json)
}

/// One-line description for logs.
pub fn summary(result: &ParsedResult) -> String {
    match result {
        ParsedResult::Command { action, .. } => match action.due_date() {
            Some(due) => format!("command {} -> {} (due {due})", action.action, action.function),
            None => format!("command {} -> {}", action.action, action.function),
        },
        ParsedResult::PlainText { content } => {
            format!("text {:?}", preview(content, SUMMARY_PREVIEW_CHARS))
        }
    }
}

/// Truncate on a char boundary, marking the cut with an ellipsis.
fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
