pub mod command;
pub mod dates;
pub mod task;

pub use command::{Action, ActionDescriptor, ParsedResult, TaskOperation};
pub use dates::{format_timestamp, resolve_date};
pub use task::{
    CalendarEvent, NewTask, TaskError, TaskPatch, TaskRequest, TaskSummary, calendar_events,
};
