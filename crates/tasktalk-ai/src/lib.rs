//! Model-response interpretation: finds commands embedded in assistant replies.

mod error;
pub mod extract;
mod interpreter;
pub mod policy;
pub mod prompt;

pub use error::{InterpretError, PolicyError};
pub use interpreter::{Interpretation, ResponseInterpreter};
pub use policy::CommandPolicy;
pub use prompt::{AssistantRequest, build_prompt, render_task_context};
