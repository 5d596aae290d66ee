// Filebot Protocol Layer
// Event and prompt definitions

pub mod events;
pub mod prompts;

pub use events::{
    AgentEvent, AgentResult, AgentStatus, ProgressEvent, ProgressPhase, ServerUrlEvent,
};
pub use prompts::system_prompt;
