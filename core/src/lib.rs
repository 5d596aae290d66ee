//! Filebot core
//!
//! The agent engine: directive parsing, the sandboxed tool layer,
//! project introspection, the model gateway, and the run orchestrator.

pub mod agent;
pub mod devserver;
pub mod directive;
pub mod error;
pub mod model;
pub mod project;
pub mod tools;

pub use agent::{generate_simple_response, run_agent, run_agent_with, AgentError};
pub use error::ToolError;
pub use model::ModelError;
