// Filebot Events
// Everything a run writes to its outward channel

use serde::{Deserialize, Serialize};

/// Phase of an in-progress tool dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPhase {
    /// Emitted before a directive is dispatched
    ToolUse,
    /// Emitted after a directive finished, success or not
    ToolResult,
}

/// Intermediate notification emitted while a run is executing directives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub phase: ProgressPhase,
    pub message: String,
}

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Success,
    Error,
}

/// Terminal result of a run. Exactly one is emitted, always last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    pub status: AgentStatus,
    pub message: String,
}

impl AgentResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: AgentStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: AgentStatus::Error,
            message: message.into(),
        }
    }
}

/// URL announcement from the dev-server launcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerUrlEvent {
    pub url: String,
}

/// Item type of the shared outward channel.
///
/// A single agent run emits zero or more `Progress` events followed by
/// exactly one `Result`. The dev-server launcher shares the channel and
/// contributes `ServerUrl` events independently of any run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AgentEvent {
    Progress(ProgressEvent),
    Result(AgentResult),
    ServerUrl(ServerUrlEvent),
}

impl AgentEvent {
    pub fn progress(phase: ProgressPhase, message: impl Into<String>) -> Self {
        Self::Progress(ProgressEvent {
            phase,
            message: message.into(),
        })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Result(_))
    }
}
