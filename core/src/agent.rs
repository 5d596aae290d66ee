//! Agent orchestrator
//!
//! Drives one run end to end: build the system prompt from the registry
//! catalog, call the model, execute every directive in the reply in
//! order, splice the results back over the directive spans, and emit
//! progress on the outward channel.

use std::path::Path;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use filebot_protocol::{system_prompt, AgentEvent, AgentResult, ProgressPhase};

use crate::directive::{extract_directives, splice_replacements, strip_directives};
use crate::error::ToolError;
use crate::model::{create_provider, Message, ModelError, ModelProvider};
use crate::tools::build_registry;
use crate::tools::registry::ToolRegistry;

/// A run-level failure. Per-directive tool failures are not errors at
/// this level; they render inline and the run still succeeds.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Registry construction failed before the run started.
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// Run one tool-enabled agent turn.
///
/// Always produces a terminal [AgentResult]; model and wiring failures
/// become an error result rather than a panic or an Err. Progress events
/// are best-effort: a dropped receiver never fails the run.
pub async fn run_agent(
    provider: &str,
    api_key: &str,
    user_message: &str,
    project_root: &Path,
    events: &UnboundedSender<AgentEvent>,
) -> AgentResult {
    let result = match create_provider(provider, api_key) {
        Ok(backend) => {
            run_agent_with(backend.as_ref(), user_message, project_root, events).await
        }
        Err(e) => Err(AgentError::Model(e)),
    };

    let result = match result {
        Ok(message) => AgentResult::success(message),
        Err(e) => {
            warn!("run failed: {e}");
            AgentResult::error(format!("에러 발생: {e}"))
        }
    };
    let _ = events.send(AgentEvent::Result(result.clone()));
    result
}

/// Same as [run_agent] but against an already-constructed backend.
pub async fn run_agent_with(
    provider: &dyn ModelProvider,
    user_message: &str,
    project_root: &Path,
    events: &UnboundedSender<AgentEvent>,
) -> Result<String, AgentError> {
    let registry = build_registry(project_root)?;

    let messages = [
        Message::System(system_prompt(
            &project_root.display().to_string(),
            &registry.catalog(),
        )),
        Message::User(user_message.to_string()),
    ];

    info!(provider = provider.provider_id(), "requesting completion");
    let reply = provider.invoke(&messages).await?;

    Ok(execute_directives(&reply, &registry, events))
}

/// Execute every directive in a reply and splice the results in.
///
/// Per directive, in order of appearance: a `tool_use` progress event,
/// the dispatch, then a `tool_result` progress event. A failed dispatch
/// renders as an inline error block over the directive's span; the loop
/// continues with the next directive.
fn execute_directives(
    reply: &str,
    registry: &ToolRegistry,
    events: &UnboundedSender<AgentEvent>,
) -> String {
    let directives = extract_directives(reply);
    if directives.is_empty() {
        return reply.to_string();
    }

    let mut replacements = Vec::with_capacity(directives.len());
    for directive in &directives {
        let _ = events.send(AgentEvent::progress(
            ProgressPhase::ToolUse,
            format!("도구 사용: {}", directive.name),
        ));

        let rendered = match registry.dispatch(directive) {
            Ok(output) => output.render(),
            Err(e) => {
                debug!(tool = %directive.name, "directive failed: {e}");
                format!("\n❌ 에러: {e}")
            }
        };
        replacements.push(rendered);

        let _ = events.send(AgentEvent::progress(
            ProgressPhase::ToolResult,
            format!("완료: {}", directive.name),
        ));
    }

    let spliced = splice_replacements(reply, &directives, &replacements);
    strip_directives(&spliced)
}

/// One-shot completion without the tool preamble or execution loop.
///
/// Shares the eager provider check and terminal-result contract with
/// [run_agent]; there are never progress events on this path.
pub async fn generate_simple_response(
    provider: &str,
    api_key: &str,
    user_message: &str,
    events: &UnboundedSender<AgentEvent>,
) -> AgentResult {
    let invoked = match create_provider(provider, api_key) {
        Ok(backend) => {
            backend
                .invoke(&[Message::User(user_message.to_string())])
                .await
        }
        Err(e) => Err(e),
    };

    let result = match invoked {
        Ok(reply) => AgentResult::success(reply),
        Err(e) => {
            warn!("simple response failed: {e}");
            AgentResult::error(format!("에러 발생: {e}"))
        }
    };
    let _ = events.send(AgentEvent::Result(result.clone()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    use filebot_protocol::{AgentStatus, ProgressEvent};

    #[derive(Debug)]
    struct Scripted {
        reply: String,
    }

    #[async_trait]
    impl ModelProvider for Scripted {
        fn provider_id(&self) -> &'static str {
            "Scripted"
        }

        async fn invoke(&self, _messages: &[Message]) -> Result<String, ModelError> {
            Ok(self.reply.clone())
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<AgentEvent>) -> Vec<AgentEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    fn progress_messages(events: &[AgentEvent]) -> Vec<(ProgressPhase, String)> {
        events
            .iter()
            .filter_map(|e| match e {
                AgentEvent::Progress(ProgressEvent { phase, message }) => {
                    Some((*phase, message.clone()))
                }
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn reply_without_directives_passes_through() {
        let dir = TempDir::new().expect("tempdir");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let provider = Scripted {
            reply: "그냥 답변입니다.".to_string(),
        };
        let reply = run_agent_with(&provider, "질문", dir.path(), &tx)
            .await
            .expect("run succeeds");
        assert_eq!(reply, "그냥 답변입니다.");
        assert!(progress_messages(&drain(&mut rx)).is_empty());
    }

    #[tokio::test]
    async fn directives_execute_in_order_with_paired_events() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("a.txt"), "본문").expect("seed");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let provider = Scripted {
            reply: "읽어보면 [TOOL:read_file|a.txt] 그리고 [TOOL:write_file|b.txt|새 내용] 끝."
                .to_string(),
        };

        let reply = run_agent_with(&provider, "질문", dir.path(), &tx)
            .await
            .expect("run succeeds");

        assert_eq!(
            reply,
            "읽어보면 \n파일 내용:\n본문 그리고 \n✅ 파일이 성공적으로 저장되었습니다: b.txt 끝."
        );
        assert_eq!(
            progress_messages(&drain(&mut rx)),
            vec![
                (ProgressPhase::ToolUse, "도구 사용: read_file".to_string()),
                (ProgressPhase::ToolResult, "완료: read_file".to_string()),
                (ProgressPhase::ToolUse, "도구 사용: write_file".to_string()),
                (ProgressPhase::ToolResult, "완료: write_file".to_string()),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("b.txt")).expect("written"),
            "새 내용"
        );
    }

    #[tokio::test]
    async fn failed_directive_renders_inline_and_does_not_abort() {
        let dir = TempDir::new().expect("tempdir");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let provider = Scripted {
            reply: "[TOOL:read_file|ghost.txt] 다음은 [TOOL:unknown_tool|x] 입니다".to_string(),
        };

        let reply = run_agent_with(&provider, "질문", dir.path(), &tx)
            .await
            .expect("run succeeds despite tool failures");

        assert_eq!(
            reply,
            "❌ 에러: 파일을 찾을 수 없습니다: ghost.txt 다음은 \n❌ 에러: 알 수 없는 도구: unknown_tool 입니다"
        );
        // Both directives still produced their event pair.
        assert_eq!(progress_messages(&drain(&mut rx)).len(), 4);
    }

    #[tokio::test]
    async fn repeated_directive_is_spliced_per_occurrence() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("a.txt"), "x").expect("seed");
        let (tx, _rx) = mpsc::unbounded_channel();
        let provider = Scripted {
            reply: "[TOOL:read_file|a.txt][TOOL:read_file|a.txt]".to_string(),
        };
        let reply = run_agent_with(&provider, "질문", dir.path(), &tx)
            .await
            .expect("run succeeds");
        assert_eq!(reply.matches("파일 내용:\nx").count(), 2);
    }

    #[tokio::test]
    async fn unsupported_provider_yields_error_result() {
        let dir = TempDir::new().expect("tempdir");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = run_agent("Claude", "key", "질문", dir.path(), &tx).await;
        assert_eq!(result.status, AgentStatus::Error);
        assert_eq!(result.message, "에러 발생: 지원하지 않는 LLM입니다.");

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_terminal());
    }

    #[tokio::test]
    async fn simple_response_rejects_unknown_provider() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = generate_simple_response("Claude", "key", "질문", &tx).await;
        assert_eq!(result.status, AgentStatus::Error);
        assert_eq!(result.message, "에러 발생: 지원하지 않는 LLM입니다.");
        assert_eq!(drain(&mut rx).len(), 1);
    }
}
