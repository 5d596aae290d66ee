//! End-to-end run tests over a mocked chat-completion endpoint.

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use filebot_core::model::providers::OpenAIProvider;
use filebot_core::run_agent_with;
use filebot_protocol::{AgentEvent, ProgressPhase};

async fn mock_reply(server: &MockServer, reply: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": reply } }
            ]
        })))
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> OpenAIProvider {
    OpenAIProvider::new(reqwest::Client::new(), "sk-test".to_string())
        .with_base_url(server.uri())
}

#[tokio::test]
async fn full_run_executes_directives_and_splices_results() {
    let server = MockServer::start().await;
    mock_reply(
        &server,
        "파일을 만들었습니다: [TOOL:write_file|src/hello.ts|export const hi = 1;] 확인해보세요.",
    )
    .await;

    let dir = TempDir::new().expect("tempdir");
    let (tx, mut rx) = mpsc::unbounded_channel();

    let reply = run_agent_with(&provider(&server), "hello.ts 만들어줘", dir.path(), &tx)
        .await
        .expect("run succeeds");

    assert_eq!(
        reply,
        "파일을 만들었습니다: \n✅ 파일이 성공적으로 저장되었습니다: src/hello.ts 확인해보세요."
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("src/hello.ts")).expect("file written"),
        "export const hi = 1;"
    );

    let mut phases = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let AgentEvent::Progress(p) = event {
            phases.push(p.phase);
        }
    }
    assert_eq!(phases, vec![ProgressPhase::ToolUse, ProgressPhase::ToolResult]);
}

#[tokio::test]
async fn sandbox_violations_surface_inline_not_as_run_failure() {
    let server = MockServer::start().await;
    mock_reply(
        &server,
        "[TOOL:read_file|../../etc/passwd] 그리고 [TOOL:write_file|.env|SECRET=1]",
    )
    .await;

    let dir = TempDir::new().expect("tempdir");
    let (tx, _rx) = mpsc::unbounded_channel();

    let reply = run_agent_with(&provider(&server), "읽어줘", dir.path(), &tx)
        .await
        .expect("run still succeeds");

    assert_eq!(
        reply,
        "❌ 에러: 프로젝트 루트 밖의 파일에 접근할 수 없습니다. 그리고 \n❌ 에러: \".env\"는 수정할 수 없는 파일입니다."
    );
    assert!(!dir.path().join(".env").exists());
}

#[tokio::test]
async fn introspection_directives_read_the_real_tree() {
    let server = MockServer::start().await;
    mock_reply(&server, "분석 결과입니다: [TOOL:analyze_deps|]").await;

    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("package.json"),
        r#"{ "name": "demo", "dependencies": { "react": "^18.0.0" } }"#,
    )
    .expect("manifest");
    let (tx, _rx) = mpsc::unbounded_channel();

    let reply = run_agent_with(&provider(&server), "의존성 보여줘", dir.path(), &tx)
        .await
        .expect("run succeeds");

    assert!(reply.contains("의존성 분석:"));
    assert!(reply.contains("- react"));
}
