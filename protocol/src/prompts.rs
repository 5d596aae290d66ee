// System Prompts
// The preamble that teaches the model the directive vocabulary

/// Directive syntax the system prompt teaches and the parser consumes.
/// Must stay bit-exact in both directions for the loop to recognize a call.
pub const DIRECTIVE_EXAMPLE: &str = "[TOOL:read_file|src/App.tsx]";

/// Build the system preamble for a tool-enabled run.
///
/// `catalog` is the rendered tool list (one `[TOOL:...]` usage line per
/// tool) produced by the registry, so the prompt and the dispatcher can
/// never drift apart.
pub fn system_prompt(project_root: &str, catalog: &str) -> String {
    format!(
        r#"당신은 개발자의 파일 수정을 도와주는 AI 어시스턴트입니다.
프로젝트 경로: {project_root}

다음 작업을 수행할 수 있습니다:

{catalog}

사용 예시:
- 사용자: "App.tsx라는 파일을 찾아줄 수 있나?"
- 당신: [TOOL:find_by_name|App.tsx] 파일을 찾아드리겠습니다...
- 사용자: "component 폴더의 모든 tsx 파일 목록을 보여줘"
- 당신: [TOOL:search_files|component/**/*.tsx] component 폴더를 검색하겠습니다...

도구를 사용한 후 결과를 설명하는 자연스러운 응답을 제공해주세요."#
    )
}
