//! Tool layer error types

use thiserror::Error;

/// Failures local to one directive.
///
/// Every variant renders as a single human-readable message that the
/// execution loop splices into the reply; none of them aborts a run.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Resolved target escapes the project root
    #[error("프로젝트 루트 밖의 파일에 접근할 수 없습니다.")]
    PathEscape,

    /// Write or delete aimed at a denylisted file name
    #[error("\"{0}\"는 수정할 수 없는 파일입니다.")]
    Protected(String),

    /// Missing file or directory target
    #[error("파일을 찾을 수 없습니다: {0}")]
    NotFound(String),

    /// Invalid search pattern
    #[error("파일 목록 조회 실패: {0}")]
    ListFailed(String),

    /// No manifest for dependency analysis
    #[error("package.json을 찾을 수 없습니다.")]
    ManifestMissing,

    /// Directive names a tool absent from the registry
    #[error("알 수 없는 도구: {0}")]
    UnknownTool(String),

    /// Directive carries too few or empty arguments
    #[error("잘못된 인자: {0}")]
    InvalidArguments(String),

    /// Underlying filesystem failure
    #[error("{0}")]
    Execution(String),
}

/// Alias for Result<T, ToolError>
pub type Result<T> = std::result::Result<T, ToolError>;
