use thiserror::Error;

/// Failures of the model gateway.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The configured provider name matched nothing. Checked before any
    /// network traffic so a typo fails the run immediately.
    #[error("지원하지 않는 LLM입니다.")]
    UnsupportedProvider(String),

    #[error("네트워크 오류: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx status from the provider, with whatever body it sent.
    #[error("API 오류 ({status}): {body}")]
    Api { status: u16, body: String },

    /// 2xx response whose body does not carry a completion.
    #[error("응답 형식 오류: {0}")]
    InvalidResponse(String),

    #[error("응답 파싱 오류: {0}")]
    Json(#[from] serde_json::Error),
}
