use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::model::error::ModelError;
use crate::model::provider::ModelProvider;
use crate::model::types::Message;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-1.5-pro";
const TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug)]
pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleProvider {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different endpoint, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait::async_trait]
impl ModelProvider for GoogleProvider {
    fn provider_id(&self) -> &'static str {
        "Gemini"
    }

    async fn invoke(&self, messages: &[Message]) -> Result<String, ModelError> {
        // The generateContent API has no system role; system text is
        // wrapped in a marker tag and sent as a user turn.
        let contents: Vec<Content> = messages
            .iter()
            .map(|m| match m {
                Message::System(text) => Content {
                    role: "user".to_string(),
                    parts: vec![Part {
                        text: format!("<system_prompt>{text}</system_prompt>"),
                    }],
                },
                Message::User(text) => Content {
                    role: "user".to_string(),
                    parts: vec![Part { text: text.clone() }],
                },
            })
            .collect();

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent?key={}",
                self.base_url, MODEL, self.api_key
            ))
            .json(&GenerateRequest {
                contents,
                generation_config: GenerationConfig {
                    temperature: TEMPERATURE,
                },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::InvalidResponse("candidates가 비어 있습니다".to_string()))?;
        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
