use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::model::error::ModelError;
use crate::model::provider::ModelProvider;
use crate::model::types::Message;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-4-turbo";
const TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIProvider {
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
impl ModelProvider for OpenAIProvider {
    fn provider_id(&self) -> &'static str {
        "ChatGPT"
    }

    async fn invoke(&self, messages: &[Message]) -> Result<String, ModelError> {
        let wire: Vec<WireMessage> = messages
            .iter()
            .map(|m| match m {
                Message::System(text) => WireMessage {
                    role: "system",
                    content: text,
                },
                Message::User(text) => WireMessage {
                    role: "user",
                    content: text,
                },
            })
            .collect();

        let request = ChatRequest {
            model: MODEL,
            messages: wire,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
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

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ModelError::InvalidResponse("choices가 비어 있습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn invoke_sends_chat_request_and_reads_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4-turbo",
                "messages": [
                    { "role": "system", "content": "지침" },
                    { "role": "user", "content": "안녕" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "반갑습니다" } }
                ]
            })))
            .mount(&server)
            .await;

        let provider = OpenAIProvider::new(Client::new(), "sk-test".to_string())
            .with_base_url(server.uri());
        let reply = provider
            .invoke(&[
                Message::System("지침".to_string()),
                Message::User("안녕".to_string()),
            ])
            .await
            .expect("invoke succeeds");
        assert_eq!(reply, "반갑습니다");
    }

    #[tokio::test]
    async fn non_success_status_surfaces_as_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let provider = OpenAIProvider::new(Client::new(), "bad".to_string())
            .with_base_url(server.uri());
        let err = provider
            .invoke(&[Message::User("x".to_string())])
            .await
            .expect_err("api error");
        assert!(matches!(err, ModelError::Api { status: 401, .. }));
    }
}
