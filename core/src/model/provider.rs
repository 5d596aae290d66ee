use async_trait::async_trait;

use crate::model::error::ModelError;
use crate::model::types::Message;

/// A chat-completion backend.
///
/// Implementations own their HTTP client and credentials; callers hand
/// over the full message list and get back the assistant text.
#[async_trait]
pub trait ModelProvider: Send + Sync + std::fmt::Debug {
    fn provider_id(&self) -> &'static str;

    async fn invoke(&self, messages: &[Message]) -> Result<String, ModelError>;
}
