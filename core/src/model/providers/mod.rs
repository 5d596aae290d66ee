mod google;
mod openai;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::model::error::ModelError;
use crate::model::provider::ModelProvider;

pub use google::GoogleProvider;
pub use openai::OpenAIProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn create_client() -> Result<Client, ModelError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Resolve a configured provider name to a backend.
///
/// Matching is exact. An unrecognized name is an error here, before any
/// request is made.
pub fn create_provider(
    provider: &str,
    api_key: &str,
) -> Result<Arc<dyn ModelProvider>, ModelError> {
    match provider {
        "ChatGPT" => Ok(Arc::new(OpenAIProvider::new(
            create_client()?,
            api_key.to_string(),
        ))),
        "Gemini" => Ok(Arc::new(GoogleProvider::new(
            create_client()?,
            api_key.to_string(),
        ))),
        other => Err(ModelError::UnsupportedProvider(other.to_string())),
    }
}
