//! Model gateway: provider selection and chat-completion calls.

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

pub use error::ModelError;
pub use provider::ModelProvider;
pub use providers::{create_provider, GoogleProvider, OpenAIProvider};
pub use types::Message;
