/// One message of a model conversation.
///
/// The run prompt is always a system message followed by user messages;
/// assistant turns are never replayed, so they have no variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    System(String),
    User(String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Self::System(text) | Self::User(text) => text,
        }
    }
}
