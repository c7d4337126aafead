use crate::storefront::StorefrontError;

/// Failures surfaced by the storefront client.
///
/// Workflows never bubble these up as panics: validation, transport and
/// application failures all collapse to an error notification. `Err` is
/// only returned to callers that hand in malformed input (bad trigger
/// attributes, unknown order id, broken configuration).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] StorefrontError),

    #[error("server rejected request: {0}")]
    Application(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Text shown to the user in an error notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg) | ClientError::Config(msg) => msg.clone(),
            ClientError::Transport(e) => e.to_string(),
            ClientError::Application(msg) => format!("Error: {msg}"),
        }
    }
}
