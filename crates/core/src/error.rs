//! Errors raised by the DevDishes core crate.

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("recipe service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    NotFound(String),
    #[error("failed to decode response: {0}")]
    Decode(serde_json::Error),
    #[error("failed to read seed catalog: {0}")]
    SeedRead(std::io::Error),
    #[error("failed to parse seed catalog: {0}")]
    SeedDecode(serde_yaml::Error),
    #[error(transparent)]
    Text(#[from] devdishes_types::TextError),
}

impl RecipeError {
    /// The text shown to a person for this failure.
    ///
    /// Service failures surface the service's own message rather than the status line.
    pub fn user_message(&self) -> String {
        match self {
            RecipeError::Status { message, .. } => message.clone(),
            RecipeError::NotFound(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type RecipeResult<T> = std::result::Result<T, RecipeError>;
