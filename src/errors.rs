use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Errors surfaced by context resolution and context object authoring
#[derive(Debug, Error)]
pub enum ContextError {
    // A context provider rejected the batched value query
    #[error("context provider '{domain}' failed: {message}")]
    Provider { domain: String, message: String },

    // A required field was absent when building a context object
    #[error("no {0} passed for the context object")]
    MissingField(&'static str),

    // The repository connector could not deliver a request
    #[error("transport error: {0}")]
    Transport(String),

    // Caller-supplied JSON could not be understood
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // The manager configuration names something that does not exist
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ContextError {
    fn from(e: serde_json::Error) -> Self {
        ContextError::InvalidInput(e.to_string())
    }
}

// Type alias for results that use `ContextError` as the error type
pub type Result<T> = std::result::Result<T, ContextError>;
