use crate::checkout::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {path} failed with status {status}")]
    Status { status: u16, path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Cannot check out an empty cart")]
    EmptyCart,
}

impl StorefrontError {
    /// True for failures that happened talking to the backend (transport or
    /// non-2xx status), as opposed to local validation problems.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
