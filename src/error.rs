#[derive(Debug, thiserror::Error)]
pub enum EdcError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid content at {path}: {reason}")]
    InvalidContent { path: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    /// The global index references a position that does not exist in the
    /// exports it was built from. Always a bug, never bad input.
    #[error("index inconsistency: {0}")]
    IndexInconsistency(String),
}

pub type Result<T> = std::result::Result<T, EdcError>;
