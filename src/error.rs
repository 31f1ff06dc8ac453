use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParvisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize selection: {0}")]
    Serialize(#[from] serde_json::Error),
}
