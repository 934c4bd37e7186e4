use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}
