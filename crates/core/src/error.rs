use thiserror::Error;

#[derive(Error, Debug)]
pub enum OffloadError {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
