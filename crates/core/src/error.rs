use thiserror::Error;

pub type OutreachResult<T> = Result<T, OutreachError>;

#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown campaign: {0}")]
    UnknownCampaign(uuid::Uuid),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
