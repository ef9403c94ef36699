use thiserror::Error;

/// Failure taxonomy shared by all service clients.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The upstream Telegram client session is still connecting (the
    /// keyword-monitor service answers 503 until it is ready).
    #[error("upstream Telegram client is not ready yet")]
    NotReady,

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered 200 but reported a failure in its envelope.
    #[error("service reported failure: {0}")]
    Service(String),
}

impl ClientError {
    /// Upstream HTTP status, when this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
