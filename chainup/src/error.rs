use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainupError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("signed request without API credentials")]
    MissingCredentials,

    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

pub type Result<T> = std::result::Result<T, ChainupError>;
