use thiserror::Error;

#[derive(Debug, Error)]
pub enum LadderError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("exchange error: {0}")]
    Exchange(#[from] chainup::ChainupError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification rejected with status {status}: {body}")]
    NotifyRejected { status: u16, body: String },

    #[error("invalid quote: {0}")]
    InvalidQuote(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
