use std::fmt;
use std::time::Duration;

/// Default timeout applied to every REST request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// API key pair used for signed endpoints.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

// Keep the secret out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration for the ChainUp REST client.
#[derive(Debug, Clone)]
pub struct ChainupConfig {
    /// Base URL of the exchange open API (e.g. `https://openapi.example.com`).
    pub base_url: String,
    /// Key pair for signed endpoints; public endpoints work without it.
    pub credentials: Option<Credentials>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ChainupConfig {
    /// Public-only configuration (ticker access).
    pub fn public(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration with credentials for signed endpoints.
    pub fn signed(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: Some(credentials),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
