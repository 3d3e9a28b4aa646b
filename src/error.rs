use thiserror::Error;

/// Errors surfaced by the Spotify client, the credential lifecycle and the
/// scoring/discovery algorithms layered on top of it.
#[derive(Debug, Error)]
pub enum Error {
    /// The authorization code was invalid, expired or already consumed.
    #[error("Could not authenticate client: token exchange returned {status}: {message}")]
    AuthExchange { status: u16, message: String },

    /// The refresh token was rejected. The credential is dropped and a fresh
    /// login is required.
    #[error("Token refresh rejected with {status}: {message}. Please run spotifeat auth")]
    TokenRefresh { status: u16, message: String },

    #[error("Authorization was denied: {0}")]
    AuthDenied(String),

    #[error("Login was not completed within {0} seconds")]
    LoginTimeout(u64),

    #[error("Not authenticated. Please run spotifeat auth")]
    NotAuthenticated,

    #[error("No discovery candidate found after {attempts} attempts")]
    DiscoveryExhausted { attempts: u32 },

    #[error("Ranked window lists `{item_id}` twice (ranks {first} and {second})")]
    AggregationInput {
        item_id: String,
        first: usize,
        second: usize,
    },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Response is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Response field `{0}` is out of range")]
    InvalidField(&'static str),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Access token cannot be used as a header value")]
    InvalidHeader,
}

impl Error {
    /// Whether a failed search should be answered with a fresh random query.
    ///
    /// Upstream rejections and malformed result sets are retried; credential
    /// and transport failures are not.
    pub fn is_discovery_retryable(&self) -> bool {
        matches!(
            self,
            Error::Api { .. } | Error::Json(_) | Error::MissingField(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
