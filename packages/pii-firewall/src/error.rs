//! Error types for the PII Firewall client.
//!
//! Every failure carries a classification ([`ErrorKind`]), an HTTP-style
//! status code (`0` when no response was obtained) and, where one exists,
//! the underlying cause via [`std::error::Error::source`].

use serde::Deserialize;
use thiserror::Error;

/// Result type for PII Firewall client operations.
pub type Result<T> = std::result::Result<T, PiiFirewallError>;

/// Fallback used when an error response carries no `error` field.
const UNKNOWN_ERROR: &str = "Unknown error";

/// PII Firewall client errors.
#[derive(Debug, Error)]
pub enum PiiFirewallError {
    /// Client misconfiguration (blank API key, zero timeout)
    #[error("{0}")]
    InvalidArgument(String),

    /// Text rejected locally, before any request was sent
    #[error("{0}")]
    InvalidInput(String),

    /// No HTTP response was obtained (DNS, connect, timeout, stream error)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 400: the service rejected the payload
    #[error("Bad Request: {message}")]
    BadRequest { message: String },

    /// 401: invalid or missing API key
    #[error("Unauthorized: Invalid or missing API key")]
    Unauthorized { message: String },

    /// 403: the key has no access to this API
    #[error("Forbidden: API key does not have access")]
    Forbidden { message: String },

    /// Input exceeds the plan-tier size limit
    #[error("Payload Too Large: {message}")]
    PayloadTooLarge { message: String },

    /// 429: plan quota or rate limit hit
    #[error("Rate Limit Exceeded: Upgrade your plan or wait")]
    RateLimited { message: String },

    /// 500: internal service failure
    #[error("Server Error: Please try again later")]
    ServerError { message: String },

    /// Any other non-200 status
    #[error("HTTP Error {status}: {message}")]
    Http { status: u16, message: String },

    /// A 200 response whose body does not match the expected shape
    #[error("Failed to parse API response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Classification of a [`PiiFirewallError`], independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidInput,
    Transport,
    BadRequest,
    Unauthorized,
    Forbidden,
    PayloadTooLarge,
    RateLimited,
    ServerError,
    Http,
    Parse,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl PiiFirewallError {
    /// Classify a non-200 response.
    ///
    /// The body is parsed best-effort for an `error` string; anything else
    /// (empty body, HTML from a proxy, a non-string `error`) falls back to
    /// `"Unknown error"`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

        match status {
            400 => Self::BadRequest { message },
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            413 => Self::PayloadTooLarge { message },
            429 => Self::RateLimited { message },
            500 => Self::ServerError { message },
            status => Self::Http { status, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Transport(_) => ErrorKind::Transport,
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::ServerError { .. } => ErrorKind::ServerError,
            Self::Http { .. } => ErrorKind::Http,
            Self::Parse(_) => ErrorKind::Parse,
        }
    }

    /// HTTP status associated with this error.
    ///
    /// `0` means no response was obtained. Local validation failures report
    /// `400`; a malformed success body reports the `200` it arrived with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) | Self::InvalidInput(_) => 400,
            Self::Transport(_) => 0,
            Self::BadRequest { .. } => 400,
            Self::Unauthorized { .. } => 401,
            Self::Forbidden { .. } => 403,
            Self::PayloadTooLarge { .. } => 413,
            Self::RateLimited { .. } => 429,
            Self::ServerError { .. } => 500,
            Self::Http { status, .. } => *status,
            Self::Parse(_) => 200,
        }
    }

    /// Whether the caller may reasonably retry the same request.
    ///
    /// True exactly for transport failures, 429 and 5xx. The client itself
    /// never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self.status_code(), 0 | 429 | 500..=599)
    }

    /// The `error` text returned by the service, for HTTP error variants.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::BadRequest { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::PayloadTooLarge { message }
            | Self::RateLimited { message }
            | Self::ServerError { message }
            | Self::Http { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}
