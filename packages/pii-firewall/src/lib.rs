//! Pure PII Firewall Edge REST API client.
//!
//! A minimal client for the PII Firewall Edge redaction service. Detection
//! runs entirely server-side; this crate sends text, parses the response and
//! classifies failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use pii_firewall::PiiFirewallClient;
//!
//! let client = PiiFirewallClient::new(std::env::var("PII_FIREWALL_API_KEY")?)?;
//!
//! let result = client.redact_fast("Reach me at jane@example.com").await?;
//! if result.has_pii() {
//!     println!("{}", result.redacted_text()); // "Reach me at [EMAIL]"
//! }
//! ```
//!
//! # Retries
//!
//! The client never retries. Use [`PiiFirewallError::is_retryable`] to drive
//! your own backoff:
//!
//! ```rust,ignore
//! match client.redact_deep(text).await {
//!     Ok(result) => use_it(result),
//!     Err(e) if e.is_retryable() => schedule_retry(),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod config;
pub mod error;
pub mod types;

pub use config::{ClientConfig, API_HOST, DEFAULT_BASE_URL};
pub use error::{ErrorKind, PiiFirewallError, Result};
pub use types::{Endpoint, RedactionMode, RedactionResult};

use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderValue};
use reqwest::{redirect, Client, StatusCode};
use tracing::{debug, instrument, warn};

use types::RedactRequest;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("pii-firewall-rust/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// PII Firewall Edge API client.
///
/// Cheap to share: wrap it in an `Arc` to issue calls from several tasks.
/// Each call builds its own HTTP connection with the timeouts current at the
/// time the call starts, and releases it when the call returns.
#[derive(Debug)]
pub struct PiiFirewallClient {
    config: ClientConfig,
}

impl PiiFirewallClient {
    /// Create a client for the given RapidAPI key.
    ///
    /// Fails with [`ErrorKind::InvalidArgument`] if the key is blank. No
    /// network activity happens here.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::from_config(ClientConfig::new(api_key)?))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Set a custom base URL (for proxies, local test servers, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(url);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.config = self.config.with_connect_timeout(timeout)?;
        Ok(self)
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.config = self.config.with_read_timeout(timeout)?;
        Ok(self)
    }

    /// Set the connect timeout used by subsequent calls (default 10s).
    pub fn set_connect_timeout(&self, timeout: Duration) -> Result<()> {
        self.config.set_connect_timeout(timeout)
    }

    /// Set the read timeout used by subsequent calls (default 10s).
    pub fn set_read_timeout(&self, timeout: Duration) -> Result<()> {
        self.config.set_read_timeout(timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        self.config.connect_timeout()
    }

    pub fn read_timeout(&self) -> Duration {
        self.config.read_timeout()
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Redact structured PII (emails, phones, SSNs, cards, API keys, ...)
    /// with descriptive labels. Does not detect names or addresses.
    pub async fn redact_fast(&self, text: &str) -> Result<RedactionResult> {
        self.redact(text, Endpoint::Fast, RedactionMode::Label).await
    }

    /// Fast detection, masking PII instead of labelling it.
    pub async fn redact_fast_masked(&self, text: &str) -> Result<RedactionResult> {
        self.redact(text, Endpoint::Fast, RedactionMode::Mask).await
    }

    /// Redact everything `redact_fast` does plus human names and street
    /// addresses. Higher latency.
    pub async fn redact_deep(&self, text: &str) -> Result<RedactionResult> {
        self.redact(text, Endpoint::Deep, RedactionMode::Label).await
    }

    /// Deep detection, masking PII instead of labelling it.
    pub async fn redact_deep_masked(&self, text: &str) -> Result<RedactionResult> {
        self.redact(text, Endpoint::Deep, RedactionMode::Mask).await
    }

    /// Send `text` to the given endpoint and parse the result.
    ///
    /// Blank text fails with [`ErrorKind::InvalidInput`] without touching the
    /// network. The text itself is never logged.
    #[instrument(skip_all, fields(endpoint = %endpoint, mode = %mode))]
    pub async fn redact(
        &self,
        text: &str,
        endpoint: Endpoint,
        mode: RedactionMode,
    ) -> Result<RedactionResult> {
        if text.trim().is_empty() {
            return Err(PiiFirewallError::InvalidInput(
                "Text cannot be empty".into(),
            ));
        }

        let body = RedactRequest { text, mode }.to_body()?;
        let api_key = self.config.api_key_header()?;

        // Dropped on every return path, which closes the connection.
        // Redirects are not followed: a 3xx is reported like any other
        // non-200, and the key and text never go to another host.
        let http_client = Client::builder()
            .connect_timeout(self.config.connect_timeout())
            .read_timeout(self.config.read_timeout())
            .redirect(redirect::Policy::none())
            .user_agent(USER_AGENT)
            .build()?;

        let url = format!("{}{}", self.config.base_url(), endpoint.path());
        let started = Instant::now();

        let response = http_client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .header(API_HOST_HEADER, HeaderValue::from_static(API_HOST))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "PII Firewall request failed");
                PiiFirewallError::from(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_body = response.text().await.unwrap_or_default();
            let err = PiiFirewallError::from_status(status.as_u16(), &error_body);
            warn!(
                status = status.as_u16(),
                kind = ?err.kind(),
                retryable = err.is_retryable(),
                "PII Firewall returned an error"
            );
            return Err(err);
        }

        let response_body = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read PII Firewall response body");
            PiiFirewallError::from(e)
        })?;

        let result = RedactionResult::from_json(&response_body).map_err(|e| {
            warn!(error = %e, "Unexpected PII Firewall response shape");
            e
        })?;

        debug!(
            detections = result.detection_count(),
            has_warning = result.warning().is_some(),
            elapsed_ms = config::millis(started.elapsed()),
            "Redaction complete"
        );

        Ok(result)
    }
}
