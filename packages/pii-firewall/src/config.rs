//! Client configuration.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretBox};

use crate::error::{PiiFirewallError, Result};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://pii-firewall-edge.p.rapidapi.com";

/// Value of the `X-RapidAPI-Host` header. Fixed regardless of base URL.
pub const API_HOST: &str = "pii-firewall-edge.p.rapidapi.com";

/// Connect timeout used until `set_connect_timeout` is called.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(10_000);
/// Read timeout used until `set_read_timeout` is called.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Configuration owned by a [`PiiFirewallClient`](crate::PiiFirewallClient).
///
/// The API key and base URL are fixed at construction. Timeouts are stored
/// as atomics so they can be changed through a shared reference; every call
/// reads them once when it starts. Changing a timeout while calls are in
/// flight is unsynchronized: last write wins, and concurrent calls may or may
/// not observe it.
pub struct ClientConfig {
    api_key: SecretBox<str>,
    base_url: String,
    connect_timeout_ms: AtomicU64,
    read_timeout_ms: AtomicU64,
}

impl ClientConfig {
    /// Create a configuration with default timeouts and the production URL.
    ///
    /// Fails if the key is empty, blank, or not a valid header value.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PiiFirewallError::InvalidArgument(
                "API key cannot be null or empty".into(),
            ));
        }
        if HeaderValue::from_str(&api_key).is_err() {
            return Err(PiiFirewallError::InvalidArgument(
                "API key contains characters not allowed in an HTTP header".into(),
            ));
        }

        Ok(Self {
            api_key: SecretBox::new(Box::from(api_key.as_str())),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_ms: AtomicU64::new(millis(DEFAULT_CONNECT_TIMEOUT)),
            read_timeout_ms: AtomicU64::new(millis(DEFAULT_READ_TIMEOUT)),
        })
    }

    /// Point the client at a different host (proxies, local test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_connect_timeout(self, timeout: Duration) -> Result<Self> {
        self.set_connect_timeout(timeout)?;
        Ok(self)
    }

    pub fn with_read_timeout(self, timeout: Duration) -> Result<Self> {
        self.set_read_timeout(timeout)?;
        Ok(self)
    }

    /// Set the connect timeout. Must be at least one millisecond.
    pub fn set_connect_timeout(&self, timeout: Duration) -> Result<()> {
        let ms = positive_millis("connect", timeout)?;
        self.connect_timeout_ms.store(ms, Ordering::Relaxed);
        Ok(())
    }

    /// Set the read timeout. Must be at least one millisecond.
    pub fn set_read_timeout(&self, timeout: Duration) -> Result<()> {
        let ms = positive_millis("read", timeout)?;
        self.read_timeout_ms.store(ms, Ordering::Relaxed);
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms.load(Ordering::Relaxed))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms.load(Ordering::Relaxed))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API key as a sensitive header value.
    ///
    /// Only call this when building a request.
    pub(crate) fn api_key_header(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(self.api_key.expose_secret()).map_err(|_| {
            PiiFirewallError::InvalidArgument(
                "API key contains characters not allowed in an HTTP header".into(),
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout())
            .field("read_timeout", &self.read_timeout())
            .finish()
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

fn positive_millis(which: &str, timeout: Duration) -> Result<u64> {
    match millis(timeout) {
        0 => Err(PiiFirewallError::InvalidArgument(format!(
            "{} timeout must be at least 1ms",
            which
        ))),
        ms => Ok(ms),
    }
}
