//! Request and response types for the PII Firewall API.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Placeholder style used by the service when it replaces PII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionMode {
    /// Descriptive placeholders such as `[EMAIL]`
    Label,
    /// A fixed run of masking characters
    Mask,
}

impl RedactionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Mask => "mask",
        }
    }
}

impl fmt::Display for RedactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detection depth.
///
/// `Fast` covers structured PII (contact, financial, government and
/// developer identifiers). `Deep` adds human names and street addresses at
/// higher latency. Both are handled identically by the client; only the
/// request path differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Fast,
    Deep,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Deep => "deep",
        }
    }

    /// Request path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Fast => "/v1/redact/fast",
            Self::Deep => "/v1/redact/deep",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a redaction request.
///
/// Deliberately not `Debug`: the text must never end up in logs.
#[derive(Serialize)]
pub(crate) struct RedactRequest<'a> {
    pub text: &'a str,
    pub mode: RedactionMode,
}

impl RedactRequest<'_> {
    pub fn to_body(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Success body as sent by the service. Fields not listed here are ignored.
#[derive(Deserialize)]
struct RedactResponse {
    redacted: String,
    detections: u32,
    #[serde(default)]
    warning: Option<String>,
}

/// Outcome of a successful redaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionResult {
    redacted_text: String,
    detection_count: u32,
    warning: Option<String>,
}

impl RedactionResult {
    pub fn new(
        redacted_text: impl Into<String>,
        detection_count: u32,
        warning: Option<String>,
    ) -> Self {
        Self {
            redacted_text: redacted_text.into(),
            detection_count,
            warning,
        }
    }

    /// Parse a 200 response body.
    ///
    /// `redacted` and `detections` are required; a body missing either is an
    /// error rather than an empty result. `warning` may be absent or null.
    pub fn from_json(body: &str) -> Result<Self> {
        let response: RedactResponse = serde_json::from_str(body)?;
        Ok(Self {
            redacted_text: response.redacted,
            detection_count: response.detections,
            warning: response.warning,
        })
    }

    /// Text with PII replaced. The only field meant for rendering downstream.
    pub fn redacted_text(&self) -> &str {
        &self.redacted_text
    }

    pub fn detection_count(&self) -> u32 {
        self.detection_count
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn has_pii(&self) -> bool {
        self.detection_count > 0
    }

    pub fn into_redacted_text(self) -> String {
        self.redacted_text
    }
}

impl fmt::Display for RedactionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RedactionResult{{detections={}, redacted='{}'}}",
            self.detection_count, self.redacted_text
        )
    }
}
