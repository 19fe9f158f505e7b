//! Redact text from the command line.
//!
//! ```text
//! PII_FIREWALL_API_KEY=... cargo run --example redact -- [fast|deep] [--mask] <text...>
//! ```
//!
//! The key may also come from a `.env` file. Only the redacted text is
//! printed; the input is never echoed.

use anyhow::{bail, Context, Result};
use pii_firewall::{Endpoint, PiiFirewallClient, RedactionMode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pii_firewall=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_key =
        std::env::var("PII_FIREWALL_API_KEY").context("PII_FIREWALL_API_KEY must be set")?;

    let mut endpoint = Endpoint::Fast;
    let mut mode = RedactionMode::Label;
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "fast" if words.is_empty() => endpoint = Endpoint::Fast,
            "deep" if words.is_empty() => endpoint = Endpoint::Deep,
            "--mask" => mode = RedactionMode::Mask,
            _ => words.push(arg),
        }
    }
    if words.is_empty() {
        bail!("usage: redact [fast|deep] [--mask] <text...>");
    }
    let text = words.join(" ");

    let client = PiiFirewallClient::new(api_key).context("Failed to create client")?;

    match client.redact(&text, endpoint, mode).await {
        Ok(result) => {
            println!("{}", result.redacted_text());
            println!("detections: {}", result.detection_count());
            if let Some(warning) = result.warning() {
                println!("warning: {}", warning);
            }
            Ok(())
        }
        Err(e) if e.is_retryable() => {
            bail!("{} (status {}, retryable)", e, e.status_code())
        }
        Err(e) => Err(e).context("Redaction failed"),
    }
}
