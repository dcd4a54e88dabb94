//! Application configuration loaded from environment variables.
//!
//! The bearer token **must** be provided via `OANDA_API_TOKEN`.
//!
//! Optional overrides:
//! - `OANDA_API_URL`: REST base URL (defaults to the fxPractice host)
//! - `OANDA_STREAM_URL`: streaming base URL (defaults to the fxPractice host)
//! - `OANDA_ACCOUNT_ID`: account used by account-scoped endpoints

use std::fmt;

use zeroize::Zeroizing;

/// Default REST endpoint (practice environment).
pub const DEFAULT_API_URL: &str = "https://api-fxpractice.oanda.com";

/// Default streaming endpoint (practice environment).
pub const DEFAULT_STREAM_URL: &str = "https://stream-fxpractice.oanda.com";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub oanda: OandaConfig,
}

/// OANDA-specific configuration values.
pub struct OandaConfig {
    pub api_url: String,
    pub stream_url: String,
    pub account_id: Option<String>,
    pub api_token: Zeroizing<String>,
}

impl fmt::Debug for OandaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OandaConfig")
            .field("api_url", &self.api_url)
            .field("stream_url", &self.stream_url)
            .field("account_id", &self.account_id)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`OandaError::Config`](crate::OandaError::Config) if
/// `OANDA_API_TOKEN` is missing or empty.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let api_token = non_empty_var("OANDA_API_TOKEN").ok_or_else(|| {
        crate::OandaError::Config("OANDA_API_TOKEN is not set".to_string())
    })?;

    let api_url = non_empty_var("OANDA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let stream_url =
        non_empty_var("OANDA_STREAM_URL").unwrap_or_else(|| DEFAULT_STREAM_URL.to_string());
    let account_id = non_empty_var("OANDA_ACCOUNT_ID");

    Ok(AppConfig {
        oanda: OandaConfig {
            api_url,
            stream_url,
            account_id,
            api_token: Zeroizing::new(api_token),
        },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
