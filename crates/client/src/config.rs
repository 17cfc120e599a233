//! Client configuration.
//!
//! Values come from the environment with hardcoded fallbacks; the CLI layers
//! its own flags on top through the `with_*` setters.

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Base URL used when `TOOLSCOUT_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";
/// Quiescence delay before a suggestion lookup fires.
pub const DEFAULT_SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);

pub const API_URL_ENV: &str = "TOOLSCOUT_API_URL";
pub const HTTP_TIMEOUT_ENV: &str = "TOOLSCOUT_HTTP_TIMEOUT_SECS";
pub const SUGGEST_DEBOUNCE_ENV: &str = "TOOLSCOUT_SUGGEST_DEBOUNCE_MS";

const USER_AGENT: &str = concat!("toolscout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: Url,
    /// `None` leaves timeouts to the transport defaults.
    request_timeout: Option<Duration>,
    suggestion_debounce: Duration,
    user_agent: String,
}

impl ClientConfig {
    /// Configuration for `api_url` with every other setting at its default.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            request_timeout: None,
            suggestion_debounce: DEFAULT_SUGGESTION_DEBOUNCE,
            user_agent: USER_AGENT.to_string(),
        })
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup` (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::debug!("{API_URL_ENV} not set; using {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            });

        let mut config = Self::new(&api_url)?;

        if let Some(secs) = lookup(HTTP_TIMEOUT_ENV) {
            config.request_timeout = Some(Duration::from_secs(parse_number(HTTP_TIMEOUT_ENV, &secs)?));
        }
        if let Some(ms) = lookup(SUGGEST_DEBOUNCE_ENV) {
            config.suggestion_debounce = Duration::from_millis(parse_number(SUGGEST_DEBOUNCE_ENV, &ms)?);
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_base_url(api_url)?;
        Ok(self)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_suggestion_debounce(mut self, delay: Duration) -> Self {
        self.suggestion_debounce = delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn suggestion_debounce(&self) -> Duration {
        self.suggestion_debounce
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Absolute URL of `segments` below the base URL; each segment is
    /// percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }
    Ok(url)
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}
