use std::env;
use reqwest::Url;
use crate::controller::ResponseOrdering;
use crate::error::{SummarizeError, Result};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub ordering: ResponseOrdering,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let endpoint = env::var("SUMMARIZER_ENDPOINT").ok();
        let discard_stale = env::var("SUMMARIZER_DISCARD_STALE").ok();

        Self::from_values(endpoint.as_deref(), discard_stale.as_deref())
    }

    /// Builds a config from raw setting values, applying defaults for the
    /// ones that are absent.
    pub fn from_values(endpoint: Option<&str>, discard_stale: Option<&str>) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint.unwrap_or(DEFAULT_ENDPOINT))?;

        let ordering = match discard_stale.map(|v| v.trim().to_ascii_lowercase()) {
            None => ResponseOrdering::LastResolved,
            Some(v) => match v.as_str() {
                "" | "0" | "false" | "no" => ResponseOrdering::LastResolved,
                "1" | "true" | "yes" => ResponseOrdering::LatestIssued,
                other => {
                    return Err(SummarizeError::ConfigError(format!(
                        "Invalid SUMMARIZER_DISCARD_STALE value: {}",
                        other
                    )));
                }
            },
        };

        Ok(Config { endpoint, ordering })
    }

    /// Applies command-line overrides on top of the environment settings.
    pub fn with_overrides(mut self, endpoint: Option<&str>, discard_stale: bool) -> Result<Self> {
        if let Some(endpoint) = endpoint {
            self.endpoint = parse_endpoint(endpoint)?;
        }
        if discard_stale {
            self.ordering = ResponseOrdering::LatestIssued;
        }
        Ok(self)
    }
}

pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| SummarizeError::ConfigError(format!("Invalid endpoint {:?}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(SummarizeError::ConfigError(format!(
                "Unsupported endpoint scheme: {}",
                scheme
            )));
        }
    }

    // The /summarize route is appended to the path.
    if url.query().is_some() || url.fragment().is_some() {
        return Err(SummarizeError::ConfigError(format!(
            "Endpoint must not carry a query or fragment: {}",
            raw
        )));
    }

    Ok(url)
}
