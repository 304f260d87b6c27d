use reqwest::{Client, ClientBuilder, Url};
use once_cell::sync::Lazy;
use crate::api::models::{SummarizeRequest, SummarizeResponse};
use crate::error::{SummarizeError, Result};

// Shared across every SummaryClient so connections are pooled. No timeout:
// a request waits on the transport's own defaults.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .user_agent(concat!("summary-client/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// HTTP binding to the summarization backend's `/summarize` route.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: Client,
    summarize_url: String,
}

impl SummaryClient {
    pub fn new(endpoint: &Url) -> Self {
        Self::with_client(CLIENT.clone(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: &Url) -> Self {
        Self {
            client,
            summarize_url: summarize_url(endpoint),
        }
    }

    pub fn summarize_url(&self) -> &str {
        &self.summarize_url
    }

    /// Posts `{"url": url}` and returns the `summary` field of a 2xx answer.
    pub async fn summarize(&self, url: &str) -> Result<String> {
        let body = SummarizeRequest { url: url.to_string() };

        // .json() sets Content-Type: application/json
        let res = self
            .client
            .post(&self.summarize_url)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(SummarizeError::Status(status.as_u16()));
        }

        let text = res.text().await?;
        let parsed: SummarizeResponse = serde_json::from_str(&text)?;
        Ok(parsed.summary)
    }
}

fn summarize_url(endpoint: &Url) -> String {
    let mut url = endpoint.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("summarize");
    }
    url.into()
}
