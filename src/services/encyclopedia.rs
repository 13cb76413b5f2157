//! Best-effort encyclopedia summaries shown next to movie details.
//!
//! This collaborator is optional: every failure is logged and reads as "no summary".

use reqwest::{Client as HttpClient, Url};
use serde::Deserialize;

#[async_trait::async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Plain-text summary for a page title, `None` on any failure
    async fn summary(&self, title: &str) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: Option<String>,
}

/// Wikipedia REST summary client
#[derive(Clone)]
pub struct WikiClient {
    http_client: HttpClient,
    api_url: String,
}

impl WikiClient {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    fn summary_url(&self, title: &str) -> Option<Url> {
        let page = page_title(title)?;
        let mut url = Url::parse(&self.api_url).ok()?;
        url.path_segments_mut().ok()?.pop_if_empty().push(&page);
        Some(url)
    }
}

/// Drops a trailing parenthetical such as a year: `"Heat (1995)"` becomes `"Heat"`
pub fn page_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    let base = match trimmed.rfind(" (") {
        Some(start) if trimmed.ends_with(')') => trimmed[..start].trim_end(),
        _ => trimmed,
    };
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[async_trait::async_trait]
impl Encyclopedia for WikiClient {
    async fn summary(&self, title: &str) -> Option<String> {
        let url = self.summary_url(title)?;

        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(title = %title, error = %e, "Encyclopedia request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(title = %title, status = %response.status(), "No encyclopedia page");
            return None;
        }

        match response.json::<SummaryResponse>().await {
            Ok(body) => body.extract.filter(|text| !text.is_empty()),
            Err(e) => {
                tracing::debug!(title = %title, error = %e, "Unreadable encyclopedia response");
                None
            }
        }
    }
}
