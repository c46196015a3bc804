// File: src/client/core.rs
use crate::config::Config;
use crate::model::RawListing;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// How much of a non-JSON response body is surfaced to the user.
const SNIPPET_MAX_CHARS: usize = 180;

/// What went wrong while talking to the listing backend. Every variant
/// renders as a single user-facing line; nothing here is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend reported a failure as JSON ({ "error": ... }).
    #[error("backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Non-JSON response body (typically an HTML error page from a proxy).
    #[error("unexpected response ({status}): {snippet}")]
    Http { status: u16, snippet: String },
}

/// Request shape (a): raw portal URLs forwarded verbatim to /api/fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlFetchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rightmove_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoopla_url: Option<String>,
}

impl UrlFetchRequest {
    pub fn is_empty(&self) -> bool {
        self.rightmove_url.is_none() && self.zoopla_url.is_none()
    }
}

/// Request shape (b): structured parameters for /api/search-rightmove.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_beds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_beds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
}

/// Both endpoints answer with this envelope: `listings` on success,
/// `error` (plus a non-2xx status) on failure.
#[derive(Debug, Default, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    listings: Option<Vec<RawListing>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ScoutClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScoutClient {
    pub fn new(base_url: &str, timeout_secs: u64, allow_insecure: bool) -> Result<Self, String> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(allow_insecure)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, String> {
        Self::new(
            &config.backend_url,
            config.request_timeout_secs,
            config.allow_insecure_certs,
        )
    }

    /// Fetch listings for raw portal URLs (shape a).
    pub async fn fetch_by_urls(
        &self,
        request: &UrlFetchRequest,
    ) -> Result<Vec<RawListing>, FetchError> {
        self.post_listings("/api/fetch", request).await
    }

    /// Fetch listings for a structured search (shape b).
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<RawListing>, FetchError> {
        self.post_listings("/api/search-rightmove", params).await
    }

    async fn post_listings<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Vec<RawListing>, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {}", url);

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<ApiEnvelope>(&text) {
            Ok(envelope) => {
                if status.is_success() {
                    Ok(envelope.listings.unwrap_or_default())
                } else {
                    let message = envelope
                        .error
                        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
                    Err(FetchError::Api {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
            // The body wasn't JSON at all. Surface the status plus a
            // truncated snippet instead of crashing on the decode.
            Err(_) => Err(FetchError::Http {
                status: status.as_u16(),
                snippet: snippet(&text),
            }),
        }
    }
}

/// Collapses whitespace runs and truncates to a displayable length.
fn snippet(body: &str) -> String {
    let collapsed: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SNIPPET_MAX_CHARS {
        collapsed
    } else {
        let cut: String = collapsed.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{}…", cut)
    }
}
