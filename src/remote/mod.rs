//! Clients for the remote content-listing and template-listing APIs.
//!
//! Fetchers are side-effect-free with respect to engine state: they
//! return data or a [`NetworkError`], and the state container alone
//! decides what gets committed (see the fetch sequencing there).

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::time::timeout;

use crate::config::EngineConfig;
use crate::model::{ContentItem, Origin};

/// Errors from remote calls.
///
/// All of them end up as a failed fetch status; none are fatal to the
/// engine. A transport timeout is treated like any other failure.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to '{url}' timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("'{url}' returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Provider rejected the request: {message}")]
    Provider { message: String },
}

/// Response envelope of the content-listing endpoint.
#[derive(Debug, Deserialize)]
struct ListingEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<ListingData>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    memes: Vec<RemoteItem>,
}

/// One item as the provider reports it.
#[derive(Debug, Deserialize)]
struct RemoteItem {
    id: String,
    name: String,
    url: String,
    #[serde(default)]
    box_count: Option<u32>,
}

impl RemoteItem {
    fn into_item(self) -> ContentItem {
        ContentItem {
            id: self.id,
            name: self.name,
            url: self.url,
            origin: Origin::Remote,
            box_count: self.box_count,
            timestamp: None,
            owner: None,
        }
    }
}

/// One entry of the template listing; only the name is used.
#[derive(Debug, Deserialize)]
struct TemplateEntry {
    name: String,
}

/// Apply an optional case-insensitive name filter to a fetched list.
/// The listing endpoint takes no request body, so queries are resolved
/// on the client.
fn apply_query(mut items: Vec<ContentItem>, query: Option<&str>) -> Vec<ContentItem> {
    if let Some(term) = query {
        let term = term.to_lowercase();
        items.retain(|item| item.name.to_lowercase().contains(&term));
    }
    items
}

/// HTTP client for the two remote endpoints.
pub struct RemoteFetcher {
    client: Client,
    content_url: String,
    template_url: String,
    request_timeout: Duration,
}

impl RemoteFetcher {
    pub fn new(config: &EngineConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(
                config.remote.connect_timeout_seconds.into(),
            ))
            .build()
            .expect("Failed to build remote client");

        Self {
            client,
            content_url: config.remote.content_url.clone(),
            template_url: config.remote.template_url.clone(),
            request_timeout: Duration::from_secs(config.remote.timeout_seconds.into()),
        }
    }

    /// Fetch the full browsable content list, in provider order.
    ///
    /// An optional `query` narrows the result by case-insensitive name
    /// match.
    pub async fn fetch_content_list(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<ContentItem>, NetworkError> {
        let envelope: ListingEnvelope = self.get_json(&self.content_url).await?;

        if !envelope.success {
            return Err(NetworkError::Provider {
                message: envelope
                    .error_message
                    .unwrap_or_else(|| "unknown provider error".to_string()),
            });
        }

        let items = envelope
            .data
            .map(|data| data.memes)
            .unwrap_or_default()
            .into_iter()
            .map(RemoteItem::into_item)
            .collect();

        Ok(apply_query(items, query))
    }

    /// Fetch up to `limit` template names for caption suggestions.
    pub async fn fetch_template_names(&self, limit: usize) -> Result<Vec<String>, NetworkError> {
        let entries: Vec<TemplateEntry> = self.get_json(&self.template_url).await?;
        Ok(entries.into_iter().take(limit).map(|t| t.name).collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, NetworkError> {
        let seconds = self.request_timeout.as_secs();

        let response = timeout(self.request_timeout, self.client.get(url).send())
            .await
            .map_err(|_| NetworkError::Timeout {
                url: url.to_string(),
                seconds,
            })?
            .map_err(|e| NetworkError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        timeout(self.request_timeout, response.json())
            .await
            .map_err(|_| NetworkError::Timeout {
                url: url.to_string(),
                seconds,
            })?
            .map_err(|e| NetworkError::Decode {
                url: url.to_string(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_envelope_parses_provider_shape() {
        let json = r#"{
            "success": true,
            "data": { "memes": [
                { "id": "61579", "name": "One Does Not Simply",
                  "url": "https://i.example/1bij.jpg",
                  "width": 568, "height": 335, "box_count": 2 }
            ]}
        }"#;
        let envelope: ListingEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        let items = envelope.data.unwrap().memes;
        assert_eq!(items.len(), 1);

        let item = items.into_iter().next().unwrap().into_item();
        assert_eq!(item.id, "61579");
        assert_eq!(item.origin, Origin::Remote);
        assert_eq!(item.box_count, Some(2));
        assert!(item.owner.is_none());
    }

    #[test]
    fn failure_envelope_carries_provider_message() {
        let json = r#"{ "success": false, "error_message": "rate limited" }"#;
        let envelope: ListingEnvelope = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.error_message.as_deref(), Some("rate limited"));
    }

    #[test]
    fn query_filter_is_case_insensitive() {
        let items: Vec<ContentItem> = ["Drake Hotline", "Distracted Boyfriend", "Two Buttons"]
            .iter()
            .enumerate()
            .map(|(i, name)| ContentItem {
                id: i.to_string(),
                name: name.to_string(),
                url: String::new(),
                origin: Origin::Remote,
                box_count: None,
                timestamp: None,
                owner: None,
            })
            .collect();

        let filtered = apply_query(items.clone(), Some("dRaKe"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Drake Hotline");

        // No query keeps everything.
        assert_eq!(apply_query(items, None).len(), 3);
    }

    #[test]
    fn template_entries_keep_names_only() {
        let json = r#"[ { "id": "aag", "name": "Ancient Aliens Guy", "lines": 2 },
                        { "id": "bad", "name": "Bad Luck Brian" } ]"#;
        let entries: Vec<TemplateEntry> = serde_json::from_str(json).unwrap();
        let names: Vec<String> = entries.into_iter().take(1).map(|t| t.name).collect();
        assert_eq!(names, vec!["Ancient Aliens Guy".to_string()]);
    }
}
