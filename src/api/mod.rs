pub mod models;

pub use models::{Character, CharacterPage, Episode, NamedResource, PageInfo};

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::utils::url::construct_api_url;

/// Errors produced while talking to the character API.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset, ...).
    Request {
        url: String,
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The body was not the JSON shape we expected.
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request { url, source } => {
                write!(f, "Request to {url} failed: {source}")
            }
            ApiError::Status { url, status, body } => {
                let detail = extract_error_summary(body).unwrap_or_else(|| body.trim().to_string());
                if detail.is_empty() {
                    write!(f, "Request to {url} failed with status {status}")
                } else {
                    write!(f, "Request to {url} failed with status {status}: {detail}")
                }
            }
            ApiError::Decode { url, source } => {
                write!(f, "Unexpected response from {url}: {source}")
            }
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Request { source, .. } => Some(source),
            ApiError::Status { .. } => None,
            ApiError::Decode { source, .. } => Some(source),
        }
    }
}

/// Pull a one-line summary out of an API error body such as
/// `{"error":"There is nothing here"}`.
fn extract_error_summary(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let summary = value
        .get("error")
        .and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.to_string()),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|message| message.as_str().map(str::to_owned)),
            _ => None,
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        })?;

    let collapsed = summary.split_whitespace().collect::<Vec<_>>().join(" ");
    Some(collapsed)
}

/// Read-only access to the character API.
///
/// The browser and the `list` command only ever talk to the network through
/// this trait, which keeps the pipeline testable without a live server.
#[async_trait]
pub trait CharacterApi: Send + Sync {
    async fn fetch_character_page(&self, page: u32) -> Result<CharacterPage, ApiError>;

    async fn fetch_episode(&self, url: &str) -> Result<Episode, ApiError>;
}

#[derive(Clone)]
pub struct HttpCharacterApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCharacterApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn character_page_url(&self, page: u32) -> String {
        format!("{}?page={page}", construct_api_url(&self.base_url, "character"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;
        debug!(url, bytes = bytes.len(), "response received");

        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CharacterApi for HttpCharacterApi {
    async fn fetch_character_page(&self, page: u32) -> Result<CharacterPage, ApiError> {
        let url = self.character_page_url(page);
        self.get_json(&url).await
    }

    async fn fetch_episode(&self, url: &str) -> Result<Episode, ApiError> {
        self.get_json(url).await
    }
}
