//! HTTP client for the Rick and Morty REST API.
//!
//! Implements the `CharacterSource` and `EpisodeSource` contracts on top of
//! a shared `reqwest::Client`. Every call is a single attempt: this layer
//! carries no retry or backoff logic, the repository layer decides what to
//! do with a failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{RemoteError, Result};
use crate::types::{CharacterRecord, EpisodeRecord, Paginated};

/// Base URL of the public Rick and Morty REST API
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/";

/// HTTP request timeout.
/// 30s tolerates slow mobile networks while still failing fast enough for
/// the detail-screen cache fallback to feel responsive.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote contract for character resources
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// List one page of characters.
    ///
    /// `None` omits the `page` parameter and yields the server default
    /// (first) page.
    async fn list_characters(&self, page: Option<u32>) -> Result<Paginated<CharacterRecord>>;

    /// Point lookup by id.
    ///
    /// `Ok(None)` means the resource does not exist; transport failures are
    /// errors.
    async fn get_character(&self, id: i64) -> Result<Option<CharacterRecord>>;
}

/// Remote contract for episode resources
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// List one page of episodes.
    ///
    /// `None` omits the `page` parameter and yields the server default
    /// (first) page.
    async fn list_episodes(&self, page: Option<u32>) -> Result<Paginated<EpisodeRecord>>;

    /// Point lookup by id.
    ///
    /// `Ok(None)` means the resource does not exist; transport failures are
    /// errors.
    async fn get_episode(&self, id: i64) -> Result<Option<EpisodeRecord>>;
}

/// Rick and Morty API client.
///
/// Clone is cheap: `reqwest::Client` shares its connection pool internally.
#[derive(Debug, Clone)]
pub struct RickMortyClient {
    client: Client,
    base_url: Url,
}

impl RickMortyClient {
    /// Create a client against the public API with default settings.
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Create a client from a preconfigured `reqwest::Client` and base URL.
    ///
    /// The base URL must end with a trailing slash so endpoint paths join
    /// below it instead of replacing its last segment.
    pub fn with_base_url(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RemoteError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Issue one GET against a list endpoint and decode the paginated
    /// envelope. Success requires HTTP 200.
    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        page: Option<u32>,
    ) -> Result<Paginated<T>> {
        let mut url = self.endpoint(path)?;
        if let Some(page) = page {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }

        debug!(url = %url, "Fetching list page");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RemoteError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| RemoteError::Parse(format!("{}: {}", url, e)))
    }

    /// Issue one GET for a point lookup. HTTP 404 is the domain-level
    /// "absent" signal, not a transport failure.
    async fn fetch_by_id<T: DeserializeOwned>(&self, path: &str, id: i64) -> Result<Option<T>> {
        let url = self.endpoint(&format!("{}/{}", path, id))?;

        debug!(url = %url, "Fetching resource");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(url = %url, "Resource not found");
            return Ok(None);
        }
        if status != StatusCode::OK {
            return Err(RemoteError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let record = serde_json::from_slice(&body)
            .map_err(|e| RemoteError::Parse(format!("{}: {}", url, e)))?;
        Ok(Some(record))
    }
}

#[async_trait]
impl CharacterSource for RickMortyClient {
    async fn list_characters(&self, page: Option<u32>) -> Result<Paginated<CharacterRecord>> {
        self.list("character/", page).await
    }

    async fn get_character(&self, id: i64) -> Result<Option<CharacterRecord>> {
        self.fetch_by_id("character", id).await
    }
}

#[async_trait]
impl EpisodeSource for RickMortyClient {
    async fn list_episodes(&self, page: Option<u32>) -> Result<Paginated<EpisodeRecord>> {
        self.list("episode/", page).await
    }

    async fn get_episode(&self, id: i64) -> Result<Option<EpisodeRecord>> {
        self.fetch_by_id("episode", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RickMortyClient::new().unwrap();
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_joins_below_base() {
        let client = RickMortyClient::new().unwrap();

        let url = client.endpoint("character/").unwrap();
        assert_eq!(url.as_str(), "https://rickandmortyapi.com/api/character/");

        let url = client.endpoint("episode/12").unwrap();
        assert_eq!(url.as_str(), "https://rickandmortyapi.com/api/episode/12");
    }

    #[test]
    fn test_list_url_carries_page_parameter() {
        let client = RickMortyClient::new().unwrap();

        let mut url = client.endpoint("episode/").unwrap();
        url.query_pairs_mut().append_pair("page", "3");
        assert_eq!(
            url.as_str(),
            "https://rickandmortyapi.com/api/episode/?page=3"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let client = Client::new();
        let result = RickMortyClient::with_base_url(client, "not a url");
        assert!(matches!(result, Err(RemoteError::InvalidUrl(_))));
    }
}
