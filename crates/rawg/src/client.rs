//! RAWG API client.
//!
//! Async HTTP client using `reqwest`, authenticating with the API key as a
//! query parameter.

use std::time::Duration;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::params::{KEY_PARAM, RequestParams};
use crate::types::{GameDetail, GameSummary, GenreSummary, PagedResult, Screenshot};

pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

/// Errors from the RAWG client.
///
/// The `Display` text is what a failed catalog slice shows the user, so it
/// carries the transport's own message unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid API key")]
    InvalidKey,

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Connection settings for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// RAWG API client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl Client {
    /// Creates a new client against the public RAWG API.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Creates a client from explicit settings.
    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(Error::InvalidKey);
        }

        let base_url = config.base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        })
    }

    /// Sets a custom base URL (for testing).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// The API key attached to every request.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs a keyed GET request and decodes the JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &RequestParams,
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut params = params.clone();
        params.insert(KEY_PARAM, self.api_key.as_str());

        debug!(endpoint, params = params.len(), "RAWG request");
        let resp = self.http.get(&url).query(&params).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Lists games matching the given query parameters.
    pub async fn fetch_games(
        &self,
        params: &RequestParams,
    ) -> Result<PagedResult<GameSummary>, Error> {
        self.get("/games", params).await
    }

    /// Lists genres. Only the `results` array is returned.
    pub async fn fetch_genres(&self, params: &RequestParams) -> Result<Vec<GenreSummary>, Error> {
        let page: PagedResult<GenreSummary> = self.get("/genres", params).await?;
        Ok(page.items)
    }

    /// Returns the full record for a game, addressed by numeric id or slug.
    pub async fn fetch_game_by_id(&self, id: &str) -> Result<GameDetail, Error> {
        let encoded = utf8_percent_encode(id, NON_ALPHANUMERIC).to_string();
        self.get(&format!("/games/{encoded}"), &RequestParams::new())
            .await
    }

    /// Returns the screenshots of a game, addressed by numeric id or slug.
    pub async fn fetch_screenshots(&self, id: &str) -> Result<Vec<Screenshot>, Error> {
        let encoded = utf8_percent_encode(id, NON_ALPHANUMERIC).to_string();
        let page: PagedResult<Screenshot> = self
            .get(&format!("/games/{encoded}/screenshots"), &RequestParams::new())
            .await?;
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Starts a one-shot mock HTTP server answering with `status` and `body`.
    ///
    /// The join handle yields the raw request head so tests can inspect the
    /// request line and its query string.
    async fn mock_server(status: u16, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return String::new();
            };
            let mut buf = vec![0u8; 8192];
            let n = stream.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let resp = format!(
                "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes()).await;
            let _ = stream.shutdown().await;
            request
        });

        (url, handle)
    }

    fn request_line(request: &str) -> &str {
        request.lines().next().unwrap_or_default()
    }

    #[tokio::test]
    async fn fetch_games_returns_page() {
        let json = r#"{"count":812,"next":"https://api.rawg.io/api/games?page=2","previous":null,
            "results":[{"id":3498,"name":"Grand Theft Auto V","rating":4.47,"ratings_count":6900}]}"#;
        let (url, handle) = mock_server(200, json).await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let mut params = RequestParams::new();
        params.insert("page", "1").insert("search", "gta");
        let page = client.fetch_games(&params).await.unwrap();

        assert_eq!(page.count, 812);
        assert!(page.has_next());
        assert_eq!(page.items[0].id, 3498);

        let request = handle.await.unwrap();
        let line = request_line(&request);
        assert!(line.starts_with("GET /games?"), "{line}");
        assert!(line.contains("key=test-key"), "{line}");
        assert!(line.contains("search=gta"), "{line}");
    }

    #[tokio::test]
    async fn key_is_attached_once() {
        let (url, handle) = mock_server(200, r#"{"count":0,"results":[]}"#).await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let params = RequestParams::with_credential("test-key");
        client.fetch_games(&params).await.unwrap();

        let request = handle.await.unwrap();
        assert_eq!(request_line(&request).matches("key=").count(), 1);
    }

    #[tokio::test]
    async fn fetch_genres_returns_results_only() {
        let json = r#"{"count":19,"next":null,"previous":null,"results":[
            {"id":4,"name":"Action","games_count":180000},
            {"id":51,"name":"Indie","games_count":60000}
        ]}"#;
        let (url, handle) = mock_server(200, json).await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let mut params = RequestParams::new();
        params.insert("page", "1");
        let genres = client.fetch_genres(&params).await.unwrap();

        assert_eq!(genres.len(), 2);
        assert_eq!(genres[1].name, "Indie");

        let request = handle.await.unwrap();
        assert!(request_line(&request).starts_with("GET /genres?"));
    }

    #[tokio::test]
    async fn fetch_game_by_id_hits_detail_path() {
        let json = r#"{"id":3328,"name":"The Witcher 3: Wild Hunt","metacritic":92}"#;
        let (url, handle) = mock_server(200, json).await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let game = client.fetch_game_by_id("3328").await.unwrap();

        assert_eq!(game.name, "The Witcher 3: Wild Hunt");
        let request = handle.await.unwrap();
        assert!(request_line(&request).starts_with("GET /games/3328?key=test-key"));
    }

    #[tokio::test]
    async fn fetch_screenshots_hits_sub_resource() {
        let json = r#"{"count":2,"results":[
            {"id":-1,"image":"https://media.rawg.io/bg.jpg"},
            {"id":1827221,"image":"https://media.rawg.io/s1.jpg","width":1920,"height":1080}
        ]}"#;
        let (url, handle) = mock_server(200, json).await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let shots = client.fetch_screenshots("the-witcher-3").await.unwrap();

        assert_eq!(shots.len(), 2);
        assert_eq!(shots[1].width, 1920);
        let request = handle.await.unwrap();
        assert!(request_line(&request).starts_with("GET /games/the%2Dwitcher%2D3/screenshots?"));
    }

    #[tokio::test]
    async fn api_error_keeps_status_and_body() {
        let (url, _handle) = mock_server(401, r#"{"error":"The key parameter is not provided"}"#).await;

        let client = Client::new("bad-key").unwrap().with_base_url(url);
        let err = client.fetch_games(&RequestParams::new()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("401"), "error should mention 401: {msg}");
        assert!(msg.contains("key parameter"), "body should be preserved: {msg}");
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let (url, _handle) = mock_server(200, "not json").await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let err = client.fetch_game_by_id("1").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = Client::new("test-key")
            .unwrap()
            .with_base_url(format!("http://127.0.0.1:{port}"));
        let err = client.fetch_genres(&RequestParams::new()).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(Client::new("  "), Err(Error::InvalidKey)));
    }

    #[test]
    fn base_url_must_be_http() {
        let mut config = ClientConfig::new("k");
        config.base_url = "ftp://example.com".into();
        assert!(matches!(
            Client::with_config(config),
            Err(Error::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let mut config = ClientConfig::new("k");
        config.base_url = "https://example.com/api/".into();
        let client = Client::with_config(config).unwrap();
        assert_eq!(client.base_url(), "https://example.com/api");
    }
}
