//! HTTP client for the biolink admin API
//!
//! [`AdminApi`] is the seam the admin panel and the one-shot commands talk
//! through. [`ApiClient`] implements it over `reqwest`; tests substitute an
//! in-memory fake.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use biolink_core::{Ack, LinkItem, LinkPatch, Settings};

/// Requests that take longer than this fail instead of hanging the panel
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors returned by the admin client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The request never produced a response (connection, timeout, decoding)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status for server-side failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Operations the admin side performs against the server
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_links(&self) -> ClientResult<Vec<LinkItem>>;
    async fn get_link(&self, id: &str) -> ClientResult<LinkItem>;
    async fn create_link(&self, link: &LinkItem) -> ClientResult<LinkItem>;
    async fn update_link(&self, id: &str, patch: &LinkPatch) -> ClientResult<LinkItem>;
    async fn delete_link(&self, id: &str) -> ClientResult<Ack>;
    /// Overwrite the whole collection; used for reordering
    async fn replace_links(&self, links: &[LinkItem]) -> ClientResult<Ack>;
    async fn get_settings(&self) -> ClientResult<Settings>;
    async fn replace_settings(&self, settings: &Settings) -> ClientResult<Ack>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// `reqwest`-backed client for a running biolink server
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { base, http })
    }

    /// Base URL, which is also where the public page lives
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build a URL by appending path segments; segments are percent-encoded
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn list_links(&self) -> ClientResult<Vec<LinkItem>> {
        let url = self.url(&["links"])?;
        debug!("GET {}", url);
        Self::decode(self.http.get(url).send().await?).await
    }

    async fn get_link(&self, id: &str) -> ClientResult<LinkItem> {
        let url = self.url(&["links", id])?;
        debug!("GET {}", url);
        Self::decode(self.http.get(url).send().await?).await
    }

    async fn create_link(&self, link: &LinkItem) -> ClientResult<LinkItem> {
        let url = self.url(&["links"])?;
        debug!("POST {}", url);
        Self::decode(self.http.post(url).json(link).send().await?).await
    }

    async fn update_link(&self, id: &str, patch: &LinkPatch) -> ClientResult<LinkItem> {
        let url = self.url(&["links", id])?;
        debug!("PUT {}", url);
        Self::decode(self.http.put(url).json(patch).send().await?).await
    }

    async fn delete_link(&self, id: &str) -> ClientResult<Ack> {
        let url = self.url(&["links", id])?;
        debug!("DELETE {}", url);
        Self::decode(self.http.delete(url).send().await?).await
    }

    async fn replace_links(&self, links: &[LinkItem]) -> ClientResult<Ack> {
        let url = self.url(&["links"])?;
        debug!("PUT {} ({} links)", url, links.len());
        Self::decode(self.http.put(url).json(links).send().await?).await
    }

    async fn get_settings(&self) -> ClientResult<Settings> {
        let url = self.url(&["settings"])?;
        debug!("GET {}", url);
        Self::decode(self.http.get(url).send().await?).await
    }

    async fn replace_settings(&self, settings: &Settings) -> ClientResult<Ack> {
        let url = self.url(&["settings"])?;
        debug!("PUT {}", url);
        Self::decode(self.http.put(url).json(settings).send().await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample() -> Vec<LinkItem> {
        vec![
            LinkItem::with_id("1", "A", "https://a.example"),
            LinkItem::with_id("2", "B", "https://b.example"),
        ]
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(
            client.url(&["links", "a b/c"]).unwrap().as_str(),
            "http://localhost:3000/links/a%20b%2Fc"
        );

        let nested = ApiClient::new("http://localhost:3000/bio").unwrap();
        assert_eq!(
            nested.url(&["settings"]).unwrap().as_str(),
            "http://localhost:3000/bio/settings"
        );
    }

    #[tokio::test]
    async fn test_list_links() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/links"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample()))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri()).unwrap();
        assert_eq!(client.list_links().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_create_link_sends_item() {
        let mock_server = MockServer::start().await;
        let link = LinkItem::with_id("abc", "New", "https://n.example");
        Mock::given(method("POST"))
            .and(path("/links"))
            .and(body_json(&link))
            .respond_with(ResponseTemplate::new(201).set_body_json(&link))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri()).unwrap();
        assert_eq!(client.create_link(&link).await.unwrap(), link);
    }

    #[tokio::test]
    async fn test_update_sends_only_patch_fields() {
        let mock_server = MockServer::start().await;
        let mut updated = LinkItem::with_id("1", "A", "https://a.example");
        updated.hidden = true;
        Mock::given(method("PUT"))
            .and(path("/links/1"))
            .and(body_json(json!({"hidden": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri()).unwrap();
        let result = client.update_link("1", &LinkPatch::hidden(true)).await.unwrap();
        assert!(result.hidden);
    }

    #[tokio::test]
    async fn test_not_found_carries_server_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/links/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Link not found"})),
            )
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri()).unwrap();
        let err = client.delete_link("missing").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Link not found (HTTP 404)");
    }

    #[tokio::test]
    async fn test_error_without_json_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/settings"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri()).unwrap();
        let err = client.get_settings().await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_replace_links_and_settings() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/links"))
            .and(body_json(sample()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Links updated successfully"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let settings = Settings::new("T", "S", "");
        Mock::given(method("PUT"))
            .and(path("/settings"))
            .and(body_json(json!({"title": "T", "subtitle": "S", "profileImage": ""})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Settings updated successfully"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&mock_server.uri()).unwrap();
        let ack = client.replace_links(&sample()).await.unwrap();
        assert_eq!(ack.message, "Links updated successfully");
        let ack = client.replace_settings(&settings).await.unwrap();
        assert_eq!(ack.message, "Settings updated successfully");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ApiClient::new(&format!("http://127.0.0.1:{}", port)).unwrap();
        let err = client.list_links().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}
