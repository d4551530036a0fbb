//! Backend request operations and the reqwest-backed client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Settings, UpdateSettingsRequest};

/// Header carrying the caller-supplied correlation identifier.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

const SETTINGS_PATH: &str = "settings";
const STATUS_PATH: &str = "status";
const GOOGLE_ALBUMS_PATH: &str = "google/albums";

/// Operations exposed by the photoframe backend.
///
/// Response bodies are returned as parsed, without further validation.
#[async_trait]
pub trait PhotoframeApi: Send + Sync {
    /// `GET /settings`.
    async fn get_settings(&self) -> ApiResult<Settings>;

    /// `POST /settings` with body `{ "settings": ... }`.
    async fn update_settings(&self, settings: &Settings) -> ApiResult<Value>;

    /// `GET /status`.
    async fn get_status(&self) -> ApiResult<Value>;

    /// `GET /google/albums`.
    async fn get_google_albums(&self) -> ApiResult<Value>;
}

/// HTTP client bound to a resolved backend base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client with transport defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the TLS backend cannot initialise.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        Self::with_default_headers(config, HeaderMap::new())
    }

    /// Build a client that tags every request with `x-request-id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] when `request_id` is not a valid
    /// header value, or [`ApiError::ClientBuild`] if the client cannot be built.
    pub fn with_request_id(config: &ClientConfig, request_id: &str) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(request_id).map_err(|_| ApiError::InvalidHeader {
            name: HEADER_REQUEST_ID,
        })?;
        headers.insert(HEADER_REQUEST_ID, value);
        Self::with_default_headers(config, headers)
    }

    fn with_default_headers(config: &ClientConfig, headers: HeaderMap) -> ApiResult<Self> {
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|source| ApiError::ClientBuild { source })?;
        Ok(Self {
            client,
            base_url: config.base_url().clone(),
        })
    }

    /// Base URL endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|source| ApiError::InvalidBaseUrl {
                value: format!("{}{path}", self.base_url),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(operation, method = "GET", url = %url, "dispatching request");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| transport_error(operation, &url, source))?;
        read_json(operation, &url, response).await
    }

    async fn post_json<B, T>(&self, operation: &'static str, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(operation, method = "POST", url = %url, "dispatching request");
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|source| transport_error(operation, &url, source))?;
        read_json(operation, &url, response).await
    }
}

#[async_trait]
impl PhotoframeApi for ApiClient {
    async fn get_settings(&self) -> ApiResult<Settings> {
        self.get_json("get_settings", SETTINGS_PATH).await
    }

    async fn update_settings(&self, settings: &Settings) -> ApiResult<Value> {
        self.post_json(
            "update_settings",
            SETTINGS_PATH,
            &UpdateSettingsRequest { settings },
        )
        .await
    }

    async fn get_status(&self) -> ApiResult<Value> {
        self.get_json("get_status", STATUS_PATH).await
    }

    async fn get_google_albums(&self) -> ApiResult<Value> {
        self.get_json("get_google_albums", GOOGLE_ALBUMS_PATH).await
    }
}

fn transport_error(operation: &'static str, url: &Url, source: reqwest::Error) -> ApiError {
    tracing::debug!(operation, url = %url, error = %source, "request failed before a response");
    ApiError::Transport {
        operation,
        url: url.to_string(),
        source,
    }
}

/// Decode a successful response as JSON. An empty body decodes as `null`.
async fn read_json<T: DeserializeOwned>(
    operation: &'static str,
    url: &Url,
    response: Response,
) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        tracing::debug!(operation, url = %url, status = status.as_u16(), "non-success status");
        return Err(ApiError::Status {
            operation,
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| transport_error(operation, url, source))?;
    let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes[..] };
    serde_json::from_slice(payload).map_err(|source| ApiError::Decode {
        operation,
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> Result<ApiClient> {
        let config = ClientConfig::resolve(&server.url("/api"), crate::DEFAULT_API_ORIGIN)?;
        Ok(ApiClient::new(&config)?)
    }

    #[test]
    fn endpoints_stay_under_base_path() -> Result<()> {
        let config = ClientConfig::resolve("http://frame.local/api", crate::DEFAULT_API_ORIGIN)?;
        let client = ApiClient::new(&config)?;
        assert_eq!(
            client.endpoint(GOOGLE_ALBUMS_PATH)?.as_str(),
            "http://frame.local/api/google/albums"
        );
        assert_eq!(
            client.endpoint(SETTINGS_PATH)?.as_str(),
            "http://frame.local/api/settings"
        );
        Ok(())
    }

    #[tokio::test]
    async fn get_settings_returns_mapping() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/settings");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "orientation": "landscape", "collage": "true" }));
        });

        let settings = client_for(&server)?.get_settings().await?;
        mock.assert();
        assert_eq!(settings.len(), 2);
        assert_eq!(
            settings.get("orientation").map(String::as_str),
            Some("landscape")
        );
        Ok(())
    }

    #[tokio::test]
    async fn update_settings_posts_wrapped_body() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/settings")
                .json_body(json!({ "settings": { "a": "1" } }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "status": "updated" }));
        });

        let settings = Settings::from([("a".to_string(), "1".to_string())]);
        let ack = client_for(&server)?.update_settings(&settings).await?;
        mock.assert();
        assert_eq!(ack, json!({ "status": "updated" }));
        Ok(())
    }

    #[tokio::test]
    async fn update_settings_accepts_empty_ack() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/settings");
            then.status(204);
        });

        let ack = client_for(&server)?
            .update_settings(&Settings::new())
            .await?;
        mock.assert();
        assert_eq!(ack, Value::Null);
        Ok(())
    }

    #[tokio::test]
    async fn get_status_passes_body_through() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/status");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "ok": true }));
        });

        let status = client_for(&server)?.get_status().await?;
        mock.assert();
        assert_eq!(status, json!({ "ok": true }));
        Ok(())
    }

    #[tokio::test]
    async fn google_albums_returns_opaque_list() -> Result<()> {
        let server = MockServer::start_async().await;
        let albums = json!([{ "id": "a1", "title": "Summer" }, { "id": "a2" }]);
        let body = albums.clone();
        let mock = server.mock(move |when, then| {
            when.method(GET).path("/api/google/albums");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(body);
        });

        let fetched = client_for(&server)?.get_google_albums().await?;
        mock.assert();
        assert_eq!(fetched, albums);
        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_maps_to_status_error() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/google/albums");
            then.status(410)
                .header("content-type", "application/json")
                .json_body(json!({ "error": "no longer supported" }));
        });

        let result = client_for(&server)?.get_google_albums().await;
        mock.assert();
        let Err(error) = result else {
            return Err(anyhow!("expected status error"));
        };
        assert_eq!(error.status(), Some(410));
        assert_eq!(error.message(), "request failed with status code 410");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_settings_body_is_a_decode_error() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/settings");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "brightness": 7 }));
        });

        let result = client_for(&server)?.get_settings().await;
        assert!(matches!(
            result,
            Err(ApiError::Decode {
                operation: "get_settings",
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() -> Result<()> {
        let config = ClientConfig::resolve("http://127.0.0.1:9/api", crate::DEFAULT_API_ORIGIN)?;
        let result = ApiClient::new(&config)?.get_status().await;
        let Err(error) = result else {
            return Err(anyhow!("expected transport error"));
        };
        assert!(matches!(error, ApiError::Transport { .. }));
        assert!(error.message().starts_with("request to http://127.0.0.1:9/api/status failed"));
        Ok(())
    }

    #[tokio::test]
    async fn request_id_header_is_attached() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/status")
                .header(HEADER_REQUEST_ID, "trace-123");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "status": "ok" }));
        });

        let config = ClientConfig::resolve(&server.url("/api"), crate::DEFAULT_API_ORIGIN)?;
        ApiClient::with_request_id(&config, "trace-123")?
            .get_status()
            .await?;
        mock.assert();
        Ok(())
    }

    #[test]
    fn request_id_rejects_control_characters() -> Result<()> {
        let config = ClientConfig::resolve("/api", crate::DEFAULT_API_ORIGIN)?;
        let result = ApiClient::with_request_id(&config, "bad\nid");
        assert!(matches!(
            result,
            Err(ApiError::InvalidHeader {
                name: HEADER_REQUEST_ID
            })
        ));
        Ok(())
    }
}
