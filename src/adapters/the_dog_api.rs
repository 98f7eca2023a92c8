use crate::domain::model::ApiImage;
use crate::domain::ports::DogSource;
use crate::utils::error::{DogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 只要求帶品種標註的影像
pub const DEFAULT_ENDPOINT: &str = "https://api.thedogapi.com/v1/images/search?has_breeds=1";

pub const API_KEY_HEADER: &str = "x-api-key";

/// TheDogAPI 的 reqwest 轉接層
pub struct TheDogApi {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    extra_headers: Vec<(String, String)>,
}

impl TheDogApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
            timeout: None,
            extra_headers: Vec::new(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }
}

#[async_trait]
impl DogSource for TheDogApi {
    async fn fetch_random(&self) -> Result<ApiImage> {
        let mut request = self.client.get(&self.endpoint);

        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        for (name, value) in &self.extra_headers {
            request = request.header(name, value);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("📡 GET {}", self.endpoint);
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(DogError::ApiStatusError {
                status: response.status(),
            });
        }

        let mut images: Vec<ApiImage> = response.json().await?;
        if images.is_empty() {
            // 空序列和缺 breeds 欄位同樣視為沒有品種資料
            return Err(DogError::MissingBreed);
        }

        Ok(images.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_parses_first_image() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/v1/images/search");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {
                        "url": "https://cdn.example.com/beagle.jpg",
                        "breeds": [
                            {"name": "Beagle", "temperament": "Amiable, Even Tempered", "origin": "United Kingdom"}
                        ]
                    }
                ]));
        });

        let api = TheDogApi::new(server.url("/v1/images/search"));
        let image = api.fetch_random().await.unwrap();

        api_mock.assert();
        assert_eq!(image.url, "https://cdn.example.com/beagle.jpg");
        assert_eq!(image.breeds[0].name, "Beagle");
        assert_eq!(image.breeds[0].origin.as_deref(), Some("United Kingdom"));
    }

    #[tokio::test]
    async fn test_fetch_sends_api_key_header() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/images/search")
                .header("x-api-key", "live_test_key");
            then.status(200).json_body(serde_json::json!([
                {"url": "https://cdn.example.com/dog.jpg", "breeds": [{"name": "Akita"}]}
            ]));
        });

        let api = TheDogApi::new(server.url("/v1/images/search")).with_api_key("live_test_key");
        api.fetch_random().await.unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_fetch_sends_extra_headers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/images/search")
                .header("x-request-source", "dog-discoverer");
            then.status(200).json_body(serde_json::json!([
                {"url": "https://cdn.example.com/dog.jpg", "breeds": [{"name": "Akita"}]}
            ]));
        });

        let api = TheDogApi::new(server.url("/v1/images/search"))
            .with_header("x-request-source", "dog-discoverer");
        api.fetch_random().await.unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_empty_response_is_missing_breed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/images/search");
            then.status(200).json_body(serde_json::json!([]));
        });

        let api = TheDogApi::new(server.url("/v1/images/search"));
        let err = api.fetch_random().await.unwrap_err();

        assert!(matches!(err, DogError::MissingBreed));
    }

    #[tokio::test]
    async fn test_missing_breeds_field_decodes_to_empty_list() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/images/search");
            then.status(200).json_body(serde_json::json!([
                {"url": "https://cdn.example.com/dog.jpg"}
            ]));
        });

        let api = TheDogApi::new(server.url("/v1/images/search"));
        let image = api.fetch_random().await.unwrap();

        assert!(image.breeds.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/images/search");
            then.status(500);
        });

        let api = TheDogApi::new(server.url("/v1/images/search"));
        let err = api.fetch_random().await.unwrap_err();

        assert!(matches!(
            err,
            DogError::ApiStatusError { status } if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn test_non_json_body_is_fetch_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/images/search");
            then.status(200).body("<html>definitely not json</html>");
        });

        let api = TheDogApi::new(server.url("/v1/images/search"));
        let err = api.fetch_random().await.unwrap_err();

        assert!(matches!(err, DogError::ApiError(_)));
    }
}
