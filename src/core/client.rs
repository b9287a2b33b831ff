use crate::core::ConfigProvider;
use crate::utils::error::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// A fully-read response: status plus raw body bytes. The caller decides
/// whether to treat the body as JSON, CSV, or opaque diagnostics.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Bearer-authenticated client for the CRM API. Every request carries the
/// auth header, a JSON content type, and the `sessionId` query parameter.
pub struct CrmClient {
    http: Client,
    base_url: String,
    token: String,
    session_id: String,
}

impl CrmClient {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            token: config.token().to_string(),
            session_id: config.session_id().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .query(&[("sessionId", self.session_id.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} -> {}", path, status);

        let body = response.bytes().await?.to_vec();
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct TestConfig {
        base_url: String,
    }

    impl ConfigProvider for TestConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn token(&self) -> &str {
            "test-token"
        }

        fn session_id(&self) -> &str {
            "sess_test_1"
        }

        fn output_path(&self) -> &str {
            "."
        }
    }

    #[tokio::test]
    async fn test_get_sends_auth_and_session() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/crm/stats/daily")
                .header("Authorization", "Bearer test-token")
                .header("Content-Type", "application/json")
                .query_param("sessionId", "sess_test_1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"sent": 1, "date": "2024-01-01"}));
        });

        let config = TestConfig {
            base_url: server.base_url(),
        };
        let client = CrmClient::from_config(&config);

        let response = client.get("/api/crm/stats/daily", &[]).await.unwrap();

        api_mock.assert();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_get_appends_extra_query_params() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/crm/chats")
                .query_param("sessionId", "sess_test_1")
                .query_param("limit", "5");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"chats": []}));
        });

        let config = TestConfig {
            base_url: server.base_url(),
        };
        let client = CrmClient::from_config(&config);

        let response = client.get("/api/crm/chats", &[("limit", "5")]).await.unwrap();

        api_mock.assert();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_trailing_slash_on_base_url_is_stripped() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/crm/contacts");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"contacts": []}));
        });

        let config = TestConfig {
            base_url: format!("{}/", server.base_url()),
        };
        let client = CrmClient::from_config(&config);

        let response = client.get("/api/crm/contacts", &[]).await.unwrap();

        api_mock.assert();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_non_success_body_is_preserved() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/crm/contacts");
            then.status(401).body("{\"error\":\"Unauthorized\"}");
        });

        let config = TestConfig {
            base_url: server.base_url(),
        };
        let client = CrmClient::from_config(&config);

        let response = client.get("/api/crm/contacts", &[]).await.unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status.as_u16(), 401);
        assert_eq!(response.text(), "{\"error\":\"Unauthorized\"}");
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let response = ApiResponse {
            status: StatusCode::OK,
            body: b"not json".to_vec(),
        };
        let parsed: Result<crate::domain::model::DailyStats> = response.json();
        assert!(parsed.is_err());
    }
}
