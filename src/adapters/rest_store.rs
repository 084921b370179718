use crate::domain::model::{MemberId, MemberRecord};
use crate::domain::ports::{ConfigProvider, MemberStore};
use crate::utils::error::{Result, StoreError};
use crate::utils::validation::{validate_non_empty_string, validate_required_field, validate_url};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Member store backed by the hosted database's REST interface
/// (`POST {endpoint}/rest/v1/{table}`).
#[derive(Debug, Clone)]
pub struct RestMemberStore {
    client: Client,
    insert_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
struct InsertedRow {
    id: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    details: Option<String>,
}

impl RestMemberStore {
    pub fn new(endpoint: &str, api_key: &str, table: &str) -> Self {
        Self {
            client: Client::new(),
            insert_url: format!("{}/rest/v1/{}", endpoint.trim_end_matches('/'), table),
            api_key: api_key.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 從設定建立；缺少端點或金鑰時回傳設定錯誤
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let endpoint = config.store_endpoint();
        let endpoint = validate_required_field("store.endpoint", &endpoint)?;
        validate_url("store.endpoint", endpoint)?;

        let api_key = config.api_key();
        let api_key = validate_required_field("store.api_key", &api_key)?;
        validate_non_empty_string("store.api_key", api_key)?;
        validate_non_empty_string("store.table", config.table())?;

        let mut store = Self::new(endpoint, api_key, config.table());
        if let Some(seconds) = config.timeout_seconds() {
            store = store.with_timeout(Duration::from_secs(seconds));
        }
        Ok(store)
    }

    pub fn insert_url(&self) -> &str {
        &self.insert_url
    }
}

#[async_trait]
impl MemberStore for RestMemberStore {
    async fn insert_member(&self, record: &MemberRecord) -> std::result::Result<MemberId, StoreError> {
        tracing::debug!("POST {} for {} {}", self.insert_url, record.first_name, record.last_name);

        let mut request = self
            .client
            .post(&self.insert_url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&[record]);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Store response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|err| match (err.message, err.details) {
                    (Some(message), Some(details)) => Some(format!("{} ({})", message, details)),
                    (message, _) => message,
                })
                .unwrap_or_else(|| format!("store returned HTTP {}", status));

            return Err(StoreError::Rejected {
                message,
                status: Some(status.as_u16()),
            });
        }

        let rows: Vec<InsertedRow> = response.json().await?;
        let row = rows.into_iter().next().ok_or_else(|| StoreError::MalformedResponse {
            message: "insert returned no rows".to_string(),
        })?;

        let id = match row.id {
            serde_json::Value::String(id) => id,
            other => other.to_string(),
        };

        Ok(MemberId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn jane() -> MemberRecord {
        let mut record = MemberRecord::new("Jane", "Lee");
        record.email = Some("jane@x.com".to_string());
        record.years_with_te = Some(3);
        record
    }

    #[tokio::test]
    async fn test_insert_posts_member_and_returns_id() {
        let server = MockServer::start();
        let insert_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/v1/members")
                .header("apikey", "service-key")
                .header("authorization", "Bearer service-key")
                .header("prefer", "return=representation")
                .json_body(serde_json::json!([
                    {"first_name": "Jane", "last_name": "Lee", "email": "jane@x.com", "years_with_te": 3}
                ]));
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"id": "0b9e-uuid", "first_name": "Jane"}]));
        });

        let store = RestMemberStore::new(&server.base_url(), "service-key", "members");
        let id = store.insert_member(&jane()).await.unwrap();

        insert_mock.assert();
        assert_eq!(id, MemberId("0b9e-uuid".to_string()));
    }

    #[tokio::test]
    async fn test_numeric_id_is_stringified() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/rest/v1/people");
            then.status(201).json_body(serde_json::json!([{"id": 42}]));
        });

        let store = RestMemberStore::new(&format!("{}/", server.base_url()), "k", "people");
        let id = store.insert_member(&jane()).await.unwrap();

        assert_eq!(id.to_string(), "42");
    }

    #[tokio::test]
    async fn test_constraint_violation_surfaces_store_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/rest/v1/members");
            then.status(409)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "code": "23505",
                    "message": "duplicate key value violates unique constraint \"members_email_key\"",
                    "details": "Key (email)=(jane@x.com) already exists."
                }));
        });

        let store = RestMemberStore::new(&server.base_url(), "k", "members");
        let err = store.insert_member(&jane()).await.unwrap_err();

        match err {
            StoreError::Rejected { message, status } => {
                assert_eq!(status, Some(409));
                assert!(message.starts_with("duplicate key value"));
                assert!(message.contains("already exists"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_falls_back_to_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/rest/v1/members");
            then.status(502).body("bad gateway");
        });

        let store = RestMemberStore::new(&server.base_url(), "k", "members");
        let err = store.insert_member(&jane()).await.unwrap_err();

        assert!(err.to_string().contains("HTTP 502"));
    }

    #[tokio::test]
    async fn test_empty_insert_response_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/rest/v1/members");
            then.status(201).json_body(serde_json::json!([]));
        });

        let store = RestMemberStore::new(&server.base_url(), "k", "members");
        let err = store.insert_member(&jane()).await.unwrap_err();

        assert!(matches!(err, StoreError::MalformedResponse { .. }));
    }
}
