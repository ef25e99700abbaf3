//! reqwest-backed implementation of [`RemoteCollection`].

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::{ClientError, ClientResult};
use super::{Operation, RemoteCollection, EMPLOYEES_PATH};
use crate::models::Employee;

/// Error payload returned by the server on non-success statuses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client for the employees endpoint.
///
/// No timeout is configured; a hung request hangs its caller.
#[derive(Debug, Clone)]
pub struct HttpEmployeeClient {
    client: reqwest::Client,
    server_url: String,
}

impl HttpEmployeeClient {
    /// Creates a client for the server at `server_url` (e.g. `http://localhost:3000`).
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            server_url: server_url.into(),
        }
    }

    /// Creates a client that sends through a preconfigured `reqwest::Client`.
    pub fn with_client(server_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            server_url: server_url.into(),
        }
    }

    /// Returns the server URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// URL of the collection itself.
    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url(), EMPLOYEES_PATH)
    }

    /// URL of a single record.
    fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id))
    }

    /// Normalizes the configured server URL to an http(s) base without a
    /// trailing slash.
    fn base_url(&self) -> String {
        let base_url = if self.server_url.starts_with("http://")
            || self.server_url.starts_with("https://")
        {
            self.server_url.clone()
        } else {
            format!("http://{}", self.server_url)
        };

        base_url.trim_end_matches('/').to_string()
    }

    /// Sends a request and converts non-success statuses into rejections.
    async fn send(&self, operation: Operation, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(%operation, error = %e, "employee service unreachable");
            ClientError::Unreachable(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(%operation, status = status.as_u16(), "employee service responded");

        if !status.is_success() {
            let message = Self::error_message(operation, response).await;
            tracing::warn!(%operation, status = status.as_u16(), %message, "request rejected");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// Picks the server-provided message, falling back to the operation's
    /// generic text when the body has none.
    async fn error_message(operation: Operation, response: Response) -> String {
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        let present = |m: &String| !m.trim().is_empty();

        body.message
            .filter(present)
            .or(body.error.filter(present))
            .unwrap_or_else(|| operation.fallback_message().to_string())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RemoteCollection for HttpEmployeeClient {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        let request = self.client.get(self.collection_url());
        let response = self.send(Operation::List, request).await?;

        // The server may answer `null` for an empty collection.
        let employees: Option<Vec<Employee>> = Self::decode(response).await?;
        Ok(employees.unwrap_or_default())
    }

    async fn create(&self, draft: &Employee) -> ClientResult<Employee> {
        let request = self
            .client
            .post(self.collection_url())
            .json(&draft.without_id());
        let response = self.send(Operation::Create, request).await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &str, record: &Employee) -> ClientResult<Employee> {
        if id.is_empty() {
            return Err(ClientError::EmptyIdentifier);
        }

        let request = self.client.put(self.record_url(id)).json(record);
        let response = self.send(Operation::Update, request).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        if id.is_empty() {
            return Err(ClientError::EmptyIdentifier);
        }

        let request = self.client.delete(self.record_url(id));
        self.send(Operation::Delete, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use serde_json::json;

    /// Serves canned failures for every operation and returns a client for it.
    async fn failing_server() -> HttpEmployeeClient {
        let app = Router::new()
            .route(
                "/api/employees",
                get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }).post(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "message": "", "error": "Validation failed" })),
                    )
                }),
            )
            .route(
                "/api/employees/{id}",
                put(|| async { StatusCode::INTERNAL_SERVER_ERROR })
                    .delete(|| async { (StatusCode::NOT_FOUND, Json(json!({}))) }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpEmployeeClient::with_client(format!("http://{}", addr), http)
    }

    fn rejected(status: u16, message: &str) -> ClientError {
        ClientError::Rejected {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_collection_url() {
        let client = HttpEmployeeClient::new("http://localhost:3000");
        assert_eq!(client.collection_url(), "http://localhost:3000/api/employees");

        let client = HttpEmployeeClient::new("https://hr.example.com/");
        assert_eq!(client.collection_url(), "https://hr.example.com/api/employees");

        let client = HttpEmployeeClient::new("localhost:3000");
        assert_eq!(client.collection_url(), "http://localhost:3000/api/employees");
    }

    #[test]
    fn test_record_url_encodes_identifier() {
        let client = HttpEmployeeClient::new("http://localhost:3000");
        assert_eq!(
            client.record_url("65a1f0"),
            "http://localhost:3000/api/employees/65a1f0"
        );
        assert_eq!(
            client.record_url("a/b"),
            "http://localhost:3000/api/employees/a%2Fb"
        );
    }

    #[tokio::test]
    async fn test_empty_identifier_is_refused_without_a_request() {
        let client = HttpEmployeeClient::new("http://127.0.0.1:9");
        let record = Employee::new("Ann", "Lee", "ann@example.com");

        assert_eq!(
            client.update("", &record).await,
            Err(ClientError::EmptyIdentifier)
        );
        assert_eq!(client.delete("").await, Err(ClientError::EmptyIdentifier));
    }

    #[tokio::test]
    async fn test_bodies_without_message_fall_back_per_operation() {
        let client = failing_server().await;
        let record = Employee::new("Ann", "Lee", "ann@example.com");

        assert_eq!(
            client.list().await,
            Err(rejected(502, "Failed to fetch employees"))
        );
        assert_eq!(
            client.update("1", &record).await,
            Err(rejected(500, "Failed to update employee"))
        );
        assert_eq!(
            client.delete("1").await,
            Err(rejected(404, "Failed to delete employee"))
        );
    }

    #[tokio::test]
    async fn test_empty_message_yields_to_error_field() {
        let client = failing_server().await;
        let draft = Employee::new("Ann", "Lee", "ann@example.com");

        assert_eq!(
            client.create(&draft).await,
            Err(rejected(400, "Validation failed"))
        );
    }
}
