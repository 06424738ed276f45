//! HTTP client for the records server API

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ApiResponse;
use shared::models::{BulkInsertResult, Employee, EmployeeUpdate, RowViolation};

/// HTTP client for making network requests to the records server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.client.request(method, url)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Error bodies are `ApiResponse` envelopes; a body that is not one is
    /// reported verbatim.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let envelope = serde_json::from_str::<ApiResponse<Value>>(&text).ok();
            let message = envelope
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| text.clone());

            return Err(match status {
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST | StatusCode::PAYLOAD_TOO_LARGE => {
                    let violations = envelope
                        .and_then(|e| e.data)
                        .and_then(|data| serde_json::from_value::<Vec<RowViolation>>(data).ok())
                        .unwrap_or_default();
                    ClientError::Validation {
                        message,
                        violations,
                    }
                }
                _ => ClientError::Server(message),
            });
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Record API ==========

    /// All records in creation order
    pub async fn list_records(&self) -> ClientResult<Vec<Employee>> {
        self.get("/record/").await
    }

    pub async fn get_record(&self, id: &str) -> ClientResult<Employee> {
        self.get(&format!("/record/{id}")).await
    }

    /// Create one record from a decoded row
    pub async fn create_record<B: Serialize + ?Sized>(&self, row: &B) -> ClientResult<Employee> {
        self.post("/record/", row).await
    }

    pub async fn update_record(&self, id: &str, update: &EmployeeUpdate) -> ClientResult<Employee> {
        self.patch(&format!("/record/{id}"), update).await
    }

    /// Delete one record; `NotFound` if it no longer exists
    pub async fn delete_record(&self, id: &str) -> ClientResult<bool> {
        self.delete(&format!("/record/{id}")).await
    }

    // ========== Bulk API ==========

    /// Submit every row in one request; the server inserts all or nothing
    pub async fn bulk_insert<B: Serialize + ?Sized>(
        &self,
        rows: &B,
    ) -> ClientResult<BulkInsertResult> {
        self.post::<ApiResponse<BulkInsertResult>, _>("/bulk/", rows)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing bulk insert data".to_string()))
    }

    // ========== Health ==========

    pub async fn health(&self) -> ClientResult<Value> {
        self.get("/health").await
    }
}
