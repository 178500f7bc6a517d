//! reqwest-backed implementation of [`AdminApi`].

use super::{body_message, AdminApi, ApiError, ListQuery, Page, UploadResponse};
use crate::auth::CredentialStore;
use crate::record::Record;
use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Multipart field name expected by the upload endpoint.
const UPLOAD_FIELD: &str = "files";
const UPLOAD_PATH: &str = "/api/upload/files";
const EMPLOYEES_PATH: &str = "/api/employees";

pub struct HttpApi {
    client: Client,
    base_url: String,
    credentials: CredentialStore,
}

impl HttpApi {
    pub fn new(base_url: &str, credentials: CredentialStore, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token(&self) -> Result<String, ApiError> {
        self.credentials.token().ok_or(ApiError::MissingCredential)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let token = self.token()?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    /// Turn a response into its JSON body, mapping non-success statuses to errors.
    async fn decode(response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(e) if status.is_success() => return Err(ApiError::InvalidData(e.to_string())),
                Err(_) => Value::Null,
            }
        };

        if !status.is_success() {
            log::warn!("HTTP {} returned from backend", status.as_u16());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body_message(&body),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl AdminApi for HttpApi {
    async fn list(&self, path: &str, query: &ListQuery) -> Result<Page, ApiError> {
        let mut request = self.client.get(self.url(path));
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        log::debug!("GET {} {:?}", path, pairs);
        let body = self.send(request).await?;
        Page::from_body(body, query.items.as_deref())
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        log::debug!("POST {}", path);
        self.send(self.client.post(self.url(path)).json(&body)).await
    }

    async fn update(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        log::debug!("PUT {}", path);
        self.send(self.client.put(self.url(path)).json(&body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        log::debug!("DELETE {}", path);
        self.send(self.client.delete(self.url(path))).await
    }

    async fn upload_file(&self, file: &Path) -> Result<String, ApiError> {
        // Fail on a missing token before touching the file.
        self.token()?;

        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| ApiError::Io(format!("{}: {}", file.display(), e)))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let form = multipart::Form::new().part(UPLOAD_FIELD, multipart::Part::bytes(bytes).file_name(file_name));

        log::debug!("POST {} ({})", UPLOAD_PATH, file.display());
        let body = self.send(self.client.post(self.url(UPLOAD_PATH)).multipart(form)).await?;
        let response: UploadResponse =
            serde_json::from_value(body).map_err(|e| ApiError::InvalidData(e.to_string()))?;
        response
            .files
            .into_iter()
            .next()
            .map(|f| f.filename)
            .ok_or_else(|| ApiError::InvalidData("upload response contained no files".to_string()))
    }

    async fn fetch_employees(&self) -> Result<Vec<Record>, ApiError> {
        let page = self.list(EMPLOYEES_PATH, &ListQuery::default()).await?;
        Ok(page.records)
    }

    fn image_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.base_url, filename)
    }
}
