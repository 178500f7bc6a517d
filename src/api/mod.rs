//! REST API abstraction.
//!
//! This module defines the interface the table controllers are driven
//! through, the errors it can produce, and the wire shapes shared by every
//! resource.

use crate::record::{records_from_values, Record};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

pub mod http;

pub use http::HttpApi;

/// Errors returned by API operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("No token found, please login again")]
    MissingCredential,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ApiError {
    /// Message supplied by the server in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to show the user: the server's message, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::MissingCredential => self.to_string(),
            _ => self.server_message().unwrap_or(fallback).to_string(),
        }
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, ApiError::MissingCredential)
    }
}

/// Query parameters of a list request. Unset parameters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Zero-based page index; sent 1-based.
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub status: Option<String>,
    pub kind: Option<String>,
    pub search: Option<String>,
    /// Member of a paged `data` object that holds the records. Not sent.
    pub items: Option<String>,
}

impl ListQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", (page + 1).to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(kind) = &self.kind {
            pairs.push(("type", kind.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.to_pairs().is_empty()
    }
}

/// One fetched page of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub records: Vec<Record>,
    /// Server-reported totals; absent for unpaged endpoints.
    pub total: Option<usize>,
    pub total_pages: Option<usize>,
}

impl Page {
    /// Decode a list body.
    ///
    /// Two envelopes exist: `{data: [...]}` and
    /// `{data: {<items>: [...], total, totalPages}}`. The second one needs
    /// `items` to name the member holding the records.
    pub fn from_body(body: Value, items: Option<&str>) -> Result<Self, ApiError> {
        let Value::Object(mut envelope) = body else {
            return Err(ApiError::InvalidData("list response is not an object".to_string()));
        };

        match envelope.remove("data") {
            None | Some(Value::Null) => Ok(Page::default()),
            Some(Value::Array(items)) => Ok(Page {
                records: records_from_values(items),
                total: None,
                total_pages: None,
            }),
            Some(Value::Object(mut data)) => {
                let total = data.get("total").and_then(Value::as_u64).map(|n| n as usize);
                let total_pages = data.get("totalPages").and_then(Value::as_u64).map(|n| n as usize);
                let Some(key) = items else {
                    return Err(ApiError::InvalidData(
                        "paged response for a resource without an items key".to_string(),
                    ));
                };
                let records = match data.remove(key) {
                    Some(Value::Array(items)) => records_from_values(items),
                    None | Some(Value::Null) => Vec::new(),
                    Some(other) => {
                        return Err(ApiError::InvalidData(format!("unexpected {} field: {}", key, other)));
                    }
                };
                Ok(Page {
                    records,
                    total,
                    total_pages,
                })
            }
            Some(other) => Err(ApiError::InvalidData(format!("unexpected data field: {}", other))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadedFile {
    pub filename: String,
}

/// Extract `message` (or `error`) from a JSON body.
pub fn body_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Interface to the admin backend.
///
/// Paths are relative to the API base URL and already have record ids
/// substituted; see [`Endpoints`](crate::schema::Endpoints).
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list(&self, path: &str, query: &ListQuery) -> Result<Page, ApiError>;

    /// POST a JSON body; returns the decoded response body.
    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    /// PUT a JSON body; returns the decoded response body.
    async fn update(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<Value, ApiError>;

    /// Upload one file and return the stored filename.
    async fn upload_file(&self, file: &Path) -> Result<String, ApiError>;

    async fn fetch_employees(&self) -> Result<Vec<Record>, ApiError>;

    /// Public URL of an uploaded file.
    fn image_url(&self, filename: &str) -> String;
}
