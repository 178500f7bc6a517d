//! In-memory backend shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use panelist::api::{AdminApi, ApiError, ListQuery, Page};
use panelist::record::Record;
use serde_json::Value;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List { path: String, query: ListQuery },
    Create { path: String, body: Value },
    Update { path: String, body: Value },
    Delete { path: String },
    Upload(PathBuf),
    Employees,
}

/// Scripted [`AdminApi`].
///
/// List calls pop queued pages first and fall back to returning `records`.
/// Mutations answer with `mutation_error` when set, `mutation_body` otherwise.
#[derive(Default)]
pub struct MockApi {
    pub records: Mutex<Vec<Record>>,
    pub pages: Mutex<VecDeque<Result<Page, ApiError>>>,
    pub mutation_error: Mutex<Option<ApiError>>,
    pub mutation_body: Mutex<Value>,
    pub upload: Mutex<Option<Result<String, ApiError>>>,
    pub employees: Mutex<Option<Result<Vec<Record>, ApiError>>>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn with_records(values: Vec<Value>) -> Self {
        let api = Self::default();
        *api.records.lock().unwrap() = records(values);
        api
    }

    pub fn queue_page(&self, page: Result<Page, ApiError>) {
        self.pages.lock().unwrap().push_back(page);
    }

    pub fn fail_mutations(&self, error: ApiError) {
        *self.mutation_error.lock().unwrap() = Some(error);
    }

    pub fn set_upload(&self, result: Result<String, ApiError>) {
        *self.upload.lock().unwrap() = Some(result);
    }

    pub fn set_employees(&self, result: Result<Vec<Record>, ApiError>) {
        *self.employees.lock().unwrap() = Some(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::List { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_result(&self) -> Result<Value, ApiError> {
        match self.mutation_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(self.mutation_body.lock().unwrap().clone()),
        }
    }
}

#[async_trait]
impl AdminApi for MockApi {
    async fn list(&self, path: &str, query: &ListQuery) -> Result<Page, ApiError> {
        self.record(Call::List {
            path: path.to_string(),
            query: query.clone(),
        });
        if let Some(page) = self.pages.lock().unwrap().pop_front() {
            return page;
        }
        Ok(Page {
            records: self.records.lock().unwrap().clone(),
            total: None,
            total_pages: None,
        })
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.record(Call::Create {
            path: path.to_string(),
            body,
        });
        self.mutation_result()
    }

    async fn update(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.record(Call::Update {
            path: path.to_string(),
            body,
        });
        self.mutation_result()
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.record(Call::Delete { path: path.to_string() });
        self.mutation_result()
    }

    async fn upload_file(&self, file: &Path) -> Result<String, ApiError> {
        self.record(Call::Upload(file.to_path_buf()));
        self.upload
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ApiError::Io("no upload scripted".to_string())))
    }

    async fn fetch_employees(&self) -> Result<Vec<Record>, ApiError> {
        self.record(Call::Employees);
        self.employees.lock().unwrap().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn image_url(&self, filename: &str) -> String {
        format!("http://backend.test/uploads/{}", filename)
    }
}

pub fn records(values: Vec<Value>) -> Vec<Record> {
    values.into_iter().filter_map(Record::from_value).collect()
}

pub fn record(value: Value) -> Record {
    Record::from_value(value).expect("fixture record has an id")
}
