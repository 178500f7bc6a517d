//! Dialog state machine and form drafts.
//!
//! Opening a dialog snapshots the target record; closing drops the snapshot.
//! Nothing in here talks to the backend: the controller turns submissions
//! into mutations and feeds their outcome back.

use crate::record::{Record, RecordId, Status};
use crate::schema::{FieldSpec, FormMode, ResourceSchema};
use serde_json::{Map, Value};

/// Ban/activation duration preselected in the status dialog.
pub const DEFAULT_STATUS_DURATION: &str = "3 months";

/// Editable copy of a record's fields, pending submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub mode: FormMode,
    pub id: Option<RecordId>,
    values: Vec<(&'static str, String)>,
    pub focus: usize,
    /// Local file path typed into the image field, uploaded on Enter.
    pub upload_path: String,
    pub uploading: bool,
    pub submitting: bool,
}

impl Draft {
    /// Empty form with schema defaults.
    pub fn for_create(schema: &ResourceSchema) -> Self {
        let values = schema
            .form_fields(FormMode::Create)
            .map(|f| (f.key, f.default.unwrap_or_default().to_string()))
            .collect();
        Self::with_values(FormMode::Create, None, values)
    }

    /// Form initialised from `record`'s editable fields. Secrets start empty.
    pub fn from_record(schema: &ResourceSchema, record: &Record) -> Self {
        let values = schema
            .form_fields(FormMode::Edit)
            .map(|f| {
                let value = if f.is_secret() {
                    String::new()
                } else {
                    record
                        .text(f.key)
                        .or_else(|| f.default.map(str::to_string))
                        .unwrap_or_default()
                };
                (f.key, value)
            })
            .collect();
        Self::with_values(FormMode::Edit, Some(record.id().clone()), values)
    }

    fn with_values(mode: FormMode, id: Option<RecordId>, values: Vec<(&'static str, String)>) -> Self {
        Self {
            mode,
            id,
            values,
            focus: 0,
            upload_path: String::new(),
            uploading: false,
            submitting: false,
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    /// Set a field that is part of the form. Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn focused_key(&self) -> Option<&'static str> {
        self.values.get(self.focus).map(|(k, _)| *k)
    }

    pub fn focused_value_mut(&mut self) -> Option<&mut String> {
        self.values.get_mut(self.focus).map(|(_, v)| v)
    }

    pub fn focus_next(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + 1) % self.values.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + self.values.len() - 1) % self.values.len();
        }
    }

    /// JSON body for the create/update request.
    pub fn payload(&self, schema: &ResourceSchema) -> Value {
        let mut body = Map::new();
        for (key, value) in &self.values {
            let omit = schema.field(key).map(|f: &FieldSpec| f.omit_when_empty).unwrap_or(false);
            if omit && value.is_empty() {
                continue;
            }
            body.insert(key.to_string(), Value::String(value.clone()));
        }
        Value::Object(body)
    }
}

/// Which field of the status dialog has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFocus {
    Status,
    Duration,
}

/// Pending status change of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub id: RecordId,
    pub status: Status,
    pub duration: String,
    pub focus: StatusFocus,
    pub submitting: bool,
}

impl StatusChange {
    pub fn payload(&self) -> Value {
        serde_json::json!({
            "status": self.status.as_str(),
            "duration": self.duration,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Viewing(Record),
    Editing(Draft),
    Deleting {
        id: RecordId,
        submitting: bool,
    },
    Creating(Draft),
    ChangingStatus(StatusChange),
}

impl DialogState {
    pub fn view(record: &Record) -> Self {
        DialogState::Viewing(record.clone())
    }

    pub fn edit(schema: &ResourceSchema, record: &Record) -> Self {
        DialogState::Editing(Draft::from_record(schema, record))
    }

    pub fn create(schema: &ResourceSchema) -> Self {
        DialogState::Creating(Draft::for_create(schema))
    }

    pub fn delete(id: RecordId) -> Self {
        DialogState::Deleting { id, submitting: false }
    }

    /// Status dialog preset with the record's current status.
    pub fn change_status(record: &Record) -> Self {
        DialogState::ChangingStatus(StatusChange {
            id: record.id().clone(),
            status: record.status().unwrap_or(Status::Active),
            duration: DEFAULT_STATUS_DURATION.to_string(),
            focus: StatusFocus::Status,
            submitting: false,
        })
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            DialogState::Editing(draft) | DialogState::Creating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            DialogState::Editing(draft) | DialogState::Creating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        match self {
            DialogState::Editing(draft) | DialogState::Creating(draft) => draft.submitting,
            DialogState::Deleting { submitting, .. } => *submitting,
            DialogState::ChangingStatus(change) => change.submitting,
            DialogState::Closed | DialogState::Viewing(_) => false,
        }
    }

    pub fn set_submitting(&mut self, value: bool) {
        match self {
            DialogState::Editing(draft) | DialogState::Creating(draft) => draft.submitting = value,
            DialogState::Deleting { submitting, .. } => *submitting = value,
            DialogState::ChangingStatus(change) => change.submitting = value,
            DialogState::Closed | DialogState::Viewing(_) => {}
        }
    }

    pub fn close(&mut self) {
        *self = DialogState::Closed;
    }
}
