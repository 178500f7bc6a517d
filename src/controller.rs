//! Remote collection table controller.
//!
//! One [`TableController`] runs a screen for any [`ResourceSchema`]. It never
//! performs I/O itself: user intents return [`Command`]s, the
//! [`dispatcher`](crate::dispatcher) runs them against the API, and the
//! resulting [`Outcome`]s are fed back through
//! [`TableController::handle_outcome`], which may emit follow-up commands
//! (the re-fetch after a mutation, a sign-in redirect).
//!
//! Collection state only ever changes by wholesale replacement from a fetch
//! result. Every fetch carries a generation number and results from older
//! generations are discarded.

use crate::api::{body_message, ApiError, ListQuery, Page};
use crate::collection::filter::{self, cycle_choice, FilterState};
use crate::collection::{Pager, Total};
use crate::constants::{ERROR_EMPLOYEES_FETCH, SUCCESS_IMAGE_UPLOADED};
use crate::dialog::{DialogState, StatusFocus};
use crate::notify::{Notification, Notifications};
use crate::record::{Record, RecordId};
use crate::schema::{FilterMode, ResourceSchema};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Kind of write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    ChangeStatus,
}

/// HTTP verb of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub kind: MutationKind,
    /// Dialog that submitted the mutation.
    pub dialog: u64,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Side effect requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch {
        generation: u64,
        path: String,
        query: ListQuery,
    },
    FetchEmployees,
    Mutate(Mutation),
    Upload {
        dialog: u64,
        file: PathBuf,
    },
    /// No credential is available; the user has to sign in.
    SignIn,
}

/// Result of running a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Fetched {
        generation: u64,
        result: Result<Page, ApiError>,
    },
    Employees(Result<Vec<Record>, ApiError>),
    Mutated {
        kind: MutationKind,
        dialog: u64,
        result: Result<Value, ApiError>,
    },
    Uploaded {
        dialog: u64,
        result: Result<String, ApiError>,
    },
}

pub struct TableController {
    schema: ResourceSchema,
    records: Vec<Record>,
    filter: FilterState,
    pager: Pager,
    dialog: DialogState,
    /// Incremented whenever a dialog opens; tags uploads and mutations to their dialog.
    dialog_seq: u64,
    generation: u64,
    loading: bool,
    employees: Vec<String>,
    notifications: Notifications,
}

impl TableController {
    pub fn new(schema: ResourceSchema, page_size: usize, notification_ttl: Duration) -> Self {
        Self {
            schema,
            records: Vec::new(),
            filter: FilterState::default(),
            pager: Pager::new(page_size),
            dialog: DialogState::Closed,
            dialog_seq: 0,
            generation: 0,
            loading: false,
            employees: Vec::new(),
            notifications: Notifications::new(notification_ttl),
        }
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut DialogState {
        &mut self.dialog
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn employees(&self) -> &[String] {
        &self.employees
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn is_uploading(&self) -> bool {
        self.dialog.draft().map(|d| d.uploading).unwrap_or(false)
    }

    /// Records passing the current filters (client mode) or the fetched page (server mode).
    pub fn filtered_records(&self) -> Vec<&Record> {
        match self.schema.filter_mode {
            FilterMode::Client => filter::apply(&self.records, &self.schema, &self.filter),
            FilterMode::Server => self.records.iter().collect(),
        }
    }

    /// Rows of the current page.
    pub fn visible_records(&self) -> Vec<&Record> {
        let filtered = self.filtered_records();
        match self.schema.filter_mode {
            FilterMode::Client => self.pager.slice(&filtered).to_vec(),
            FilterMode::Server => filtered,
        }
    }

    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    // Fetching

    /// Start a fetch for the current filters and page.
    pub fn refresh(&mut self) -> Command {
        self.generation += 1;
        self.loading = true;

        let query = match self.schema.filter_mode {
            FilterMode::Client => ListQuery {
                items: self.schema.endpoints.list_items.clone(),
                ..ListQuery::default()
            },
            FilterMode::Server => ListQuery {
                page: Some(self.pager.page()),
                limit: Some(self.pager.page_size()),
                status: self.filter.status_param().map(str::to_string),
                kind: self
                    .schema
                    .type_filter
                    .as_ref()
                    .and_then(|_| self.filter.kind_param().map(str::to_string)),
                search: self.filter.search_param().map(str::to_string),
                items: self.schema.endpoints.list_items.clone(),
            },
        };

        log::info!(
            "{}: fetch #{} {:?}",
            self.schema.key,
            self.generation,
            query.to_pairs()
        );
        Command::Fetch {
            generation: self.generation,
            path: self.schema.endpoints.list.clone(),
            query,
        }
    }

    /// Fetch lookup data needed by the dialogs.
    pub fn load_lookups(&self) -> Option<Command> {
        self.schema.employee_field.map(|_| Command::FetchEmployees)
    }

    // Filters and paging

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
        if self.schema.filter_mode == FilterMode::Client {
            self.pager.reset();
            self.recount();
        }
    }

    /// Confirm the search term. Server-filtered screens re-fetch.
    pub fn apply_search(&mut self) -> Option<Command> {
        self.server_refetch_from_first_page()
    }

    pub fn cycle_status_filter(&mut self) -> Option<Command> {
        let filter = self.schema.status_filter.as_ref()?;
        self.filter.status = cycle_choice(filter, &self.filter.status);
        self.filters_changed()
    }

    pub fn cycle_type_filter(&mut self) -> Option<Command> {
        let filter = self.schema.type_filter.as_ref()?;
        self.filter.kind = cycle_choice(filter, &self.filter.kind);
        self.filters_changed()
    }

    pub fn set_status_filter(&mut self, value: &str) -> Option<Command> {
        self.filter.status = value.to_string();
        self.filters_changed()
    }

    fn filters_changed(&mut self) -> Option<Command> {
        match self.schema.filter_mode {
            FilterMode::Client => {
                self.pager.reset();
                self.recount();
                None
            }
            FilterMode::Server => self.server_refetch_from_first_page(),
        }
    }

    fn server_refetch_from_first_page(&mut self) -> Option<Command> {
        match self.schema.filter_mode {
            FilterMode::Client => None,
            FilterMode::Server => {
                self.pager.reset();
                Some(self.refresh())
            }
        }
    }

    pub fn next_page(&mut self) -> Option<Command> {
        if self.pager.next() {
            self.page_changed()
        } else {
            None
        }
    }

    pub fn previous_page(&mut self) -> Option<Command> {
        if self.pager.previous() {
            self.page_changed()
        } else {
            None
        }
    }

    pub fn set_page_size(&mut self, size: usize) -> Option<Command> {
        self.pager.set_page_size(size);
        self.page_changed()
    }

    pub fn cycle_page_size(&mut self) -> Option<Command> {
        self.pager.cycle_page_size();
        self.page_changed()
    }

    fn page_changed(&mut self) -> Option<Command> {
        match self.schema.filter_mode {
            FilterMode::Client => {
                self.recount();
                None
            }
            FilterMode::Server => Some(self.refresh()),
        }
    }

    fn recount(&mut self) {
        if self.schema.filter_mode == FilterMode::Client {
            let count = filter::apply(&self.records, &self.schema, &self.filter).len();
            self.pager.set_total(Total::Local(count));
            self.pager.clamp();
        }
    }

    // Dialogs

    fn open(&mut self, state: DialogState) {
        self.dialog_seq += 1;
        self.dialog = state;
    }

    pub fn open_view(&mut self, id: &RecordId) -> bool {
        match self.find(id).map(DialogState::view) {
            Some(state) => {
                self.open(state);
                true
            }
            None => false,
        }
    }

    pub fn open_edit(&mut self, id: &RecordId) -> bool {
        match self.find(id).map(|r| DialogState::edit(&self.schema, r)) {
            Some(state) => {
                self.open(state);
                true
            }
            None => false,
        }
    }

    /// Switch from the view dialog to editing the same record.
    pub fn edit_viewed(&mut self) -> bool {
        match &self.dialog {
            DialogState::Viewing(record) => {
                let id = record.id().clone();
                self.open_edit(&id)
            }
            _ => false,
        }
    }

    pub fn open_create(&mut self) {
        let state = DialogState::create(&self.schema);
        self.open(state);
    }

    pub fn open_delete(&mut self, id: &RecordId) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.open(DialogState::delete(id.clone()));
        true
    }

    pub fn open_status(&mut self, id: &RecordId) -> bool {
        if !self.schema.supports_status_change() {
            return false;
        }
        match self.find(id).map(DialogState::change_status) {
            Some(state) => {
                self.open(state);
                true
            }
            None => false,
        }
    }

    /// Discard the dialog and its draft. The collection is untouched.
    pub fn close_dialog(&mut self) {
        self.dialog.close();
    }

    /// Toggle the status in the status dialog.
    pub fn toggle_status_choice(&mut self) {
        if let DialogState::ChangingStatus(change) = &mut self.dialog {
            change.status = change.status.toggled();
        }
    }

    pub fn toggle_status_focus(&mut self) {
        if let DialogState::ChangingStatus(change) = &mut self.dialog {
            change.focus = match change.focus {
                StatusFocus::Status => StatusFocus::Duration,
                StatusFocus::Duration => StatusFocus::Status,
            };
        }
    }

    /// Turn the open dialog into a mutation. The dialog stays open until the outcome arrives.
    pub fn submit(&mut self) -> Option<Command> {
        if self.dialog.is_submitting() {
            return None;
        }

        let endpoints = &self.schema.endpoints;
        let dialog = self.dialog_seq;
        let mutation = match &self.dialog {
            DialogState::Editing(draft) => {
                let id = draft.id.as_ref()?;
                Mutation {
                    kind: MutationKind::Update,
                    dialog,
                    method: Method::Put,
                    path: endpoints.update_path(id),
                    body: Some(draft.payload(&self.schema)),
                }
            }
            DialogState::Creating(draft) => Mutation {
                kind: MutationKind::Create,
                dialog,
                method: Method::Post,
                path: endpoints.create.clone(),
                body: Some(draft.payload(&self.schema)),
            },
            DialogState::Deleting { id, .. } => Mutation {
                kind: MutationKind::Delete,
                dialog,
                method: Method::Delete,
                path: endpoints.delete_path(id),
                body: None,
            },
            DialogState::ChangingStatus(change) => Mutation {
                kind: MutationKind::ChangeStatus,
                dialog,
                method: Method::Put,
                path: endpoints.status_path(&change.id)?,
                body: Some(change.payload()),
            },
            DialogState::Closed | DialogState::Viewing(_) => return None,
        };

        log::info!("{}: submitting {:?} to {}", self.schema.key, mutation.kind, mutation.path);
        self.dialog.set_submitting(true);
        Some(Command::Mutate(mutation))
    }

    /// Upload the file path typed into the open form's image field.
    pub fn request_upload(&mut self) -> Option<Command> {
        self.schema.image_field()?;
        let draft = self.dialog.draft_mut()?;
        let path = draft.upload_path.trim();
        if draft.uploading || path.is_empty() {
            return None;
        }
        let file = PathBuf::from(path);
        draft.uploading = true;
        Some(Command::Upload {
            dialog: self.dialog_seq,
            file,
        })
    }

    // Outcomes

    pub fn handle_outcome(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::Fetched { generation, result } => self.on_fetched(generation, result),
            Outcome::Employees(result) => self.on_employees(result),
            Outcome::Mutated { kind, dialog, result } => self.on_mutated(kind, dialog, result),
            Outcome::Uploaded { dialog, result } => self.on_uploaded(dialog, result),
        }
    }

    fn on_fetched(&mut self, generation: u64, result: Result<Page, ApiError>) -> Vec<Command> {
        if generation != self.generation {
            log::info!(
                "{}: dropping stale fetch #{} (latest #{})",
                self.schema.key,
                generation,
                self.generation
            );
            return Vec::new();
        }
        self.loading = false;

        match result {
            Ok(page) => {
                log::info!("{}: fetched {} records", self.schema.key, page.records.len());
                let remote_total = match (page.total, page.total_pages) {
                    (None, None) => None,
                    (total, pages) => Some(Total::Remote {
                        total: total.unwrap_or(page.records.len()),
                        pages: pages.unwrap_or(0),
                    }),
                };
                self.records = page.records;
                match (self.schema.filter_mode, remote_total) {
                    (FilterMode::Server, Some(total)) => self.pager.set_total(total),
                    (FilterMode::Server, None) => self.pager.set_total(Total::Remote {
                        total: self.records.len(),
                        pages: 1,
                    }),
                    (FilterMode::Client, _) => self.recount(),
                }
                self.clamp_server_page()
            }
            Err(err) => {
                log::error!("{}: fetch failed: {}", self.schema.key, err);
                self.fail(&err, format!("Error fetching {}", self.schema.plural))
            }
        }
    }

    /// A server-paged screen left past its last page (e.g. after deleting the
    /// only row there) steps back and fetches that page instead.
    fn clamp_server_page(&mut self) -> Vec<Command> {
        if self.schema.filter_mode != FilterMode::Server || self.pager.page() < self.pager.page_count() {
            return Vec::new();
        }
        self.pager.clamp();
        log::info!("{}: page out of range, moving to page {}", self.schema.key, self.pager.page() + 1);
        vec![self.refresh()]
    }

    fn on_employees(&mut self, result: Result<Vec<Record>, ApiError>) -> Vec<Command> {
        let Some(field) = self.schema.employee_field else {
            return Vec::new();
        };
        match result {
            Ok(employees) => {
                self.employees = employees.iter().filter_map(|e| e.text(field)).collect();
            }
            Err(ApiError::MissingCredential) => {}
            Err(err) => {
                log::error!("{}: employee lookup failed: {}", self.schema.key, err);
                self.notifications.push(Notification::error(ERROR_EMPLOYEES_FETCH));
            }
        }
        Vec::new()
    }

    /// The collection is refetched and the user notified either way, but only
    /// the dialog that submitted the mutation is closed or released.
    fn on_mutated(&mut self, kind: MutationKind, dialog: u64, result: Result<Value, ApiError>) -> Vec<Command> {
        let own_dialog = dialog == self.dialog_seq;
        if own_dialog {
            self.dialog.set_submitting(false);
        } else {
            log::info!("{}: {:?} finished after its dialog closed", self.schema.key, kind);
        }
        let noun = capitalize(self.schema.singular);

        match result {
            Ok(body) => {
                let message = match kind {
                    MutationKind::Create => format!("{} created successfully", noun),
                    MutationKind::Update => format!("{} updated successfully", noun),
                    MutationKind::Delete => format!("{} deleted successfully", noun),
                    MutationKind::ChangeStatus => {
                        body_message(&body).unwrap_or_else(|| format!("{} status updated successfully", noun))
                    }
                };
                log::info!("{}: {:?} succeeded", self.schema.key, kind);
                if own_dialog {
                    self.dialog.close();
                }
                self.notifications.push(Notification::success(message));
                vec![self.refresh()]
            }
            Err(err) => {
                log::error!("{}: {:?} failed: {}", self.schema.key, kind, err);
                let verb = match kind {
                    MutationKind::Create => "creating",
                    MutationKind::Update => "updating",
                    MutationKind::Delete => "deleting",
                    MutationKind::ChangeStatus => "updating status of",
                };
                self.fail(&err, format!("Error {} {}", verb, self.schema.singular))
            }
        }
    }

    fn on_uploaded(&mut self, dialog: u64, result: Result<String, ApiError>) -> Vec<Command> {
        if dialog != self.dialog_seq {
            log::info!("{}: ignoring upload for a closed dialog", self.schema.key);
            return Vec::new();
        }
        let Some(image_key) = self.schema.image_field().map(|f| f.key) else {
            return Vec::new();
        };
        let Some(draft) = self.dialog.draft_mut() else {
            return Vec::new();
        };
        draft.uploading = false;

        match result {
            Ok(filename) => {
                log::info!("{}: uploaded image {}", self.schema.key, filename);
                draft.set(image_key, filename);
                draft.upload_path.clear();
                self.notifications.push(Notification::success(SUCCESS_IMAGE_UPLOADED));
                Vec::new()
            }
            Err(err) => {
                log::error!("{}: upload failed: {}", self.schema.key, err);
                let fallback = match &err {
                    ApiError::Io(message) => message.clone(),
                    _ => "Failed to upload file".to_string(),
                };
                self.fail(&err, fallback)
            }
        }
    }

    /// Notify about a failed request; a missing credential also redirects to sign-in.
    fn fail(&mut self, err: &ApiError, fallback: String) -> Vec<Command> {
        self.notifications.push(Notification::error(err.user_message(&fallback)));
        if err.is_missing_credential() {
            vec![Command::SignIn]
        } else {
            Vec::new()
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
