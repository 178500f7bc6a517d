//! Resource schemas.
//!
//! A [`ResourceSchema`] is the configuration object that turns the generic
//! table controller into a concrete screen: which fields exist, which of
//! them are searched, shown in the table or edited in dialogs, which
//! endpoints back each operation, and whether filtering happens locally or on
//! the server.

use crate::record::RecordId;
use anyhow::{bail, Result};

/// Placeholder replaced by the record id in endpoint templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Sentinel filter choice that disables a filter.
pub const FILTER_ALL: &str = "all";

/// How a field is displayed and edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Free text that is masked on screen and never pre-filled from a record.
    Secret,
    /// Filename of an uploaded image.
    Image,
    /// One of a fixed set of values.
    Choice(Vec<&'static str>),
    /// One of the employee ids offered by the backend; free text when the
    /// lookup is unavailable.
    Lookup,
    /// Embedded related items, shown as a count.
    Count,
    /// Backend timestamp.
    Timestamp,
}

/// Which dialogs a field appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editable {
    Never,
    OnCreate,
    OnEdit,
    Always,
}

/// Dialog a draft belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl Editable {
    pub fn allows(&self, mode: FormMode) -> bool {
        matches!(
            (self, mode),
            (Editable::Always, _) | (Editable::OnCreate, FormMode::Create) | (Editable::OnEdit, FormMode::Edit)
        )
    }
}

/// Description of one record field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub searchable: bool,
    pub in_table: bool,
    pub editable: Editable,
    pub default: Option<&'static str>,
    /// Leave the field out of mutation payloads when the draft value is empty.
    pub omit_when_empty: bool,
    /// Preferred column width in the table, in percent.
    pub width: u16,
}

impl FieldSpec {
    fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            searchable: false,
            in_table: true,
            editable: Editable::Never,
            default: None,
            omit_when_empty: false,
            width: 15,
        }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text).editable(Editable::Always)
    }

    pub fn secret(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Secret)
            .editable(Editable::Always)
            .hidden()
    }

    pub fn image(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Image).editable(Editable::Always)
    }

    pub fn choice(key: &'static str, label: &'static str, options: &[&'static str]) -> Self {
        let default = options.first().copied();
        let mut spec = Self::new(key, label, FieldKind::Choice(options.to_vec())).editable(Editable::Always);
        spec.default = default;
        spec
    }

    pub fn lookup(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Lookup).editable(Editable::Always)
    }

    pub fn count(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Count)
    }

    pub fn timestamp(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Timestamp)
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.in_table = false;
        self
    }

    pub fn editable(mut self, editable: Editable) -> Self {
        self.editable = editable;
        self
    }

    pub fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub fn omit_when_empty(mut self) -> Self {
        self.omit_when_empty = true;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn is_secret(&self) -> bool {
        self.kind == FieldKind::Secret
    }
}

/// Where filter and search are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// The whole collection is fetched and filtered/paged in memory.
    Client,
    /// Filter, search and paging are sent as query parameters.
    Server,
}

/// A selectable exact-match filter over one field.
#[derive(Debug, Clone)]
pub struct ChoiceFilter {
    pub field: &'static str,
    pub label: &'static str,
    pub options: Vec<&'static str>,
}

impl ChoiceFilter {
    /// Options including the leading `all` sentinel.
    pub fn choices(&self) -> Vec<&'static str> {
        std::iter::once(FILTER_ALL).chain(self.options.iter().copied()).collect()
    }
}

/// Endpoint paths of a resource, relative to the API base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub list: String,
    /// Member of a paged list response holding the records.
    pub list_items: Option<String>,
    pub create: String,
    pub update: String,
    pub delete: String,
    pub status: Option<String>,
}

impl Endpoints {
    pub fn update_path(&self, id: &RecordId) -> String {
        expand(&self.update, id)
    }

    pub fn delete_path(&self, id: &RecordId) -> String {
        expand(&self.delete, id)
    }

    pub fn status_path(&self, id: &RecordId) -> Option<String> {
        self.status.as_deref().map(|template| expand(template, id))
    }
}

fn expand(template: &str, id: &RecordId) -> String {
    template.replace(ID_PLACEHOLDER, id.as_str())
}

/// Complete description of one managed resource.
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub key: &'static str,
    pub title: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
    pub fields: Vec<FieldSpec>,
    pub endpoints: Endpoints,
    pub filter_mode: FilterMode,
    pub status_filter: Option<ChoiceFilter>,
    pub type_filter: Option<ChoiceFilter>,
    /// Key of the employee lookup field, when the resource has one.
    pub employee_field: Option<&'static str>,
}

impl ResourceSchema {
    pub fn builder(key: &'static str, title: &'static str) -> ResourceSchemaBuilder {
        ResourceSchemaBuilder::new(key, title)
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn table_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.in_table)
    }

    pub fn form_fields(&self, mode: FormMode) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.editable.allows(mode))
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.searchable)
    }

    /// The image field edited through uploads, if any.
    pub fn image_field(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.kind == FieldKind::Image)
    }

    pub fn supports_status_change(&self) -> bool {
        self.endpoints.status.is_some()
    }
}

/// Builder for [`ResourceSchema`].
pub struct ResourceSchemaBuilder {
    key: &'static str,
    title: &'static str,
    singular: &'static str,
    plural: &'static str,
    fields: Vec<FieldSpec>,
    list: Option<String>,
    list_items: Option<String>,
    create: Option<String>,
    update: Option<String>,
    delete: Option<String>,
    status: Option<String>,
    filter_mode: FilterMode,
    status_filter: bool,
    type_filter: Option<(&'static str, &'static str)>,
    employee_field: Option<&'static str>,
}

impl ResourceSchemaBuilder {
    fn new(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            singular: key,
            plural: key,
            fields: Vec::new(),
            list: None,
            list_items: None,
            create: None,
            update: None,
            delete: None,
            status: None,
            filter_mode: FilterMode::Client,
            status_filter: false,
            type_filter: None,
            employee_field: None,
        }
    }

    pub fn nouns(mut self, singular: &'static str, plural: &'static str) -> Self {
        self.singular = singular;
        self.plural = plural;
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Use one collection path for list/create and `<path>/{id}` for update/delete.
    pub fn collection(mut self, path: &str) -> Self {
        self.list = Some(path.to_string());
        self.create = Some(path.to_string());
        self.update = Some(format!("{}/{}", path, ID_PLACEHOLDER));
        self.delete = Some(format!("{}/{}", path, ID_PLACEHOLDER));
        self
    }

    pub fn list_path(mut self, path: &str) -> Self {
        self.list = Some(path.to_string());
        self
    }

    /// Name the member of a paged `data` object that holds the records.
    pub fn list_items(mut self, key: &str) -> Self {
        self.list_items = Some(key.to_string());
        self
    }

    pub fn create_path(mut self, path: &str) -> Self {
        self.create = Some(path.to_string());
        self
    }

    pub fn update_path(mut self, path: &str) -> Self {
        self.update = Some(path.to_string());
        self
    }

    pub fn delete_path(mut self, path: &str) -> Self {
        self.delete = Some(path.to_string());
        self
    }

    pub fn status_path(mut self, path: &str) -> Self {
        self.status = Some(path.to_string());
        self
    }

    pub fn filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    pub fn status_filter(mut self) -> Self {
        self.status_filter = true;
        self
    }

    /// Filter on an existing choice field.
    pub fn type_filter(mut self, field: &'static str, label: &'static str) -> Self {
        self.type_filter = Some((field, label));
        self
    }

    pub fn employee_lookup(mut self, field: &'static str) -> Self {
        self.employee_field = Some(field);
        self
    }

    pub fn build(self) -> Result<ResourceSchema> {
        let (Some(list), Some(create), Some(update), Some(delete)) = (self.list, self.create, self.update, self.delete)
        else {
            bail!("Resource '{}': list, create, update and delete paths are required", self.key);
        };

        for path in [&list, &create, &update, &delete].into_iter().chain(self.status.as_ref()) {
            if !path.starts_with('/') {
                bail!("Resource '{}': endpoint '{}' must start with '/'", self.key, path);
            }
        }
        if let Some(status) = &self.status {
            if !status.contains(ID_PLACEHOLDER) {
                bail!("Resource '{}': status endpoint must contain {}", self.key, ID_PLACEHOLDER);
            }
        }
        if !update.contains(ID_PLACEHOLDER) {
            bail!("Resource '{}': update endpoint must contain {}", self.key, ID_PLACEHOLDER);
        }

        let type_filter = match self.type_filter {
            Some((field, label)) => match self.fields.iter().find(|f| f.key == field).map(|f| &f.kind) {
                Some(FieldKind::Choice(options)) => Some(ChoiceFilter {
                    field,
                    label,
                    options: options.clone(),
                }),
                _ => bail!("Resource '{}': type filter '{}' must be a choice field", self.key, field),
            },
            None => None,
        };

        if let Some(field) = self.employee_field {
            if !self.fields.iter().any(|f| f.key == field && f.kind == FieldKind::Lookup) {
                bail!("Resource '{}': employee field '{}' must be a lookup field", self.key, field);
            }
        }

        let status_filter = self.status_filter.then(|| ChoiceFilter {
            field: "status",
            label: "Status",
            options: crate::record::Status::ALL.iter().map(|s| s.as_str()).collect(),
        });

        Ok(ResourceSchema {
            key: self.key,
            title: self.title,
            singular: self.singular,
            plural: self.plural,
            fields: self.fields,
            endpoints: Endpoints {
                list,
                list_items: self.list_items,
                create,
                update,
                delete,
                status: self.status,
            },
            filter_mode: self.filter_mode,
            status_filter,
            type_filter,
            employee_field: self.employee_field,
        })
    }
}
