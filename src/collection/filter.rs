//! Local filter and search over a fetched collection.

use crate::record::Record;
use crate::schema::{ChoiceFilter, ResourceSchema, FILTER_ALL};

/// Current search term and choice filters of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub status: String,
    pub kind: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: FILTER_ALL.to_string(),
            kind: FILTER_ALL.to_string(),
        }
    }
}

impl FilterState {
    /// Status filter value for a query, `None` when set to `all`.
    pub fn status_param(&self) -> Option<&str> {
        active_choice(&self.status)
    }

    pub fn kind_param(&self) -> Option<&str> {
        active_choice(&self.kind)
    }

    /// Search term for a query, `None` when empty.
    pub fn search_param(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }
}

fn active_choice(value: &str) -> Option<&str> {
    (value != FILTER_ALL).then_some(value)
}

/// Move `current` to the next option of `filter`, wrapping back to `all`.
pub fn cycle_choice(filter: &ChoiceFilter, current: &str) -> String {
    let choices = filter.choices();
    let index = choices.iter().position(|c| *c == current).unwrap_or(0);
    choices[(index + 1) % choices.len()].to_string()
}

/// Whether `record` matches the search term.
///
/// Matching is a case-insensitive substring test over the schema's
/// searchable fields and the id. An empty term matches everything.
pub fn matches_search(record: &Record, schema: &ResourceSchema, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    record.id().as_str().to_lowercase().contains(&needle)
        || schema
            .searchable_fields()
            .filter_map(|field| record.text(field.key))
            .any(|value| value.to_lowercase().contains(&needle))
}

fn matches_choice(record: &Record, field: &str, choice: &str) -> bool {
    choice == FILTER_ALL || record.text(field).as_deref() == Some(choice)
}

/// Records passing search, status and type filters, in collection order.
pub fn apply<'a>(records: &'a [Record], schema: &ResourceSchema, state: &FilterState) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| matches_search(record, schema, &state.search))
        .filter(|record| {
            schema
                .status_filter
                .as_ref()
                .map_or(true, |filter| matches_choice(record, filter.field, &state.status))
        })
        .filter(|record| {
            schema
                .type_filter
                .as_ref()
                .map_or(true, |filter| matches_choice(record, filter.field, &state.kind))
        })
        .collect()
}
