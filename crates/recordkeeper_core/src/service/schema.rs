//! Per-domain configuration of the generic CRUD-list manager.
//!
//! # Responsibility
//! - Describe one domain: validation, record construction, patch merge,
//!   searchable fields, facet values, status derivation and row projection.
//! - Define the filter state shared by every list.
//!
//! # Invariants
//! - `derive_status` and `facet` are pure in `(record, now)`.
//! - `merge` must either apply the whole patch or return an error; callers
//!   run it on a copy and only commit on success.

use crate::model::record::{Keyed, RecordId, StatusTag, ValidationError};
use crate::view::model::{EmptyState, Row};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Exact-match selector dimensions offered by list filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Category,
    Status,
    Priority,
    Kind,
}

impl Facet {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "category" => Some(Self::Category),
            "status" => Some(Self::Status),
            "priority" => Some(Self::Priority),
            "kind" | "type" => Some(Self::Kind),
            _ => None,
        }
    }
}

/// Search text plus facet selections. Empty values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub selections: BTreeMap<Facet, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_selection(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.select(facet, value);
        self
    }

    /// Sets one selector; an empty value clears it.
    pub fn select(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.selections.remove(&facet);
        } else {
            self.selections.insert(facet, value.trim().to_string());
        }
    }

    /// Lowercased, trimmed search needle; `None` when search is blank.
    pub fn needle(&self) -> Option<String> {
        let trimmed = self.search.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle().is_none() && self.selections.is_empty()
    }
}

/// User-facing texts emitted by the generic manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notices {
    pub created: Option<&'static str>,
    pub updated: Option<&'static str>,
    pub deleted: Option<&'static str>,
    pub delete_prompt: &'static str,
}

impl Notices {
    pub const SILENT: Notices = Notices {
        created: None,
        updated: None,
        deleted: None,
        delete_prompt: "Are you sure you want to delete this record?",
    };
}

/// Identity and timestamp assigned to a record on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMeta {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
}

/// Domain configuration for [`crate::service::crud::CrudList`].
pub trait Schema {
    type Record: Keyed + Clone + Debug;
    /// Create input.
    type Draft;
    /// Update input; `None` fields keep stored values.
    type Patch;
    type Status: StatusTag;

    /// Singular entity name used in logs and view-models.
    fn entity(&self) -> &'static str;
    fn columns(&self) -> &'static [&'static str];

    fn notices(&self) -> Notices {
        Notices::SILENT
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState::default()
    }

    /// Rejects drafts with blank required fields.
    fn validate(&self, draft: &Self::Draft) -> Result<(), ValidationError>;

    /// Builds a validated draft into a record. Only called after `validate`
    /// succeeded, so per-schema counters advance only on real inserts.
    fn build(&mut self, draft: Self::Draft, meta: RecordMeta) -> Self::Record;

    /// Applies a patch in place.
    fn merge(
        &self,
        record: &mut Self::Record,
        patch: Self::Patch,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError>;

    /// Fields matched by the free-text search.
    fn searchable<'r>(&self, record: &'r Self::Record) -> Vec<&'r str>;

    /// Value compared against a facet selection; `None` never matches.
    fn facet<'r>(
        &self,
        record: &'r Self::Record,
        facet: Facet,
        now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>>;

    fn derive_status(&self, record: &Self::Record, now: DateTime<Utc>) -> Self::Status;

    fn project(&self, record: &Self::Record, now: DateTime<Utc>) -> Row;
}

/// Shared predicate: case-insensitive substring search over searchable
/// fields AND every non-empty facet selection.
pub fn matches_filter<S: Schema + ?Sized>(
    schema: &S,
    record: &S::Record,
    filter: &FilterState,
    needle: Option<&str>,
    now: DateTime<Utc>,
) -> bool {
    let text_ok = match needle {
        Some(needle) => schema
            .searchable(record)
            .iter()
            .any(|field| field.to_lowercase().contains(needle)),
        None => true,
    };
    text_ok
        && filter.selections.iter().all(|(facet, wanted)| {
            schema
                .facet(record, *facet, now)
                .is_some_and(|value| value.as_ref() == wanted.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::{Facet, FilterState};

    #[test]
    fn blank_selections_clear_the_facet() {
        let mut filter = FilterState::new().with_selection(Facet::Category, "home");
        assert!(!filter.is_empty());
        filter.select(Facet::Category, "  ");
        assert!(filter.is_empty());
    }

    #[test]
    fn needle_is_trimmed_and_lowercased() {
        let filter = FilterState::new().with_search("  Laptop ");
        assert_eq!(filter.needle().as_deref(), Some("laptop"));
        assert_eq!(FilterState::new().with_search("   ").needle(), None);
    }

    #[test]
    fn facet_names_parse_with_type_alias() {
        assert_eq!(Facet::parse("Type"), Some(Facet::Kind));
        assert_eq!(Facet::parse("priority"), Some(Facet::Priority));
        assert_eq!(Facet::parse("color"), None);
    }
}
