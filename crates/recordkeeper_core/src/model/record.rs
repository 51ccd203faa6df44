//! Shared record identity, validation and status vocabulary.
//!
//! # Responsibility
//! - Define the opaque `RecordId` used by every collection.
//! - Define the user-facing validation errors raised by write paths.
//! - Define the status tag contract used by filters and badges.
//!
//! # Invariants
//! - `RecordId` values are never reused within one store.
//! - Validation errors carry the message shown to the user verbatim.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque identifier for one record inside one collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Records that live in a keyed collection.
pub trait Keyed {
    fn record_id(&self) -> &RecordId;
}

/// Write-path failure surfaced to the user as a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field is blank or missing.
    MissingField(&'static str),
    /// Login attempted with a blank username or password.
    MissingCredentials,
    /// Report generation attempted without both range dates.
    MissingDateRange,
}

impl ValidationError {
    /// Returns the field name for missing-field failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) => Some(field),
            _ => None,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(_) => write!(f, "Please fill in all required fields"),
            Self::MissingCredentials => write!(f, "Please enter both username and password"),
            Self::MissingDateRange => write!(f, "Please select a date range first"),
        }
    }
}

impl Error for ValidationError {}

/// Fails with `MissingField(field)` when `value` is blank after trim.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Fails with `MissingField(field)` when an optional patch value is present
/// but blank. Absent values keep the stored field and always pass.
pub fn require_text_if_set(
    field: &'static str,
    value: Option<&String>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

/// Fails with `MissingField(field)` when a required value is absent.
pub fn require_some<T>(field: &'static str, value: Option<&T>) -> Result<(), ValidationError> {
    if value.is_none() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Unwraps a submitted patch date. Absent passes as `Ok(None)`; a submitted
/// value that did not parse fails with `MissingField(field)`.
pub fn require_date_if_set(
    field: &'static str,
    value: Option<Option<NaiveDate>>,
) -> Result<Option<NaiveDate>, ValidationError> {
    match value {
        Some(Some(date)) => Ok(Some(date)),
        Some(None) => Err(ValidationError::MissingField(field)),
        None => Ok(None),
    }
}

/// Status vocabulary shared by badges and facet filters.
///
/// `tag` is the machine value matched by status selectors (for example
/// `low-stock`); `label` is the human-readable badge text.
pub trait StatusTag: Copy + Eq + std::fmt::Debug {
    fn tag(&self) -> &'static str;
    fn label(&self) -> &'static str;
}

/// Status for collections that carry no badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoStatus;

impl StatusTag for NoStatus {
    fn tag(&self) -> &'static str {
        ""
    }

    fn label(&self) -> &'static str {
        ""
    }
}

/// Priority tag shared by tasks and support tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Parses a selector value; unknown values fall back to `Medium`.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            "urgent" => Self::Urgent,
            _ => Self::Medium,
        }
    }
}

impl StatusTag for Priority {
    fn tag(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{require_text, require_text_if_set, Priority, StatusTag, ValidationError};

    #[test]
    fn require_text_rejects_whitespace() {
        let err = require_text("title", "   ").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("title"));
        assert_eq!(err.field(), Some("title"));
        assert_eq!(err.to_string(), "Please fill in all required fields");
    }

    #[test]
    fn absent_patch_values_pass_validation() {
        assert!(require_text_if_set("title", None).is_ok());
        assert!(require_text_if_set("title", Some(&String::new())).is_err());
    }

    #[test]
    fn unknown_priority_falls_back_to_medium() {
        assert_eq!(Priority::parse_or_default("URGENT"), Priority::Urgent);
        assert_eq!(Priority::parse_or_default("someday"), Priority::Medium);
        assert_eq!(Priority::High.label(), "HIGH");
    }
}
