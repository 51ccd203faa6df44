//! Raw form input and its coercion rules.
//!
//! # Responsibility
//! - Carry user-entered field values as untyped strings.
//! - Coerce numeric and date inputs into domain types.
//!
//! # Invariants
//! - Absent or unparseable numbers coerce to zero, never to an error.
//! - Unparseable dates coerce to `None` so required-date checks reject them.
//! - Text values are trimmed on read.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Submitted form values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter used by presenters and tests.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the trimmed value, or an empty string when absent.
    pub fn text(&self, name: &str) -> String {
        self.optional_text(name).unwrap_or_default()
    }

    /// Returns the trimmed value only when the field was submitted.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.fields.get(name).map(|value| value.trim().to_string())
    }

    /// Returns the decimal value, coercing blank/malformed input to zero.
    pub fn decimal(&self, name: &str) -> Decimal {
        self.fields
            .get(name)
            .map(|value| parse_decimal_or_zero(value))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn optional_decimal(&self, name: &str) -> Option<Decimal> {
        self.fields.get(name).map(|value| parse_decimal_or_zero(value))
    }

    /// Returns the count value, coercing blank/malformed/negative input to zero.
    pub fn count(&self, name: &str) -> u32 {
        self.fields
            .get(name)
            .map(|value| parse_count_or_zero(value))
            .unwrap_or(0)
    }

    pub fn optional_count(&self, name: &str) -> Option<u32> {
        self.fields.get(name).map(|value| parse_count_or_zero(value))
    }

    /// Returns an ISO `YYYY-MM-DD` date, or `None` when absent/malformed.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.fields.get(name).and_then(|value| parse_date(value))
    }

    /// Returns `None` when the field was not submitted, otherwise its parse
    /// result. Patches use this to tell "keep" apart from "invalid".
    pub fn submitted_date(&self, name: &str) -> Option<Option<NaiveDate>> {
        self.fields.get(name).map(|value| parse_date(value))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut form = Self::new();
        for (name, value) in iter {
            form.set(name, value);
        }
        form
    }
}

/// Parses a decimal amount; blank or malformed input yields zero.
pub fn parse_decimal_or_zero(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Parses a whole count; fractional input truncates, anything else yields zero.
pub fn parse_count_or_zero(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return value;
    }
    Decimal::from_str(trimmed)
        .ok()
        .filter(|value| value.is_sign_positive())
        .and_then(|value| value.trunc().to_u32())
        .unwrap_or(0)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
