//! Generated business reports and their export lines.

use crate::form::FormData;
use crate::format::format_date;
use crate::model::record::{Keyed, RecordId, StatusTag, ValidationError};
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Sales,
    Financial,
    Inventory,
    Customer,
    Custom,
}

impl ReportKind {
    /// Unknown kinds are reported as `custom`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sales" => Self::Sales,
            "financial" => Self::Financial,
            "inventory" => Self::Inventory,
            "customer" => Self::Customer,
            _ => Self::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Financial => "financial",
            Self::Inventory => "inventory",
            Self::Customer => "customer",
            Self::Custom => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Financial => "Financial",
            Self::Inventory => "Inventory",
            Self::Customer => "Customer",
            Self::Custom => "Custom",
        }
    }
}

/// Inclusive reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// January 1st of `today`'s year through `today`.
    pub fn year_to_date(today: NaiveDate) -> Self {
        let start = today.with_ordinal(1).unwrap_or(today);
        Self { start, end: today }
    }

    /// `today - days` through `today`.
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(today);
        Self { start, end: today }
    }

    /// `Dec 1, 2025 to Dec 31, 2025`
    pub fn describe(&self) -> String {
        format!("{} to {}", format_date(self.start), format_date(self.end))
    }

    /// Builds a range only when both ends were submitted and parse.
    pub fn from_form(form: &FormData) -> Option<Self> {
        Some(Self::new(form.date("start_date")?, form.date("end_date")?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportState {
    #[default]
    Completed,
}

impl StatusTag for ReportState {
    fn tag(&self) -> &'static str {
        "completed"
    }

    fn label(&self) -> &'static str {
        "completed"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub id: RecordId,
    pub name: String,
    pub kind: ReportKind,
    pub range: DateRange,
    pub generated_on: DateTime<Utc>,
    pub state: ReportState,
}

impl Report {
    /// Download name: whitespace runs become `_`, then `_<id>.csv`.
    pub fn file_name(&self) -> String {
        report_file_name(&self.name, &self.id)
    }
}

impl Keyed for Report {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

pub fn report_name(kind: ReportKind) -> String {
    format!("{} Report", kind.display_name())
}

pub fn report_file_name(name: &str, id: &RecordId) -> String {
    format!("{}_{id}.csv", WHITESPACE_RE.replace_all(name, "_"))
}

/// Input of `generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub range: Option<DateRange>,
}

impl ReportRequest {
    pub fn new(kind: ReportKind, range: Option<DateRange>) -> Self {
        Self { kind, range }
    }

    pub fn from_form(form: &FormData) -> Self {
        Self {
            kind: ReportKind::parse(&form.text("kind")),
            range: DateRange::from_form(form),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.range.is_none() {
            return Err(ValidationError::MissingDateRange);
        }
        Ok(())
    }
}

/// One exported transaction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::{report_file_name, report_name, DateRange, ReportKind, ReportRequest};
    use crate::model::record::{RecordId, ValidationError};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn file_names_collapse_whitespace_runs() {
        let id = RecordId::from("42");
        assert_eq!(
            report_file_name("Year-End  Inventory\tReport", &id),
            "Year-End_Inventory_Report_42.csv"
        );
    }

    #[test]
    fn unknown_kinds_become_custom_reports() {
        assert_eq!(report_name(ReportKind::parse("weekly")), "Custom Report");
        assert_eq!(report_name(ReportKind::parse("Sales")), "Sales Report");
    }

    #[test]
    fn ranges_are_described_with_short_dates() {
        let today = date(2025, 12, 12);
        assert_eq!(DateRange::year_to_date(today).start, date(2025, 1, 1));
        assert_eq!(DateRange::last_days(today, 30).start, date(2025, 11, 12));
        assert_eq!(
            DateRange::new(date(2025, 12, 1), date(2025, 12, 31)).describe(),
            "Dec 1, 2025 to Dec 31, 2025"
        );
    }

    #[test]
    fn requests_without_range_are_rejected() {
        let request = ReportRequest::new(ReportKind::Sales, None);
        assert_eq!(request.validate(), Err(ValidationError::MissingDateRange));
    }
}
