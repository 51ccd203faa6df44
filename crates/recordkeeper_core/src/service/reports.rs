//! Report generation, listing and download.
//!
//! # Invariants
//! - Generation requires a complete date range; the failure is reported
//!   before anything is inserted.
//! - The success notice for a generated report is delayed, never the
//!   insertion itself.

use crate::clock::Clock;
use crate::export::{report_csv, CsvDocument};
use crate::format::format_date_time;
use crate::model::record::{RecordId, ValidationError};
use crate::model::report::{
    report_name, DateRange, Report, ReportKind, ReportLine, ReportRequest, ReportState,
};
use crate::service::crud::CrudList;
use crate::service::schema::{Facet, FilterState, Notices, RecordMeta, Schema};
use crate::view::model::{Action, ListView, Row};
use crate::view::notice::{Confirm, Notice, Notifier};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportSchema;

impl Schema for ReportSchema {
    type Record = Report;
    type Draft = ReportRequest;
    /// Reports are immutable once generated.
    type Patch = Infallible;
    type Status = ReportState;

    fn entity(&self) -> &'static str {
        "report"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Report Name", "Type", "Date Range", "Generated On"]
    }

    fn notices(&self) -> Notices {
        Notices {
            created: None,
            updated: None,
            deleted: Some("Report deleted successfully"),
            delete_prompt: "Are you sure you want to delete this report?",
        }
    }

    fn validate(&self, draft: &ReportRequest) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: ReportRequest, meta: RecordMeta) -> Report {
        let today = meta.created_at.date_naive();
        Report {
            id: meta.id,
            name: report_name(draft.kind),
            kind: draft.kind,
            range: draft.range.unwrap_or_else(|| DateRange::new(today, today)),
            generated_on: meta.created_at,
            state: ReportState::Completed,
        }
    }

    fn merge(
        &self,
        _record: &mut Report,
        patch: Infallible,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        match patch {}
    }

    fn searchable<'r>(&self, record: &'r Report) -> Vec<&'r str> {
        vec![record.name.as_str(), record.kind.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r Report,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Kind => Some(Cow::Borrowed(record.kind.as_str())),
            _ => None,
        }
    }

    fn derive_status(&self, record: &Report, _now: DateTime<Utc>) -> ReportState {
        record.state
    }

    fn project(&self, record: &Report, _now: DateTime<Utc>) -> Row {
        Row::new(
            record.id.clone(),
            vec![
                record.name.clone(),
                record.kind.display_name().to_string(),
                record.range.describe(),
                format_date_time(record.generated_on),
            ],
        )
        .with_badge(record.state)
        .with_actions([Action::View, Action::Download, Action::Delete])
        .with_emphasis(record.kind.as_str())
    }
}

pub struct ReportManager {
    reports: CrudList<ReportSchema>,
    lines: Vec<ReportLine>,
    range: Option<DateRange>,
    delay: Duration,
}

impl ReportManager {
    /// The selected range starts as the current year to date.
    pub fn new(
        seed: Vec<Report>,
        lines: Vec<ReportLine>,
        delay: Duration,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let today = clock.now().date_naive();
        Self {
            reports: CrudList::seeded(ReportSchema, seed, clock, notifier),
            lines,
            range: Some(DateRange::year_to_date(today)),
            delay,
        }
    }

    pub fn reports(&self) -> &CrudList<ReportSchema> {
        &self.reports
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn selected_range(&self) -> Option<DateRange> {
        self.range
    }

    /// Replaces the selected range; `None` clears it.
    pub fn select_range(&mut self, range: Option<DateRange>) {
        self.range = range;
    }

    /// Announces the selected range. Returns `false` when none is selected.
    pub fn apply_date_range(&self) -> bool {
        match self.range {
            Some(range) => {
                self.reports.notify(Notice::success(format!(
                    "Date range applied: {}",
                    range.describe()
                )));
                true
            }
            None => false,
        }
    }

    /// Selects the last `days` days ending today and applies it.
    pub fn set_quick_range(&mut self, days: u32) -> DateRange {
        let range = DateRange::last_days(self.reports.now().date_naive(), days);
        self.range = Some(range);
        self.apply_date_range();
        range
    }

    /// Generates a report of `kind` over the selected range.
    pub fn generate(&mut self, kind: ReportKind) -> Result<RecordId, ValidationError> {
        self.generate_request(ReportRequest::new(kind, self.range))
    }

    /// # Errors
    /// - `MissingDateRange` when either end of the range is missing.
    pub fn generate_request(&mut self, request: ReportRequest) -> Result<RecordId, ValidationError> {
        let name = report_name(request.kind);
        let id = self.reports.create(request)?;
        self.reports.notify(Notice::info("Generating report..."));
        self.reports.notify(
            Notice::success(format!("{name} generated successfully")).delayed(self.delay),
        );
        Ok(id)
    }

    /// Builds the download document for one report.
    pub fn download(&self, id: &RecordId) -> Option<CsvDocument> {
        let report = self.reports.get(id)?;
        self.reports
            .notify(Notice::info(format!("Downloading {}...", report.name)));
        Some(report_csv(report, &self.lines))
    }

    pub fn open(&self, id: &RecordId) -> Option<&Report> {
        let report = self.reports.get(id)?;
        self.reports
            .notify(Notice::info(format!("Opening {} in viewer", report.name)));
        Some(report)
    }

    pub fn delete(&mut self, id: &RecordId, confirm: &dyn Confirm) -> bool {
        self.reports.delete(id, confirm)
    }

    pub fn view(&self, filter: FilterState) -> ListView {
        self.reports.list(filter).render()
    }

    pub fn count_of(&self, kind: ReportKind) -> usize {
        self.reports
            .records()
            .iter()
            .filter(|report| report.kind == kind)
            .count()
    }
}
