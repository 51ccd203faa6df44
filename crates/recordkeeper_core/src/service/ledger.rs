//! Dashboard ledger records use-cases.

use crate::clock::Clock;
use crate::form::FormData;
use crate::format::{format_date, format_signed_amount, title_case_tag};
use crate::model::ledger::{
    normalize_amount, AmountFlow, DashboardStats, LedgerCategory, LedgerDraft, LedgerEntry,
    LedgerPatch,
};
use crate::model::record::{RecordId, StatusTag, ValidationError};
use crate::service::crud::CrudList;
use crate::service::schema::{Facet, FilterState, Notices, RecordMeta, Schema};
use crate::view::model::{Action, ListView, Row};
use crate::view::notice::{Confirm, Notifier};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerSchema;

impl Schema for LedgerSchema {
    type Record = LedgerEntry;
    type Draft = LedgerDraft;
    type Patch = LedgerPatch;
    type Status = AmountFlow;

    fn entity(&self) -> &'static str {
        "ledger"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Title", "Category", "Description", "Date", "Amount"]
    }

    fn notices(&self) -> Notices {
        Notices {
            created: Some("Record added successfully"),
            updated: Some("Record updated successfully"),
            deleted: Some("Record deleted successfully"),
            delete_prompt: "Are you sure you want to delete this record?",
        }
    }

    fn validate(&self, draft: &LedgerDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: LedgerDraft, meta: RecordMeta) -> LedgerEntry {
        LedgerEntry {
            id: meta.id,
            category: draft.category,
            title: draft.title,
            description: draft.description,
            amount: normalize_amount(draft.category, draft.amount),
            date: draft.date.unwrap_or_else(|| meta.created_at.date_naive()),
            created_at: meta.created_at,
        }
    }

    fn merge(
        &self,
        record: &mut LedgerEntry,
        patch: LedgerPatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record)
    }

    fn searchable<'r>(&self, record: &'r LedgerEntry) -> Vec<&'r str> {
        vec![record.title.as_str(), record.description.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r LedgerEntry,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Category => Some(Cow::Borrowed(record.category.as_str())),
            Facet::Status => Some(Cow::Borrowed(record.category.flow().tag())),
            Facet::Priority | Facet::Kind => None,
        }
    }

    fn derive_status(&self, record: &LedgerEntry, _now: DateTime<Utc>) -> AmountFlow {
        record.category.flow()
    }

    fn project(&self, record: &LedgerEntry, now: DateTime<Utc>) -> Row {
        let flow = self.derive_status(record, now);
        let amount = record
            .amount
            .map(|amount| format_signed_amount(amount, record.category == LedgerCategory::Sales))
            .unwrap_or_default();
        let row = Row::new(
            record.id.clone(),
            vec![
                record.title.clone(),
                title_case_tag(record.category.as_str()),
                record.description.clone(),
                format_date(record.date),
                amount,
            ],
        )
        .with_badge(flow)
        .with_actions([Action::Edit, Action::Delete]);
        if record.amount.is_some() {
            row.with_emphasis(flow.tag())
        } else {
            row
        }
    }
}

/// Manager of the dashboard ledger.
pub struct LedgerManager {
    entries: CrudList<LedgerSchema>,
}

impl LedgerManager {
    pub fn new(seed: Vec<LedgerEntry>, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            entries: CrudList::seeded(LedgerSchema, seed, clock, notifier),
        }
    }

    pub fn entries(&self) -> &CrudList<LedgerSchema> {
        &self.entries
    }

    pub fn create(&mut self, draft: LedgerDraft) -> Result<RecordId, ValidationError> {
        self.entries.create(draft)
    }

    pub fn create_from_form(&mut self, form: &FormData) -> Result<RecordId, ValidationError> {
        self.create(LedgerDraft::from_form(form))
    }

    pub fn update(&mut self, id: &RecordId, patch: LedgerPatch) -> Result<bool, ValidationError> {
        self.entries.update(id, patch)
    }

    pub fn update_from_form(
        &mut self,
        id: &RecordId,
        form: &FormData,
    ) -> Result<bool, ValidationError> {
        self.update(id, LedgerPatch::from_form(form))
    }

    pub fn delete(&mut self, id: &RecordId, confirm: &dyn Confirm) -> bool {
        self.entries.delete(id, confirm)
    }

    pub fn view(&self, filter: FilterState) -> ListView {
        self.entries.list(filter).render()
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_entries(self.entries.records())
    }
}
