//! Invoice use-cases.
//!
//! # Invariants
//! - Invoice numbers come from a per-manager counter and advance only when
//!   an invoice is actually inserted.
//! - Editing an invoice keeps its number, payment state and `paid_at`.

use crate::clock::Clock;
use crate::form::FormData;
use crate::format::{format_currency, format_date};
use crate::model::invoice::{
    collect_line_items, Invoice, InvoiceDraft, InvoicePatch, InvoiceStatus, InvoiceSummary,
    InvoiceTotals, LineItemInput, PaymentState,
};
use crate::model::record::{RecordId, StatusTag, ValidationError};
use crate::model::task::default_due_date;
use crate::service::crud::CrudList;
use crate::service::schema::{Facet, FilterState, Notices, RecordMeta, Schema};
use crate::view::model::{Action, ListView, Row};
use crate::view::notice::{Confirm, Notice, Notifier};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::sync::Arc;

/// Invoice schema carrying the configured terms and the number counter.
#[derive(Debug, Clone)]
pub struct InvoiceSchema {
    pub tax_rate: Decimal,
    pub due_days: u32,
    next_number: u64,
}

impl InvoiceSchema {
    pub fn new(tax_rate: Decimal, due_days: u32, first_number: u64) -> Self {
        Self {
            tax_rate,
            due_days,
            next_number: first_number,
        }
    }

    /// Number the next created invoice will receive.
    pub fn next_number(&self) -> String {
        format!("INV-{}", self.next_number)
    }
}

impl Schema for InvoiceSchema {
    type Record = Invoice;
    type Draft = InvoiceDraft;
    type Patch = InvoicePatch;
    type Status = InvoiceStatus;

    fn entity(&self) -> &'static str {
        "invoice"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Invoice #", "Client", "Date", "Due Date", "Amount"]
    }

    fn notices(&self) -> Notices {
        Notices {
            created: Some("Invoice created successfully"),
            updated: Some("Invoice updated successfully"),
            deleted: Some("Invoice deleted successfully"),
            delete_prompt: "Are you sure you want to delete this invoice?",
        }
    }

    fn validate(&self, draft: &InvoiceDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: InvoiceDraft, meta: RecordMeta) -> Invoice {
        let number = self.next_number();
        self.next_number += 1;

        let invoice_date = draft
            .invoice_date
            .unwrap_or_else(|| meta.created_at.date_naive());
        let due_date = draft
            .due_date
            .unwrap_or_else(|| default_due_date(invoice_date, self.due_days));
        let items = collect_line_items(draft.items);
        let totals = InvoiceTotals::compute(&items, self.tax_rate);
        Invoice {
            id: meta.id,
            number,
            client_name: draft.client_name,
            client_email: draft.client_email,
            invoice_date,
            due_date,
            description: draft.description,
            items,
            totals,
            state: PaymentState::Pending,
            created_at: meta.created_at,
            paid_at: None,
        }
    }

    fn merge(
        &self,
        record: &mut Invoice,
        patch: InvoicePatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record, self.tax_rate)
    }

    fn searchable<'r>(&self, record: &'r Invoice) -> Vec<&'r str> {
        vec![record.number.as_str(), record.client_name.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r Invoice,
        facet: Facet,
        now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Status => Some(Cow::Borrowed(self.derive_status(record, now).tag())),
            _ => None,
        }
    }

    fn derive_status(&self, record: &Invoice, now: DateTime<Utc>) -> InvoiceStatus {
        record.status(now.date_naive())
    }

    fn project(&self, record: &Invoice, now: DateTime<Utc>) -> Row {
        let mut actions = Vec::with_capacity(3);
        if record.state != PaymentState::Paid {
            actions.push(Action::MarkPaid);
        }
        actions.extend([Action::View, Action::Delete]);
        Row::new(
            record.id.clone(),
            vec![
                record.number.clone(),
                record.client_name.clone(),
                format_date(record.invoice_date),
                format_date(record.due_date),
                format_currency(record.totals.total),
            ],
        )
        .with_badge(self.derive_status(record, now))
        .with_actions(actions)
    }
}

pub struct InvoiceManager {
    invoices: CrudList<InvoiceSchema>,
}

impl InvoiceManager {
    pub fn new(
        schema: InvoiceSchema,
        seed: Vec<Invoice>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            invoices: CrudList::seeded(schema, seed, clock, notifier),
        }
    }

    pub fn invoices(&self) -> &CrudList<InvoiceSchema> {
        &self.invoices
    }

    /// Form defaults: today and today plus the payment term.
    pub fn default_dates(&self) -> (NaiveDate, NaiveDate) {
        let today = self.invoices.now().date_naive();
        (
            today,
            default_due_date(today, self.invoices.schema().due_days),
        )
    }

    /// Live totals for the rows currently in the form.
    pub fn preview_totals(&self, rows: Vec<LineItemInput>) -> InvoiceTotals {
        InvoiceTotals::compute(&collect_line_items(rows), self.invoices.schema().tax_rate)
    }

    pub fn create(&mut self, draft: InvoiceDraft) -> Result<RecordId, ValidationError> {
        self.invoices.create(draft)
    }

    pub fn create_from_form(&mut self, form: &FormData) -> Result<RecordId, ValidationError> {
        self.create(InvoiceDraft::from_form(form))
    }

    pub fn update(&mut self, id: &RecordId, patch: InvoicePatch) -> Result<bool, ValidationError> {
        self.invoices.update(id, patch)
    }

    pub fn update_from_form(
        &mut self,
        id: &RecordId,
        form: &FormData,
    ) -> Result<bool, ValidationError> {
        self.update(id, InvoicePatch::from_form(form))
    }

    pub fn delete(&mut self, id: &RecordId, confirm: &dyn Confirm) -> bool {
        self.invoices.delete(id, confirm)
    }

    /// Marks an unpaid invoice paid. Unknown or already-paid ids are no-ops.
    pub fn mark_paid(&mut self, id: &RecordId) -> bool {
        let changed = self
            .invoices
            .transition(id, |invoice, now| invoice.mark_paid(now));
        if changed {
            self.invoices
                .notify(Notice::success("Invoice marked as paid"));
        }
        changed
    }

    /// Returns the invoice for a detail view.
    pub fn open(&self, id: &RecordId) -> Option<&Invoice> {
        let invoice = self.invoices.get(id)?;
        self.invoices
            .notify(Notice::info("Invoice viewer would open here"));
        Some(invoice)
    }

    pub fn view(&self, filter: FilterState) -> ListView {
        self.invoices.list(filter).render()
    }

    pub fn summary(&self) -> InvoiceSummary {
        InvoiceSummary::from_invoices(
            self.invoices.records(),
            self.invoices.now().date_naive(),
        )
    }
}
