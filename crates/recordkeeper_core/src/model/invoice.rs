//! Invoices, line items and payment status.
//!
//! # Responsibility
//! - Turn submitted line-item rows into priced items.
//! - Compute subtotal, tax and total for one invoice.
//! - Derive `paid` / `overdue` / `pending` from stored state and the date.
//!
//! # Invariants
//! - Rows missing a description, quantity or price are dropped, never
//!   priced at zero.
//! - `total == subtotal + tax` and `tax == subtotal * rate`.
//! - Paid invoices are never overdue.

use crate::form::FormData;
use crate::model::record::{
    require_date_if_set, require_text, require_text_if_set, Keyed, RecordId, StatusTag,
    ValidationError,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl LineItem {
    pub fn total(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.price)
    }
}

/// One submitted line-item row before filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineItemInput {
    pub description: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl LineItemInput {
    pub fn new(description: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            price,
        }
    }

    /// Reads rows `item_description_<n>`, `item_quantity_<n>` and
    /// `item_price_<n>` for `n = 0, 1, ...` until a row is entirely absent.
    pub fn rows_from_form(form: &FormData) -> Vec<Self> {
        let mut rows = Vec::new();
        for index in 0.. {
            let description = format!("item_description_{index}");
            let quantity = format!("item_quantity_{index}");
            let price = format!("item_price_{index}");
            if !form.contains(&description) && !form.contains(&quantity) && !form.contains(&price)
            {
                break;
            }
            rows.push(Self {
                description: form.text(&description),
                quantity: form.count(&quantity),
                price: form.decimal(&price),
            });
        }
        rows
    }
}

/// Keeps rows that have a description, a non-zero quantity and a non-zero
/// price.
pub fn collect_line_items(rows: Vec<LineItemInput>) -> Vec<LineItem> {
    rows.into_iter()
        .filter(|row| {
            !row.description.trim().is_empty() && row.quantity > 0 && !row.price.is_zero()
        })
        .map(|row| LineItem {
            description: row.description.trim().to_string(),
            quantity: row.quantity,
            price: row.price,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    pub fn compute(items: &[LineItem], tax_rate: Decimal) -> Self {
        let subtotal = items
            .iter()
            .map(LineItem::total)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let tax = subtotal.saturating_mul(tax_rate);
        Self {
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }

    /// Totals for invoices imported without line items.
    pub fn flat(total: Decimal) -> Self {
        Self {
            subtotal: total,
            tax: Decimal::ZERO,
            total,
        }
    }
}

/// Stored payment state; `overdue` is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentState {
    #[default]
    Pending,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvoiceStatus {
    Paid,
    Overdue,
    Pending,
}

impl StatusTag for InvoiceStatus {
    fn tag(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Pending => "pending",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub id: RecordId,
    pub number: String,
    pub client_name: String,
    pub client_email: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub description: String,
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
    pub state: PaymentState,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// Paid wins; otherwise overdue once the due date is before `today`.
    pub fn status(&self, today: NaiveDate) -> InvoiceStatus {
        if self.state == PaymentState::Paid {
            InvoiceStatus::Paid
        } else if self.due_date < today {
            InvoiceStatus::Overdue
        } else {
            InvoiceStatus::Pending
        }
    }

    /// Returns `false` when the invoice was already paid.
    pub fn mark_paid(&mut self, at: DateTime<Utc>) -> bool {
        if self.state == PaymentState::Paid {
            return false;
        }
        self.state = PaymentState::Paid;
        self.paid_at = Some(at);
        true
    }
}

impl Keyed for Invoice {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvoiceDraft {
    pub client_name: String,
    pub client_email: String,
    /// Defaults to today.
    pub invoice_date: Option<NaiveDate>,
    /// Defaults to the invoice date plus the configured term.
    pub due_date: Option<NaiveDate>,
    pub description: String,
    pub items: Vec<LineItemInput>,
}

impl InvoiceDraft {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            client_name: form.text("client_name"),
            client_email: form.text("client_email"),
            invoice_date: form.date("invoice_date"),
            due_date: form.date("due_date"),
            description: form.text("description"),
            items: LineItemInput::rows_from_form(form),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("client_name", &self.client_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvoicePatch {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub invoice_date: Option<Option<NaiveDate>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub description: Option<String>,
    /// Replaces every line item and recomputes totals.
    pub items: Option<Vec<LineItemInput>>,
}

impl InvoicePatch {
    pub fn from_form(form: &FormData) -> Self {
        let rows = LineItemInput::rows_from_form(form);
        Self {
            client_name: form.optional_text("client_name"),
            client_email: form.optional_text("client_email"),
            invoice_date: form.submitted_date("invoice_date"),
            due_date: form.submitted_date("due_date"),
            description: form.optional_text("description"),
            items: (!rows.is_empty()).then_some(rows),
        }
    }

    /// Applies the patch; number, payment state and timestamps are kept.
    pub fn apply(self, invoice: &mut Invoice, tax_rate: Decimal) -> Result<(), ValidationError> {
        require_text_if_set("client_name", self.client_name.as_ref())?;
        let invoice_date = require_date_if_set("invoice_date", self.invoice_date)?;
        let due_date = require_date_if_set("due_date", self.due_date)?;

        if let Some(client_name) = self.client_name {
            invoice.client_name = client_name;
        }
        if let Some(client_email) = self.client_email {
            invoice.client_email = client_email;
        }
        if let Some(invoice_date) = invoice_date {
            invoice.invoice_date = invoice_date;
        }
        if let Some(due_date) = due_date {
            invoice.due_date = due_date;
        }
        if let Some(description) = self.description {
            invoice.description = description;
        }
        if let Some(rows) = self.items {
            invoice.items = collect_line_items(rows);
            invoice.totals = InvoiceTotals::compute(&invoice.items, tax_rate);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSummary {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub overdue: usize,
    /// Sum of totals not yet paid.
    pub outstanding: Decimal,
}

impl InvoiceSummary {
    pub fn from_invoices<'a>(
        invoices: impl IntoIterator<Item = &'a Invoice>,
        today: NaiveDate,
    ) -> Self {
        let mut summary = Self {
            total: 0,
            paid: 0,
            pending: 0,
            overdue: 0,
            outstanding: Decimal::ZERO,
        };
        for invoice in invoices {
            summary.total += 1;
            match invoice.status(today) {
                InvoiceStatus::Paid => summary.paid += 1,
                InvoiceStatus::Pending => summary.pending += 1,
                InvoiceStatus::Overdue => summary.overdue += 1,
            }
            if invoice.state != PaymentState::Paid {
                summary.outstanding = summary.outstanding.saturating_add(invoice.totals.total);
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::{collect_line_items, InvoiceTotals, LineItemInput};
    use crate::form::FormData;
    use rust_decimal::Decimal;

    #[test]
    fn incomplete_rows_are_dropped() {
        let rows = vec![
            LineItemInput::new("Design", 2, Decimal::new(100, 0)),
            LineItemInput::new("", 1, Decimal::new(50, 0)),
            LineItemInput::new("Hosting", 0, Decimal::new(50, 0)),
            LineItemInput::new("Support", 1, Decimal::ZERO),
        ];
        let items = collect_line_items(rows);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Design");
    }

    #[test]
    fn totals_apply_tax_on_subtotal() {
        let items = collect_line_items(vec![
            LineItemInput::new("Design", 2, Decimal::new(100, 0)),
            LineItemInput::new("Hosting", 1, Decimal::new(50, 0)),
        ]);
        let totals = InvoiceTotals::compute(&items, Decimal::new(1, 1));
        assert_eq!(totals.subtotal, Decimal::new(250, 0));
        assert_eq!(totals.tax, Decimal::new(25, 0));
        assert_eq!(totals.total, Decimal::new(275, 0));
    }

    #[test]
    fn totals_saturate_for_huge_prices() {
        let items = collect_line_items(vec![
            LineItemInput::new("Design", 2, Decimal::MAX),
            LineItemInput::new("Hosting", 1, Decimal::MAX),
        ]);
        let totals = InvoiceTotals::compute(&items, Decimal::new(1, 1));
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
    }

    #[test]
    fn form_rows_stop_at_first_missing_index() {
        let form = FormData::new()
            .with("item_description_0", "Design")
            .with("item_quantity_0", "2")
            .with("item_price_0", "100")
            .with("item_description_1", "Hosting")
            .with("item_description_3", "Skipped");
        let rows = LineItemInput::rows_from_form(&form);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].quantity, 0);
    }
}
