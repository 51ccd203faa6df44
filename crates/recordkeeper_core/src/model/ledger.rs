//! Dashboard ledger entries (sales, expenses, customer info, notes).
//!
//! # Invariants
//! - Only `sales` and `expenses` entries carry an amount; other categories
//!   never do.
//! - Monetary entries submitted without an amount store zero.

use crate::form::FormData;
use crate::model::record::{
    require_date_if_set, require_some, require_text, require_text_if_set, Keyed, RecordId,
    StatusTag, ValidationError,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedgerCategory {
    #[default]
    Sales,
    Expenses,
    CustomerInfo,
    PersonalNotes,
}

impl LedgerCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "sales" => Some(Self::Sales),
            "expenses" => Some(Self::Expenses),
            "customer-info" => Some(Self::CustomerInfo),
            "personal-notes" => Some(Self::PersonalNotes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Expenses => "expenses",
            Self::CustomerInfo => "customer-info",
            Self::PersonalNotes => "personal-notes",
        }
    }

    /// Whether entries of this category carry an amount.
    pub fn is_monetary(&self) -> bool {
        matches!(self, Self::Sales | Self::Expenses)
    }

    pub fn flow(&self) -> AmountFlow {
        match self {
            Self::Sales => AmountFlow::Positive,
            Self::Expenses => AmountFlow::Negative,
            Self::CustomerInfo | Self::PersonalNotes => AmountFlow::Neutral,
        }
    }
}

/// Direction of money for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmountFlow {
    Positive,
    Negative,
    Neutral,
}

impl StatusTag for AmountFlow {
    fn tag(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Income",
            Self::Negative => "Expense",
            Self::Neutral => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub id: RecordId,
    pub category: LedgerCategory,
    pub title: String,
    pub description: String,
    pub amount: Option<Decimal>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Keyed for LedgerEntry {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

/// Normalizes the stored amount for `category`.
pub fn normalize_amount(category: LedgerCategory, amount: Option<Decimal>) -> Option<Decimal> {
    if category.is_monetary() {
        Some(amount.unwrap_or(Decimal::ZERO))
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerDraft {
    pub category: LedgerCategory,
    pub title: String,
    pub description: String,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

impl LedgerDraft {
    /// Reads `category`, `title`, `description`, `amount` and `date`.
    pub fn from_form(form: &FormData) -> Self {
        Self {
            category: LedgerCategory::parse(&form.text("category")).unwrap_or_default(),
            title: form.text("title"),
            description: form.text("description"),
            amount: form.optional_decimal("amount"),
            date: form.date("date"),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_some("date", self.date.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerPatch {
    pub category: Option<LedgerCategory>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    /// `Some(None)` is a submitted date that did not parse.
    pub date: Option<Option<NaiveDate>>,
}

impl LedgerPatch {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            category: form
                .optional_text("category")
                .and_then(|value| LedgerCategory::parse(&value)),
            title: form.optional_text("title"),
            description: form.optional_text("description"),
            amount: form.optional_decimal("amount"),
            date: form.submitted_date("date"),
        }
    }

    /// Applies the patch to `entry`, re-normalizing the amount.
    pub fn apply(self, entry: &mut LedgerEntry) -> Result<(), ValidationError> {
        require_text_if_set("title", self.title.as_ref())?;
        require_text_if_set("description", self.description.as_ref())?;
        let date = require_date_if_set("date", self.date)?;

        if let Some(category) = self.category {
            entry.category = category;
        }
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(description) = self.description {
            entry.description = description;
        }
        if let Some(date) = date {
            entry.date = date;
        }
        let amount = self.amount.or(entry.amount);
        entry.amount = normalize_amount(entry.category, amount);
        Ok(())
    }
}

/// Headline counters for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_records: usize,
    pub sales_count: usize,
    pub expenses_count: usize,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

impl DashboardStats {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Self {
        let mut stats = Self {
            total_records: 0,
            sales_count: 0,
            expenses_count: 0,
            revenue: Decimal::ZERO,
            expenses: Decimal::ZERO,
            net: Decimal::ZERO,
        };
        for entry in entries {
            stats.total_records += 1;
            let amount = entry.amount.unwrap_or(Decimal::ZERO);
            match entry.category {
                LedgerCategory::Sales => {
                    stats.sales_count += 1;
                    stats.revenue = stats.revenue.saturating_add(amount);
                }
                LedgerCategory::Expenses => {
                    stats.expenses_count += 1;
                    stats.expenses = stats.expenses.saturating_add(amount);
                }
                _ => {}
            }
        }
        stats.net = stats.revenue.saturating_sub(stats.expenses);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_amount, DashboardStats, LedgerCategory, LedgerDraft, LedgerEntry, LedgerPatch,
    };
    use crate::form::FormData;
    use crate::model::record::ValidationError;
    use rust_decimal::Decimal;

    #[test]
    fn amount_only_survives_for_monetary_categories() {
        let amount = Some(Decimal::new(42, 0));
        assert_eq!(normalize_amount(LedgerCategory::Sales, None), Some(Decimal::ZERO));
        assert_eq!(normalize_amount(LedgerCategory::Expenses, amount), amount);
        assert_eq!(normalize_amount(LedgerCategory::PersonalNotes, amount), None);
    }

    #[test]
    fn draft_requires_title_description_and_date() {
        let form = FormData::new()
            .with("category", "sales")
            .with("title", "Widget")
            .with("description", "Sold widgets")
            .with("date", "not-a-date");
        let draft = LedgerDraft::from_form(&form);
        assert_eq!(draft.validate(), Err(ValidationError::MissingField("date")));
    }

    #[test]
    fn stats_saturate_for_huge_amounts() {
        use chrono::{NaiveDate, TimeZone, Utc};

        let entry = |category: LedgerCategory, amount: Decimal| LedgerEntry {
            id: "1".into(),
            category,
            title: "Bulk order".into(),
            description: "Imported".into(),
            amount: Some(amount),
            date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap(),
        };
        let entries = [
            entry(LedgerCategory::Sales, Decimal::MAX),
            entry(LedgerCategory::Sales, Decimal::MAX),
            entry(LedgerCategory::Expenses, Decimal::ONE),
        ];
        let stats = DashboardStats::from_entries(&entries);
        assert_eq!(stats.revenue, Decimal::MAX);
        assert_eq!(stats.net, Decimal::MAX - Decimal::ONE);
    }

    #[test]
    fn patch_rejects_unparseable_dates() {
        let patch = LedgerPatch::from_form(&FormData::new().with("date", "yesterday"));
        assert_eq!(patch.date, Some(None));
    }
}
