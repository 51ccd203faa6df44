//! Sales, the sales-page inventory and tracked orders.
//!
//! # Invariants
//! - A sale's total is always `quantity * unit_price`; it is never stored.
//! - Inventory quantities never go below zero.
//! - Tracked orders belong to exactly one stage tab.

use crate::form::FormData;
use crate::model::record::{
    require_date_if_set, require_some, require_text, require_text_if_set, Keyed, RecordId,
    StatusTag, ValidationError,
};
use crate::view::navigation::TabName;
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    pub id: RecordId,
    pub item_name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub customer_name: String,
    pub sale_date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    pub fn total(&self) -> Decimal {
        line_total(self.quantity, self.unit_price)
    }
}

impl Keyed for Sale {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

/// Live total preview for the sale form. Saturates at the `Decimal` bounds.
pub fn line_total(quantity: u32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity).saturating_mul(unit_price)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaleDraft {
    pub item_name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub customer_name: String,
    pub sale_date: Option<NaiveDate>,
    pub description: String,
}

impl SaleDraft {
    /// Reads `item_name`, `category`, `quantity`, `unit_price`,
    /// `customer_name`, `sale_date` and `description`.
    pub fn from_form(form: &FormData) -> Self {
        Self {
            item_name: form.text("item_name"),
            category: form.text("category"),
            quantity: form.count("quantity"),
            unit_price: form.decimal("unit_price"),
            customer_name: form.text("customer_name"),
            sale_date: form.date("sale_date"),
            description: form.text("description"),
        }
    }

    pub fn total(&self) -> Decimal {
        line_total(self.quantity, self.unit_price)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("item_name", &self.item_name)?;
        require_text("customer_name", &self.customer_name)?;
        require_some("sale_date", self.sale_date.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalePatch {
    pub item_name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<Decimal>,
    pub customer_name: Option<String>,
    pub sale_date: Option<Option<NaiveDate>>,
    pub description: Option<String>,
}

impl SalePatch {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            item_name: form.optional_text("item_name"),
            category: form.optional_text("category"),
            quantity: form.optional_count("quantity"),
            unit_price: form.optional_decimal("unit_price"),
            customer_name: form.optional_text("customer_name"),
            sale_date: form.submitted_date("sale_date"),
            description: form.optional_text("description"),
        }
    }

    pub fn apply(self, sale: &mut Sale) -> Result<(), ValidationError> {
        require_text_if_set("item_name", self.item_name.as_ref())?;
        require_text_if_set("customer_name", self.customer_name.as_ref())?;
        let sale_date = require_date_if_set("sale_date", self.sale_date)?;

        if let Some(item_name) = self.item_name {
            sale.item_name = item_name;
        }
        if let Some(category) = self.category {
            sale.category = category;
        }
        if let Some(quantity) = self.quantity {
            sale.quantity = quantity;
        }
        if let Some(unit_price) = self.unit_price {
            sale.unit_price = unit_price;
        }
        if let Some(customer_name) = self.customer_name {
            sale.customer_name = customer_name;
        }
        if let Some(sale_date) = sale_date {
            sale.sale_date = sale_date;
        }
        if let Some(description) = self.description {
            sale.description = description;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventoryStatus {
    InStock,
    LowStock,
}

impl StatusTag for InventoryStatus {
    fn tag(&self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::LowStock => "low-stock",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
        }
    }
}

/// Product card shown next to the sales form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl InventoryItem {
    /// `low-stock` strictly below `threshold`.
    pub fn status(&self, threshold: u32) -> InventoryStatus {
        if self.quantity < threshold {
            InventoryStatus::LowStock
        } else {
            InventoryStatus::InStock
        }
    }

    /// Removes `sold` units, stopping at zero.
    pub fn take(&mut self, sold: u32) {
        self.quantity = self.quantity.saturating_sub(sold);
    }
}

impl Keyed for InventoryItem {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryDraft {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl InventoryDraft {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            name: form.text("name"),
            category: form.text("category"),
            quantity: form.count("quantity"),
            price: form.decimal("price"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
}

impl InventoryPatch {
    pub fn apply(self, item: &mut InventoryItem) -> Result<(), ValidationError> {
        require_text_if_set("name", self.name.as_ref())?;
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        Ok(())
    }
}

/// Sales-track tab an order is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStage {
    #[default]
    Now,
    Delivered,
    Cancelled,
}

impl OrderStage {
    pub const ALL: &'static [OrderStage] =
        &[OrderStage::Now, OrderStage::Delivered, OrderStage::Cancelled];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.tag() == value.trim().to_ascii_lowercase())
    }
}

impl StatusTag for OrderStage {
    fn tag(&self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Now => "Now",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl TabName for OrderStage {
    fn tab_name(&self) -> &'static str {
        self.tag()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedOrder {
    pub id: RecordId,
    pub client_name: String,
    pub product_id: String,
    pub units: u32,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub stage: OrderStage,
}

impl Keyed for TrackedOrder {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackedOrderDraft {
    pub client_name: String,
    pub product_id: String,
    pub units: u32,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub stage: OrderStage,
}

impl TrackedOrderDraft {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            client_name: form.text("client_name"),
            product_id: form.text("product_id"),
            units: form.count("units"),
            amount: form.decimal("amount"),
            date: form.date("date"),
            stage: OrderStage::parse(&form.text("stage")).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("client_name", &self.client_name)?;
        require_text("product_id", &self.product_id)?;
        require_some("date", self.date.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackedOrderPatch {
    pub client_name: Option<String>,
    pub units: Option<u32>,
    pub amount: Option<Decimal>,
    pub stage: Option<OrderStage>,
}

impl TrackedOrderPatch {
    pub fn apply(self, order: &mut TrackedOrder) -> Result<(), ValidationError> {
        require_text_if_set("client_name", self.client_name.as_ref())?;
        if let Some(client_name) = self.client_name {
            order.client_name = client_name;
        }
        if let Some(units) = self.units {
            order.units = units;
        }
        if let Some(amount) = self.amount {
            order.amount = amount;
        }
        if let Some(stage) = self.stage {
            order.stage = stage;
        }
        Ok(())
    }
}

/// Counters for the sales page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub sales: usize,
    pub units: u64,
    pub revenue: Decimal,
}

impl SalesSummary {
    pub fn from_sales<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Self {
        sales.into_iter().fold(
            Self {
                sales: 0,
                units: 0,
                revenue: Decimal::ZERO,
            },
            |mut acc, sale| {
                acc.sales += 1;
                acc.units += u64::from(sale.quantity);
                acc.revenue = acc.revenue.saturating_add(sale.total());
                acc
            },
        )
    }
}

/// Revenue of today, the current month and the previous month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesPeriods {
    pub today: Decimal,
    pub this_month: Decimal,
    pub previous_month: Decimal,
}

impl SalesPeriods {
    pub fn from_sales<'a>(sales: impl IntoIterator<Item = &'a Sale>, today: NaiveDate) -> Self {
        let month_start = today.with_day(1).unwrap_or(today);
        let previous_start = month_start
            .checked_sub_months(Months::new(1))
            .unwrap_or(month_start);
        let mut periods = Self {
            today: Decimal::ZERO,
            this_month: Decimal::ZERO,
            previous_month: Decimal::ZERO,
        };
        for sale in sales {
            let total = sale.total();
            if sale.sale_date == today {
                periods.today = periods.today.saturating_add(total);
            }
            if sale.sale_date >= month_start && sale.sale_date <= today {
                periods.this_month = periods.this_month.saturating_add(total);
            } else if sale.sale_date >= previous_start && sale.sale_date < month_start {
                periods.previous_month = periods.previous_month.saturating_add(total);
            }
        }
        periods
    }

    /// Month-over-month change in percent, one decimal. `None` without
    /// previous-month revenue or when the ratio leaves the `Decimal` range.
    pub fn growth_percent(&self) -> Option<Decimal> {
        if self.previous_month.is_zero() {
            return None;
        }
        let change = self
            .this_month
            .saturating_sub(self.previous_month)
            .checked_div(self.previous_month)?;
        Some(change.checked_mul(Decimal::ONE_HUNDRED)?.round_dp(1))
    }
}

#[cfg(test)]
mod tests {
    use super::{line_total, InventoryItem, InventoryStatus, OrderStage};
    use crate::model::record::RecordId;
    use rust_decimal::Decimal;

    #[test]
    fn line_total_multiplies_quantity_and_price() {
        assert_eq!(line_total(2, Decimal::new(129999, 2)), Decimal::new(259998, 2));
        assert_eq!(line_total(0, Decimal::new(500, 2)), Decimal::ZERO);
    }

    #[test]
    fn line_total_saturates_at_the_decimal_bound() {
        assert_eq!(line_total(2, Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn summary_and_periods_saturate_instead_of_overflowing() {
        use super::{Sale, SalesPeriods, SalesSummary};
        use chrono::{NaiveDate, TimeZone, Utc};

        let today = NaiveDate::from_ymd_opt(2025, 12, 12).unwrap();
        let sale = |day: NaiveDate| Sale {
            id: RecordId::from("s"),
            item_name: "Laptop Pro".into(),
            category: "electronics".into(),
            quantity: 1,
            unit_price: Decimal::MAX,
            customer_name: "John Smith".into(),
            sale_date: day,
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap(),
        };
        let sales = vec![
            sale(today),
            sale(today),
            sale(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()),
        ];

        let summary = SalesSummary::from_sales(&sales);
        assert_eq!(summary.sales, 3);
        assert_eq!(summary.revenue, Decimal::MAX);

        let periods = SalesPeriods::from_sales(&sales, today);
        assert_eq!(periods.this_month, Decimal::MAX);
        assert_eq!(periods.growth_percent(), Some(Decimal::ZERO));

        let skewed = SalesPeriods {
            today: Decimal::ZERO,
            this_month: Decimal::MAX,
            previous_month: Decimal::new(1, 2),
        };
        assert_eq!(skewed.growth_percent(), None);
    }

    #[test]
    fn inventory_take_saturates_and_flags_low_stock() {
        let mut item = InventoryItem {
            id: RecordId::from("6"),
            name: "Coffee Maker".into(),
            category: "home".into(),
            quantity: 12,
            price: Decimal::new(14999, 2),
        };
        assert_eq!(item.status(10), InventoryStatus::InStock);
        item.take(3);
        assert_eq!(item.status(10), InventoryStatus::LowStock);
        item.take(50);
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn stages_parse_from_tab_names() {
        assert_eq!(OrderStage::parse("Delivered"), Some(OrderStage::Delivered));
        assert_eq!(OrderStage::parse("shipped"), None);
    }

    #[test]
    fn sales_periods_split_by_month() {
        use super::{Sale, SalesPeriods};
        use chrono::{NaiveDate, TimeZone, Utc};

        let sale = |day: NaiveDate, cents: i64| Sale {
            id: RecordId::from("s"),
            item_name: "Desk Lamp".into(),
            category: "home".into(),
            quantity: 1,
            unit_price: Decimal::new(cents, 2),
            customer_name: "Lisa Wilson".into(),
            sale_date: day,
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap(),
        };
        let today = NaiveDate::from_ymd_opt(2025, 12, 12).unwrap();
        let sales = vec![
            sale(today, 15_000),
            sale(NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(), 5_000),
            sale(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(), 10_000),
            sale(NaiveDate::from_ymd_opt(2025, 10, 31).unwrap(), 99_900),
        ];
        let periods = SalesPeriods::from_sales(&sales, today);
        assert_eq!(periods.today, Decimal::new(150, 0));
        assert_eq!(periods.this_month, Decimal::new(200, 0));
        assert_eq!(periods.previous_month, Decimal::new(100, 0));
        assert_eq!(periods.growth_percent(), Some(Decimal::new(1000, 1)));
    }
}
