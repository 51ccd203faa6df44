//! Stock-room items and their derived stock level.

use crate::form::FormData;
use crate::model::record::{
    require_text, require_text_if_set, Keyed, RecordId, StatusTag, ValidationError,
};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StatusTag for StockStatus {
    fn tag(&self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::LowStock => "low-stock",
            Self::OutOfStock => "out-of-stock",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockItem {
    pub id: RecordId,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub supplier: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
}

impl StockItem {
    /// Out of stock at zero; low at or below the minimum.
    pub fn status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.cost_price)
    }
}

impl Keyed for StockItem {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockDraft {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub supplier: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
}

impl StockDraft {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            name: form.text("name"),
            sku: form.text("sku"),
            category: form.text("category"),
            supplier: form.text("supplier"),
            quantity: form.count("quantity"),
            min_stock: form.count("min_stock"),
            cost_price: form.decimal("cost_price"),
            selling_price: form.decimal("selling_price"),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("sku", &self.sku)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub quantity: Option<u32>,
    pub min_stock: Option<u32>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
}

impl StockPatch {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            name: form.optional_text("name"),
            sku: form.optional_text("sku"),
            category: form.optional_text("category"),
            supplier: form.optional_text("supplier"),
            quantity: form.optional_count("quantity"),
            min_stock: form.optional_count("min_stock"),
            cost_price: form.optional_decimal("cost_price"),
            selling_price: form.optional_decimal("selling_price"),
        }
    }

    pub fn apply(self, item: &mut StockItem) -> Result<(), ValidationError> {
        require_text_if_set("name", self.name.as_ref())?;
        require_text_if_set("sku", self.sku.as_ref())?;

        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(sku) = self.sku {
            item.sku = sku;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(supplier) = self.supplier {
            item.supplier = supplier;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(min_stock) = self.min_stock {
            item.min_stock = min_stock;
        }
        if let Some(cost_price) = self.cost_price {
            item.cost_price = cost_price;
        }
        if let Some(selling_price) = self.selling_price {
            item.selling_price = selling_price;
        }
        Ok(())
    }
}

/// Overview counters above the stock table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockOverview {
    pub total_units: u64,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub stock_value: Decimal,
}

impl StockOverview {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a StockItem>) -> Self {
        items.into_iter().fold(
            Self {
                total_units: 0,
                low_stock: 0,
                out_of_stock: 0,
                stock_value: Decimal::ZERO,
            },
            |mut acc, item| {
                acc.total_units += u64::from(item.quantity);
                match item.status() {
                    StockStatus::LowStock => acc.low_stock += 1,
                    StockStatus::OutOfStock => acc.out_of_stock += 1,
                    StockStatus::InStock => {}
                }
                acc.stock_value = acc.stock_value.saturating_add(item.stock_value());
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{StockItem, StockOverview, StockStatus};
    use crate::model::record::RecordId;
    use rust_decimal::Decimal;

    fn item(quantity: u32, min_stock: u32) -> StockItem {
        StockItem {
            id: RecordId::from("1"),
            name: "Office Chair".into(),
            sku: "CHR-003".into(),
            category: "home".into(),
            supplier: "FurnitureMax".into(),
            quantity,
            min_stock,
            cost_price: Decimal::new(10, 0),
            selling_price: Decimal::new(20, 0),
        }
    }

    #[test]
    fn minimum_is_inclusive_for_low_stock() {
        assert_eq!(item(0, 5).status(), StockStatus::OutOfStock);
        assert_eq!(item(5, 5).status(), StockStatus::LowStock);
        assert_eq!(item(6, 5).status(), StockStatus::InStock);
        assert_eq!(item(0, 0).status(), StockStatus::OutOfStock);
    }

    #[test]
    fn stock_levels_against_a_minimum_of_ten() {
        assert_eq!(item(5, 10).status(), StockStatus::LowStock);
        assert_eq!(item(0, 10).status(), StockStatus::OutOfStock);
        assert_eq!(item(20, 10).status(), StockStatus::InStock);
    }

    #[test]
    fn stock_value_saturates_for_huge_cost_prices() {
        let mut pricey = item(3, 1);
        pricey.cost_price = Decimal::MAX;
        assert_eq!(pricey.stock_value(), Decimal::MAX);
        let overview = StockOverview::from_items([&pricey, &pricey]);
        assert_eq!(overview.stock_value, Decimal::MAX);
        assert_eq!(overview.total_units, 6);
    }

    #[test]
    fn overview_counts_levels_and_value() {
        let items = [item(0, 5), item(3, 5), item(30, 5)];
        let overview = StockOverview::from_items(&items);
        assert_eq!(overview.total_units, 33);
        assert_eq!(overview.low_stock, 1);
        assert_eq!(overview.out_of_stock, 1);
        assert_eq!(overview.stock_value, Decimal::new(330, 0));
    }
}
