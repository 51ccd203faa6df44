//! Sales page use-cases: recorded sales, product inventory and the
//! sales-track order tabs.
//!
//! # Invariants
//! - Recording a sale decrements the inventory item with the same name
//!   (case-insensitive), never below zero.
//! - Editing or deleting a sale never touches inventory.
//! - The order table only lists orders of the active stage tab.

use crate::clock::Clock;
use crate::export::{sales_csv, CsvDocument};
use crate::form::FormData;
use crate::format::{format_compact_currency, format_currency, format_date};
use crate::model::record::{NoStatus, RecordId, StatusTag, ValidationError};
use crate::model::sale::{
    line_total, InventoryDraft, InventoryItem, InventoryPatch, InventoryStatus, OrderStage, Sale,
    SaleDraft, SalePatch, SalesSummary, TrackedOrder, TrackedOrderDraft, TrackedOrderPatch,
};
use crate::service::crud::CrudList;
use crate::service::schema::{Facet, FilterState, Notices, RecordMeta, Schema};
use crate::view::model::{Action, ListView, Row, TabStrip};
use crate::view::navigation::TabSet;
use crate::view::notice::{Confirm, Notice, Notifier};
use chrono::{DateTime, Utc};
use log::info;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct SaleSchema;

impl Schema for SaleSchema {
    type Record = Sale;
    type Draft = SaleDraft;
    type Patch = SalePatch;
    type Status = NoStatus;

    fn entity(&self) -> &'static str {
        "sale"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Date", "Item", "Customer", "Quantity", "Unit Price", "Total"]
    }

    fn notices(&self) -> Notices {
        Notices {
            created: Some("Sale recorded successfully!"),
            updated: Some("Sale updated successfully"),
            deleted: Some("Sale deleted successfully"),
            delete_prompt: "Are you sure you want to delete this sale?",
        }
    }

    fn validate(&self, draft: &SaleDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: SaleDraft, meta: RecordMeta) -> Sale {
        Sale {
            id: meta.id,
            item_name: draft.item_name,
            category: draft.category,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            customer_name: draft.customer_name,
            sale_date: draft
                .sale_date
                .unwrap_or_else(|| meta.created_at.date_naive()),
            description: draft.description,
            created_at: meta.created_at,
        }
    }

    fn merge(
        &self,
        record: &mut Sale,
        patch: SalePatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record)
    }

    fn searchable<'r>(&self, record: &'r Sale) -> Vec<&'r str> {
        vec![record.item_name.as_str(), record.customer_name.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r Sale,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Category => Some(Cow::Borrowed(record.category.as_str())),
            _ => None,
        }
    }

    fn derive_status(&self, _record: &Sale, _now: DateTime<Utc>) -> NoStatus {
        NoStatus
    }

    fn project(&self, record: &Sale, _now: DateTime<Utc>) -> Row {
        Row::new(
            record.id.clone(),
            vec![
                format_date(record.sale_date),
                record.item_name.clone(),
                record.customer_name.clone(),
                record.quantity.to_string(),
                format_currency(record.unit_price),
                format_currency(record.total()),
            ],
        )
        .with_actions([Action::Edit, Action::Delete])
    }
}

/// Product cards; `threshold` is the low-stock cut-off.
#[derive(Debug, Clone, Copy)]
pub struct InventorySchema {
    pub threshold: u32,
}

impl Schema for InventorySchema {
    type Record = InventoryItem;
    type Draft = InventoryDraft;
    type Patch = InventoryPatch;
    type Status = InventoryStatus;

    fn entity(&self) -> &'static str {
        "inventory"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Name", "Category", "Qty", "Price"]
    }

    fn validate(&self, draft: &InventoryDraft) -> Result<(), ValidationError> {
        crate::model::record::require_text("name", &draft.name)
    }

    fn build(&mut self, draft: InventoryDraft, meta: RecordMeta) -> InventoryItem {
        InventoryItem {
            id: meta.id,
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            price: draft.price,
        }
    }

    fn merge(
        &self,
        record: &mut InventoryItem,
        patch: InventoryPatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record)
    }

    fn searchable<'r>(&self, record: &'r InventoryItem) -> Vec<&'r str> {
        vec![record.name.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r InventoryItem,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Category => Some(Cow::Borrowed(record.category.as_str())),
            Facet::Status => Some(Cow::Borrowed(record.status(self.threshold).tag())),
            _ => None,
        }
    }

    fn derive_status(&self, record: &InventoryItem, _now: DateTime<Utc>) -> InventoryStatus {
        record.status(self.threshold)
    }

    fn project(&self, record: &InventoryItem, now: DateTime<Utc>) -> Row {
        let status = self.derive_status(record, now);
        Row::new(
            record.id.clone(),
            vec![
                record.name.clone(),
                record.category.clone(),
                record.quantity.to_string(),
                format_currency(record.price),
            ],
        )
        .with_badge(status)
        .with_emphasis(status.tag())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrackedOrderSchema;

impl Schema for TrackedOrderSchema {
    type Record = TrackedOrder;
    type Draft = TrackedOrderDraft;
    type Patch = TrackedOrderPatch;
    type Status = OrderStage;

    fn entity(&self) -> &'static str {
        "order"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Client Name", "Product ID", "Unit", "Amount", "Date"]
    }

    fn validate(&self, draft: &TrackedOrderDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: TrackedOrderDraft, meta: RecordMeta) -> TrackedOrder {
        TrackedOrder {
            id: meta.id,
            client_name: draft.client_name,
            product_id: draft.product_id,
            units: draft.units,
            amount: draft.amount,
            date: draft.date.unwrap_or_else(|| meta.created_at.date_naive()),
            stage: draft.stage,
        }
    }

    fn merge(
        &self,
        record: &mut TrackedOrder,
        patch: TrackedOrderPatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record)
    }

    fn searchable<'r>(&self, record: &'r TrackedOrder) -> Vec<&'r str> {
        vec![record.client_name.as_str(), record.product_id.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r TrackedOrder,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Status => Some(Cow::Borrowed(record.stage.tag())),
            _ => None,
        }
    }

    fn derive_status(&self, record: &TrackedOrder, _now: DateTime<Utc>) -> OrderStage {
        record.stage
    }

    fn project(&self, record: &TrackedOrder, _now: DateTime<Utc>) -> Row {
        Row::new(
            record.id.clone(),
            vec![
                record.client_name.clone(),
                record.product_id.clone(),
                record.units.to_string(),
                format_compact_currency(record.amount),
                record.date.to_string(),
            ],
        )
        .with_badge(record.stage)
    }
}

/// Manager of the sales page.
pub struct SalesManager {
    sales: CrudList<SaleSchema>,
    inventory: CrudList<InventorySchema>,
    orders: CrudList<TrackedOrderSchema>,
    tabs: TabSet<OrderStage>,
}

impl SalesManager {
    pub fn new(
        sales: Vec<Sale>,
        inventory: Vec<InventoryItem>,
        orders: Vec<TrackedOrder>,
        low_stock_threshold: u32,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            sales: CrudList::seeded(SaleSchema, sales, clock.clone(), notifier.clone()),
            inventory: CrudList::seeded(
                InventorySchema {
                    threshold: low_stock_threshold,
                },
                inventory,
                clock.clone(),
                notifier.clone(),
            ),
            orders: CrudList::seeded(TrackedOrderSchema, orders, clock, notifier),
            tabs: TabSet::new(OrderStage::ALL, OrderStage::Now),
        }
    }

    pub fn sales(&self) -> &CrudList<SaleSchema> {
        &self.sales
    }

    pub fn inventory(&self) -> &CrudList<InventorySchema> {
        &self.inventory
    }

    pub fn orders(&self) -> &CrudList<TrackedOrderSchema> {
        &self.orders
    }

    /// Live total shown while the sale form is filled in.
    pub fn preview_total(&self, form: &FormData) -> Decimal {
        line_total(form.count("quantity"), form.decimal("unit_price"))
    }

    /// Records a sale and takes the sold units out of inventory.
    pub fn record_sale(&mut self, draft: SaleDraft) -> Result<RecordId, ValidationError> {
        let item_name = draft.item_name.trim().to_lowercase();
        let sold = draft.quantity;
        let id = self.sales.create(draft)?;

        let matched = self
            .inventory
            .records()
            .iter()
            .find(|item| item.name.to_lowercase() == item_name)
            .map(|item| item.id.clone());
        match matched {
            Some(item_id) => {
                self.inventory.transition(&item_id, |item, _| {
                    item.take(sold);
                    true
                });
            }
            None => info!("event=inventory_decrement module=sales status=noop sale_id={id}"),
        }
        Ok(id)
    }

    pub fn record_sale_from_form(&mut self, form: &FormData) -> Result<RecordId, ValidationError> {
        self.record_sale(SaleDraft::from_form(form))
    }

    pub fn update_sale(&mut self, id: &RecordId, patch: SalePatch) -> Result<bool, ValidationError> {
        self.sales.update(id, patch)
    }

    pub fn delete_sale(&mut self, id: &RecordId, confirm: &dyn Confirm) -> bool {
        self.sales.delete(id, confirm)
    }

    pub fn sales_view(&self, filter: FilterState) -> ListView {
        self.sales.list(filter).render()
    }

    pub fn inventory_view(&self, filter: FilterState) -> ListView {
        self.inventory.list(filter).render()
    }

    pub fn active_stage(&self) -> OrderStage {
        self.tabs.active()
    }

    /// Switches the order tab; unknown names keep the current tab.
    pub fn switch_tab(&mut self, name: &str) -> bool {
        self.tabs.switch_named(name)
    }

    pub fn tab_strip(&self) -> TabStrip {
        TabStrip {
            tabs: self.tabs.names(),
            active: self.tabs.active().tag(),
        }
    }

    /// Orders of the active tab.
    pub fn orders_view(&self, filter: FilterState) -> ListView {
        let filter = filter.with_selection(Facet::Status, self.tabs.active().tag());
        self.orders.list(filter).render()
    }

    pub fn add_order(&mut self, draft: TrackedOrderDraft) -> Result<RecordId, ValidationError> {
        self.orders.create(draft)
    }

    /// Moves an order to another stage tab.
    pub fn move_order(&mut self, id: &RecordId, stage: OrderStage) -> bool {
        self.orders.transition(id, |order, _| {
            if order.stage == stage {
                return false;
            }
            order.stage = stage;
            true
        })
    }

    pub fn export_csv(&self) -> CsvDocument {
        let document = sales_csv(self.sales.records());
        self.sales
            .notify(Notice::success("Sales exported successfully"));
        document
    }

    pub fn summary(&self) -> SalesSummary {
        SalesSummary::from_sales(self.sales.records())
    }

    /// Items currently below the low-stock threshold.
    pub fn low_stock_count(&self) -> usize {
        self.inventory
            .records()
            .iter()
            .filter(|item| self.inventory.derive_status(item) == InventoryStatus::LowStock)
            .count()
    }
}
