//! Stock-room use-cases.

use crate::clock::Clock;
use crate::form::FormData;
use crate::format::format_currency;
use crate::model::record::{RecordId, StatusTag, ValidationError};
use crate::model::stock::{StockDraft, StockItem, StockOverview, StockPatch, StockStatus};
use crate::service::crud::CrudList;
use crate::service::schema::{Facet, FilterState, Notices, RecordMeta, Schema};
use crate::view::model::{Action, ListView, Row};
use crate::view::notice::{Confirm, Notifier};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct StockSchema;

impl Schema for StockSchema {
    type Record = StockItem;
    type Draft = StockDraft;
    type Patch = StockPatch;
    type Status = StockStatus;

    fn entity(&self) -> &'static str {
        "stock"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["SKU", "Name", "Category", "Quantity", "Min Stock", "Cost", "Price"]
    }

    fn notices(&self) -> Notices {
        Notices {
            created: Some("Item added successfully"),
            updated: Some("Item updated successfully"),
            deleted: Some("Item deleted successfully"),
            delete_prompt: "Are you sure you want to delete this item?",
        }
    }

    fn validate(&self, draft: &StockDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: StockDraft, meta: RecordMeta) -> StockItem {
        StockItem {
            id: meta.id,
            name: draft.name,
            sku: draft.sku,
            category: draft.category,
            supplier: draft.supplier,
            quantity: draft.quantity,
            min_stock: draft.min_stock,
            cost_price: draft.cost_price,
            selling_price: draft.selling_price,
        }
    }

    fn merge(
        &self,
        record: &mut StockItem,
        patch: StockPatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record)
    }

    fn searchable<'r>(&self, record: &'r StockItem) -> Vec<&'r str> {
        vec![record.name.as_str(), record.sku.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r StockItem,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Category => Some(Cow::Borrowed(record.category.as_str())),
            Facet::Status => Some(Cow::Borrowed(record.status().tag())),
            Facet::Priority | Facet::Kind => None,
        }
    }

    fn derive_status(&self, record: &StockItem, _now: DateTime<Utc>) -> StockStatus {
        record.status()
    }

    fn project(&self, record: &StockItem, _now: DateTime<Utc>) -> Row {
        Row::new(
            record.id.clone(),
            vec![
                record.sku.clone(),
                record.name.clone(),
                record.category.clone(),
                record.quantity.to_string(),
                record.min_stock.to_string(),
                format_currency(record.cost_price),
                format_currency(record.selling_price),
            ],
        )
        .with_badge(record.status())
        .with_actions([Action::Edit, Action::Delete])
    }
}

pub struct StockManager {
    items: CrudList<StockSchema>,
}

impl StockManager {
    pub fn new(seed: Vec<StockItem>, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            items: CrudList::seeded(StockSchema, seed, clock, notifier),
        }
    }

    pub fn items(&self) -> &CrudList<StockSchema> {
        &self.items
    }

    pub fn add_item(&mut self, draft: StockDraft) -> Result<RecordId, ValidationError> {
        self.items.create(draft)
    }

    pub fn add_item_from_form(&mut self, form: &FormData) -> Result<RecordId, ValidationError> {
        self.add_item(StockDraft::from_form(form))
    }

    pub fn update_item(&mut self, id: &RecordId, patch: StockPatch) -> Result<bool, ValidationError> {
        self.items.update(id, patch)
    }

    pub fn update_item_from_form(
        &mut self,
        id: &RecordId,
        form: &FormData,
    ) -> Result<bool, ValidationError> {
        self.update_item(id, StockPatch::from_form(form))
    }

    pub fn delete_item(&mut self, id: &RecordId, confirm: &dyn Confirm) -> bool {
        self.items.delete(id, confirm)
    }

    pub fn view(&self, filter: FilterState) -> ListView {
        self.items.list(filter).render()
    }

    pub fn overview(&self) -> StockOverview {
        StockOverview::from_items(self.items.records())
    }
}
