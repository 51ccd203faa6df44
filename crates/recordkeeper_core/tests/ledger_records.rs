use chrono::{NaiveDate, TimeZone, Utc};
use recordkeeper_core::model::ledger::{LedgerCategory, LedgerDraft, LedgerPatch};
use recordkeeper_core::seed;
use recordkeeper_core::service::ledger::LedgerManager;
use recordkeeper_core::{
    AutoConfirm, Facet, FilterState, FixedClock, FormData, RecordId, RecordingNotifier,
    ValidationError,
};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::Arc;

fn manager() -> (LedgerManager, Arc<RecordingNotifier>) {
    let clock = Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 12, 12, 9, 0, 0).unwrap(),
    ));
    let notifier = Arc::new(RecordingNotifier::new());
    (
        LedgerManager::new(seed::ledger_entries(), clock, notifier.clone()),
        notifier,
    )
}

fn expense_form() -> FormData {
    FormData::new()
        .with("category", "expenses")
        .with("title", "Courier")
        .with("description", "Parcel to XYZ Ltd")
        .with("amount", "42.50")
        .with("date", "2025-12-12")
}

#[test]
fn seeded_stats_match_the_dashboard_counters() {
    let (ledger, _) = manager();
    let stats = ledger.stats();
    assert_eq!(stats.total_records, 5);
    assert_eq!(stats.sales_count, 2);
    assert_eq!(stats.expenses_count, 1);
    assert_eq!(stats.revenue, Decimal::from(4500));
    assert_eq!(stats.expenses, Decimal::from(150));
    assert_eq!(stats.net, Decimal::from(4350));
}

#[test]
fn create_from_form_prepends_and_updates_stats() {
    let (mut ledger, notifier) = manager();
    let id = ledger.create_from_form(&expense_form()).unwrap();

    let first = &ledger.entries().records()[0];
    assert_eq!(first.id, id);
    assert_eq!(first.amount, Some(Decimal::new(4250, 2)));
    assert_eq!(ledger.stats().expenses, Decimal::new(19250, 2));
    assert_eq!(notifier.messages(), vec!["Record added successfully"]);
}

#[test]
fn create_with_missing_fields_is_rejected_without_inserting() {
    let (mut ledger, notifier) = manager();
    let form = expense_form().with("title", "   ");
    let err = ledger.create_from_form(&form).unwrap_err();

    assert_eq!(err, ValidationError::MissingField("title"));
    assert_eq!(ledger.entries().len(), 5);
    assert_eq!(
        notifier.messages(),
        vec!["Please fill in all required fields"]
    );
}

#[test]
fn non_monetary_categories_drop_the_amount() {
    let (mut ledger, _) = manager();
    let id = ledger
        .create(LedgerDraft {
            category: LedgerCategory::PersonalNotes,
            title: "Call back".into(),
            description: "Ask about renewal".into(),
            amount: Some(Decimal::from(99)),
            date: NaiveDate::from_ymd_opt(2025, 12, 12),
        })
        .unwrap();
    assert_eq!(ledger.entries().get(&id).unwrap().amount, None);
}

#[test]
fn switching_category_to_sales_stores_zero_amount() {
    let (mut ledger, _) = manager();
    let id = RecordId::from("4");
    let changed = ledger
        .update(
            &id,
            LedgerPatch {
                category: Some(LedgerCategory::Sales),
                ..LedgerPatch::default()
            },
        )
        .unwrap();
    assert!(changed);
    let entry = ledger.entries().get(&id).unwrap();
    assert_eq!(entry.amount, Some(Decimal::ZERO));
    assert_eq!(entry.title, "Meeting Notes");
}

#[test]
fn update_of_unknown_id_is_a_silent_no_op() {
    let (mut ledger, notifier) = manager();
    let changed = ledger
        .update_from_form(&RecordId::from("missing"), &expense_form())
        .unwrap();
    assert!(!changed);
    assert!(notifier.messages().is_empty());
}

#[test]
fn delete_requires_confirmation() {
    let (mut ledger, notifier) = manager();
    let id = RecordId::from("2");

    assert!(!ledger.delete(&id, &AutoConfirm(false)));
    assert_eq!(ledger.entries().len(), 5);

    let prompts = std::cell::RefCell::new(Vec::new());
    let confirm = |prompt: &str| {
        prompts.borrow_mut().push(prompt.to_string());
        true
    };
    assert!(ledger.delete(&id, &confirm));
    assert_eq!(
        prompts.into_inner(),
        vec!["Are you sure you want to delete this record?"]
    );
    assert_eq!(ledger.stats().expenses_count, 0);
    assert_eq!(notifier.messages(), vec!["Record deleted successfully"]);
}

#[test]
fn search_and_category_filters_combine() {
    let (ledger, _) = manager();

    let by_text = ledger.view(FilterState::new().with_search("  CONTRACT "));
    let ids: Vec<_> = by_text.rows().iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["5"]);

    let both = ledger.view(
        FilterState::new()
            .with_search("widget")
            .with_selection(Facet::Category, "expenses"),
    );
    assert!(both.is_empty());

    let notes = ledger.view(FilterState::new().with_selection(Facet::Category, "customer-info"));
    assert_eq!(notes.rows().len(), 1);
    assert_eq!(notes.rows()[0].id.as_str(), "3");
}

#[test]
fn rows_carry_signed_amounts_and_flow_badges() {
    let (ledger, _) = manager();
    let view = ledger.view(FilterState::new());
    let rows = view.rows();

    assert_eq!(rows[0].cells[4], "+$1,500");
    assert_eq!(rows[0].badge.as_ref().unwrap().tag, "positive");
    assert_eq!(rows[1].cells[4], "-$150");
    assert_eq!(rows[2].cells[4], "");
    assert_eq!(rows[2].badge.as_ref().unwrap().label, "Info");
}

#[test]
fn applying_the_same_filter_twice_yields_the_same_ids() {
    let (ledger, _) = manager();
    let filter = FilterState::new()
        .with_search("o")
        .with_selection(Facet::Category, "sales");
    let first = ledger.entries().list(filter.clone()).ids();
    let second = ledger.entries().list(filter).ids();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn search_and_selection_commute() {
    let (ledger, _) = manager();
    let search_first = FilterState::new()
        .with_search("widget")
        .with_selection(Facet::Category, "sales");
    let selection_first = FilterState::new()
        .with_selection(Facet::Category, "sales")
        .with_search("widget");
    let a = ledger.entries().list(search_first).ids();
    let b = ledger.entries().list(selection_first).ids();
    assert_eq!(a, b);
    assert_eq!(a, vec![RecordId::from("1")]);

    let by_search: BTreeSet<_> = ledger
        .entries()
        .list(FilterState::new().with_search("widget"))
        .ids()
        .into_iter()
        .collect();
    let by_selection: BTreeSet<_> = ledger
        .entries()
        .list(FilterState::new().with_selection(Facet::Category, "sales"))
        .ids()
        .into_iter()
        .collect();
    let both: BTreeSet<_> = a.into_iter().collect();
    assert_eq!(
        both,
        by_search.intersection(&by_selection).cloned().collect()
    );
}

#[test]
fn created_ids_never_collide_even_after_deletes() {
    let (mut ledger, _) = manager();
    let mut seen: BTreeSet<RecordId> = ledger
        .entries()
        .records()
        .iter()
        .map(|entry| entry.id.clone())
        .collect();

    for round in 0..5 {
        let id = ledger.create_from_form(&expense_form()).unwrap();
        assert!(seen.insert(id.clone()), "id reused in round {round}");
        if round % 2 == 0 {
            assert!(ledger.delete(&id, &AutoConfirm(true)));
        }
    }
    assert_eq!(ledger.entries().len(), 7);
}
