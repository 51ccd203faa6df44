use chrono::{NaiveDate, TimeZone, Utc};
use recordkeeper_core::model::invoice::{InvoicePatch, InvoiceStatus, LineItemInput};
use recordkeeper_core::model::record::Priority;
use recordkeeper_core::model::task::{TaskPatch, TaskProgress, TaskStatus};
use recordkeeper_core::seed;
use recordkeeper_core::service::invoices::{InvoiceManager, InvoiceSchema};
use recordkeeper_core::service::tasks::TaskManager;
use recordkeeper_core::view::model::Action;
use recordkeeper_core::{
    AutoConfirm, Facet, FilterState, FixedClock, FormData, RecordId, RecordingNotifier,
    ValidationError,
};
use rust_decimal::Decimal;
use std::sync::Arc;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 12, 12, 9, 0, 0).unwrap(),
    ))
}

fn invoices() -> (InvoiceManager, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let manager = InvoiceManager::new(
        InvoiceSchema::new(Decimal::new(1, 1), 30, 1005),
        seed::invoices(),
        clock(),
        notifier.clone(),
    );
    (manager, notifier)
}

fn tasks() -> (TaskManager, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    (
        TaskManager::new(7, seed::tasks(), clock(), notifier.clone()),
        notifier,
    )
}

fn invoice_form() -> FormData {
    FormData::new()
        .with("client_name", "Lisa Wilson")
        .with("client_email", "lisa@example.com")
        .with("description", "Design retainer")
        .with("item_description_0", "Design")
        .with("item_quantity_0", "2")
        .with("item_price_0", "500")
        .with("item_description_1", "")
        .with("item_quantity_1", "1")
        .with("item_price_1", "10")
        .with("item_description_2", "Hosting")
        .with("item_quantity_2", "1")
        .with("item_price_2", "0")
}

#[test]
fn seeded_invoice_statuses_are_derived_from_today() {
    let (manager, _) = invoices();
    let summary = manager.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.paid, 1);
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.outstanding, Decimal::from(5000));

    let overdue = manager.view(FilterState::new().with_selection(Facet::Status, "overdue"));
    assert_eq!(overdue.rows().len(), 1);
    assert_eq!(overdue.rows()[0].cells[0], "INV-1003");
}

#[test]
fn create_numbers_invoices_and_computes_totals() {
    let (mut manager, notifier) = invoices();
    let (today, due) = manager.default_dates();
    assert_eq!(today, date(2025, 12, 12));
    assert_eq!(due, date(2026, 1, 11));

    let id = manager.create_from_form(&invoice_form()).unwrap();
    let invoice = manager.invoices().get(&id).unwrap();
    assert_eq!(invoice.number, "INV-1005");
    assert_eq!(invoice.items.len(), 1);
    assert_eq!(invoice.totals.subtotal, Decimal::from(1000));
    assert_eq!(invoice.totals.tax, Decimal::from(100));
    assert_eq!(invoice.totals.total, Decimal::from(1100));
    assert_eq!(invoice.invoice_date, today);
    assert_eq!(invoice.due_date, due);
    assert_eq!(invoice.status(today), InvoiceStatus::Pending);
    assert_eq!(notifier.messages(), vec!["Invoice created successfully"]);

    let second = manager.create_from_form(&invoice_form()).unwrap();
    assert_eq!(manager.invoices().get(&second).unwrap().number, "INV-1006");
}

#[test]
fn failed_create_does_not_consume_a_number() {
    let (mut manager, _) = invoices();
    let err = manager
        .create_from_form(&invoice_form().with("client_name", " "))
        .unwrap_err();
    assert_eq!(err, ValidationError::MissingField("client_name"));
    assert_eq!(manager.invoices().schema().next_number(), "INV-1005");
}

#[test]
fn preview_totals_skip_incomplete_rows() {
    let (manager, _) = invoices();
    let totals = manager.preview_totals(vec![
        LineItemInput::new("Consulting", 3, Decimal::from(200)),
        LineItemInput::new("Travel", 0, Decimal::from(90)),
    ]);
    assert_eq!(totals.subtotal, Decimal::from(600));
    assert_eq!(totals.total, Decimal::from(660));
}

#[test]
fn edit_keeps_number_and_payment_state() {
    let (mut manager, _) = invoices();
    let id = RecordId::from("1");
    manager
        .update(
            &id,
            InvoicePatch {
                client_name: Some("ABC Corp".into()),
                items: Some(vec![LineItemInput::new("Support", 1, Decimal::from(300))]),
                ..InvoicePatch::default()
            },
        )
        .unwrap();
    let invoice = manager.invoices().get(&id).unwrap();
    assert_eq!(invoice.number, "INV-1001");
    assert_eq!(invoice.client_name, "ABC Corp");
    assert_eq!(invoice.totals.total, Decimal::from(330));
    assert_eq!(invoice.status(date(2025, 12, 12)), InvoiceStatus::Paid);
}

#[test]
fn mark_paid_is_one_way() {
    let (mut manager, notifier) = invoices();
    let id = RecordId::from("3");
    let row = manager.view(FilterState::new().with_search("INV-1003"));
    assert!(row.rows()[0].has_action(Action::MarkPaid));

    assert!(manager.mark_paid(&id));
    assert!(!manager.mark_paid(&id));
    assert!(!manager.mark_paid(&RecordId::from("404")));

    let invoice = manager.invoices().get(&id).unwrap();
    assert_eq!(invoice.paid_at, Some(manager.invoices().now()));
    assert_eq!(manager.summary().overdue, 0);
    assert_eq!(notifier.messages(), vec!["Invoice marked as paid"]);

    let row = manager.view(FilterState::new().with_search("INV-1003"));
    assert!(!row.rows()[0].has_action(Action::MarkPaid));
}

#[test]
fn delete_invoice_after_confirmation() {
    let (mut manager, _) = invoices();
    assert!(manager.delete(&RecordId::from("2"), &AutoConfirm(true)));
    assert_eq!(manager.summary().pending, 0);
}

#[test]
fn seeded_task_statuses_and_summary() {
    let (manager, _) = tasks();
    let today = date(2025, 12, 12);
    let statuses: Vec<TaskStatus> = manager
        .tasks()
        .records()
        .iter()
        .map(|task| task.status(today))
        .collect();
    assert_eq!(
        statuses,
        vec![TaskStatus::InProgress, TaskStatus::Pending, TaskStatus::Overdue]
    );

    let summary = manager.summary();
    assert_eq!(summary.due_today, 0);
    assert_eq!(summary.due_this_week, 1);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.completed, 0);
}

#[test]
fn create_task_defaults_dates_and_starts_pending() {
    let (mut manager, notifier) = tasks();
    let form = FormData::new()
        .with("title", "Call supplier")
        .with("assigned_to", "Tom Brown")
        .with("priority", "urgent");
    let id = manager.create_from_form(&form).unwrap();

    let task = manager.tasks().get(&id).unwrap();
    assert_eq!(task.start_date, date(2025, 12, 12));
    assert_eq!(task.due_date, date(2025, 12, 19));
    assert_eq!(task.priority, Priority::Urgent);
    assert_eq!(task.progress, TaskProgress::Pending);
    assert_eq!(manager.summary().due_this_week, 2);
    assert_eq!(notifier.messages(), vec!["Task created successfully"]);
}

#[test]
fn task_lifecycle_moves_forward_only() {
    let (mut manager, notifier) = tasks();
    let id = RecordId::from("2");

    assert!(!manager.complete(&id));
    assert!(manager.start(&id));
    assert!(!manager.start(&id));
    assert!(manager.complete(&id));

    let task = manager.tasks().get(&id).unwrap();
    assert_eq!(task.progress, TaskProgress::Completed);
    assert_eq!(task.completed_at, Some(manager.tasks().now()));
    assert_eq!(
        notifier.messages(),
        vec!["Task marked as in-progress", "Task marked as completed"]
    );
}

#[test]
fn completed_tasks_are_never_overdue() {
    let (mut manager, _) = tasks();
    let id = RecordId::from("3");
    manager.start(&id);
    manager.complete(&id);
    let completed =
        manager.view(FilterState::new().with_selection(Facet::Status, "completed"));
    assert_eq!(completed.rows().len(), 1);
    assert_eq!(manager.summary().overdue, 0);
}

#[test]
fn task_edit_rejects_unparseable_dates() {
    let (mut manager, _) = tasks();
    let id = RecordId::from("1");
    let err = manager
        .update_from_form(&id, &FormData::new().with("due_date", "soon"))
        .unwrap_err();
    assert_eq!(err, ValidationError::MissingField("due_date"));

    manager
        .update(
            &id,
            TaskPatch {
                priority: Some(Priority::Low),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    let task = manager.tasks().get(&id).unwrap();
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(task.progress, TaskProgress::InProgress);
}

#[test]
fn task_filters_by_priority_and_assignee_search() {
    let (manager, _) = tasks();
    let urgent = manager.view(FilterState::new().with_selection(Facet::Priority, "urgent"));
    assert_eq!(urgent.rows().len(), 1);
    assert_eq!(urgent.rows()[0].id.as_str(), "3");

    let by_assignee = manager.view(FilterState::new().with_search("sarah"));
    assert_eq!(by_assignee.rows().len(), 1);
}

#[test]
fn overdue_follow_up_can_still_be_started() {
    let (mut manager, _) = tasks();
    let id = RecordId::from("3");
    let view = manager.view(FilterState::new().with_selection(Facet::Status, "overdue"));
    let row = &view.rows()[0];
    assert_eq!(row.id, id);
    assert_eq!(row.badge.as_ref().unwrap().tag, "overdue");
    assert!(row.has_action(Action::Start));
    assert!(!row.has_action(Action::Complete));

    assert!(manager.start(&id));
    let task = manager.tasks().get(&id).unwrap();
    assert_eq!(task.progress, TaskProgress::InProgress);
    assert_eq!(task.status(date(2025, 12, 12)), TaskStatus::Overdue);
}
