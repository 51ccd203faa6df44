use chrono::{NaiveDate, TimeZone, Utc};
use recordkeeper_core::model::record::Priority;
use recordkeeper_core::model::report::{DateRange, ReportKind, ReportRequest};
use recordkeeper_core::model::ticket::{TicketDraft, TicketStatus};
use recordkeeper_core::seed;
use recordkeeper_core::service::reports::ReportManager;
use recordkeeper_core::service::support::SupportManager;
use recordkeeper_core::{
    AutoConfirm, Facet, FilterState, FixedClock, NoticeLevel, RecordId, RecordingNotifier,
    ValidationError,
};
use std::sync::Arc;
use std::time::Duration;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 12, 12, 9, 0, 0).unwrap(),
    ))
}

fn reports() -> (ReportManager, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let manager = ReportManager::new(
        seed::reports(),
        seed::report_lines(),
        Duration::from_millis(2000),
        clock(),
        notifier.clone(),
    );
    (manager, notifier)
}

fn support() -> (SupportManager, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    (
        SupportManager::new(1004, seed::tickets(), clock(), notifier.clone()),
        notifier,
    )
}

#[test]
fn selected_range_starts_at_year_to_date() {
    let (manager, _) = reports();
    assert_eq!(
        manager.selected_range(),
        Some(DateRange::new(date(2025, 1, 1), date(2025, 12, 12)))
    );
}

#[test]
fn generate_inserts_and_delays_the_success_notice() {
    let (mut manager, notifier) = reports();
    let id = manager.generate(ReportKind::Financial).unwrap();

    let report = manager.reports().get(&id).unwrap();
    assert_eq!(report.name, "Financial Report");
    assert_eq!(report.range.start, date(2025, 1, 1));
    assert_eq!(manager.reports().records()[0].id, id);
    assert_eq!(manager.count_of(ReportKind::Financial), 2);

    let notices = notifier.take();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].message, "Generating report...");
    assert_eq!(notices[0].delay, Duration::ZERO);
    assert_eq!(notices[1].message, "Financial Report generated successfully");
    assert_eq!(notices[1].level, NoticeLevel::Success);
    assert_eq!(notices[1].delay, Duration::from_millis(2000));
}

#[test]
fn generate_without_range_is_rejected() {
    let (mut manager, notifier) = reports();
    manager.select_range(None);
    assert!(!manager.apply_date_range());

    let err = manager.generate(ReportKind::Sales).unwrap_err();
    assert_eq!(err, ValidationError::MissingDateRange);
    assert_eq!(manager.reports().len(), 3);
    assert_eq!(
        notifier.messages(),
        vec!["Please select a date range first"]
    );
}

#[test]
fn explicit_request_overrides_the_selected_range() {
    let (mut manager, _) = reports();
    let range = DateRange::new(date(2025, 12, 1), date(2025, 12, 31));
    let id = manager
        .generate_request(ReportRequest::new(ReportKind::Customer, Some(range)))
        .unwrap();
    assert_eq!(manager.reports().get(&id).unwrap().range, range);
}

#[test]
fn quick_range_covers_the_last_days() {
    let (mut manager, notifier) = reports();
    let range = manager.set_quick_range(30);
    assert_eq!(range, DateRange::new(date(2025, 11, 12), date(2025, 12, 12)));
    assert_eq!(manager.selected_range(), Some(range));
    assert_eq!(
        notifier.messages(),
        vec!["Date range applied: Nov 12, 2025 to Dec 12, 2025"]
    );
}

#[test]
fn download_builds_the_transaction_csv() {
    let (manager, notifier) = reports();
    let document = manager.download(&RecordId::from("1")).unwrap();

    assert_eq!(document.file_name, "Monthly_Sales_Report_1.csv");
    assert_eq!(document.row_count(), 5);
    let lines: Vec<&str> = document.content.lines().collect();
    assert_eq!(lines[0], "Date,Description,Amount,Category");
    assert_eq!(lines[2], "2025-12-02,Office Supplies,-250.00,Expenses");
    assert_eq!(
        notifier.messages(),
        vec!["Downloading Monthly Sales Report..."]
    );

    assert!(manager.download(&RecordId::from("99")).is_none());
}

#[test]
fn report_kind_filter_and_delete() {
    let (mut manager, _) = reports();
    let inventory = manager.view(FilterState::new().with_selection(Facet::Kind, "inventory"));
    assert_eq!(inventory.rows().len(), 1);
    assert_eq!(inventory.rows()[0].cells[1], "Inventory");

    assert!(manager.delete(&RecordId::from("3"), &AutoConfirm(true)));
    let inventory = manager.view(FilterState::new().with_selection(Facet::Kind, "inventory"));
    assert!(inventory.is_empty());
}

#[test]
fn dashboard_ticket_continues_the_id_sequence() {
    let (mut manager, notifier) = support();
    let id = manager.open_ticket().unwrap();
    assert_eq!(id.as_str(), "TK-1004");

    let ticket = manager.tickets().get(&id).unwrap();
    assert_eq!(ticket.subject, "New Support Request");
    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(manager.tickets().records()[0].id, id);

    let next = manager
        .create_ticket(TicketDraft {
            subject: "Printer offline".into(),
            category: "Technical".into(),
            priority: Priority::High,
            description: String::new(),
        })
        .unwrap();
    assert_eq!(next.as_str(), "TK-1005");
    assert_eq!(
        notifier.messages(),
        vec![
            "New support ticket created successfully",
            "New support ticket created successfully"
        ]
    );
}

#[test]
fn resolving_a_ticket_updates_status_and_timestamp() {
    let (mut manager, notifier) = support();
    let id = RecordId::from("TK-1001");
    assert!(manager.mark_resolved(&id));
    assert!(!manager.mark_resolved(&id));

    let ticket = manager.tickets().get(&id).unwrap();
    assert_eq!(ticket.status, TicketStatus::Resolved);
    assert_eq!(ticket.last_updated, manager.tickets().now());
    assert_eq!(
        notifier.messages(),
        vec!["Ticket TK-1001 status updated to resolved"]
    );

    let summary = manager.summary();
    assert_eq!(summary.open, 0);
    assert_eq!(summary.resolved, 2);
}

#[test]
fn ticket_search_matches_ids_and_subjects() {
    let (manager, _) = support();
    let by_id = manager.view(FilterState::new().with_search("tk-1002"));
    assert_eq!(by_id.rows().len(), 1);

    let by_status = manager.view(FilterState::new().with_selection(Facet::Status, "resolved"));
    assert_eq!(by_status.rows()[0].id.as_str(), "TK-1003");
}

#[test]
fn help_center_actions_emit_notices() {
    let (manager, notifier) = support();
    assert_eq!(manager.open_section("faq"), Some("Frequently Asked Questions"));
    assert_eq!(manager.open_section("billing"), None);
    assert_eq!(
        manager.open_article("add-sale"),
        Some("How to Add Sales Records")
    );
    manager.contact_support();

    assert_eq!(
        notifier.messages(),
        vec![
            "Opening Frequently Asked Questions...",
            "Opening article: How to Add Sales Records",
            "Opening contact support form..."
        ]
    );
}

#[test]
fn live_chat_announces_a_delayed_fallback() {
    let (manager, notifier) = support();
    manager.open_section("live-chat");
    let notices = notifier.take();
    assert_eq!(notices.len(), 3);
    assert_eq!(notices[1].message, "Connecting you to live chat...");
    assert_eq!(notices[2].delay, Duration::from_millis(2000));
}
