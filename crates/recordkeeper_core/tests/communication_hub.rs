use chrono::{TimeZone, Utc};
use recordkeeper_core::model::communication::{
    CallDraft, CallKind, CallStatus, CommTab, ConversationDraft, FeedDraft, FeedFilter, FeedKind,
    Sender,
};
use recordkeeper_core::seed;
use recordkeeper_core::service::communication::CommunicationManager;
use recordkeeper_core::{Facet, FilterState, FixedClock, ListView, RecordId, RecordingNotifier};
use std::sync::Arc;

fn manager() -> (CommunicationManager, Arc<RecordingNotifier>) {
    let clock = Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2025, 12, 12, 11, 0, 0).unwrap(),
    ));
    let notifier = Arc::new(RecordingNotifier::new());
    let manager = CommunicationManager::new(
        seed::conversations(),
        seed::calls(),
        seed::feed_notifications(),
        clock,
        notifier.clone(),
    );
    (manager, notifier)
}

fn entity(view: &ListView) -> Option<&'static str> {
    match view {
        ListView::Table(table) => Some(table.entity),
        ListView::Empty(_) => None,
    }
}

#[test]
fn seeded_summary() {
    let (manager, _) = manager();
    let summary = manager.summary();
    assert_eq!(summary.unread_conversations, 1);
    assert_eq!(summary.recent_calls, 3);
    assert_eq!(summary.missed_calls, 1);
    assert_eq!(summary.unread_notifications, 2);
}

#[test]
fn selecting_a_conversation_marks_it_read() {
    let (mut manager, _) = manager();
    assert!(manager.active_conversation().is_none());

    assert!(manager.select_conversation(&RecordId::from("1")));
    assert_eq!(manager.active_conversation().unwrap().name, "John Smith");
    assert_eq!(manager.summary().unread_conversations, 0);

    assert!(!manager.select_conversation(&RecordId::from("9")));
    assert_eq!(manager.active_conversation().unwrap().name, "John Smith");
}

#[test]
fn send_message_appends_to_the_active_conversation() {
    let (mut manager, notifier) = manager();
    assert!(!manager.send_message("hello"));

    manager.select_conversation(&RecordId::from("2"));
    assert!(!manager.send_message("   "));
    assert!(manager.send_message("  Invoice attached  "));

    let conversation = manager.active_conversation().unwrap();
    assert_eq!(conversation.messages.len(), 4);
    let last = conversation.last_message().unwrap();
    assert_eq!(last.text, "Invoice attached");
    assert_eq!(last.sender, Sender::Me);
    assert_eq!(notifier.messages(), vec!["Message sent"]);
}

#[test]
fn started_conversations_are_listed_first() {
    let (mut manager, _) = manager();
    let id = manager
        .start_conversation(ConversationDraft {
            name: "Tom Brown".into(),
        })
        .unwrap();
    let view = manager.conversations_view(FilterState::new());
    assert_eq!(view.rows()[0].id, id);
    assert_eq!(view.rows()[0].cells[1], "");

    assert!(manager
        .start_conversation(ConversationDraft { name: " ".into() })
        .is_err());
}

#[test]
fn logged_missed_calls_are_missed() {
    let (mut manager, _) = manager();
    let id = manager
        .log_call(CallDraft {
            contact: "Anna Taylor".into(),
            phone: "+1 (555) 456-7890".into(),
            kind: CallKind::Missed,
            duration: "3:10".into(),
        })
        .unwrap();
    assert_eq!(manager.calls().get(&id).unwrap().status, CallStatus::Missed);
    assert_eq!(manager.summary().missed_calls, 2);

    let missed = manager.calls_view(FilterState::new().with_selection(Facet::Kind, "missed"));
    assert_eq!(missed.rows().len(), 2);
}

#[test]
fn call_actions_only_notify() {
    let (manager, notifier) = manager();
    manager.call_back("Mike Davis");
    manager.message_contact("Mike Davis");
    assert_eq!(
        notifier.messages(),
        vec!["Calling Mike Davis...", "Opening message to Mike Davis"]
    );
    assert_eq!(manager.calls().len(), 3);
}

#[test]
fn view_follows_the_active_tab() {
    let (mut manager, _) = manager();
    assert_eq!(manager.active_tab(), CommTab::Messages);
    assert_eq!(entity(&manager.view(FilterState::new())), Some("conversation"));

    assert!(manager.switch_tab("calls"));
    assert_eq!(entity(&manager.view(FilterState::new())), Some("call"));

    assert!(!manager.switch_tab("voicemail"));
    assert_eq!(manager.tab_strip().active, "calls");

    manager.switch_tab("notifications");
    assert_eq!(
        entity(&manager.view(FilterState::new())),
        Some("feed_notification")
    );
}

#[test]
fn feed_filter_and_read_state() {
    let (mut manager, _) = manager();
    assert_eq!(manager.filter_notifications("sales"), FeedFilter::Only(FeedKind::Sales));
    let sales = manager.notifications_view(FilterState::new());
    assert_eq!(sales.rows().len(), 1);
    assert_eq!(sales.rows()[0].id.as_str(), "2");

    assert_eq!(manager.filter_notifications("everything"), FeedFilter::All);
    let unread = manager.notifications_view(FilterState::new().with_selection(Facet::Status, "unread"));
    assert_eq!(unread.rows().len(), 2);

    assert!(manager.mark_notification_read(&RecordId::from("1")));
    assert!(!manager.mark_notification_read(&RecordId::from("1")));
    assert_eq!(manager.summary().unread_notifications, 1);
}

#[test]
fn dismissing_every_notification_shows_the_empty_state() {
    let (mut manager, notifier) = manager();
    for id in ["1", "2", "3"] {
        assert!(manager.dismiss_notification(&RecordId::from(id)));
    }
    assert!(!manager.dismiss_notification(&RecordId::from("1")));

    match manager.notifications_view(FilterState::new()) {
        ListView::Empty(empty) => assert_eq!(empty.title, "No notifications"),
        ListView::Table(_) => panic!("feed should be empty"),
    }
    assert!(notifier.messages().is_empty());
}

#[test]
fn pushed_notifications_arrive_unread() {
    let (mut manager, _) = manager();
    let id = manager
        .push_notification(FeedDraft {
            kind: FeedKind::Tasks,
            title: "Task Overdue".into(),
            message: "Customer follow-up calls is overdue".into(),
        })
        .unwrap();
    assert!(!manager.feed().get(&id).unwrap().read);
    assert_eq!(manager.summary().unread_notifications, 3);
}
