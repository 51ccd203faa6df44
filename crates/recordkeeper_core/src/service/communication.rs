//! Communication center: conversations, call log and the notification feed.
//!
//! # Invariants
//! - At most one conversation is active; sending requires one.
//! - The feed kind filter is applied on top of any caller filter.

use crate::clock::Clock;
use crate::format::{format_date_time, format_time, truncate_preview};
use crate::model::communication::{
    CallDraft, CallEntry, CallPatch, CallStatus, CommTab, CommunicationSummary, Conversation,
    ConversationDraft, ConversationPatch, FeedDraft, FeedFilter, FeedNotification, FeedPatch,
    ReadState,
};
use crate::model::record::{RecordId, StatusTag, ValidationError};
use crate::service::crud::CrudList;
use crate::service::schema::{Facet, FilterState, RecordMeta, Schema};
use crate::view::model::{Action, EmptyState, ListView, Row, TabStrip};
use crate::view::navigation::{TabName, TabSet};
use crate::view::notice::{AutoConfirm, Notice, Notifier};
use chrono::{DateTime, Utc};
use log::info;
use std::borrow::Cow;
use std::sync::Arc;
use uuid::Uuid;

const SNIPPET_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConversationSchema;

impl Schema for ConversationSchema {
    type Record = Conversation;
    type Draft = ConversationDraft;
    type Patch = ConversationPatch;
    type Status = ReadState;

    fn entity(&self) -> &'static str {
        "conversation"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Contact", "Last Message", "Time"]
    }

    fn validate(&self, draft: &ConversationDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: ConversationDraft, meta: RecordMeta) -> Conversation {
        Conversation {
            id: meta.id,
            name: draft.name,
            messages: Vec::new(),
            unread: false,
        }
    }

    fn merge(
        &self,
        record: &mut Conversation,
        patch: ConversationPatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record)
    }

    fn searchable<'r>(&self, record: &'r Conversation) -> Vec<&'r str> {
        vec![record.name.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r Conversation,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Status => Some(Cow::Borrowed(record.read_state().tag())),
            _ => None,
        }
    }

    fn derive_status(&self, record: &Conversation, _now: DateTime<Utc>) -> ReadState {
        record.read_state()
    }

    fn project(&self, record: &Conversation, _now: DateTime<Utc>) -> Row {
        let (snippet, time) = match record.last_message() {
            Some(message) => (
                truncate_preview(&message.text, SNIPPET_CHARS),
                format_time(message.at),
            ),
            None => (String::new(), String::new()),
        };
        Row::new(record.id.clone(), vec![record.name.clone(), snippet, time])
            .with_badge(record.read_state())
            .with_actions([Action::Open])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CallSchema;

impl Schema for CallSchema {
    type Record = CallEntry;
    type Draft = CallDraft;
    type Patch = CallPatch;
    type Status = CallStatus;

    fn entity(&self) -> &'static str {
        "call"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Contact", "Phone", "Type", "Duration", "Date & Time"]
    }

    fn validate(&self, draft: &CallDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: CallDraft, meta: RecordMeta) -> CallEntry {
        CallEntry {
            id: meta.id,
            status: draft.status(),
            contact: draft.contact,
            phone: draft.phone,
            kind: draft.kind,
            duration: draft.duration,
            at: meta.created_at,
        }
    }

    fn merge(
        &self,
        record: &mut CallEntry,
        patch: CallPatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record)
    }

    fn searchable<'r>(&self, record: &'r CallEntry) -> Vec<&'r str> {
        vec![record.contact.as_str(), record.phone.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r CallEntry,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Kind => Some(Cow::Borrowed(record.kind.as_str())),
            Facet::Status => Some(Cow::Borrowed(record.status.tag())),
            Facet::Category | Facet::Priority => None,
        }
    }

    fn derive_status(&self, record: &CallEntry, _now: DateTime<Utc>) -> CallStatus {
        record.status
    }

    fn project(&self, record: &CallEntry, _now: DateTime<Utc>) -> Row {
        Row::new(
            record.id.clone(),
            vec![
                record.contact.clone(),
                record.phone.clone(),
                record.kind.as_str().to_string(),
                record.duration.clone(),
                format_date_time(record.at),
            ],
        )
        .with_badge(record.status)
        .with_actions([Action::CallBack, Action::SendMessage])
        .with_emphasis(record.kind.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeedSchema;

impl Schema for FeedSchema {
    type Record = FeedNotification;
    type Draft = FeedDraft;
    type Patch = FeedPatch;
    type Status = ReadState;

    fn entity(&self) -> &'static str {
        "feed_notification"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Title", "Message", "Time"]
    }

    fn empty_state(&self) -> EmptyState {
        EmptyState {
            title: "No notifications".to_string(),
            hint: "You're all caught up".to_string(),
        }
    }

    fn validate(&self, draft: &FeedDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: FeedDraft, meta: RecordMeta) -> FeedNotification {
        FeedNotification {
            id: meta.id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            at: meta.created_at,
            read: false,
        }
    }

    fn merge(
        &self,
        record: &mut FeedNotification,
        patch: FeedPatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if let Some(read) = patch.read {
            record.read = read;
        }
        Ok(())
    }

    fn searchable<'r>(&self, record: &'r FeedNotification) -> Vec<&'r str> {
        vec![record.title.as_str(), record.message.as_str()]
    }

    fn facet<'r>(
        &self,
        record: &'r FeedNotification,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Kind => Some(Cow::Borrowed(record.kind.as_str())),
            Facet::Status => Some(Cow::Borrowed(ReadState::from_unread(!record.read).tag())),
            Facet::Category | Facet::Priority => None,
        }
    }

    fn derive_status(&self, record: &FeedNotification, _now: DateTime<Utc>) -> ReadState {
        ReadState::from_unread(!record.read)
    }

    fn project(&self, record: &FeedNotification, now: DateTime<Utc>) -> Row {
        Row::new(
            record.id.clone(),
            vec![
                record.title.clone(),
                record.message.clone(),
                format_date_time(record.at),
            ],
        )
        .with_badge(self.derive_status(record, now))
        .with_actions([Action::Dismiss])
        .with_emphasis(record.kind.as_str())
    }
}

pub struct CommunicationManager {
    conversations: CrudList<ConversationSchema>,
    calls: CrudList<CallSchema>,
    feed: CrudList<FeedSchema>,
    tabs: TabSet<CommTab>,
    active: Option<RecordId>,
    feed_filter: FeedFilter,
}

impl CommunicationManager {
    pub fn new(
        conversations: Vec<Conversation>,
        calls: Vec<CallEntry>,
        feed: Vec<FeedNotification>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            conversations: CrudList::seeded(
                ConversationSchema,
                conversations,
                clock.clone(),
                notifier.clone(),
            ),
            calls: CrudList::seeded(CallSchema, calls, clock.clone(), notifier.clone()),
            feed: CrudList::seeded(FeedSchema, feed, clock, notifier),
            tabs: TabSet::new(CommTab::ALL, CommTab::Messages),
            active: None,
            feed_filter: FeedFilter::All,
        }
    }

    pub fn conversations(&self) -> &CrudList<ConversationSchema> {
        &self.conversations
    }

    pub fn calls(&self) -> &CrudList<CallSchema> {
        &self.calls
    }

    pub fn feed(&self) -> &CrudList<FeedSchema> {
        &self.feed
    }

    pub fn active_tab(&self) -> CommTab {
        self.tabs.active()
    }

    /// Unknown tab names keep the current tab.
    pub fn switch_tab(&mut self, name: &str) -> bool {
        self.tabs.switch_named(name)
    }

    pub fn tab_strip(&self) -> TabStrip {
        TabStrip {
            tabs: self.tabs.names(),
            active: self.tabs.active().tab_name(),
        }
    }

    pub fn start_conversation(
        &mut self,
        draft: ConversationDraft,
    ) -> Result<RecordId, ValidationError> {
        self.conversations.create(draft)
    }

    /// Makes a conversation active and marks it read. Unknown ids leave the
    /// current selection alone.
    pub fn select_conversation(&mut self, id: &RecordId) -> bool {
        if self.conversations.get(id).is_none() {
            return false;
        }
        self.conversations.transition(id, |conversation, _| {
            let was_unread = conversation.unread;
            conversation.unread = false;
            was_unread
        });
        self.active = Some(id.clone());
        true
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.conversations.get(self.active.as_ref()?)
    }

    /// Appends `text` to the active conversation. Blank text or no active
    /// conversation is a no-op.
    pub fn send_message(&mut self, text: &str) -> bool {
        let Some(active) = self.active.clone() else {
            return false;
        };
        let message_id = RecordId::new(Uuid::now_v7().to_string());
        let sent = self.conversations.transition(&active, |conversation, now| {
            conversation.push_outgoing(message_id, text, now)
        });
        if sent {
            info!(
                "event=message_send module=communication status=ok conversation_id={active}"
            );
            self.conversations.notify(Notice::success("Message sent"));
        }
        sent
    }

    pub fn log_call(&mut self, draft: CallDraft) -> Result<RecordId, ValidationError> {
        self.calls.create(draft)
    }

    pub fn update_call(&mut self, id: &RecordId, patch: CallPatch) -> Result<bool, ValidationError> {
        self.calls.update(id, patch)
    }

    pub fn call_back(&self, contact: &str) {
        self.calls
            .notify(Notice::info(format!("Calling {contact}...")));
    }

    pub fn message_contact(&self, contact: &str) {
        self.calls
            .notify(Notice::info(format!("Opening message to {contact}")));
    }

    pub fn push_notification(&mut self, draft: FeedDraft) -> Result<RecordId, ValidationError> {
        self.feed.create(draft)
    }

    pub fn feed_filter(&self) -> FeedFilter {
        self.feed_filter
    }

    /// Filters the feed by kind name; unknown names show everything.
    pub fn filter_notifications(&mut self, name: &str) -> FeedFilter {
        self.feed_filter = FeedFilter::parse(name);
        self.feed_filter
    }

    pub fn mark_notification_read(&mut self, id: &RecordId) -> bool {
        self.feed.transition(id, |notification, _| {
            let was_unread = !notification.read;
            notification.read = true;
            was_unread
        })
    }

    /// Removes a notification without confirmation.
    pub fn dismiss_notification(&mut self, id: &RecordId) -> bool {
        self.feed.delete(id, &AutoConfirm(true))
    }

    pub fn conversations_view(&self, filter: FilterState) -> ListView {
        self.conversations.list(filter).render()
    }

    pub fn calls_view(&self, filter: FilterState) -> ListView {
        self.calls.list(filter).render()
    }

    /// Feed rows matching `filter` and the current kind filter.
    pub fn notifications_view(&self, filter: FilterState) -> ListView {
        let filter = match self.feed_filter.selection() {
            Some(kind) => filter.with_selection(Facet::Kind, kind),
            None => filter,
        };
        self.feed.list(filter).render()
    }

    /// List of the active tab.
    pub fn view(&self, filter: FilterState) -> ListView {
        match self.tabs.active() {
            CommTab::Messages => self.conversations_view(filter),
            CommTab::Calls => self.calls_view(filter),
            CommTab::Notifications => self.notifications_view(filter),
        }
    }

    pub fn summary(&self) -> CommunicationSummary {
        CommunicationSummary {
            unread_conversations: self
                .conversations
                .records()
                .iter()
                .filter(|conversation| conversation.unread)
                .count(),
            recent_calls: self.calls.len(),
            missed_calls: self
                .calls
                .records()
                .iter()
                .filter(|call| call.status == CallStatus::Missed)
                .count(),
            unread_notifications: self
                .feed
                .records()
                .iter()
                .filter(|notification| !notification.read)
                .count(),
        }
    }
}
