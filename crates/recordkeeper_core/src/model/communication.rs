//! Conversations, the call log and feed notifications.
//!
//! # Invariants
//! - Selecting a conversation marks it read; nothing else clears `unread`.
//! - A conversation's last message is always the last element of
//!   `messages`.

use crate::model::record::{
    require_text, require_text_if_set, Keyed, RecordId, StatusTag, ValidationError,
};
use crate::view::navigation::TabName;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shared read/unread badge for conversations and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadState {
    Unread,
    Read,
}

impl ReadState {
    pub fn from_unread(unread: bool) -> Self {
        if unread {
            Self::Unread
        } else {
            Self::Read
        }
    }
}

impl StatusTag for ReadState {
    fn tag(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Unread => "Unread",
            Self::Read => "Read",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sender {
    Me,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: RecordId,
    pub text: String,
    pub at: DateTime<Utc>,
    pub sender: Sender,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    pub id: RecordId,
    pub name: String,
    pub messages: Vec<Message>,
    pub unread: bool,
}

impl Conversation {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn read_state(&self) -> ReadState {
        ReadState::from_unread(self.unread)
    }

    /// Appends an outgoing message. Blank text is ignored.
    pub fn push_outgoing(&mut self, id: RecordId, text: &str, at: DateTime<Utc>) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(Message {
            id,
            text: text.to_string(),
            at,
            sender: Sender::Me,
        });
        true
    }
}

impl Keyed for Conversation {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationDraft {
    pub name: String,
}

impl ConversationDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationPatch {
    pub name: Option<String>,
    pub unread: Option<bool>,
}

impl ConversationPatch {
    pub fn apply(self, conversation: &mut Conversation) -> Result<(), ValidationError> {
        require_text_if_set("name", self.name.as_ref())?;
        if let Some(name) = self.name {
            conversation.name = name;
        }
        if let Some(unread) = self.unread {
            conversation.unread = unread;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallKind {
    Incoming,
    Outgoing,
    Missed,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::Missed => "missed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Completed,
    Missed,
}

impl StatusTag for CallStatus {
    fn tag(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Missed => "missed",
        }
    }

    fn label(&self) -> &'static str {
        self.tag()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallEntry {
    pub id: RecordId,
    pub contact: String,
    pub phone: String,
    pub kind: CallKind,
    /// `m:ss`
    pub duration: String,
    pub at: DateTime<Utc>,
    pub status: CallStatus,
}

impl Keyed for CallEntry {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDraft {
    pub contact: String,
    pub phone: String,
    pub kind: CallKind,
    pub duration: String,
}

impl CallDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("contact", &self.contact)
    }

    /// Missed calls are logged as missed regardless of duration.
    pub fn status(&self) -> CallStatus {
        match self.kind {
            CallKind::Missed => CallStatus::Missed,
            CallKind::Incoming | CallKind::Outgoing => CallStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallPatch {
    pub contact: Option<String>,
    pub phone: Option<String>,
}

impl CallPatch {
    pub fn apply(self, call: &mut CallEntry) -> Result<(), ValidationError> {
        require_text_if_set("contact", self.contact.as_ref())?;
        if let Some(contact) = self.contact {
            call.contact = contact;
        }
        if let Some(phone) = self.phone {
            call.phone = phone;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedKind {
    System,
    Sales,
    Tasks,
}

impl FeedKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Self::System),
            "sales" => Some(Self::Sales),
            "tasks" => Some(Self::Tasks),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Sales => "sales",
            Self::Tasks => "tasks",
        }
    }
}

/// Kind selector of the notification feed; `all` shows everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFilter {
    #[default]
    All,
    Only(FeedKind),
}

impl FeedFilter {
    /// Unknown names fall back to `all`.
    pub fn parse(value: &str) -> Self {
        FeedKind::parse(value).map_or(Self::All, Self::Only)
    }

    /// Facet value for list filters; `None` means no kind filter.
    pub fn selection(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Only(kind) => Some(kind.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedNotification {
    pub id: RecordId,
    pub kind: FeedKind,
    pub title: String,
    pub message: String,
    pub at: DateTime<Utc>,
    pub read: bool,
}

impl Keyed for FeedNotification {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDraft {
    pub kind: FeedKind,
    pub title: String,
    pub message: String,
}

impl FeedDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedPatch {
    pub read: Option<bool>,
}

/// Tabs of the communication center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommTab {
    #[default]
    Messages,
    Calls,
    Notifications,
}

impl CommTab {
    pub const ALL: &'static [CommTab] =
        &[CommTab::Messages, CommTab::Calls, CommTab::Notifications];
}

impl TabName for CommTab {
    fn tab_name(&self) -> &'static str {
        match self {
            Self::Messages => "messages",
            Self::Calls => "calls",
            Self::Notifications => "notifications",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommunicationSummary {
    pub unread_conversations: usize,
    pub recent_calls: usize,
    pub missed_calls: usize,
    pub unread_notifications: usize,
}
