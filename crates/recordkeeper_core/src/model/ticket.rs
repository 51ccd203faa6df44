//! Support tickets.

use crate::form::FormData;
use crate::model::record::{
    require_text, require_text_if_set, Keyed, Priority, RecordId, StatusTag, ValidationError,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|status| status.tag() == value)
    }
}

impl StatusTag for TicketStatus {
    fn tag(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: RecordId,
    pub subject: String,
    pub category: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub description: String,
}

impl Ticket {
    /// Sets the status and bumps `last_updated`. Returns `false` when the
    /// status is unchanged.
    pub fn set_status(&mut self, status: TicketStatus, at: DateTime<Utc>) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.last_updated = at;
        true
    }
}

impl Keyed for Ticket {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub subject: String,
    pub category: String,
    pub priority: Priority,
    pub description: String,
}

impl Default for TicketDraft {
    /// The ticket opened by the dashboard's "new ticket" button.
    fn default() -> Self {
        Self {
            subject: "New Support Request".to_string(),
            category: "General".to_string(),
            priority: Priority::Medium,
            description: "Support ticket created from dashboard".to_string(),
        }
    }
}

impl TicketDraft {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            subject: form.text("subject"),
            category: form.text("category"),
            priority: Priority::parse_or_default(&form.text("priority")),
            description: form.text("description"),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("subject", &self.subject)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketPatch {
    pub subject: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub description: Option<String>,
}

impl TicketPatch {
    pub fn apply(self, ticket: &mut Ticket, at: DateTime<Utc>) -> Result<(), ValidationError> {
        require_text_if_set("subject", self.subject.as_ref())?;
        if let Some(subject) = self.subject {
            ticket.subject = subject;
        }
        if let Some(category) = self.category {
            ticket.category = category;
        }
        if let Some(priority) = self.priority {
            ticket.priority = priority;
        }
        if let Some(description) = self.description {
            ticket.description = description;
        }
        ticket.last_updated = at;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TicketSummary {
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
}

impl TicketSummary {
    pub fn from_tickets<'a>(tickets: impl IntoIterator<Item = &'a Ticket>) -> Self {
        let mut summary = Self::default();
        for ticket in tickets {
            match ticket.status {
                TicketStatus::Open => summary.open += 1,
                TicketStatus::InProgress => summary.in_progress += 1,
                TicketStatus::Resolved => summary.resolved += 1,
                TicketStatus::Closed => summary.closed += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::{TicketDraft, TicketStatus};
    use crate::model::record::Priority;

    #[test]
    fn default_draft_matches_dashboard_button() {
        let draft = TicketDraft::default();
        assert_eq!(draft.subject, "New Support Request");
        assert_eq!(draft.category, "General");
        assert_eq!(draft.priority, Priority::Medium);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn statuses_parse_by_tag() {
        assert_eq!(TicketStatus::parse("In-Progress"), Some(TicketStatus::InProgress));
        assert_eq!(TicketStatus::parse("pending"), None);
    }
}
