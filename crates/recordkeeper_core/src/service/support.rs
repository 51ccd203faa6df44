//! Support tickets and the help center.

use crate::clock::Clock;
use crate::format::format_date_time;
use crate::model::record::{RecordId, StatusTag, ValidationError};
use crate::model::ticket::{Ticket, TicketDraft, TicketPatch, TicketStatus, TicketSummary};
use crate::service::crud::{CrudList, IdAllocator};
use crate::service::schema::{Facet, FilterState, Notices, RecordMeta, Schema};
use crate::view::model::{Action, ListView, Row};
use crate::view::notice::{Confirm, Notice, Notifier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

pub const TICKET_PREFIX: &str = "TK-";

const LIVE_CHAT_DELAY: Duration = Duration::from_millis(2000);

const HELP_SECTIONS: &[(&str, &str)] = &[
    ("documentation", "Documentation Center"),
    ("video-tutorials", "Video Tutorials"),
    ("faq", "Frequently Asked Questions"),
    ("live-chat", "Live Chat Support"),
    ("tickets", "Support Tickets"),
    ("system-status", "System Status Dashboard"),
];

const HELP_ARTICLES: &[(&str, &str)] = &[
    ("setup", "Initial Setup Guide"),
    ("first-steps", "Your First Steps with Smart Record Keeper"),
    ("navigation", "Navigating the Dashboard"),
    ("add-sale", "How to Add Sales Records"),
    ("track-inventory", "Inventory Tracking Best Practices"),
    ("generate-reports", "Generating and Exporting Reports"),
    ("profile", "Managing Your User Profile"),
    ("security", "Security Settings and Best Practices"),
    ("notifications", "Setting Up Notification Preferences"),
    ("login-issues", "Troubleshooting Login Problems"),
    ("performance", "Resolving Performance Issues"),
    ("data-recovery", "Data Backup and Recovery"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, title)| *title)
}

pub fn help_section_title(key: &str) -> Option<&'static str> {
    lookup(HELP_SECTIONS, key)
}

pub fn help_article_title(key: &str) -> Option<&'static str> {
    lookup(HELP_ARTICLES, key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceHealth {
    Operational,
    Maintenance,
}

impl StatusTag for ServiceHealth {
    fn tag(&self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Maintenance => "maintenance",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Maintenance => "Maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub name: &'static str,
    pub health: ServiceHealth,
    pub detail: &'static str,
}

/// Fixed status board shown by the help center.
pub fn system_status() -> [ServiceStatus; 4] {
    [
        ServiceStatus {
            name: "Application Server",
            health: ServiceHealth::Operational,
            detail: "99.9% uptime",
        },
        ServiceStatus {
            name: "Database Services",
            health: ServiceHealth::Operational,
            detail: "All queries processing normally",
        },
        ServiceStatus {
            name: "File Storage",
            health: ServiceHealth::Operational,
            detail: "Backup systems active",
        },
        ServiceStatus {
            name: "Email Services",
            health: ServiceHealth::Maintenance,
            detail: "Scheduled Maintenance - Dec 15, 2:00 AM EST",
        },
    ]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TicketSchema;

impl Schema for TicketSchema {
    type Record = Ticket;
    type Draft = TicketDraft;
    type Patch = TicketPatch;
    type Status = TicketStatus;

    fn entity(&self) -> &'static str {
        "ticket"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Ticket ID", "Subject", "Category", "Priority", "Last Updated"]
    }

    fn notices(&self) -> Notices {
        Notices {
            created: Some("New support ticket created successfully"),
            updated: Some("Ticket updated successfully"),
            deleted: Some("Ticket deleted successfully"),
            delete_prompt: "Are you sure you want to delete this ticket?",
        }
    }

    fn validate(&self, draft: &TicketDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: TicketDraft, meta: RecordMeta) -> Ticket {
        Ticket {
            id: meta.id,
            subject: draft.subject,
            category: draft.category,
            priority: draft.priority,
            status: TicketStatus::Open,
            created_at: meta.created_at,
            last_updated: meta.created_at,
            description: draft.description,
        }
    }

    fn merge(
        &self,
        record: &mut Ticket,
        patch: TicketPatch,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record, now)
    }

    fn searchable<'r>(&self, record: &'r Ticket) -> Vec<&'r str> {
        vec![
            record.id.as_str(),
            record.subject.as_str(),
            record.category.as_str(),
        ]
    }

    fn facet<'r>(
        &self,
        record: &'r Ticket,
        facet: Facet,
        _now: DateTime<Utc>,
    ) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Status => Some(Cow::Borrowed(record.status.tag())),
            Facet::Priority => Some(Cow::Borrowed(record.priority.tag())),
            Facet::Category => Some(Cow::Borrowed(record.category.as_str())),
            Facet::Kind => None,
        }
    }

    fn derive_status(&self, record: &Ticket, _now: DateTime<Utc>) -> TicketStatus {
        record.status
    }

    fn project(&self, record: &Ticket, _now: DateTime<Utc>) -> Row {
        let mut actions = vec![Action::View];
        if record.status == TicketStatus::Open {
            actions.push(Action::MarkResolved);
        }
        Row::new(
            record.id.clone(),
            vec![
                record.id.to_string(),
                record.subject.clone(),
                record.category.clone(),
                record.priority.label().to_string(),
                format_date_time(record.last_updated),
            ],
        )
        .with_badge(record.status)
        .with_actions(actions)
        .with_emphasis(record.priority.tag())
    }
}

pub struct SupportManager {
    tickets: CrudList<TicketSchema>,
}

impl SupportManager {
    /// Ticket ids continue as `TK-<first_number>`, `TK-<first_number + 1>`, ...
    pub fn new(
        first_number: u64,
        seed: Vec<Ticket>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            tickets: CrudList::seeded(TicketSchema, seed, clock, notifier)
                .with_ids(IdAllocator::sequence(TICKET_PREFIX, first_number)),
        }
    }

    pub fn tickets(&self) -> &CrudList<TicketSchema> {
        &self.tickets
    }

    /// Opens the default dashboard ticket.
    pub fn open_ticket(&mut self) -> Result<RecordId, ValidationError> {
        self.create_ticket(TicketDraft::default())
    }

    pub fn create_ticket(&mut self, draft: TicketDraft) -> Result<RecordId, ValidationError> {
        self.tickets.create(draft)
    }

    pub fn update_ticket(&mut self, id: &RecordId, patch: TicketPatch) -> Result<bool, ValidationError> {
        self.tickets.update(id, patch)
    }

    pub fn delete_ticket(&mut self, id: &RecordId, confirm: &dyn Confirm) -> bool {
        self.tickets.delete(id, confirm)
    }

    /// Moves a ticket to `status`. Unknown ids and unchanged statuses are
    /// no-ops.
    pub fn update_status(&mut self, id: &RecordId, status: TicketStatus) -> bool {
        let changed = self
            .tickets
            .transition(id, |ticket, now| ticket.set_status(status, now));
        if changed {
            self.tickets.notify(Notice::success(format!(
                "Ticket {id} status updated to {}",
                status.tag()
            )));
        }
        changed
    }

    pub fn mark_resolved(&mut self, id: &RecordId) -> bool {
        self.update_status(id, TicketStatus::Resolved)
    }

    pub fn open(&self, id: &RecordId) -> Option<&Ticket> {
        let ticket = self.tickets.get(id)?;
        self.tickets.notify(Notice::info(format!(
            "Opening ticket {}: {}",
            ticket.id, ticket.subject
        )));
        Some(ticket)
    }

    /// Opens a help-center section by key. Live chat additionally starts
    /// the chat hand-off.
    pub fn open_section(&self, key: &str) -> Option<&'static str> {
        let title = help_section_title(key)?;
        self.tickets
            .notify(Notice::info(format!("Opening {title}...")));
        if key == "live-chat" {
            self.start_live_chat();
        }
        Some(title)
    }

    pub fn open_article(&self, key: &str) -> Option<&'static str> {
        let title = help_article_title(key)?;
        self.tickets
            .notify(Notice::info(format!("Opening article: {title}")));
        Some(title)
    }

    pub fn contact_support(&self) {
        self.tickets
            .notify(Notice::info("Opening contact support form..."));
    }

    pub fn start_live_chat(&self) {
        self.tickets
            .notify(Notice::info("Connecting you to live chat..."));
        self.tickets.notify(
            Notice::info("Live chat is not available in demo mode").delayed(LIVE_CHAT_DELAY),
        );
    }

    pub fn view(&self, filter: FilterState) -> ListView {
        self.tickets.list(filter).render()
    }

    pub fn summary(&self) -> TicketSummary {
        TicketSummary::from_tickets(self.tickets.records())
    }
}
