//! Presentation-neutral view-models produced by the projectors.

use crate::model::record::{RecordId, StatusTag};
use crate::view::navigation::Section;
use serde::Serialize;

/// Projection of one filtered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListView {
    /// At least one record matched.
    Table(TableView),
    /// Nothing matched the current filter (or the collection is empty).
    Empty(EmptyState),
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Returns the rendered rows; empty for the empty state.
    pub fn rows(&self) -> &[Row] {
        match self {
            Self::Table(table) => &table.rows,
            Self::Empty(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    /// Entity name, for example `invoice`.
    pub entity: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub hint: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No records found".to_string(),
            hint: "Try adjusting your search or filter criteria".to_string(),
        }
    }
}

/// One rendered record. `cells` line up with `TableView::columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: RecordId,
    pub cells: Vec<String>,
    pub badge: Option<Badge>,
    pub actions: Vec<Action>,
    /// Visual hint such as `unread`, `positive` or `negative`.
    pub emphasis: Option<&'static str>,
}

impl Row {
    pub fn new(id: RecordId, cells: Vec<String>) -> Self {
        Self {
            id,
            cells,
            badge: None,
            actions: Vec::new(),
            emphasis: None,
        }
    }

    /// Attaches a status badge; statuses with an empty tag are skipped.
    pub fn with_badge(mut self, status: impl StatusTag) -> Self {
        if !status.tag().is_empty() {
            self.badge = Some(Badge::from_status(status));
        }
        self
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn with_emphasis(mut self, emphasis: &'static str) -> Self {
        self.emphasis = Some(emphasis);
        self
    }

    pub fn has_action(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub tag: &'static str,
    pub label: &'static str,
}

impl Badge {
    pub fn from_status(status: impl StatusTag) -> Self {
        Self {
            tag: status.tag(),
            label: status.label(),
        }
    }
}

/// Row-level buttons offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Edit,
    Delete,
    View,
    MarkPaid,
    Start,
    Complete,
    MarkResolved,
    Download,
    CallBack,
    SendMessage,
    Open,
    Dismiss,
}

/// Tone applied to a summary counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Normal,
    Positive,
    Warning,
    Danger,
}

/// Summary counter shown above a section's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub tone: Tone,
}

impl MetricCard {
    pub fn new(title: &'static str, value: impl ToString) -> Self {
        Self {
            title,
            value: value.to_string(),
            tone: Tone::Normal,
        }
    }

    pub fn toned(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

/// Tab strip state rendered above a tabbed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabStrip {
    pub tabs: Vec<&'static str>,
    pub active: &'static str,
}

/// Freshly rendered content for one navigation section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub section: Section,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cards: Vec<MetricCard>,
    pub tabs: Option<TabStrip>,
    pub content: ListView,
}
