//! Scheduled tasks with stored progress and derived status.
//!
//! # Invariants
//! - Progress only moves `pending -> in-progress -> completed`.
//! - `completed_at` is set exactly when progress becomes `completed`.
//! - Status precedence: completed, then overdue, then in progress, then
//!   pending.

use crate::form::FormData;
use crate::model::record::{
    require_date_if_set, require_text, require_text_if_set, Keyed, Priority, RecordId, StatusTag,
    ValidationError,
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

/// Stored lifecycle position of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskProgress {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskProgress {
    /// Reads a stored status literal. `overdue` was once stored verbatim and
    /// is now derived, so it maps back to `pending`.
    pub fn from_stored(value: &str) -> Self {
        match value.trim() {
            "in-progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Completed,
    Overdue,
    InProgress,
    Pending,
}

impl StatusTag for TaskStatus {
    fn tag(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::InProgress => "in-progress",
            Self::Pending => "pending",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
            Self::InProgress => "In Progress",
            Self::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub priority: Priority,
    pub assigned_to: String,
    pub category: String,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub description: String,
    pub progress: TaskProgress,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn status(&self, today: NaiveDate) -> TaskStatus {
        match self.progress {
            TaskProgress::Completed => TaskStatus::Completed,
            _ if self.due_date < today => TaskStatus::Overdue,
            TaskProgress::InProgress => TaskStatus::InProgress,
            TaskProgress::Pending => TaskStatus::Pending,
        }
    }

    /// `pending -> in-progress`; any other state is left alone.
    pub fn start(&mut self) -> bool {
        if self.progress != TaskProgress::Pending {
            return false;
        }
        self.progress = TaskProgress::InProgress;
        true
    }

    /// `in-progress -> completed`; any other state is left alone.
    pub fn complete(&mut self, at: DateTime<Utc>) -> bool {
        if self.progress != TaskProgress::InProgress {
            return false;
        }
        self.progress = TaskProgress::Completed;
        self.completed_at = Some(at);
        true
    }
}

impl Keyed for Task {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

/// Default due date: `start + days`.
pub fn default_due_date(start: NaiveDate, days: u32) -> NaiveDate {
    start
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(start)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub priority: Priority,
    pub assigned_to: String,
    pub category: String,
    /// Defaults to today.
    pub start_date: Option<NaiveDate>,
    /// Defaults to the start date plus the configured term.
    pub due_date: Option<NaiveDate>,
    pub description: String,
}

impl TaskDraft {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            title: form.text("title"),
            priority: Priority::parse_or_default(&form.text("priority")),
            assigned_to: form.text("assigned_to"),
            category: form.text("category"),
            start_date: form.date("start_date"),
            due_date: form.date("due_date"),
            description: form.text("description"),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("assigned_to", &self.assigned_to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub description: Option<String>,
}

impl TaskPatch {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            title: form.optional_text("title"),
            priority: form
                .optional_text("priority")
                .map(|value| Priority::parse_or_default(&value)),
            assigned_to: form.optional_text("assigned_to"),
            category: form.optional_text("category"),
            start_date: form.submitted_date("start_date"),
            due_date: form.submitted_date("due_date"),
            description: form.optional_text("description"),
        }
    }

    /// Applies the patch; progress and completion time are kept.
    pub fn apply(self, task: &mut Task) -> Result<(), ValidationError> {
        require_text_if_set("title", self.title.as_ref())?;
        require_text_if_set("assigned_to", self.assigned_to.as_ref())?;
        let start_date = require_date_if_set("start_date", self.start_date)?;
        let due_date = require_date_if_set("due_date", self.due_date)?;

        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(assigned_to) = self.assigned_to {
            task.assigned_to = assigned_to;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(start_date) = start_date {
            task.start_date = start_date;
        }
        if let Some(due_date) = due_date {
            task.due_date = due_date;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Open tasks due today.
    pub due_today: usize,
    /// Open tasks due within the next seven days, today included.
    pub due_this_week: usize,
    pub overdue: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskSummary {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>, today: NaiveDate) -> Self {
        let week_end = default_due_date(today, 7);
        let mut summary = Self {
            due_today: 0,
            due_this_week: 0,
            overdue: 0,
            in_progress: 0,
            completed: 0,
        };
        for task in tasks {
            let status = task.status(today);
            match status {
                TaskStatus::Completed => summary.completed += 1,
                TaskStatus::Overdue => summary.overdue += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::Pending => {}
            }
            if status == TaskStatus::Completed {
                continue;
            }
            if task.due_date == today {
                summary.due_today += 1;
            }
            if task.due_date >= today && task.due_date <= week_end {
                summary.due_this_week += 1;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::{default_due_date, Task, TaskProgress, TaskStatus};
    use crate::model::record::{Priority, RecordId};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    fn task(progress: TaskProgress, due: NaiveDate) -> Task {
        Task {
            id: RecordId::from("1"),
            title: "Update inventory system".into(),
            priority: Priority::High,
            assigned_to: "John Smith".into(),
            category: "development".into(),
            start_date: date(10),
            due_date: due,
            description: String::new(),
            progress,
            created_at: Utc.with_ymd_and_hms(2025, 12, 10, 9, 0, 0).unwrap(),
            completed_at: None,
        }
    }

    #[test]
    fn overdue_outranks_in_progress_but_not_completed() {
        let today = date(16);
        assert_eq!(task(TaskProgress::InProgress, date(15)).status(today), TaskStatus::Overdue);
        assert_eq!(task(TaskProgress::Completed, date(15)).status(today), TaskStatus::Completed);
        assert_eq!(task(TaskProgress::InProgress, date(16)).status(today), TaskStatus::InProgress);
        assert_eq!(task(TaskProgress::Pending, date(20)).status(today), TaskStatus::Pending);
    }

    #[test]
    fn transitions_follow_the_lifecycle() {
        let at = Utc.with_ymd_and_hms(2025, 12, 12, 9, 0, 0).unwrap();
        let mut item = task(TaskProgress::Pending, date(20));
        assert!(!item.complete(at));
        assert!(item.start());
        assert!(!item.start());
        assert!(item.complete(at));
        assert_eq!(item.completed_at, Some(at));
    }

    #[test]
    fn stored_overdue_literal_migrates_to_pending() {
        assert_eq!(TaskProgress::from_stored("overdue"), TaskProgress::Pending);
        assert_eq!(TaskProgress::from_stored("in-progress"), TaskProgress::InProgress);
    }

    #[test]
    fn default_due_date_adds_days() {
        assert_eq!(default_due_date(date(25), 7), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }
}
