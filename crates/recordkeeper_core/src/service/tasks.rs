//! Task schedule use-cases.

use crate::clock::Clock;
use crate::form::FormData;
use crate::format::{format_date, truncate_preview};
use crate::model::record::{RecordId, StatusTag, ValidationError};
use crate::model::task::{
    default_due_date, Task, TaskDraft, TaskPatch, TaskProgress, TaskStatus, TaskSummary,
};
use crate::service::crud::CrudList;
use crate::service::schema::{Facet, FilterState, Notices, RecordMeta, Schema};
use crate::view::model::{Action, ListView, Row};
use crate::view::notice::{Confirm, Notice, Notifier};
use chrono::{DateTime, NaiveDate, Utc};
use std::borrow::Cow;
use std::sync::Arc;

const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct TaskSchema {
    pub due_days: u32,
}

impl Schema for TaskSchema {
    type Record = Task;
    type Draft = TaskDraft;
    type Patch = TaskPatch;
    type Status = TaskStatus;

    fn entity(&self) -> &'static str {
        "task"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Task", "Priority", "Assigned To", "Due Date", "Description"]
    }

    fn notices(&self) -> Notices {
        Notices {
            created: Some("Task created successfully"),
            updated: Some("Task updated successfully"),
            deleted: Some("Task deleted successfully"),
            delete_prompt: "Are you sure you want to delete this task?",
        }
    }

    fn validate(&self, draft: &TaskDraft) -> Result<(), ValidationError> {
        draft.validate()
    }

    fn build(&mut self, draft: TaskDraft, meta: RecordMeta) -> Task {
        let start_date = draft
            .start_date
            .unwrap_or_else(|| meta.created_at.date_naive());
        Task {
            id: meta.id,
            title: draft.title,
            priority: draft.priority,
            assigned_to: draft.assigned_to,
            category: draft.category,
            start_date,
            due_date: draft
                .due_date
                .unwrap_or_else(|| default_due_date(start_date, self.due_days)),
            description: draft.description,
            progress: TaskProgress::Pending,
            created_at: meta.created_at,
            completed_at: None,
        }
    }

    fn merge(
        &self,
        record: &mut Task,
        patch: TaskPatch,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        patch.apply(record)
    }

    fn searchable<'r>(&self, record: &'r Task) -> Vec<&'r str> {
        vec![
            record.title.as_str(),
            record.description.as_str(),
            record.assigned_to.as_str(),
        ]
    }

    fn facet<'r>(&self, record: &'r Task, facet: Facet, now: DateTime<Utc>) -> Option<Cow<'r, str>> {
        match facet {
            Facet::Status => Some(Cow::Borrowed(self.derive_status(record, now).tag())),
            Facet::Priority => Some(Cow::Borrowed(record.priority.tag())),
            Facet::Category => Some(Cow::Borrowed(record.category.as_str())),
            Facet::Kind => None,
        }
    }

    fn derive_status(&self, record: &Task, now: DateTime<Utc>) -> TaskStatus {
        record.status(now.date_naive())
    }

    fn project(&self, record: &Task, now: DateTime<Utc>) -> Row {
        let mut actions = Vec::with_capacity(4);
        match record.progress {
            TaskProgress::Pending => actions.push(Action::Start),
            TaskProgress::InProgress => actions.push(Action::Complete),
            TaskProgress::Completed => {}
        }
        actions.extend([Action::Edit, Action::Delete]);
        Row::new(
            record.id.clone(),
            vec![
                record.title.clone(),
                record.priority.label().to_string(),
                record.assigned_to.clone(),
                format_date(record.due_date),
                truncate_preview(&record.description, PREVIEW_CHARS),
            ],
        )
        .with_badge(self.derive_status(record, now))
        .with_actions(actions)
        .with_emphasis(record.priority.tag())
    }
}

pub struct TaskManager {
    tasks: CrudList<TaskSchema>,
}

impl TaskManager {
    pub fn new(
        due_days: u32,
        seed: Vec<Task>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            tasks: CrudList::seeded(TaskSchema { due_days }, seed, clock, notifier),
        }
    }

    pub fn tasks(&self) -> &CrudList<TaskSchema> {
        &self.tasks
    }

    /// Form defaults: today and today plus the scheduling term.
    pub fn default_dates(&self) -> (NaiveDate, NaiveDate) {
        let today = self.tasks.now().date_naive();
        (today, default_due_date(today, self.tasks.schema().due_days))
    }

    pub fn create(&mut self, draft: TaskDraft) -> Result<RecordId, ValidationError> {
        self.tasks.create(draft)
    }

    pub fn create_from_form(&mut self, form: &FormData) -> Result<RecordId, ValidationError> {
        self.create(TaskDraft::from_form(form))
    }

    pub fn update(&mut self, id: &RecordId, patch: TaskPatch) -> Result<bool, ValidationError> {
        self.tasks.update(id, patch)
    }

    pub fn update_from_form(
        &mut self,
        id: &RecordId,
        form: &FormData,
    ) -> Result<bool, ValidationError> {
        self.update(id, TaskPatch::from_form(form))
    }

    pub fn delete(&mut self, id: &RecordId, confirm: &dyn Confirm) -> bool {
        self.tasks.delete(id, confirm)
    }

    pub fn start(&mut self, id: &RecordId) -> bool {
        let changed = self.tasks.transition(id, |task, _| task.start());
        if changed {
            self.tasks
                .notify(Notice::success("Task marked as in-progress"));
        }
        changed
    }

    pub fn complete(&mut self, id: &RecordId) -> bool {
        let changed = self.tasks.transition(id, |task, now| task.complete(now));
        if changed {
            self.tasks.notify(Notice::success("Task marked as completed"));
        }
        changed
    }

    pub fn view(&self, filter: FilterState) -> ListView {
        self.tasks.list(filter).render()
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::from_tasks(self.tasks.records(), self.tasks.now().date_naive())
    }
}
