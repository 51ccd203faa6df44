//! Generic CRUD-list manager shared by every domain.
//!
//! # Responsibility
//! - Validate, build and insert records through one `Schema`.
//! - Apply partial patches and confirmed deletes keyed by `RecordId`.
//! - Expose lazy filtered views and their pure projections.
//!
//! # Invariants
//! - Failed validation leaves the collection untouched.
//! - Unknown ids are silent no-ops on every mutation path.
//! - Ids handed out by one list are never reused, even after deletion.
//! - Log lines carry ids and counts only, never record content.

use crate::clock::Clock;
use crate::model::record::{Keyed, RecordId, ValidationError};
use crate::repo::record_repo::{InMemoryRepository, RecordRepository};
use crate::service::schema::{matches_filter, FilterState, RecordMeta, Schema};
use crate::view::model::{ListView, TableView};
use crate::view::notice::{Confirm, Notice, Notifier};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Source of fresh record ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdAllocator {
    /// Time-ordered UUIDv7 strings.
    TimeOrdered,
    /// `<prefix><n>` with `n` increasing by one per allocation.
    Sequence { prefix: &'static str, next: u64 },
}

impl IdAllocator {
    pub fn sequence(prefix: &'static str, first: u64) -> Self {
        Self::Sequence {
            prefix,
            next: first,
        }
    }

    /// Returns the next id not accepted by `taken`.
    fn allocate(&mut self, taken: impl Fn(&RecordId) -> bool) -> RecordId {
        loop {
            let candidate = match self {
                Self::TimeOrdered => RecordId::new(Uuid::now_v7().to_string()),
                Self::Sequence { prefix, next } => {
                    let id = RecordId::new(format!("{prefix}{next}"));
                    *next += 1;
                    id
                }
            };
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}

/// One ordered collection managed through a [`Schema`].
pub struct CrudList<S, R = InMemoryRepository<<S as Schema>::Record>>
where
    S: Schema,
    R: RecordRepository<S::Record>,
{
    schema: S,
    repo: R,
    ids: IdAllocator,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl<S: Schema> CrudList<S> {
    /// Creates a list over an in-memory repository preloaded with `seed`.
    pub fn seeded(
        schema: S,
        seed: Vec<S::Record>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_repo(schema, InMemoryRepository::from_seed(seed), clock, notifier)
    }
}

impl<S: Schema, R: RecordRepository<S::Record>> CrudList<S, R> {
    pub fn with_repo(
        schema: S,
        repo: R,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            schema,
            repo,
            ids: IdAllocator::TimeOrdered,
            clock,
            notifier,
        }
    }

    /// Replaces the id source, for collections with human-readable ids.
    pub fn with_ids(mut self, ids: IdAllocator) -> Self {
        self.ids = ids;
        self
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    /// Validates and inserts a new record at the front.
    ///
    /// # Errors
    /// - Returns the validation failure; an error notice with the same
    ///   message is emitted and nothing is inserted.
    pub fn create(&mut self, draft: S::Draft) -> Result<RecordId, ValidationError> {
        if let Err(err) = self.schema.validate(&draft) {
            warn!(
                "event=record_create module={} status=error field={}",
                self.schema.entity(),
                err.field().unwrap_or("-")
            );
            self.notifier.notify(Notice::error(err.to_string()));
            return Err(err);
        }

        let repo = &self.repo;
        let id = self.ids.allocate(|candidate| repo.contains(candidate));
        let meta = RecordMeta {
            id: id.clone(),
            created_at: self.clock.now(),
        };
        let record = self.schema.build(draft, meta);
        self.repo.insert_front(record);

        info!(
            "event=record_create module={} status=ok id={} count={}",
            self.schema.entity(),
            id,
            self.repo.len()
        );
        if let Some(message) = self.schema.notices().created {
            self.notifier.notify(Notice::success(message));
        }
        Ok(id)
    }

    /// Merges a partial patch into one record.
    ///
    /// Returns `Ok(false)` when `id` is unknown.
    ///
    /// # Errors
    /// - Returns the validation failure; the stored record is unchanged.
    pub fn update(&mut self, id: &RecordId, patch: S::Patch) -> Result<bool, ValidationError> {
        let now = self.clock.now();
        let Some(current) = self.repo.get(id) else {
            info!(
                "event=record_update module={} status=noop id={id}",
                self.schema.entity()
            );
            return Ok(false);
        };

        let mut candidate = current.clone();
        if let Err(err) = self.schema.merge(&mut candidate, patch, now) {
            warn!(
                "event=record_update module={} status=error id={id} field={}",
                self.schema.entity(),
                err.field().unwrap_or("-")
            );
            self.notifier.notify(Notice::error(err.to_string()));
            return Err(err);
        }

        if let Some(slot) = self.repo.get_mut(id) {
            *slot = candidate;
        }
        info!(
            "event=record_update module={} status=ok id={id}",
            self.schema.entity()
        );
        if let Some(message) = self.schema.notices().updated {
            self.notifier.notify(Notice::success(message));
        }
        Ok(true)
    }

    /// Removes one record after confirmation. Returns whether it was removed.
    pub fn delete(&mut self, id: &RecordId, confirm: &dyn Confirm) -> bool {
        if !self.repo.contains(id) {
            info!(
                "event=record_delete module={} status=noop id={id}",
                self.schema.entity()
            );
            return false;
        }
        if !confirm.confirm(self.schema.notices().delete_prompt) {
            info!(
                "event=record_delete module={} status=declined id={id}",
                self.schema.entity()
            );
            return false;
        }

        let removed = self.repo.remove(id).is_some();
        info!(
            "event=record_delete module={} status=ok id={id} count={}",
            self.schema.entity(),
            self.repo.len()
        );
        if removed {
            if let Some(message) = self.schema.notices().deleted {
                self.notifier.notify(Notice::success(message));
            }
        }
        removed
    }

    /// Applies a dedicated state transition in place.
    ///
    /// `apply` returns `false` when the record is not in a state the
    /// transition accepts; nothing is changed in that case.
    pub fn transition<F>(&mut self, id: &RecordId, apply: F) -> bool
    where
        F: FnOnce(&mut S::Record, DateTime<Utc>) -> bool,
    {
        let now = self.clock.now();
        let Some(current) = self.repo.get(id) else {
            return false;
        };
        let mut candidate = current.clone();
        if !apply(&mut candidate, now) {
            info!(
                "event=record_transition module={} status=noop id={id}",
                self.schema.entity()
            );
            return false;
        }
        if let Some(slot) = self.repo.get_mut(id) {
            *slot = candidate;
        }
        info!(
            "event=record_transition module={} status=ok id={id}",
            self.schema.entity()
        );
        true
    }

    pub fn get(&self, id: &RecordId) -> Option<&S::Record> {
        self.repo.get(id)
    }

    /// All records in display order.
    pub fn records(&self) -> &[S::Record] {
        self.repo.records()
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }

    pub fn derive_status(&self, record: &S::Record) -> S::Status {
        self.schema.derive_status(record, self.clock.now())
    }

    /// Returns a lazy view over the records matching `filter`.
    pub fn list(&self, filter: FilterState) -> FilteredView<'_, S> {
        FilteredView {
            schema: &self.schema,
            records: self.repo.records(),
            needle: filter.needle(),
            filter,
            now: self.clock.now(),
        }
    }

    /// Projects a filtered view into a table, or the empty state.
    pub fn render(&self, view: &FilteredView<'_, S>) -> ListView {
        view.render()
    }
}

/// Restartable filtered view; every `iter()` call re-walks the records.
pub struct FilteredView<'a, S: Schema> {
    schema: &'a S,
    records: &'a [S::Record],
    filter: FilterState,
    needle: Option<String>,
    now: DateTime<Utc>,
}

impl<'a, S: Schema> FilteredView<'a, S> {
    pub fn iter(&self) -> impl Iterator<Item = &'a S::Record> + '_ {
        self.records.iter().filter(move |record| {
            matches_filter(
                self.schema,
                record,
                &self.filter,
                self.needle.as_deref(),
                self.now,
            )
        })
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.iter().map(|record| record.record_id().clone()).collect()
    }

    pub fn render(&self) -> ListView {
        let rows = self
            .iter()
            .map(|record| self.schema.project(record, self.now))
            .collect::<Vec<_>>();
        if rows.is_empty() {
            return ListView::Empty(self.schema.empty_state());
        }
        ListView::Table(TableView {
            entity: self.schema.entity(),
            columns: self.schema.columns().to_vec(),
            rows,
        })
    }
}
