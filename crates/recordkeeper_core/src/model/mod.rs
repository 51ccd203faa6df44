//! Domain model for every dashboard collection.
//!
//! # Responsibility
//! - Define the record shapes owned by the dashboard managers.
//! - Keep status derivation next to the fields it reads.
//!
//! # Invariants
//! - Every record is identified by a `RecordId` unique within its store.
//! - Derived statuses are pure functions of `(record, now)`.
//! - Deletion removes records outright; there are no tombstones.

pub mod communication;
pub mod invoice;
pub mod ledger;
pub mod record;
pub mod report;
pub mod sale;
pub mod stock;
pub mod task;
pub mod ticket;
