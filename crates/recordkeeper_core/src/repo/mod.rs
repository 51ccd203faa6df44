//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define keyed collection contracts used by the managers.
//! - Isolate ordering/storage details from service orchestration.
//!
//! # Invariants
//! - Repositories do not validate; managers validate before writing.
//! - Missing ids surface as `None`, never as panics.

pub mod record_repo;
