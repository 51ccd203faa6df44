//! Core use-case services.
//!
//! # Responsibility
//! - Drive every domain list through the shared `crud::CrudList`.
//! - Keep presenters decoupled from collection and status rules.

pub mod communication;
pub mod crud;
pub mod invoices;
pub mod ledger;
pub mod reports;
pub mod sales;
pub mod schema;
pub mod stock;
pub mod support;
pub mod tasks;
