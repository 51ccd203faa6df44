//! View-models and presentation seams.
//!
//! # Responsibility
//! - Describe rendered output as plain data (`ListView`, `SectionView`).
//! - Define the notice/confirmation contracts a host UI implements.
//! - Track the selected section and tabs.
//! - Provide one plain-text presenter; other presenters consume the same
//!   view-models.
//!
//! # Invariants
//! - Nothing in this module mutates domain collections.

pub mod model;
pub mod navigation;
pub mod notice;
pub mod text;
