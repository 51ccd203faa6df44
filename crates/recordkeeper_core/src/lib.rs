//! Core domain logic for Smart Record Keeper.
//! This crate is the single source of truth for business invariants; hosts
//! only render the view-models it produces.

pub mod app;
pub mod clock;
pub mod config;
pub mod export;
pub mod form;
pub mod format;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod session;
pub mod view;

pub use app::AppContext;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use export::CsvDocument;
pub use form::FormData;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{RecordId, ValidationError};
pub use service::crud::CrudList;
pub use service::schema::{Facet, FilterState, Schema};
pub use session::Session;
pub use view::model::{ListView, MetricCard, Row, SectionView, Tone};
pub use view::navigation::{Navigator, Section};
pub use view::notice::{
    AutoConfirm, Confirm, LogNotifier, Notice, NoticeLevel, Notifier, RecordingNotifier,
};
pub use view::text::{Presenter, TextPresenter};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
