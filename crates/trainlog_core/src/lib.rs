//! Core domain logic for trainlog.
//! This crate is the single source of truth for record invariants.

pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use form::{
    rows, FieldStatus, FormEvent, FormField, FormOutcome, RecordForm, RecordRow, RowAction,
    SubmitOutcome,
};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LogTarget, LoggingError,
};
pub use model::date::{CalendarDate, DateParseError};
pub use model::record::{CountParseError, Distance, Record, RecordId, RecordValidationError};
pub use repo::record_repo::{InMemoryRecordRepository, RecordRepository, RepoError, RepoResult};
pub use service::record_service::{RecordService, SubmitError, UpsertOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
