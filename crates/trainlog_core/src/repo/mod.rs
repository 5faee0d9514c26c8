//! Repository layer for training records.
//!
//! # Responsibility
//! - Define the storage contract used by the record service.
//! - Provide the session-scoped in-memory store.
//!
//! # Invariants
//! - Repository writes must enforce `Record::validate()` before mutation.
//! - At most one record per calendar date is ever stored.

pub mod record_repo;
