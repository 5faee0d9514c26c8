//! Domain model for training records.
//!
//! # Responsibility
//! - Define the record shape and its date key.
//! - Own input parsing for the two user-entered fields.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Deletion removes records outright; there are no tombstones.

pub mod date;
pub mod record;
