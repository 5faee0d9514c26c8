//! Record upsert, deletion and listing use cases.
//!
//! # Responsibility
//! - Merge submitted entries into the store keyed by calendar date.
//! - Keep the stored sequence sorted by date descending after every add.
//! - Remove records by displayed date text or by id.
//!
//! # Invariants
//! - Rejected input never mutates the store.
//! - A merge keeps the existing record id and adds to its distance.
//! - `records()` is always strictly descending by date.

use crate::model::date::{CalendarDate, DateParseError};
use crate::model::record::{CountParseError, Distance, Record, RecordId};
use crate::repo::record_repo::{RecordRepository, RepoError, RepoResult};
use log::{debug, info};
use std::cmp::Reverse;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result of a successful add.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpsertOutcome {
    /// No record existed for the date; a new one was stored.
    Created { id: RecordId, count: Distance },
    /// An existing record absorbed the submitted distance.
    Merged { id: RecordId, count: Distance },
}

impl UpsertOutcome {
    pub fn id(&self) -> RecordId {
        match self {
            Self::Created { id, .. } | Self::Merged { id, .. } => *id,
        }
    }

    /// Distance stored on the record after the add.
    pub fn count(&self) -> Distance {
        match self {
            Self::Created { count, .. } | Self::Merged { count, .. } => *count,
        }
    }
}

/// Service error for the text-input submit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    InvalidDate(DateParseError),
    InvalidCount(CountParseError),
    Repo(RepoError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(err) => write!(f, "invalid date: {err}"),
            Self::InvalidCount(err) => write!(f, "invalid distance: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(err) => Some(err),
            Self::InvalidCount(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DateParseError> for SubmitError {
    fn from(value: DateParseError) -> Self {
        Self::InvalidDate(value)
    }
}

impl From<CountParseError> for SubmitError {
    fn from(value: CountParseError) -> Self {
        Self::InvalidCount(value)
    }
}

impl From<RepoError> for SubmitError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Record service facade over repository implementations.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Parses raw date and distance text, then adds the entry.
    ///
    /// Date is validated before distance, so an input with both fields wrong
    /// reports `InvalidDate`.
    pub fn submit(
        &mut self,
        date_text: &str,
        count_text: &str,
    ) -> Result<UpsertOutcome, SubmitError> {
        let date = CalendarDate::parse(date_text)?;
        let count = Distance::parse(count_text)?;
        self.add_entry(date, count)
    }

    /// Merges `count` into the record for `date`, creating it when absent.
    ///
    /// # Contract
    /// - Existing date: count becomes `existing + count`, id unchanged.
    /// - New date: a record with a fresh id is stored.
    /// - Either way the stored sequence is re-sorted by date descending.
    ///
    /// # Errors
    /// - `InvalidCount(NotFinite)` when the merged total overflows; the store
    ///   is left unchanged.
    pub fn add_entry(
        &mut self,
        date: CalendarDate,
        count: Distance,
    ) -> Result<UpsertOutcome, SubmitError> {
        let outcome = match self.repo.find_by_date(date)? {
            Some(mut existing) => {
                existing.merge(count)?;
                self.repo.update(&existing)?;
                UpsertOutcome::Merged {
                    id: existing.id,
                    count: existing.count,
                }
            }
            None => {
                let record = Record::new(date, count);
                let id = self.repo.insert(record)?;
                UpsertOutcome::Created { id, count }
            }
        };

        let sorted = sort_descending(self.repo.list()?);
        self.repo.replace_all(sorted)?;

        info!(
            "event=record_add module=service status={} id={} date={} total={}",
            match outcome {
                UpsertOutcome::Created { .. } => "created",
                UpsertOutcome::Merged { .. } => "merged",
            },
            outcome.id(),
            date,
            outcome.count()
        );
        Ok(outcome)
    }

    /// Removes every record whose formatted date equals `date_text` exactly.
    ///
    /// Matching is plain string equality against the displayed form; text
    /// that matches nothing is a no-op. Returns the number removed.
    pub fn delete_by_display_date(&mut self, date_text: &str) -> RepoResult<usize> {
        let removed = self
            .repo
            .retain(&mut |record: &Record| record.display_date() != date_text)?;
        info!(
            "event=record_delete module=service match=display_date removed={}",
            removed
        );
        Ok(removed)
    }

    /// Removes the record with `id`. Returns whether anything was removed.
    pub fn delete_by_id(&mut self, id: RecordId) -> RepoResult<bool> {
        let removed = self.repo.retain(&mut |record: &Record| record.id != id)?;
        info!(
            "event=record_delete module=service match=id id={} removed={}",
            id, removed
        );
        Ok(removed > 0)
    }

    /// Returns a snapshot of all records, most recent date first.
    pub fn records(&self) -> RepoResult<Vec<Record>> {
        let records = sort_descending(self.repo.list()?);
        debug!("event=record_list module=service count={}", records.len());
        Ok(records)
    }

    /// Finds the record for `date`, if any.
    pub fn find_by_date(&self, date: CalendarDate) -> RepoResult<Option<Record>> {
        self.repo.find_by_date(date)
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }
}

fn sort_descending(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_key(|record| Reverse(record.date));
    records
}
