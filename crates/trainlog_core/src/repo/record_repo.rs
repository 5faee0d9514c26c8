//! Record repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Store records for the lifetime of one session.
//! - Enforce the one-record-per-date key at the storage boundary.
//!
//! # Invariants
//! - `insert` rejects a date that is already stored.
//! - `list` returns records in storage order; callers sort for display.

use crate::model::date::CalendarDate;
use crate::model::record::{Record, RecordId, RecordValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(RecordValidationError),
    /// A record with this date already exists.
    DuplicateDate(CalendarDate),
    NotFound(RecordId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateDate(date) => write!(f, "record for {date} already exists"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateDate(_) => None,
            Self::NotFound(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Storage contract for training records.
pub trait RecordRepository {
    fn find_by_date(&self, date: CalendarDate) -> RepoResult<Option<Record>>;
    fn insert(&mut self, record: Record) -> RepoResult<RecordId>;
    fn update(&mut self, record: &Record) -> RepoResult<()>;
    fn list(&self) -> RepoResult<Vec<Record>>;
    /// Replaces the stored sequence wholesale, e.g. with a re-sorted copy.
    fn replace_all(&mut self, records: Vec<Record>) -> RepoResult<()>;
    /// Keeps records for which `keep` returns true; returns how many were removed.
    fn retain(&mut self, keep: &mut dyn FnMut(&Record) -> bool) -> RepoResult<usize>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Session-scoped store backed by a `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    records: Vec<Record>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordRepository for InMemoryRecordRepository {
    fn find_by_date(&self, date: CalendarDate) -> RepoResult<Option<Record>> {
        Ok(self
            .records
            .iter()
            .find(|record| record.date == date)
            .cloned())
    }

    fn insert(&mut self, record: Record) -> RepoResult<RecordId> {
        record.validate()?;
        if self.records.iter().any(|stored| stored.date == record.date) {
            return Err(RepoError::DuplicateDate(record.date));
        }

        let id = record.id;
        self.records.push(record);
        Ok(id)
    }

    fn update(&mut self, record: &Record) -> RepoResult<()> {
        record.validate()?;
        if self
            .records
            .iter()
            .any(|stored| stored.id != record.id && stored.date == record.date)
        {
            return Err(RepoError::DuplicateDate(record.date));
        }

        let stored = self
            .records
            .iter_mut()
            .find(|stored| stored.id == record.id)
            .ok_or(RepoError::NotFound(record.id))?;
        *stored = record.clone();
        Ok(())
    }

    fn list(&self) -> RepoResult<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn replace_all(&mut self, records: Vec<Record>) -> RepoResult<()> {
        for (index, record) in records.iter().enumerate() {
            record.validate()?;
            if records[..index].iter().any(|other| other.date == record.date) {
                return Err(RepoError::DuplicateDate(record.date));
            }
        }

        self.records = records;
        Ok(())
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&Record) -> bool) -> RepoResult<usize> {
        let before = self.records.len();
        self.records.retain(|record| keep(record));
        Ok(before - self.records.len())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRecordRepository, RecordRepository, RepoError};
    use crate::model::date::CalendarDate;
    use crate::model::record::{Distance, Record};

    fn record(text: &str, km: f64) -> Record {
        Record::new(CalendarDate::parse(text).unwrap(), Distance::new(km).unwrap())
    }

    #[test]
    fn insert_rejects_second_record_for_same_date() {
        let mut repo = InMemoryRecordRepository::new();
        repo.insert(record("01.01.2024", 5.0)).unwrap();

        let err = repo.insert(record("01.01.2024", 3.0)).unwrap_err();
        assert!(matches!(err, RepoError::DuplicateDate(date) if date.format() == "01.01.2024"));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn update_unknown_id_returns_not_found() {
        let mut repo = InMemoryRecordRepository::new();
        let missing = record("02.01.2024", 1.0);

        let err = repo.update(&missing).unwrap_err();
        assert_eq!(err, RepoError::NotFound(missing.id));
    }

    #[test]
    fn replace_all_rejects_duplicate_dates_and_keeps_previous_state() {
        let mut repo = InMemoryRecordRepository::new();
        repo.insert(record("03.01.2024", 2.0)).unwrap();

        let err = repo
            .replace_all(vec![record("04.01.2024", 1.0), record("04.01.2024", 2.0)])
            .unwrap_err();
        assert!(matches!(err, RepoError::DuplicateDate(_)));
        assert_eq!(repo.list().unwrap()[0].display_date(), "03.01.2024");
    }

    #[test]
    fn retain_reports_removed_count() {
        let mut repo = InMemoryRecordRepository::new();
        repo.insert(record("05.01.2024", 1.0)).unwrap();
        repo.insert(record("06.01.2024", 1.0)).unwrap();

        let removed = repo
            .retain(&mut |stored: &Record| stored.display_date() != "05.01.2024")
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(repo.len(), 1);
        assert!(!repo.is_empty());
    }
}
