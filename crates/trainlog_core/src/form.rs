//! Presentation-agnostic form model for the record widget.
//!
//! # Responsibility
//! - Hold the two text inputs and an explicit validation flag per input.
//! - Translate user events (submit, row delete, row edit) into service calls.
//! - Project stored records into display rows.
//!
//! # Invariants
//! - The date input is validated before the count input; when the date is
//!   rejected the count flag keeps its previous value.
//! - A rejected submit leaves the record store untouched.
//! - The edit row action is visible but never changes state.

use crate::model::record::{Record, RecordId};
use crate::repo::record_repo::{RecordRepository, RepoResult};
use crate::service::record_service::{RecordService, SubmitError, UpsertOutcome};
use log::debug;

/// Header and label for the date column and input.
pub const DATE_LABEL: &str = "Дата (ДД.ММ.ГГГГ)";
/// Header and label for the distance column and input.
pub const COUNT_LABEL: &str = "Пройдено км";
/// Header for the row actions column.
pub const ACTIONS_LABEL: &str = "Действия";

const MAX_LOGGED_INPUT_CHARS: usize = 32;

/// Validation flag for one input field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldStatus {
    #[default]
    Valid,
    Invalid,
}

impl FieldStatus {
    /// Background color the rendering layer paints on the input.
    pub fn background(&self) -> &'static str {
        match self {
            Self::Valid => "white",
            Self::Invalid => "red",
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

/// Form input identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Count,
}

/// Per-row action controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Shown but not wired to any behavior.
    Edit,
    Delete,
}

impl RowAction {
    pub fn is_inert(&self) -> bool {
        matches!(self, Self::Edit)
    }
}

/// One rendered line of the record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub id: RecordId,
    /// Formatted `DD.MM.YYYY` date; also the key used by row deletion.
    pub date_text: String,
    pub count_text: String,
    pub actions: [RowAction; 2],
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            date_text: record.display_date(),
            count_text: record.count.to_string(),
            actions: [RowAction::Edit, RowAction::Delete],
        }
    }
}

/// User-initiated events delivered to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    /// Delete control of the row displaying `row_date`.
    Delete { row_date: String },
    /// Edit control of the row displaying `row_date`.
    Edit { row_date: String },
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitOutcome {
    /// The named field failed validation; nothing was stored.
    Rejected(FormField),
    Saved(UpsertOutcome),
}

/// Result of handling one form event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormOutcome {
    Submitted(SubmitOutcome),
    Deleted { removed: usize },
    /// The event has no behavior (edit).
    Ignored,
}

/// Add form state: raw input text plus validation flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    date_input: String,
    count_input: String,
    date_status: FieldStatus,
    count_status: FieldStatus,
}

impl RecordForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_date_input(&mut self, text: impl Into<String>) {
        self.date_input = text.into();
    }

    pub fn set_count_input(&mut self, text: impl Into<String>) {
        self.count_input = text.into();
    }

    pub fn date_input(&self) -> &str {
        &self.date_input
    }

    pub fn count_input(&self) -> &str {
        &self.count_input
    }

    pub fn date_status(&self) -> FieldStatus {
        self.date_status
    }

    pub fn count_status(&self) -> FieldStatus {
        self.count_status
    }

    pub fn status(&self, field: FormField) -> FieldStatus {
        match field {
            FormField::Date => self.date_status,
            FormField::Count => self.count_status,
        }
    }

    /// Validates both inputs and, when valid, upserts the entry.
    ///
    /// Input text is kept after submit so the user can correct and resubmit.
    pub fn submit<R: RecordRepository>(
        &mut self,
        service: &mut RecordService<R>,
    ) -> RepoResult<SubmitOutcome> {
        match service.submit(&self.date_input, &self.count_input) {
            Ok(outcome) => {
                self.date_status = FieldStatus::Valid;
                self.count_status = FieldStatus::Valid;
                Ok(SubmitOutcome::Saved(outcome))
            }
            Err(SubmitError::InvalidDate(err)) => {
                self.date_status = FieldStatus::Invalid;
                debug!(
                    "event=form_submit module=form status=rejected field=date reason=\"{}\" input={:?}",
                    err,
                    capped(&self.date_input)
                );
                Ok(SubmitOutcome::Rejected(FormField::Date))
            }
            Err(SubmitError::InvalidCount(err)) => {
                self.date_status = FieldStatus::Valid;
                self.count_status = FieldStatus::Invalid;
                debug!(
                    "event=form_submit module=form status=rejected field=count reason=\"{}\" input={:?}",
                    err,
                    capped(&self.count_input)
                );
                Ok(SubmitOutcome::Rejected(FormField::Count))
            }
            Err(SubmitError::Repo(err)) => Err(err),
        }
    }

    /// Dispatches one user event.
    pub fn handle<R: RecordRepository>(
        &mut self,
        event: FormEvent,
        service: &mut RecordService<R>,
    ) -> RepoResult<FormOutcome> {
        match event {
            FormEvent::Submit => Ok(FormOutcome::Submitted(self.submit(service)?)),
            FormEvent::Delete { row_date } => {
                let removed = service.delete_by_display_date(&row_date)?;
                Ok(FormOutcome::Deleted { removed })
            }
            FormEvent::Edit { row_date } => {
                debug!(
                    "event=row_edit module=form status=ignored row_date={:?}",
                    capped(&row_date)
                );
                Ok(FormOutcome::Ignored)
            }
        }
    }
}

/// Projects records into display rows, preserving their order.
pub fn rows(records: &[Record]) -> Vec<RecordRow> {
    records.iter().map(RecordRow::from).collect()
}

fn capped(value: &str) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    normalized.chars().take(MAX_LOGGED_INPUT_CHARS).collect()
}
