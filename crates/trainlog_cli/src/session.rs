//! Line-oriented session driving the record form.
//!
//! Each input line is one user action; after every action the form fields
//! and the record table are printed again.

use anyhow::Result;
use log::info;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use trainlog_core::form::{ACTIONS_LABEL, COUNT_LABEL, DATE_LABEL};
use trainlog_core::{
    rows, FieldStatus, FormEvent, FormField, FormOutcome, InMemoryRecordRepository, RecordForm,
    RecordId, RecordService, RowAction, SubmitOutcome,
};

const HELP: &str = "\
commands:
  add <DD.MM.YYYY> <km>   add distance for a date (merges with an existing date)
  delete <DD.MM.YYYY>     delete the row showing this date
  delete-id <uuid>        delete the record with this id
  edit <DD.MM.YYYY>       edit the row showing this date (not available)
  list                    show all records
  help                    show this help
  quit                    leave the session";

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { date: String, count: String },
    Delete { date: String },
    DeleteId(RecordId),
    Edit { date: String },
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidId(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::Unknown(name) => write!(f, "unknown command `{name}`; try `help`"),
            Self::MissingArgument(name) => write!(f, "missing argument <{name}>"),
            Self::InvalidId(reason) => write!(f, "invalid record id: {reason}"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parses one input line.
///
/// `add` keeps missing fields as empty text so the form can flag them.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let name = parts.next().ok_or(CommandError::Empty)?;
    let mut arg = |label: &'static str| {
        parts
            .next()
            .map(str::to_string)
            .ok_or(CommandError::MissingArgument(label))
    };

    match name.to_ascii_lowercase().as_str() {
        "add" => Ok(Command::Add {
            date: arg("date").unwrap_or_default(),
            count: arg("km").unwrap_or_default(),
        }),
        "delete" | "rm" => Ok(Command::Delete { date: arg("date")? }),
        "delete-id" => {
            let raw = arg("uuid")?;
            let id = RecordId::parse_str(&raw)
                .map_err(|err| CommandError::InvalidId(err.to_string()))?;
            Ok(Command::DeleteId(id))
        }
        "edit" => Ok(Command::Edit { date: arg("date")? }),
        "list" | "ls" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Session state: the record store and the add form.
pub struct Session {
    service: RecordService<InMemoryRecordRepository>,
    form: RecordForm,
    json: bool,
}

impl Session {
    pub fn new(json: bool) -> Self {
        Self {
            service: RecordService::new(InMemoryRecordRepository::new()),
            form: RecordForm::new(),
            json,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<()> {
        writeln!(out, "{HELP}")?;
        self.render(&mut out)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(command) => {
                    if !self.execute(command, &mut out)? {
                        break;
                    }
                }
                Err(err) => writeln!(out, "error: {err}")?,
            }
        }

        info!(
            "event=session_end module=cli status=ok records={}",
            self.service.len()
        );
        Ok(())
    }

    /// Applies one command. Returns `false` when the session should end.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<bool> {
        let outcome = match command {
            Command::Add { date, count } => {
                self.form.set_date_input(date);
                self.form.set_count_input(count);
                Some(self.form.handle(FormEvent::Submit, &mut self.service)?)
            }
            Command::Delete { date } => Some(
                self.form
                    .handle(FormEvent::Delete { row_date: date }, &mut self.service)?,
            ),
            Command::DeleteId(id) => {
                let removed = self.service.delete_by_id(id)?;
                Some(FormOutcome::Deleted {
                    removed: usize::from(removed),
                })
            }
            Command::Edit { date } => Some(
                self.form
                    .handle(FormEvent::Edit { row_date: date }, &mut self.service)?,
            ),
            Command::List => None,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        };

        if let Some(outcome) = outcome {
            report(outcome, out)?;
        }
        self.render(out)?;
        Ok(true)
    }

    fn render(&self, out: &mut impl Write) -> Result<()> {
        writeln!(
            out,
            "{DATE_LABEL}: [{}] {}   {COUNT_LABEL}: [{}] {}",
            self.form.date_input(),
            marker(self.form.date_status()),
            self.form.count_input(),
            marker(self.form.count_status()),
        )?;

        let records = self.service.records()?;
        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
            return Ok(());
        }

        writeln!(out, "{DATE_LABEL:<20}{COUNT_LABEL:<14}{ACTIONS_LABEL}")?;
        for row in rows(&records) {
            let actions = row
                .actions
                .iter()
                .map(|action| match action {
                    RowAction::Edit => "[edit]",
                    RowAction::Delete => "[x]",
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{:<20}{:<14}{}", row.date_text, row.count_text, actions)?;
        }
        Ok(())
    }
}

fn report(outcome: FormOutcome, out: &mut impl Write) -> Result<()> {
    match outcome {
        FormOutcome::Submitted(SubmitOutcome::Rejected(field)) => {
            let label = match field {
                FormField::Date => DATE_LABEL,
                FormField::Count => COUNT_LABEL,
            };
            info!("event=submit_rejected module=cli field={:?}", field);
            writeln!(out, "invalid input: {label}")?;
        }
        FormOutcome::Submitted(SubmitOutcome::Saved(_)) => {}
        FormOutcome::Deleted { removed } => {
            if removed == 0 {
                writeln!(out, "nothing to delete")?;
            }
        }
        FormOutcome::Ignored => writeln!(out, "edit is not available")?,
    }
    Ok(())
}

fn marker(status: FieldStatus) -> String {
    format!("({})", status.background())
}
