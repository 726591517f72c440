//! CSV deserialization of draft descriptions.
//!
//! Parsing happens in two stages:
//! 1. Serde deserializes each CSV row into a flat `CsvRow`.
//! 2. `TryFrom<CsvRow>` converts it into a typed `DraftCommand`.
//!
//! Malformed rows or missing required fields are logged and skipped.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Draft, InMemoryDirectory, Money, ParticipantId, SplitMethod};

#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RowKind {
    Title,
    Total,
    Method,
    Participant,
    Payer,
    Input,
}

/// Flat representation of a single CSV row. `id` is only present for rows
/// about one participant; `value` carries the row's free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CsvRow {
    kind: RowKind,
    id: Option<ParticipantId>,
    name: Option<String>,
    value: Option<String>,
}

/// One edit applied to the draft being assembled.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftCommand {
    Title(String),
    Total(Money),
    Method(SplitMethod),
    Participant { id: ParticipantId, name: String },
    Payer { id: ParticipantId, amount: Option<String> },
    Input { id: ParticipantId, value: String },
}

/// Returns an iterator that lazily deserializes CSV rows into draft commands,
/// skipping any rows that fail to parse or convert.
pub fn deserialize_csv<D: std::io::Read>(
    reader: &mut csv::Reader<D>,
) -> impl Iterator<Item = DraftCommand> {
    reader
        .deserialize::<CsvRow>()
        .filter_map(|result| match result {
            Ok(row) => Some(row),
            Err(e) => {
                // skipping malformed row and logging the error
                warn!("Failed to parse draft row: {e}");
                None
            }
        })
        .filter_map(|row| match DraftCommand::try_from(row) {
            Ok(command) => Some(command),
            Err(e) => {
                // skipping row that failed to convert and logging the error
                warn!("Failed to convert CsvRow to DraftCommand: {e}");
                None
            }
        })
}

#[derive(Debug, thiserror::Error)]
enum IntoCommandError {
    #[error("Missing participant id")]
    MissingId,
    #[error("Missing value")]
    MissingValue,
    #[error("Unknown split method: {0}")]
    UnknownMethod(String),
}

impl TryFrom<CsvRow> for DraftCommand {
    type Error = IntoCommandError;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        match row.kind {
            RowKind::Title => Ok(DraftCommand::Title(
                row.value.ok_or(IntoCommandError::MissingValue)?,
            )),
            RowKind::Total => Ok(DraftCommand::Total(Money::parse(
                &row.value.ok_or(IntoCommandError::MissingValue)?,
            ))),
            RowKind::Method => {
                let value = row.value.ok_or(IntoCommandError::MissingValue)?;
                Ok(DraftCommand::Method(parse_method(&value)?))
            }
            RowKind::Participant => Ok(DraftCommand::Participant {
                id: row.id.ok_or(IntoCommandError::MissingId)?,
                name: row.name.unwrap_or_default(),
            }),
            RowKind::Payer => Ok(DraftCommand::Payer {
                id: row.id.ok_or(IntoCommandError::MissingId)?,
                amount: row.value,
            }),
            RowKind::Input => Ok(DraftCommand::Input {
                id: row.id.ok_or(IntoCommandError::MissingId)?,
                value: row.value.ok_or(IntoCommandError::MissingValue)?,
            }),
        }
    }
}

fn parse_method(value: &str) -> Result<SplitMethod, IntoCommandError> {
    match value {
        "equal" => Ok(SplitMethod::Equal),
        "percentage" => Ok(SplitMethod::Percentage),
        "exact_amount" => Ok(SplitMethod::ExactAmount),
        "adjustment" => Ok(SplitMethod::Adjustment),
        "shares" => Ok(SplitMethod::Shares),
        other => Err(IntoCommandError::UnknownMethod(other.to_owned())),
    }
}

/// Folds commands into a draft, plus the directory of display names seen in
/// `participant` rows.
pub fn assemble(
    commands: impl Iterator<Item = DraftCommand>,
    current_user: ParticipantId,
) -> (Draft, InMemoryDirectory) {
    let mut draft = Draft::new(current_user);
    let mut directory = InMemoryDirectory::new();
    for command in commands {
        match command {
            DraftCommand::Title(title) => draft.set_title(title),
            DraftCommand::Total(total) => draft.set_total(total),
            DraftCommand::Method(method) => draft.set_method(method),
            DraftCommand::Participant { id, name } => {
                directory.insert(id, name);
                draft.add_participant(id);
            }
            DraftCommand::Payer { id, amount } => {
                draft.add_payer(id);
                if let Some(amount) = amount {
                    draft.set_payer_amount(id, amount);
                }
            }
            DraftCommand::Input { id, value } => draft.set_raw_input(id, value),
        }
    }
    (draft, directory)
}
