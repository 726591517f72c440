//! Serializes a finalized ledger to CSV.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{Ledger, ParticipantDirectory, ParticipantId};

/// One row per person involved: what they paid, what they owe, and the raw
/// input behind their share.
#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    participant: ParticipantId,
    name: &'a str,
    paid: String,
    owed: String,
    raw_input: &'a str,
}

pub fn write_ledger(
    ledger: &Ledger,
    directory: &impl ParticipantDirectory,
    writer: impl std::io::Write,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let everyone: BTreeSet<ParticipantId> = ledger
        .paid_by()
        .keys()
        .chain(ledger.owed_by().keys())
        .copied()
        .collect();
    for id in everyone {
        let share = ledger.owed_by().get(&id);
        let row = LedgerRow {
            participant: id,
            name: directory.display_name(id).unwrap_or_default(),
            paid: ledger.paid_by().get(&id).copied().unwrap_or_default().to_string(),
            owed: share.map(|s| s.amount()).unwrap_or_default().to_string(),
            raw_input: share.and_then(|s| s.raw()).unwrap_or_default(),
        };
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
