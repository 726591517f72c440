use split_ledger::domain::{Draft, InMemoryDirectory, Ledger, Money, ParticipantId, SplitMethod};
use split_ledger::engine::AllocationEngine;

/// Engine over a directory with the given (id, name) pairs.
pub fn engine(entries: &[(u32, &str)]) -> AllocationEngine<InMemoryDirectory> {
    let mut directory = InMemoryDirectory::new();
    for &(id, name) in entries {
        directory.insert(id.into(), name);
    }
    AllocationEngine::new(directory)
}

/// Draft titled "Dinner" composed by user 0, with the given total text,
/// method, and participants.
pub fn draft(total: &str, method: SplitMethod, participants: &[u32]) -> Draft {
    let mut draft = Draft::new(0.into());
    draft.set_title("Dinner");
    draft.set_total(Money::parse(total));
    draft.set_method(method);
    for &id in participants {
        draft.add_participant(id.into());
    }
    draft
}

/// The computed cents owed by one participant.
#[allow(dead_code)]
pub fn owed_cents(ledger: &Ledger, id: u32) -> i64 {
    ledger.owed_by()[&ParticipantId::from(id)].amount().cents()
}

/// The cents paid by one participant.
#[allow(dead_code)]
pub fn paid_cents(ledger: &Ledger, id: u32) -> i64 {
    ledger.paid_by()[&ParticipantId::from(id)].cents()
}

/// Sum of all owed entries, in cents.
#[allow(dead_code)]
pub fn owed_total(ledger: &Ledger) -> i64 {
    ledger.owed_by().values().map(|share| share.amount().cents()).sum()
}
