//! Allocation engine.
//!
//! Validates a draft on every mutation (live message) and, on submit, turns
//! it into a finalized per-person ledger: who paid what and who owes what.
//! The engine is synchronous, performs no I/O, and owns no draft state - a
//! `finalize` call is a pure function of the draft snapshot it is given.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, dec};
use tracing::warn;

use crate::domain::{
    Draft, Ledger, Money, ParticipantDirectory, ParticipantId, SplitMethod, SplitShare,
};
pub use errors::ValidationError;
pub use roundtrip::reopen;

pub mod errors;
mod roundtrip;
mod split;

/// Percentages must reach 100 to within this many points.
const PERCENT_TOLERANCE: Decimal = dec!(0.1);

/// Turns drafts into ledgers. Holds the participant directory used for
/// deterministic display-name ordering.
pub struct AllocationEngine<D> {
    directory: D,
}

impl<D: ParticipantDirectory> AllocationEngine<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Checks whether `draft` can be finalized.
    ///
    /// Rules run in a fixed order and the first failure wins, so the caller
    /// always has exactly one message to show. Runs on every draft mutation
    /// and once more, authoritatively, inside `finalize`.
    pub fn validate(&self, draft: &Draft) -> Result<(), ValidationError> {
        if draft.title().trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if !draft.total().is_positive() {
            return Err(ValidationError::NonPositiveAmount);
        }
        if draft.participants().is_empty() {
            return Err(ValidationError::EmptyParticipants);
        }
        check_payers(draft)?;
        check_method(draft)
    }

    /// Single entry point: validate, compute who paid and who owes, and
    /// return the immutable ledger. Atomic - either a complete ledger is
    /// produced or nothing is. Raw inputs are retained verbatim on each
    /// split so a later edit can recover them.
    pub fn finalize(&self, draft: &Draft) -> Result<Ledger, ValidationError> {
        self.validate(draft)?;
        warn_stale_entries(draft);

        let paid_by = paid_by(draft);
        let ordered = self.ordered_participants(draft);
        let owed = split::allocate(draft.method(), draft.total(), &ordered, draft.raw_inputs());

        let owed_by = owed
            .into_iter()
            .map(|(id, amount)| {
                let raw = match draft.method() {
                    SplitMethod::Equal => None,
                    _ => draft.raw_input(id).map(str::to_owned),
                };
                (id, SplitShare::new(amount, raw))
            })
            .collect();

        Ok(Ledger::from_records(
            draft.title().to_owned(),
            draft.total(),
            draft.method(),
            paid_by,
            owed_by,
        ))
    }

    /// Participants sorted by display name ascending (ids break ties; a
    /// missing name sorts as the empty string). This fixed order decides who
    /// absorbs remainder cents and must reproduce identically when a
    /// persisted transaction is reopened for editing.
    fn ordered_participants(&self, draft: &Draft) -> Vec<ParticipantId> {
        let mut ordered: Vec<ParticipantId> = draft.participants().iter().copied().collect();
        ordered.sort_by(|a, b| {
            let name_a = self.directory.display_name(*a).unwrap_or_default();
            let name_b = self.directory.display_name(*b).unwrap_or_default();
            name_a.cmp(name_b).then_with(|| a.cmp(b))
        });
        ordered
    }
}

/// With a single payer the amount field is auto-filled, so only multi-payer
/// drafts can be unbalanced.
fn check_payers(draft: &Draft) -> Result<(), ValidationError> {
    if draft.payers().len() <= 1 {
        return Ok(());
    }
    let paid: Money = draft
        .payers()
        .iter()
        .map(|&id| split::raw_money(draft.payer_amounts(), id))
        .sum();
    if paid != draft.total() {
        return Err(ValidationError::PayersUnbalanced);
    }
    Ok(())
}

fn check_method(draft: &Draft) -> Result<(), ValidationError> {
    let raw_inputs = draft.raw_inputs();
    match draft.method() {
        SplitMethod::Equal => Ok(()),
        SplitMethod::Percentage => {
            let sum: Decimal = draft
                .participants()
                .iter()
                .map(|&id| split::raw_decimal(raw_inputs, id))
                .sum();
            if (sum - Decimal::ONE_HUNDRED).abs() >= PERCENT_TOLERANCE {
                return Err(ValidationError::PercentageMismatch);
            }
            Ok(())
        }
        SplitMethod::ExactAmount => {
            let sum: Money = draft
                .participants()
                .iter()
                .map(|&id| split::raw_money(raw_inputs, id))
                .sum();
            if sum != draft.total() {
                return Err(ValidationError::AmountMismatch);
            }
            Ok(())
        }
        SplitMethod::Adjustment => {
            let sum: Money = draft
                .participants()
                .iter()
                .map(|&id| split::raw_money(raw_inputs, id))
                .sum();
            if sum > draft.total() {
                return Err(ValidationError::AdjustmentsExceedTotal);
            }
            Ok(())
        }
        SplitMethod::Shares => {
            let sum: Decimal = draft
                .participants()
                .iter()
                .map(|&id| split::raw_decimal(raw_inputs, id))
                .sum();
            if sum <= Decimal::ZERO {
                return Err(ValidationError::NoShares);
            }
            Ok(())
        }
    }
}

/// No explicit payer means the current user fronted the whole amount; a
/// single explicit payer is auto-filled with the full total no matter what
/// their amount field says; multiple payers each contribute their entered
/// amount (already validated to balance).
fn paid_by(draft: &Draft) -> BTreeMap<ParticipantId, Money> {
    let payers = draft.payers();
    match payers.len() {
        0 => BTreeMap::from([(draft.current_user(), draft.total())]),
        1 => payers.iter().map(|&id| (id, draft.total())).collect(),
        _ => payers
            .iter()
            .map(|&id| (id, split::raw_money(draft.payer_amounts(), id)))
            .collect(),
    }
}

/// Stale entries from removed participants are ignored, not rejected.
fn warn_stale_entries(draft: &Draft) {
    let stale = draft
        .raw_inputs()
        .keys()
        .filter(|&&id| !draft.participants().contains(&id))
        .count()
        + draft
            .payer_amounts()
            .keys()
            .filter(|&&id| !draft.payers().contains(&id))
            .count();
    if stale > 0 {
        warn!("Ignoring {stale} stale input(s) left behind by removed participants");
    }
}
