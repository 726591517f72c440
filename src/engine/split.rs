//! Allocation algorithms, one per split method.
//!
//! Callers hand in participants already sorted by display name; that order is
//! the tie-break for remainder cents and must stay stable across edits.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::domain::{Money, ParticipantId, SplitMethod};

pub(crate) fn allocate(
    method: SplitMethod,
    total: Money,
    ordered: &[ParticipantId],
    raw_inputs: &HashMap<ParticipantId, String>,
) -> BTreeMap<ParticipantId, Money> {
    match method {
        SplitMethod::Equal => equal(total, ordered),
        SplitMethod::Percentage => percentage(total, ordered, raw_inputs),
        SplitMethod::ExactAmount => exact_amount(ordered, raw_inputs),
        SplitMethod::Adjustment => adjustment(total, ordered, raw_inputs),
        SplitMethod::Shares => shares(total, ordered, raw_inputs),
    }
}

/// Method-specific numeric value of a participant's raw text. Missing keys
/// and unparsable text both mean zero; raw text never fails to parse.
pub(crate) fn raw_decimal(
    raw_inputs: &HashMap<ParticipantId, String>,
    id: ParticipantId,
) -> Decimal {
    raw_inputs
        .get(&id)
        .map_or(Decimal::ZERO, |text| text.trim().parse().unwrap_or_default())
}

/// Same tolerance for money-typed raw text (exact amounts, adjustments,
/// payer amounts).
pub(crate) fn raw_money(raw_inputs: &HashMap<ParticipantId, String>, id: ParticipantId) -> Money {
    raw_inputs.get(&id).map_or(Money::ZERO, |text| Money::parse(text))
}

/// `total / n` each, with the remainder cents going to the first participants
/// in sort order. Sums to `total` exactly.
fn equal(total: Money, ordered: &[ParticipantId]) -> BTreeMap<ParticipantId, Money> {
    ordered
        .iter()
        .zip(equal_shares(total, ordered.len()))
        .map(|(&id, cents)| (id, Money::from_cents(cents)))
        .collect()
}

/// `base + 1` for the first `remainder` slots, `base` for the rest.
fn equal_shares(total: Money, n: usize) -> impl Iterator<Item = i64> {
    let count = n as i64;
    let base = total.cents() / count;
    let remainder = total.cents() % count;
    (0..count).map(move |index| base + i64::from(index < remainder))
}

/// `round(total * p / 100)` per participant, no remainder redistribution -
/// the validator is what tells the user when percentages don't reach 100.
fn percentage(
    total: Money,
    ordered: &[ParticipantId],
    raw_inputs: &HashMap<ParticipantId, String>,
) -> BTreeMap<ParticipantId, Money> {
    ordered
        .iter()
        .map(|&id| {
            let percent = raw_decimal(raw_inputs, id);
            let cents = Decimal::from(total.cents()) * percent / Decimal::ONE_HUNDRED;
            (id, Money::round_cents(cents))
        })
        .collect()
}

/// The raw text *is* the share; no computation beyond cent conversion.
fn exact_amount(
    ordered: &[ParticipantId],
    raw_inputs: &HashMap<ParticipantId, String>,
) -> BTreeMap<ParticipantId, Money> {
    ordered.iter().map(|&id| (id, raw_money(raw_inputs, id))).collect()
}

/// Splits `total - sum(adjustments)` equally (same remainder rule), then adds
/// each participant's adjustment back. Sums to `total` by construction.
fn adjustment(
    total: Money,
    ordered: &[ParticipantId],
    raw_inputs: &HashMap<ParticipantId, String>,
) -> BTreeMap<ParticipantId, Money> {
    let adjustments: Vec<Money> = ordered.iter().map(|&id| raw_money(raw_inputs, id)).collect();
    let adjusted: Money = adjustments.iter().copied().sum();
    let remaining = total - adjusted;
    ordered
        .iter()
        .zip(equal_shares(remaining, ordered.len()))
        .zip(adjustments)
        .map(|((&id, base), adjustment)| (id, Money::from_cents(base) + adjustment))
        .collect()
}

/// `round(total * share_i / total_shares)` per participant. Independent
/// roundings can drift the sum a cent or two away from the total; the drift
/// is kept as-is so re-saving an old transaction never changes its splits.
fn shares(
    total: Money,
    ordered: &[ParticipantId],
    raw_inputs: &HashMap<ParticipantId, String>,
) -> BTreeMap<ParticipantId, Money> {
    let total_shares: Decimal = ordered.iter().map(|&id| raw_decimal(raw_inputs, id)).sum();
    ordered
        .iter()
        .map(|&id| {
            let cents = Decimal::from(total.cents()) * raw_decimal(raw_inputs, id) / total_shares;
            (id, Money::round_cents(cents))
        })
        .collect()
}
