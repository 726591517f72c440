//! Rebuilds an editable draft from a persisted ledger.
//!
//! The inverse of `finalize` for every method except `Equal`, which has no
//! raw inputs to recover.

use rust_decimal::Decimal;

use crate::domain::{Draft, Ledger, Money, ParticipantId, SplitMethod};

/// Reconstructs a draft from `ledger` so the transaction can be re-edited.
///
/// Stored raw values are preferred verbatim for `Percentage`, `Shares`, and
/// `Adjustment` - re-deriving them from the rounded cents would snap the
/// user's own numbers to slightly different ones on every open/save cycle.
/// `ExactAmount` is the opposite: the stored cents are authoritative, so its
/// raw text is always re-derived. Legacy entries with no stored raw fall
/// back to a re-derived percentage, one share, or no adjustment.
pub fn reopen(ledger: &Ledger, current_user: ParticipantId) -> Draft {
    let mut draft = Draft::new(current_user);
    draft.set_title(ledger.title());
    draft.set_total(ledger.total());
    draft.set_method(ledger.method());

    for (&id, &paid) in ledger.paid_by() {
        draft.add_payer(id);
        draft.set_payer_amount(id, paid.to_string());
    }

    for (&id, share) in ledger.owed_by() {
        draft.add_participant(id);
        let raw = match ledger.method() {
            SplitMethod::Equal => None,
            SplitMethod::ExactAmount => Some(share.amount().to_string()),
            SplitMethod::Percentage => Some(share.raw().map_or_else(
                || derived_percentage(share.amount(), ledger.total()),
                str::to_owned,
            )),
            SplitMethod::Shares => Some(share.raw().unwrap_or("1").to_owned()),
            SplitMethod::Adjustment => share.raw().map(str::to_owned),
        };
        if let Some(raw) = raw {
            draft.set_raw_input(id, raw);
        }
    }

    draft
}

/// Legacy fallback: recover the percentage from the stored cents.
fn derived_percentage(amount: Money, total: Money) -> String {
    if !total.is_positive() {
        return String::from("0");
    }
    (Decimal::from(amount.cents()) * Decimal::ONE_HUNDRED / Decimal::from(total.cents()))
        .normalize()
        .to_string()
}
