mod common;

use common::{draft, engine};
use split_ledger::domain::{Money, SplitMethod};
use split_ledger::engine::ValidationError;

/// Rules run in a fixed order; a blank title wins over every later problem.
#[test]
fn blank_title_is_reported_first() {
    let engine = engine(&[]);
    let mut draft = draft("0.00", SplitMethod::Percentage, &[]);
    draft.set_title("   ");

    assert_eq!(engine.validate(&draft), Err(ValidationError::EmptyTitle));
}

/// A zero or negative total is reported before participant problems.
#[test]
fn non_positive_total_is_reported_before_participants() {
    let engine = engine(&[]);
    let draft = draft("0.00", SplitMethod::Equal, &[]);

    assert_eq!(engine.validate(&draft), Err(ValidationError::NonPositiveAmount));
}

/// With a title and total in place, missing participants is next in line.
#[test]
fn empty_participants_is_reported_before_method_rules() {
    let engine = engine(&[]);
    let draft = draft("10.00", SplitMethod::Percentage, &[]);

    assert_eq!(engine.validate(&draft), Err(ValidationError::EmptyParticipants));
}

/// Unbalanced payers are reported before the method-specific rule.
#[test]
fn payer_rule_runs_before_method_rule() {
    let engine = engine(&[(1, "Alice"), (2, "Bob")]);
    let mut draft = draft("10.00", SplitMethod::Percentage, &[1, 2]);
    draft.add_payer(1.into());
    draft.add_payer(2.into());
    draft.set_payer_amount(1.into(), "1.00");
    // Percentages are also wrong (empty), but payers are checked first.

    assert_eq!(engine.validate(&draft), Err(ValidationError::PayersUnbalanced));
}

/// Equal needs nothing beyond a title, a total, and participants.
#[test]
fn equal_draft_with_participants_is_valid() {
    let engine = engine(&[(1, "Alice")]);
    let draft = draft("10.00", SplitMethod::Equal, &[1]);

    assert_eq!(engine.validate(&draft), Ok(()));
}

/// `finalize` applies the same rules as `validate` and fails identically.
#[test]
fn finalize_and_validate_agree() {
    let engine = engine(&[(1, "Alice")]);
    let mut draft = draft("10.00", SplitMethod::Equal, &[1]);
    draft.set_total(Money::parse("-5.00"));

    assert_eq!(engine.validate(&draft), Err(ValidationError::NonPositiveAmount));
    assert_eq!(engine.finalize(&draft), Err(ValidationError::NonPositiveAmount));
}

/// Finalizing the same draft twice produces identical ledgers.
#[test]
fn finalize_is_idempotent_on_a_snapshot() {
    let engine = engine(&[(1, "Alice"), (2, "Bob")]);
    let mut draft = draft("33.33", SplitMethod::Shares, &[1, 2]);
    draft.set_raw_input(1.into(), "2");
    draft.set_raw_input(2.into(), "1");

    let first = engine.finalize(&draft).unwrap();
    let second = engine.finalize(&draft).unwrap();

    assert_eq!(first, second);
}
