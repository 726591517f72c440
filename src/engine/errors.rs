/// Why a draft cannot be finalized.
///
/// This is the complete failure taxonomy: `finalize` has no other error
/// paths. Every variant is recoverable - the caller re-renders the draft
/// with the message and the user corrects their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Total amount must be positive")]
    NonPositiveAmount,
    #[error("Select at least one participant")]
    EmptyParticipants,
    #[error("Payer amounts must add up to the total")]
    PayersUnbalanced,
    #[error("Percentages must add up to 100")]
    PercentageMismatch,
    #[error("Amounts must add up to the total")]
    AmountMismatch,
    #[error("Adjustments exceed the total amount")]
    AdjustmentsExceedTotal,
    #[error("Enter at least one share")]
    NoShares,
}
