//! Shared-expense split engine.
//!
//! Turns a draft transaction (total, participants, payers, split method, raw
//! per-person inputs) into a finalized per-person ledger of who paid and who
//! owes, and reconstructs an editable draft from a persisted ledger. All
//! money math happens in integer cents.

pub mod domain;
pub mod engine;
pub mod output;
pub mod parsing;
