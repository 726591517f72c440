//! Core domain types: participants, money, drafts, and finalized ledgers.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use derive_more::{From, Into};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Newtype wrapper for participant identifiers issued by the external
/// participant directory. The engine never creates or destroys participants;
/// it only holds their ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, From, Into,
)]
pub struct ParticipantId(u32);

/// Read-only view of the external participant directory: display names by id.
pub trait ParticipantDirectory {
    fn display_name(&self, id: ParticipantId) -> Option<&str>;
}

impl<D: ParticipantDirectory> ParticipantDirectory for &D {
    fn display_name(&self, id: ParticipantId) -> Option<&str> {
        (**self).display_name(id)
    }
}

/// HashMap-backed directory for tests and the CSV driver.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectory(HashMap<ParticipantId, String>);

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, id: ParticipantId, name: impl Into<String>) {
        self.0.insert(id, name.into());
    }
}

impl ParticipantDirectory for InMemoryDirectory {
    fn display_name(&self, id: ParticipantId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }
}

/// Signed money amount stored as integer cents.
///
/// All comparisons and sums happen in integer space; equality is exact and
/// there is no epsilon anywhere. `Decimal` appears only at the text boundary
/// (parsing user input, computing fractional shares before rounding).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Longest decimal text the parser will look at.
    const MAX_INPUT_LEN: usize = 12;

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Parses user-entered decimal text into cents.
    ///
    /// Input is trimmed and capped at 12 characters; anything past two
    /// fractional digits is truncated, not rounded. Unparsable text means
    /// zero - draft fields hold whatever the user typed, and it is the
    /// validator's job to report imbalances, so parsing itself never fails.
    pub fn parse(text: &str) -> Self {
        let text: String = text.trim().chars().take(Self::MAX_INPUT_LEN).collect();
        let value = text.parse::<Decimal>().unwrap_or_default().trunc_with_scale(2);
        Self::from_decimal_cents(value * Decimal::ONE_HUNDRED)
    }

    /// Rounds a fractional cent count half-away-from-zero.
    pub(crate) fn round_cents(cents: Decimal) -> Self {
        Self::from_decimal_cents(
            cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    fn from_decimal_cents(cents: Decimal) -> Self {
        Self(cents.to_i64().unwrap_or_default())
    }
}

impl fmt::Display for Money {
    /// Plain `"-12.34"` text, two fractional digits, no currency symbol.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// How the owed side of a transaction is divided among its participants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    #[default]
    Equal,
    Percentage,
    ExactAmount,
    Adjustment,
    Shares,
}

/// Mutable working state of one transaction being composed or edited.
///
/// Exclusively owned by the composing surface; the engine only ever reads a
/// snapshot of it. Raw-text maps may carry stale keys left behind by removed
/// participants - those are tolerated and ignored, never treated as
/// corruption. Absence of a key means "no input yet"; there is no sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    title: String,
    total: Money,
    method: SplitMethod,
    current_user: ParticipantId,
    participants: BTreeSet<ParticipantId>,
    payers: BTreeSet<ParticipantId>,
    payer_amounts: HashMap<ParticipantId, String>,
    raw_inputs: HashMap<ParticipantId, String>,
}

impl Draft {
    /// An empty draft. `current_user` is whoever is composing it - they
    /// become the implicit payer while no explicit payer is selected.
    pub fn new(current_user: ParticipantId) -> Self {
        Self {
            title: String::new(),
            total: Money::ZERO,
            method: SplitMethod::Equal,
            current_user,
            participants: BTreeSet::new(),
            payers: BTreeSet::new(),
            payer_amounts: HashMap::new(),
            raw_inputs: HashMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn method(&self) -> SplitMethod {
        self.method
    }

    pub fn current_user(&self) -> ParticipantId {
        self.current_user
    }

    pub fn participants(&self) -> &BTreeSet<ParticipantId> {
        &self.participants
    }

    /// Explicit payers. Empty means the current user fronted the whole total.
    pub fn payers(&self) -> &BTreeSet<ParticipantId> {
        &self.payers
    }

    /// Raw per-payer amount text. Only consulted when there is more than one
    /// payer; a single payer is auto-filled with the full total.
    pub fn payer_amounts(&self) -> &HashMap<ParticipantId, String> {
        &self.payer_amounts
    }

    /// Raw method-specific input text (percentage points, exact amounts,
    /// adjustments, or share counts). Unused for `Equal`.
    pub fn raw_inputs(&self) -> &HashMap<ParticipantId, String> {
        &self.raw_inputs
    }

    pub fn raw_input(&self, id: ParticipantId) -> Option<&str> {
        self.raw_inputs.get(&id).map(String::as_str)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_total(&mut self, total: Money) {
        self.total = total;
    }

    pub fn set_method(&mut self, method: SplitMethod) {
        self.method = method;
    }

    pub fn add_participant(&mut self, id: ParticipantId) {
        self.participants.insert(id);
    }

    /// Removes a participant. Their raw input, if any, is left behind as a
    /// stale entry and ignored by the engine.
    pub fn remove_participant(&mut self, id: ParticipantId) {
        self.participants.remove(&id);
    }

    pub fn add_payer(&mut self, id: ParticipantId) {
        self.payers.insert(id);
    }

    pub fn remove_payer(&mut self, id: ParticipantId) {
        self.payers.remove(&id);
    }

    pub fn set_payer_amount(&mut self, id: ParticipantId, text: impl Into<String>) {
        self.payer_amounts.insert(id, text.into());
    }

    pub fn set_raw_input(&mut self, id: ParticipantId, text: impl Into<String>) {
        self.raw_inputs.insert(id, text.into());
    }
}

/// One participant's owed entry: the computed cents plus the verbatim raw
/// input that produced them. The raw text is what makes a later edit lossless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitShare {
    amount: Money,
    raw: Option<String>,
}

impl SplitShare {
    pub fn new(amount: Money, raw: Option<String>) -> Self {
        Self { amount, raw }
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

/// Finalized allocation for one transaction: who paid what and who owes what.
///
/// Immutable once produced. `paid_by` sums to the total; `owed_by` sums to it
/// exactly for `Equal` and `Adjustment`, and within the documented rounding
/// tolerance for `Percentage`/`Shares`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    title: String,
    total: Money,
    method: SplitMethod,
    paid_by: BTreeMap<ParticipantId, Money>,
    owed_by: BTreeMap<ParticipantId, SplitShare>,
}

impl Ledger {
    /// Reassembles a ledger from persisted records - the transaction store's
    /// edit flow. The engine itself only produces ledgers through `finalize`.
    pub fn from_records(
        title: impl Into<String>,
        total: Money,
        method: SplitMethod,
        paid_by: BTreeMap<ParticipantId, Money>,
        owed_by: BTreeMap<ParticipantId, SplitShare>,
    ) -> Self {
        Self {
            title: title.into(),
            total,
            method,
            paid_by,
            owed_by,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn method(&self) -> SplitMethod {
        self.method
    }

    pub fn paid_by(&self) -> &BTreeMap<ParticipantId, Money> {
        &self.paid_by
    }

    pub fn owed_by(&self) -> &BTreeMap<ParticipantId, SplitShare> {
        &self.owed_by
    }
}
