// Name-auction consensus core: name-state machine, block assembler and
// authoritative resolver for a naming blockchain.
// Written in 2026 by
//     Name Chain Developers
//
// To the extent possible under law, the author(s) have dedicated all copyright
// and related and neighboring rights to this software to the public domain
// worldwide. This software is distributed without any warranty.
//
// You should have received a copy of the MIT License along with this software.
// If not, see <https://opensource.org/licenses/MIT>.

//! Crate-wide error types, following spec.md §7's three-way split between
//! consensus (fatal, scored), policy (typed, recoverable) and operational
//! (storage/IO, retryable) failures.
//!
//! Every error enum here uses the `amplify` `Display`+`Error` derive with
//! `#[display(doc_comments)]`, matching the convention used throughout the
//! teacher crate and the wider `rgb-core` pack instead of `thiserror` or a
//! hand-rolled `std::error::Error` impl.

use crate::covenant::name::NameHash;

/// A verification failure that is fatal for the block that triggered it.
///
/// Each variant corresponds to one of the stable ASCII reason codes from
/// spec.md §7 (`bad-name-state`, `bad-blk-opens`, ...). [`VerifyError::code`]
/// returns that stable string, and [`VerifyError::ban_score`] the penalty a
/// peer that relayed the offending block should incur. Verify errors are
/// never retried with different consensus inputs.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum VerifyError {
    /// covenant {covenant} is not permitted for name {name} in its current phase
    BadNameState { name: NameHash, covenant: &'static str },

    /// auction value does not satisfy second-price semantics for name {0}
    BadAuctionValue(NameHash),

    /// transaction spends a nonexistent or already-spent input
    BadNonexistentInput,

    /// block contains more than one covenant output for name {0}
    BadBlkNames(NameHash),

    /// block exceeds the maximum number of OPEN covenants
    BadBlkOpens,

    /// block exceeds the maximum number of UPDATE covenants
    BadBlkUpdates,

    /// block exceeds the maximum number of RENEW covenants
    BadBlkRenewals,

    /// block weight {weight} exceeds the maximum of {max}
    BadBlkWeight { weight: u64, max: u64 },

    /// block serialized length {len} exceeds the maximum of {max}
    BadBlkLength { len: u64, max: u64 },

    /// block sigop count {count} exceeds the maximum of {max}
    BadBlkSigops { count: u64, max: u64 },

    /// coinbase commits to the wrong block height
    BadCbHeight,

    /// coinbase reward plus fees does not match the expected amount
    BadCbAmount,

    /// witness merkle root does not match the block's committed witness root
    BadWitnessRoot,

    /// transaction merkle root does not match the block's committed merkle root
    BadTxnMrklRoot,

    /// sum of transaction outputs exceeds the maximum money supply
    BadTxnsTxoutTotalTooLarge,

    /// transaction outputs exceed its inputs
    BadTxnsInBelowOut,

    /// transaction spends a coinbase output before it has matured
    BadTxnsPrematureSpendOfCoinbase,

    /// block's difficulty bits do not match the expected retarget
    BadDiffbits,

    /// block's timestamp is older than the median of the last 11 blocks
    TimeTooOld,

    /// proof of work does not satisfy the claimed target
    HighHash,

    /// block extends a fork prior to a known checkpoint
    BadForkPriorToCheckpoint,
}

impl VerifyError {
    /// The stable, machine-readable reason string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            VerifyError::BadNameState { .. } => "bad-name-state",
            VerifyError::BadAuctionValue(_) => "bad-auction-value",
            VerifyError::BadNonexistentInput => "bad-txns-inputs-missingorspent",
            VerifyError::BadBlkNames(_) => "bad-blk-names",
            VerifyError::BadBlkOpens => "bad-blk-opens",
            VerifyError::BadBlkUpdates => "bad-blk-updates",
            VerifyError::BadBlkRenewals => "bad-blk-renewals",
            VerifyError::BadBlkWeight { .. } => "bad-blk-weight",
            VerifyError::BadBlkLength { .. } => "bad-blk-length",
            VerifyError::BadBlkSigops { .. } => "bad-blk-sigops",
            VerifyError::BadCbHeight => "bad-cb-height",
            VerifyError::BadCbAmount => "bad-cb-amount",
            VerifyError::BadWitnessRoot => "bad-witnessroot",
            VerifyError::BadTxnMrklRoot => "bad-txnmrklroot",
            VerifyError::BadTxnsTxoutTotalTooLarge => "bad-txns-txouttotal-toolarge",
            VerifyError::BadTxnsInBelowOut => "bad-txns-in-belowout",
            VerifyError::BadTxnsPrematureSpendOfCoinbase => {
                "bad-txns-premature-spend-of-coinbase"
            }
            VerifyError::BadDiffbits => "bad-diffbits",
            VerifyError::TimeTooOld => "time-too-old",
            VerifyError::HighHash => "high-hash",
            VerifyError::BadForkPriorToCheckpoint => "bad-fork-prior-to-checkpoint",
        }
    }

    /// The peer-reputation penalty associated with relaying a block that
    /// fails this check. Mirrors the "score" half of spec.md §7.
    pub fn ban_score(&self) -> u8 {
        match self {
            VerifyError::TimeTooOld | VerifyError::BadForkPriorToCheckpoint => 10,
            VerifyError::BadDiffbits | VerifyError::HighHash => 50,
            _ => 100,
        }
    }
}

/// A recoverable error from the block assembler, resolver or mempool: never
/// aborts the process, just rejects the request or omits the item.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum PolicyError {
    /// transaction exceeds the assembler's policy weight limit
    ExceedsPolicyWeight,

    /// too many OPEN covenants already selected for this template
    TooManyOpens,

    /// an open for {0} has already been sent
    AlreadySentOpen(NameHash),

    /// name {0} is not available
    NameNotAvailable(NameHash),

    /// nothing to do
    NothingToDo,

    /// query name is not authoritative for this server
    NotAuthoritative,

    /// requested record type is not supported by this resolver
    UnsupportedType,
}

/// An error from a storage or I/O backend. Retried only at the I/O layer;
/// never retried with different consensus inputs.
#[derive(Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum OperationalError {
    /// storage backend error: {0}
    #[from]
    Backend(std::io::Error),

    /// undo record for height {0} is missing or corrupt
    MissingUndoRecord(u32),

    /// decode error while loading persisted state: {0}
    Decode(String),
}

/// Umbrella error returned at the chain-connect boundary, where either a
/// consensus verify failure or a storage failure can occur.
#[derive(Debug, Display, Error, From)]
#[display(inner)]
pub enum ConsensusError {
    /// a consensus verification failure
    #[from]
    Verify(VerifyError),

    /// an operational (storage/IO) failure
    #[from]
    Operational(OperationalError),
}
