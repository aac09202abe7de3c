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

//! Per-transaction covenant connect/disconnect and the block-level undo log
//! (spec.md §4.2, §5 "Concurrency model").
//!
//! Folds a sequence of state transitions against a lookup of prior state,
//! one covenant against the name it names, tracking per-block consensus
//! caps as it goes.

use crate::covenant::name::NameHash;
use crate::covenant::state::NameState;
use crate::covenant::transition::{self, Covenant, TransitionContext};
use crate::error::VerifyError;
use crate::params::NetworkParams;
use crate::Height;
use bitcoin::OutPoint;
use log::debug;
use std::collections::HashSet;

/// A name-store lookup the validator needs but does not own. Implemented by
/// whatever the host process uses to persist the authenticated name tree;
/// the consensus core only ever needs point lookups and writes.
pub trait NameStore {
    /// Look up a name's current state by its hash, if it exists.
    fn get(&self, name_hash: NameHash) -> Option<NameState>;

    /// Insert or overwrite a name's state.
    fn put(&mut self, state: NameState);

    /// Remove a name's state entirely (used only by undoing an OPEN/CLAIM).
    fn remove(&mut self, name_hash: NameHash);
}

/// One decoded covenant output found in a transaction being connected: the
/// label it concerns, the covenant payload, and the outpoint of the output
/// carrying it (`txid:vout` of the containing transaction).
#[derive(Clone, Debug)]
pub struct CovenantOutput {
    /// Normalized label the covenant concerns.
    pub name: String,
    /// `name`'s stable tree identity.
    pub name_hash: NameHash,
    /// The covenant payload.
    pub covenant: Covenant,
    /// Outpoint of the output carrying this covenant.
    pub outpoint: OutPoint,
}

/// One entry of a block's undo log: enough to reverse a single covenant
/// connect without re-deriving it from the transaction.
#[derive(Clone, Debug)]
pub struct UndoEntry {
    /// The name the entry concerns.
    pub name_hash: NameHash,
    /// The covenant that was connected.
    pub covenant: Covenant,
    /// The name's state immediately before the covenant was applied, or
    /// `None` if the covenant created the name (OPEN, CLAIM).
    pub prior: Option<NameState>,
}

/// Running per-block counters enforcing spec.md §4.3's "simultaneous caps".
#[derive(Default, Clone, Copy, Debug)]
struct BlockCaps {
    opens: u32,
    updates: u32,
    renewals: u32,
}

/// Connects and disconnects covenant outputs against a [`NameStore`],
/// enforcing per-name phase permissions and per-block caps, and producing
/// the undo log a block disconnect needs.
pub struct Validator<'p> {
    params: &'p NetworkParams,
    caps: BlockCaps,
    used_names: HashSet<NameHash>,
}

impl<'p> Validator<'p> {
    /// Start validating a new block at `params`'s settings.
    pub fn new(params: &'p NetworkParams) -> Self {
        Validator { params, caps: BlockCaps::default(), used_names: HashSet::new() }
    }

    /// Connect one covenant output at `height`, mutating `store` and
    /// appending to the block's undo log. Fails closed: on any error the
    /// store is left exactly as it was (single-output atomicity), but
    /// caller is responsible for discarding the whole block's partial undo
    /// log on failure, per spec.md §5.
    ///
    /// Rejects a second covenant output for a `nameHash` already touched
    /// earlier in this same block (spec.md §3: "at most one transaction may
    /// carry any given nameHash in its covenant outputs" within one block;
    /// §8 scenario 3).
    pub fn connect(
        &mut self,
        store: &mut impl NameStore,
        height: Height,
        output: &CovenantOutput,
    ) -> Result<UndoEntry, VerifyError> {
        if !self.used_names.insert(output.name_hash) {
            debug!("rejecting {} at height {height}: name {} already touched this block", output.covenant.kind(), output.name_hash);
            return Err(VerifyError::BadBlkNames(output.name_hash));
        }
        self.check_caps(&output.covenant)?;

        let prior = store.get(output.name_hash);
        let ctx = TransitionContext { height, new_owner: output.outpoint, params: self.params };
        let next = transition::apply(
            &output.name,
            output.name_hash,
            prior.as_ref(),
            &output.covenant,
            &ctx,
        )?;

        store.put(next);
        self.bump_caps(&output.covenant);

        Ok(UndoEntry { name_hash: output.name_hash, covenant: output.covenant.clone(), prior })
    }

    /// Reverse one [`UndoEntry`] against `store`, restoring the name to the
    /// state it had before the entry's covenant was connected.
    pub fn disconnect(&self, store: &mut impl NameStore, entry: UndoEntry) {
        match transition::undo(&entry.covenant, entry.prior) {
            Some(state) => store.put(state),
            None => store.remove(entry.name_hash),
        }
    }

    fn check_caps(&self, covenant: &Covenant) -> Result<(), VerifyError> {
        match covenant {
            Covenant::Open if self.caps.opens >= self.params.max_block_opens => {
                Err(VerifyError::BadBlkOpens)
            }
            Covenant::Update { .. } if self.caps.updates >= self.params.max_block_updates => {
                Err(VerifyError::BadBlkUpdates)
            }
            Covenant::Renew if self.caps.renewals >= self.params.max_block_renewals => {
                Err(VerifyError::BadBlkRenewals)
            }
            _ => Ok(()),
        }
    }

    fn bump_caps(&mut self, covenant: &Covenant) {
        match covenant {
            Covenant::Open => self.caps.opens += 1,
            Covenant::Update { .. } => self.caps.updates += 1,
            Covenant::Renew => self.caps.renewals += 1,
            _ => {}
        }
    }
}
