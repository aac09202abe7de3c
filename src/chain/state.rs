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

//! The single chain lock (spec.md §5 "Scheduling model"): block connect,
//! disconnect and template assembly all serialize through one write guard;
//! resolver queries and mempool snapshots take a read guard and may proceed
//! concurrently with each other.
//!
//! Modeled as `parking_lot::RwLock` wrapping a [`ChainState`], the lock
//! style used throughout the blockchain-shaped crates in the wider example
//! pack rather than a `std::sync` mutex.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::covenant::validator::NameStore;
use crate::Height;

/// Everything the chain's write path owns exclusively: the current tip and
/// the name-state store behind it.
///
/// Per spec.md §5, "the name-state store, UTXO set, Merkle tree root, and
/// airdrop bitfield are all owned by the chain; only the chain's write path
/// may mutate them" -- `ChainState` is the generic shape of that ownership,
/// parameterized over whichever concrete [`NameStore`] the storage backend
/// provides.
pub struct ChainState<S> {
    /// Height of the current tip.
    pub tip_height: Height,
    /// Header hash of the current tip.
    pub tip_hash: [u8; 32],
    /// The name-state store.
    pub store: S,
}

impl<S: NameStore> ChainState<S> {
    /// Start a fresh chain state at the genesis tip (`height` 0, zero hash).
    pub fn new(store: S) -> Self {
        ChainState { tip_height: 0, tip_hash: [0u8; 32], store }
    }
}

/// One `RwLock<ChainState<S>>` per running node. Write paths (connect,
/// disconnect, template assembly) take [`ChainLock::write`]; read paths
/// (resolver queries, mempool snapshots) take [`ChainLock::read`] and may
/// run concurrently with other readers, never with a writer.
pub struct ChainLock<S>(RwLock<ChainState<S>>);

impl<S: NameStore> ChainLock<S> {
    /// Wrap `store` in a fresh chain lock at the genesis tip.
    pub fn new(store: S) -> Self { ChainLock(RwLock::new(ChainState::new(store))) }

    /// Acquire a read guard. May be held concurrently with other readers.
    pub fn read(&self) -> RwLockReadGuard<'_, ChainState<S>> { self.0.read() }

    /// Acquire the exclusive write guard used by connect/disconnect/assembly.
    pub fn write(&self) -> RwLockWriteGuard<'_, ChainState<S>> { self.0.write() }
}
