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

//! Block-assembly and consensus-cap scenarios (spec.md §8 scenarios 3, 4, 6).

use std::collections::HashMap;

use bitcoin::hashes::Hash;
use bitcoin::{OutPoint, Txid};

use nsconsensus::airdrop::{Bitfield, SpendBatch};
use nsconsensus::chain::assembler::{Assembler, MempoolEntry};
use nsconsensus::covenant::name::NameHash;
use nsconsensus::covenant::state::NameState;
use nsconsensus::covenant::transition::Covenant;
use nsconsensus::covenant::validator::{CovenantOutput, NameStore, Validator};
use nsconsensus::params::NetworkParams;

#[derive(Default)]
struct MemStore(HashMap<NameHash, NameState>);

impl NameStore for MemStore {
    fn get(&self, name_hash: NameHash) -> Option<NameState> { self.0.get(&name_hash).cloned() }
    fn put(&mut self, state: NameState) { self.0.insert(state.name_hash, state); }
    fn remove(&mut self, name_hash: NameHash) { self.0.remove(&name_hash); }
}

fn outpoint(seed: u8) -> OutPoint {
    let mut bytes = [0u8; 32];
    bytes[0] = seed;
    OutPoint::new(Txid::from_slice(&bytes).unwrap(), 0)
}

fn txid(byte: u8) -> Txid {
    let mut bytes = [0u8; 32];
    bytes[0] = byte;
    Txid::from_slice(&bytes).unwrap()
}

/// Scenario 3: two transactions in one block both carry an OPEN for the
/// same name; the consensus validator rejects the second.
#[test]
fn duplicate_open_for_same_name_in_one_block_is_rejected() {
    let params = NetworkParams::test_defaults();
    let mut store = MemStore::default();
    let mut validator = Validator::new(&params);
    let name_hash = NameHash::of("alice");

    let first = CovenantOutput {
        name: "alice".into(),
        name_hash,
        covenant: Covenant::Open,
        outpoint: outpoint(0),
    };
    let second = CovenantOutput {
        name: "alice".into(),
        name_hash,
        covenant: Covenant::Open,
        outpoint: outpoint(1),
    };

    validator.connect(&mut store, 0, &first).unwrap();
    let err = validator.connect(&mut store, 0, &second).unwrap_err();
    assert_eq!(err.code(), "bad-blk-names");

    // Exactly one of the two ever took effect.
    assert_eq!(store.get(name_hash).unwrap().owner, outpoint(0));
}

/// Scenario 4: a block may carry at most `max_block_opens` OPEN covenants;
/// the assembler enforces the cap at selection time and the consensus
/// validator enforces it again at connect time.
#[test]
fn open_cap_is_enforced_by_both_assembler_and_validator() {
    let mut params = NetworkParams::test_defaults();
    params.max_block_opens = 2;

    let entries: Vec<MempoolEntry> = (0..3)
        .map(|i| MempoolEntry {
            txid: txid(i),
            parents: vec![],
            weight: 10,
            sigops: 0,
            fee: 10,
            priority: 0.0,
            covenant: Some((NameHash::of(&format!("name{i}")), Covenant::Open)),
        })
        .collect();

    let assembler = Assembler::new(&params);
    let selection = assembler.assemble(0, 0, vec![], vec![], &entries);
    assert_eq!(selection.opens, 2, "assembler stops admitting OPENs once the cap is hit");
    assert_eq!(selection.transactions.len(), 2);

    let mut store = MemStore::default();
    let mut validator = Validator::new(&params);
    for i in 0..2u8 {
        let name = format!("name{i}");
        let output = CovenantOutput {
            name: name.clone(),
            name_hash: NameHash::of(&name),
            covenant: Covenant::Open,
            outpoint: outpoint(i),
        };
        validator.connect(&mut store, 0, &output).unwrap();
    }

    let third = CovenantOutput {
        name: "name2".into(),
        name_hash: NameHash::of("name2"),
        covenant: Covenant::Open,
        outpoint: outpoint(2),
    };
    let err = validator.connect(&mut store, 0, &third).unwrap_err();
    assert_eq!(err.code(), "bad-blk-opens", "a third OPEN is refused by the validator too");
}

/// Exactly `max_block_opens` OPENs in one block all succeed.
#[test]
fn exactly_the_cap_of_opens_is_accepted() {
    let mut params = NetworkParams::test_defaults();
    params.max_block_opens = 3;
    let mut store = MemStore::default();
    let mut validator = Validator::new(&params);

    for i in 0..3u8 {
        let name = format!("name{i}");
        let output = CovenantOutput {
            name: name.clone(),
            name_hash: NameHash::of(&name),
            covenant: Covenant::Open,
            outpoint: outpoint(i),
        };
        validator.connect(&mut store, 0, &output).unwrap();
    }
    assert_eq!(store.0.len(), 3);
}

/// Scenario 6: an airdrop leaf cannot be spent twice across blocks, and
/// disconnecting a block's spends restores the bitfield for a reorg.
#[test]
fn airdrop_double_spend_rejected_and_reorg_undo_restores_bitfield() {
    let mut field = Bitfield::new(64);

    // Block A spends leaf 5.
    let mut batch_a = SpendBatch::new();
    assert!(batch_a.spend(&field, 5));
    batch_a.commit(&mut field);
    assert!(field.is_spent(5));

    // Block B tries to spend the same leaf again: rejected before it ever
    // reaches the bitfield, exactly as a second OPEN would be rejected by
    // the validator's per-block name-dedup.
    let mut batch_b = SpendBatch::new();
    assert!(!batch_b.spend(&field, 5));

    // A reorg undoes block A: the leaf becomes spendable again.
    field.set(5, 0);
    assert!(!field.is_spent(5));

    let mut batch_c = SpendBatch::new();
    assert!(batch_c.spend(&field, 5));
    batch_c.commit(&mut field);
    assert!(field.is_spent(5));
}

/// A batch that stages several leaves and is discarded via `undo` leaves the
/// bitfield untouched, matching the block-disconnect "no-op" invariant.
#[test]
fn discarded_batch_never_touches_the_bitfield() {
    let field = Bitfield::new(8);
    let mut batch = SpendBatch::new();
    assert!(batch.spend(&field, 1));
    assert!(batch.spend(&field, 2));
    batch.undo();

    let mut field2 = field.clone();
    batch.commit(&mut field2);
    assert_eq!(field2, field, "an undone batch commits nothing");
}
