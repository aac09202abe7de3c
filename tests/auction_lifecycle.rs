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

//! End-to-end auction lifecycle scenarios (spec.md §8).

use std::collections::HashMap;

use bitcoin::hashes::Hash;
use bitcoin::{OutPoint, Txid};

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

fn connect(
    store: &mut MemStore,
    validator: &mut Validator,
    height: u32,
    name: &str,
    covenant: Covenant,
    owner_seed: u8,
) -> Result<(), nsconsensus::error::VerifyError> {
    let output = CovenantOutput {
        name: name.to_owned(),
        name_hash: NameHash::of(name),
        covenant,
        outpoint: outpoint(owner_seed),
    };
    validator.connect(store, height, &output).map(|_| ())
}

/// Scenario 1: OPEN, two BIDs (not modeled as covenants), two REVEALs; the
/// higher bid wins and pays the second-highest amount; the loser is
/// redeemable after the reveal window.
#[test]
fn auction_happy_path_second_price_and_redeem() {
    let params = NetworkParams::test_defaults();
    let mut store = MemStore::default();

    let h0 = 0;
    let mut v0 = Validator::new(&params);
    connect(&mut store, &mut v0, h0, "alice", Covenant::Open, 0).unwrap();

    let bidding_start = params.tree_interval;
    let mut v1 = Validator::new(&params);
    connect(&mut store, &mut v1, bidding_start, "alice", Covenant::Bid { blind: [0; 32], lockup: 20_000 }, 1).unwrap();

    // Each REVEAL lands in its own block: a block may carry at most one
    // covenant output per nameHash (spec.md §3), so the two reveals cannot
    // share a `Validator`.
    let reveal_start = bidding_start + params.bidding_period;
    let mut v2a = Validator::new(&params);
    connect(&mut store, &mut v2a, reveal_start, "alice", Covenant::Reveal { value: 10_000 }, 2).unwrap();
    let mut v2b = Validator::new(&params);
    connect(&mut store, &mut v2b, reveal_start + 1, "alice", Covenant::Reveal { value: 15_000 }, 3).unwrap();

    let name_hash = NameHash::of("alice");
    let after_reveal = store.get(name_hash).unwrap();
    assert_eq!(after_reveal.value, 15_000, "winning bid is the highest revealed value");
    assert_eq!(after_reveal.highest, 10_000, "winner pays the second-highest bid");

    let closed_start = reveal_start + params.reveal_period;
    let mut v3 = Validator::new(&params);
    connect(&mut store, &mut v3, closed_start, "alice", Covenant::Redeem, 4).unwrap();
}

/// Scenario 2: letting the bidding+reveal window elapse with no REGISTER
/// makes the name expire and become re-OPENable for a fresh auction.
#[test]
fn reopen_before_registration_starts_a_fresh_auction() {
    let params = NetworkParams::test_defaults();
    let mut store = MemStore::default();

    let mut v0 = Validator::new(&params);
    connect(&mut store, &mut v0, 0, "alice", Covenant::Open, 0).unwrap();

    let closed_start = params.tree_interval + params.bidding_period + params.reveal_period;
    let expiry = closed_start + params.auction_maturity;

    let mut v1 = Validator::new(&params);
    let err = connect(&mut store, &mut v1, closed_start, "alice", Covenant::Open, 1).unwrap_err();
    assert_eq!(err.code(), "bad-name-state", "cannot re-OPEN before auction_maturity has elapsed");

    let mut v2 = Validator::new(&params);
    connect(&mut store, &mut v2, expiry, "alice", Covenant::Open, 2).unwrap();

    let reopened = store.get(NameHash::of("alice")).unwrap();
    assert_eq!(reopened.height, expiry, "the fresh auction's OPEN height replaces the old one");
    assert!(!reopened.registered);
}

/// Scenario 5: transfer / finalize / revoke timing.
#[test]
fn transfer_finalize_and_revoke_timing() {
    let params = NetworkParams::test_defaults();
    let mut store = MemStore::default();
    let name_hash = NameHash::of("alice");

    let mut state = NameState::opened("alice", name_hash, 0, outpoint(0));
    state.registered = true;
    state.data = vec![1, 2, 3];
    store.put(state);

    let transfer_height = 100;
    let mut v0 = Validator::new(&params);
    connect(&mut store, &mut v0, transfer_height, "alice", Covenant::Transfer, 1).unwrap();

    let too_early = transfer_height + params.transfer_lockup - 1;
    let mut v1 = Validator::new(&params);
    let err = connect(&mut store, &mut v1, too_early, "alice", Covenant::Finalize, 2).unwrap_err();
    assert_eq!(err.code(), "bad-name-state");

    let on_time = transfer_height + params.transfer_lockup;
    let mut v2 = Validator::new(&params);
    connect(&mut store, &mut v2, on_time, "alice", Covenant::Finalize, 3).unwrap();

    let finalized = store.get(name_hash).unwrap();
    assert_eq!(finalized.transfer, 0);

    let mut v3 = Validator::new(&params);
    connect(&mut store, &mut v3, on_time + 1, "alice", Covenant::Revoke, 4).unwrap();
    let revoked = store.get(name_hash).unwrap();
    assert!(revoked.data.is_empty(), "REVOKE clears the registered data");
    assert_eq!(revoked.revoked, on_time + 1);
}

/// Universal invariant (spec.md §8): connecting then disconnecting a block
/// is a no-op on per-name state.
#[test]
fn connect_then_disconnect_restores_prior_state() {
    let params = NetworkParams::test_defaults();
    let mut store = MemStore::default();
    let name_hash = NameHash::of("alice");

    let mut validator = Validator::new(&params);
    let output = CovenantOutput {
        name: "alice".into(),
        name_hash,
        covenant: Covenant::Open,
        outpoint: outpoint(9),
    };
    let undo = validator.connect(&mut store, 0, &output).unwrap();
    assert!(store.get(name_hash).is_some());

    validator.disconnect(&mut store, undo);
    assert!(store.get(name_hash).is_none(), "disconnecting the block's only OPEN restores absence");
}
