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

//! Per-name state and its derived phase (spec.md §3).

use crate::covenant::name::NameHash;
use crate::params::NetworkParams;
use crate::Height;
use bitcoin::OutPoint;

/// The auction/registration phase a name is currently in. Purely derived
/// from [`NameState`] and the chain tip height, never stored directly.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
#[display(Debug)]
pub enum Phase {
    /// Between OPEN and the start of the bidding window.
    Opening,
    /// Accepting blinded BIDs.
    Bidding,
    /// Accepting REVEALs of bids placed during `Bidding`.
    Reveal,
    /// Reveal has closed; no REGISTER has happened yet.
    ClosedUnregistered,
    /// Reveal has closed and the winner has REGISTERed.
    ClosedRegistered,
    /// A TRANSFER covenant is pending its lockup.
    Transferring,
    /// The name has been REVOKEd and is locked until `auctionMaturity`.
    Revoked,
    /// Past `auctionMaturity` (if revoked) or past the renewal window (if
    /// registered and lapsed): the name may be re-OPENed.
    Expired,
}

/// One name's complete on-chain state (spec.md §3).
///
/// `NameState`s are created by OPEN and never deleted; an expired name is
/// re-OPENable, which overwrites this view in place while the `nameHash`
/// identity (and its place in the authenticated tree) stays the same.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(StrictEncode, StrictDecode)]
pub struct NameState {
    /// The normalized label this state belongs to.
    pub name: String,
    /// `Blake2b-256(name)`, the tree key.
    pub name_hash: NameHash,
    /// Height at which OPEN was mined.
    pub height: Height,
    /// Height of the last renewal (or of REGISTER, initially).
    pub renewal: Height,
    /// Outpoint of the coin currently carrying the name.
    pub owner: OutPoint,
    /// The winning bid amount (what the loser's second-price payment is
    /// computed against is `highest`, not `value`).
    pub value: u64,
    /// The second-highest revealed bid: what the winner actually pays.
    pub highest: u64,
    /// Last registered resource bytes (possibly empty).
    pub data: Vec<u8>,
    /// Height a TRANSFER covenant was posted, or 0 if none is pending.
    pub transfer: Height,
    /// Height of REVOKE, or 0 if the name has never been revoked.
    pub revoked: Height,
    /// Set for names created via the reserved-name claim path.
    pub claimed: bool,
    /// Distinguishes a strong vs. weak claim proof.
    pub weak: bool,
    /// Set on the first successful REGISTER.
    pub registered: bool,
}

impl NameState {
    /// Construct the initial state created by an OPEN at `height`.
    pub fn opened(name: &str, name_hash: NameHash, height: Height, owner: OutPoint) -> Self {
        NameState {
            name: name.to_owned(),
            name_hash,
            height,
            renewal: height,
            owner,
            value: 0,
            highest: 0,
            data: Vec::new(),
            transfer: 0,
            revoked: 0,
            claimed: false,
            weak: false,
            registered: false,
        }
    }

    /// Derive this name's current [`Phase`] at `tip_height`, per spec.md §3's
    /// phase-boundary table.
    pub fn phase(&self, tip_height: Height, params: &NetworkParams) -> Phase {
        if self.revoked != 0 {
            return if tip_height >= self.revoked.saturating_add(params.auction_maturity) {
                Phase::Expired
            } else {
                Phase::Revoked
            };
        }

        let bidding_start = self.height.saturating_add(params.tree_interval);
        let reveal_start = bidding_start.saturating_add(params.bidding_period);
        let closed_start = reveal_start.saturating_add(params.reveal_period);

        if tip_height < bidding_start {
            return Phase::Opening;
        }
        if tip_height < reveal_start {
            return Phase::Bidding;
        }
        if tip_height < closed_start {
            return Phase::Reveal;
        }

        if !self.registered {
            // No winning REGISTER arrived before the window lapsed: once
            // auction_maturity has passed with nothing registered the name
            // is free to be re-OPENed (spec.md §8 scenario 2).
            return if tip_height >= closed_start.saturating_add(params.auction_maturity) {
                Phase::Expired
            } else {
                Phase::ClosedUnregistered
            };
        }

        if self.transfer != 0 {
            return Phase::Transferring;
        }

        if tip_height >= params.expiry_height(self.renewal) {
            return Phase::Expired;
        }

        Phase::ClosedRegistered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covenant::name::NameHash;
    use bitcoin::hashes::Hash;

    fn owner() -> OutPoint {
        OutPoint::new(bitcoin::Txid::all_zeros(), 0)
    }

    #[test]
    fn phase_progresses_through_auction_windows() {
        let params = NetworkParams::test_defaults();
        let state = NameState::opened("alice", NameHash::of("alice"), 0, owner());

        assert_eq!(state.phase(0, &params), Phase::Opening);
        assert_eq!(
            state.phase(params.tree_interval, &params),
            Phase::Bidding
        );
        let reveal_start = params.tree_interval + params.bidding_period;
        assert_eq!(state.phase(reveal_start, &params), Phase::Reveal);
        let closed_start = reveal_start + params.reveal_period;
        assert_eq!(state.phase(closed_start, &params), Phase::ClosedUnregistered);
    }

    #[test]
    fn unregistered_name_expires_and_reopens() {
        let params = NetworkParams::test_defaults();
        let state = NameState::opened("alice", NameHash::of("alice"), 0, owner());
        let closed_start = params.tree_interval + params.bidding_period + params.reveal_period;
        let expiry = closed_start + params.auction_maturity;
        assert_eq!(state.phase(expiry, &params), Phase::Expired);
    }

    #[test]
    fn revoked_name_locks_then_expires() {
        let params = NetworkParams::test_defaults();
        let mut state = NameState::opened("alice", NameHash::of("alice"), 0, owner());
        state.revoked = 100;
        assert_eq!(state.phase(100, &params), Phase::Revoked);
        assert_eq!(
            state.phase(100 + params.auction_maturity, &params),
            Phase::Expired
        );
    }
}
