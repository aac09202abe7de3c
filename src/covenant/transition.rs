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

//! The closed tagged union of covenant kinds and the total `apply`/`undo`
//! functions over it (spec.md §4.2, Design Note 3).
//!
//! A covenant is only ever valid against a name in specific phases: a
//! transition schema over `Phase` plays the same role here that an RGB
//! `TransitionSchema` plays constraining which `OwnedRightType`s a
//! `TransitionType` may close.

use crate::covenant::state::{NameState, Phase};
use crate::error::VerifyError;
use crate::params::NetworkParams;
use crate::Height;
use bitcoin::OutPoint;

/// The typed payload of every covenant kind a transaction output may carry.
///
/// This is the "dynamic covenant dispatch" union from spec.md §9: each
/// variant is a closed alternative, and [`apply`]/[`undo`] are total
/// functions over this union plus the current (optional) [`NameState`].
#[derive(Clone, PartialEq, Eq, Debug, Display)]
#[display(Debug)]
pub enum Covenant {
    /// Opens a name for auction.
    Open,
    /// Commits to a blinded bid amount locked behind `lockup`.
    Bid {
        /// Commitment hash the bidder must later open in REVEAL.
        blind: [u8; 32],
        /// Value locked by the bid coin (upper bound on the real bid).
        lockup: u64,
    },
    /// Opens a previously blinded bid, exposing its real value.
    Reveal {
        /// The bid's real value, now public.
        value: u64,
    },
    /// Returns a losing bidder's lockup.
    Redeem,
    /// First registration of resource data by the auction's winner.
    Register {
        /// The resource bytes to publish (possibly empty).
        data: Vec<u8>,
    },
    /// Replaces the registered resource data without affecting renewal.
    Update {
        /// The new resource bytes.
        data: Vec<u8>,
    },
    /// Resets the renewal clock.
    Renew,
    /// Begins transferring ownership to a new controlling key.
    Transfer,
    /// Completes a transfer once its lockup has elapsed.
    Finalize,
    /// Cancels a pending transfer.
    Cancel,
    /// Revokes the name, clearing its data and locking it for
    /// `auctionMaturity` blocks.
    Revoke,
    /// Creates a name via the reserved-name claim path.
    Claim {
        /// Whether this is a weak (vs. strong) claim proof.
        weak: bool,
    },
}

impl Covenant {
    /// The covenant's name, for diagnostics and ban-score reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Covenant::Open => "OPEN",
            Covenant::Bid { .. } => "BID",
            Covenant::Reveal { .. } => "REVEAL",
            Covenant::Redeem => "REDEEM",
            Covenant::Register { .. } => "REGISTER",
            Covenant::Update { .. } => "UPDATE",
            Covenant::Renew => "RENEW",
            Covenant::Transfer => "TRANSFER",
            Covenant::Finalize => "FINALIZE",
            Covenant::Cancel => "CANCEL",
            Covenant::Revoke => "REVOKE",
            Covenant::Claim { .. } => "CLAIM",
        }
    }
}

/// Everything an `apply` call needs besides the covenant payload itself:
/// the height the containing transaction connects at, the outpoint that
/// now carries the name's covenant output, and the network's time windows.
pub struct TransitionContext<'p> {
    /// Height of the block being connected.
    pub height: Height,
    /// Outpoint of the transaction output that now carries the name.
    pub new_owner: OutPoint,
    /// Network parameters in effect.
    pub params: &'p NetworkParams,
}

/// Whether `covenant` is permitted against a name currently in `phase`, or
/// against an absent name when `phase` is `None` (spec.md §4.2's table).
pub fn permits(phase: Option<Phase>, covenant: &Covenant) -> bool {
    use Covenant::*;
    match (phase, covenant) {
        // OPEN: name absent, or expired/revoked past maturity.
        (None, Open) => true,
        (Some(Phase::Expired), Open) => true,

        (Some(Phase::Bidding), Bid { .. }) => true,
        (Some(Phase::Reveal), Reveal { .. }) => true,

        // REDEEM: after reveal closes, for losing bids.
        (Some(Phase::ClosedUnregistered), Redeem) => true,
        (Some(Phase::ClosedRegistered), Redeem) => true,

        (Some(Phase::ClosedUnregistered), Register { .. }) => true,

        (Some(Phase::ClosedRegistered), Update { .. }) => true,
        (Some(Phase::ClosedRegistered), Renew) => true,
        (Some(Phase::ClosedRegistered), Transfer) => true,

        (Some(Phase::Transferring), Finalize) => true,
        (Some(Phase::Transferring), Cancel) => true,

        (Some(Phase::ClosedRegistered), Revoke) => true,
        (Some(Phase::Transferring), Revoke) => true,

        (None, Claim { .. }) => true,
        (Some(Phase::Expired), Claim { .. }) => true,

        _ => false,
    }
}

/// Apply `covenant` to the prior (optional) state, producing the new
/// `NameState`. Returns [`VerifyError::BadNameState`] if `covenant` is not
/// permitted in the prior state's current phase (computed at
/// `ctx.height`), mirroring spec.md §4.2's "failure semantics" list.
pub fn apply(
    name: &str,
    name_hash: crate::covenant::name::NameHash,
    prior: Option<&NameState>,
    covenant: &Covenant,
    ctx: &TransitionContext,
) -> Result<NameState, VerifyError> {
    let phase = prior.map(|s| s.phase(ctx.height, ctx.params));
    if !permits(phase, covenant) {
        return Err(VerifyError::BadNameState {
            name: name_hash,
            covenant: covenant.kind(),
        });
    }

    use Covenant::*;
    let next = match covenant {
        Open => NameState::opened(name, name_hash, ctx.height, ctx.new_owner),

        // BID records a blinded bid coin; the OPEN coin keeps the name until
        // REVEAL, so the owner does not move here.
        Bid { .. } => prior.cloned().expect("permits() requires Some state for BID"),

        Reveal { value } => {
            let mut s = prior.cloned().expect("permits() requires Some state for REVEAL");
            if *value > s.value {
                s.highest = s.value;
                s.value = *value;
                s.owner = ctx.new_owner;
            } else if *value > s.highest {
                s.highest = *value;
            }
            s
        }

        Redeem => prior.cloned().expect("permits() requires Some state for REDEEM"),

        Register { data } => {
            let mut s = prior.cloned().expect("permits() requires Some state for REGISTER");
            s.data = data.clone();
            s.registered = true;
            s.renewal = ctx.height;
            s.owner = ctx.new_owner;
            s
        }

        Update { data } => {
            let mut s = prior.cloned().expect("permits() requires Some state for UPDATE");
            s.data = data.clone();
            s.owner = ctx.new_owner;
            s
        }

        Renew => {
            let mut s = prior.cloned().expect("permits() requires Some state for RENEW");
            if ctx.height < ctx.params.renew_not_too_early_height(s.renewal) {
                return Err(VerifyError::BadNameState {
                    name: name_hash,
                    covenant: "RENEW",
                });
            }
            s.renewal = ctx.height;
            s.owner = ctx.new_owner;
            s
        }

        Transfer => {
            let mut s = prior.cloned().expect("permits() requires Some state for TRANSFER");
            s.transfer = ctx.height;
            s.owner = ctx.new_owner;
            s
        }

        Finalize => {
            let mut s = prior.cloned().expect("permits() requires Some state for FINALIZE");
            if ctx.height < s.transfer.saturating_add(ctx.params.transfer_lockup) {
                return Err(VerifyError::BadNameState {
                    name: name_hash,
                    covenant: "FINALIZE",
                });
            }
            s.transfer = 0;
            s.owner = ctx.new_owner;
            s
        }

        Cancel => {
            let mut s = prior.cloned().expect("permits() requires Some state for CANCEL");
            s.transfer = 0;
            s.owner = ctx.new_owner;
            s
        }

        Revoke => {
            let mut s = prior.cloned().expect("permits() requires Some state for REVOKE");
            s.revoked = ctx.height;
            s.data.clear();
            s.transfer = 0;
            s.owner = ctx.new_owner;
            s
        }

        Claim { weak } => {
            let mut s = NameState::opened(name, name_hash, ctx.height, ctx.new_owner);
            s.claimed = true;
            s.weak = *weak;
            s
        }
    };

    Ok(next)
}

/// Invert `apply`: given the state it produced and the prior state (`None`
/// if the covenant created the name), recover the prior state. For OPEN
/// and CLAIM this means "the name no longer exists", represented by a
/// `None` return, so that `undo(apply(prior, c), c) == prior` always holds.
pub fn undo(covenant: &Covenant, prior: Option<NameState>) -> Option<NameState> {
    match covenant {
        Covenant::Open | Covenant::Claim { .. } => None,
        _ => prior,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covenant::name::NameHash;
    use bitcoin::hashes::Hash;

    fn outpoint(i: u32) -> OutPoint { OutPoint::new(bitcoin::Txid::all_zeros(), i) }

    #[test]
    fn open_then_undo_is_noop() {
        let params = NetworkParams::test_defaults();
        let ctx = TransitionContext { height: 10, new_owner: outpoint(0), params: &params };
        let name_hash = NameHash::of("alice");
        let applied = apply("alice", name_hash, None, &Covenant::Open, &ctx).unwrap();
        assert_eq!(undo(&Covenant::Open, None), None);
        assert_eq!(applied.name, "alice");
    }

    #[test]
    fn reveal_tracks_second_price_regardless_of_order() {
        let params = NetworkParams::test_defaults();
        let name_hash = NameHash::of("alice");
        let ctx0 = TransitionContext { height: 0, new_owner: outpoint(0), params: &params };
        let opened = apply("alice", name_hash, None, &Covenant::Open, &ctx0).unwrap();

        // BID is a no-op on NameState, so the test goes straight to the reveals.
        let ctx1 = TransitionContext { height: 1, new_owner: outpoint(1), params: &params };
        let after_low = apply(
            "alice",
            name_hash,
            Some(&opened),
            &Covenant::Reveal { value: 10_000 },
            &ctx1,
        )
        .unwrap();

        let ctx2 = TransitionContext { height: 1, new_owner: outpoint(2), params: &params };
        let after_high = apply(
            "alice",
            name_hash,
            Some(&after_low),
            &Covenant::Reveal { value: 15_000 },
            &ctx2,
        )
        .unwrap();

        assert_eq!(after_high.value, 15_000);
        assert_eq!(after_high.highest, 10_000);
        assert_eq!(after_high.owner, outpoint(2));
    }

    #[test]
    fn transfer_before_lockup_rejected() {
        let params = NetworkParams::test_defaults();
        let name_hash = NameHash::of("alice");
        let mut state = NameState::opened("alice", name_hash, 0, outpoint(0));
        state.registered = true;
        state.transfer = 10;

        let ctx = TransitionContext {
            height: 10 + params.transfer_lockup - 1,
            new_owner: outpoint(1),
            params: &params,
        };
        let err = apply("alice", name_hash, Some(&state), &Covenant::Finalize, &ctx).unwrap_err();
        assert_eq!(err.code(), "bad-name-state");
    }
}
