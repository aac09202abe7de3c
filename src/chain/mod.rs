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

//! Block template assembly, coinbase construction, Merkle trees and the
//! mining header (spec.md §4.3, §4.4).

pub mod assembler;
pub mod coinbase;
pub mod header;
pub mod merkle;
pub mod rescan;
pub mod state;

pub use assembler::{AirdropCandidate, Assembler, ClaimCandidate, MempoolEntry, Selection};
pub use coinbase::{AirdropEntry, ClaimEntry, CoinbaseBuilder};
pub use header::MiningHeader;
pub use merkle::merkle_root;
pub use rescan::{RescanError, Rescanner, ScanControl, ScanItem};
pub use state::{ChainLock, ChainState};

use crate::error::VerifyError;
use crate::params::NetworkParams;

/// Pick the block template's timestamp: `max(now, mtp + 1)` (spec.md §4.3
/// "Updating time").
pub fn next_block_time(now: u64, median_time_past: u64) -> u64 { now.max(median_time_past + 1) }

/// Whether a `targetReset`-enabled network should reset difficulty to the
/// minimum for this block, per spec.md §4.3: `time > prev.time +
/// 2*targetSpacing`.
pub fn should_reset_target(params: &NetworkParams, time: u64, prev_time: u64) -> bool {
    params.target_reset && time > prev_time + 2 * params.target_spacing as u64
}

/// Final invariant check run after a template is fully assembled (spec.md
/// §4.3 step 6, when pre-verification is enabled): the total weight must
/// still respect the network's absolute ceiling.
pub fn assert_template_invariants(
    params: &NetworkParams,
    weight: u64,
    base_size: u64,
) -> Result<(), VerifyError> {
    if weight > params.max_block_weight {
        return Err(VerifyError::BadBlkWeight { weight, max: params.max_block_weight });
    }
    if base_size > params.max_block_size {
        return Err(VerifyError::BadBlkLength { len: base_size, max: params.max_block_size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_time_never_goes_below_mtp_plus_one() {
        assert_eq!(next_block_time(100, 150), 151);
        assert_eq!(next_block_time(200, 150), 200);
    }

    #[test]
    fn target_reset_triggers_past_twice_spacing() {
        let mut params = NetworkParams::test_defaults();
        params.target_reset = true;
        params.target_spacing = 10;
        assert!(!should_reset_target(&params, 1019, 1000));
        assert!(should_reset_target(&params, 1021, 1000));
    }
}
