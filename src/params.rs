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

//! Immutable network parameter record (spec.md §9, Design Note 2: "global
//! mutable state" is modeled as an immutable record created once at
//! startup; test harnesses clone it rather than patching a shared
//! singleton).

use crate::Height;

/// All of the time-windowed constants that drive name-phase transitions,
/// plus the consensus caps enforced by the block assembler.
///
/// `NetworkParams` is plain data: it has no interior mutability and no
/// global instance. Callers construct one at startup (from [`crate::config`])
/// and pass `&NetworkParams` through every consensus-critical call. Tests
/// that need different windows call [`NetworkParams::test_defaults`] or clone
/// and patch a production preset; they never mutate a shared instance.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NetworkParams {
    /// Spacing, in blocks, between successive points at which a newly
    /// OPENed name's bidding period may start (used to stagger auctions).
    pub tree_interval: Height,
    /// Length, in blocks, of the bidding window after OPEN.
    pub bidding_period: Height,
    /// Length, in blocks, of the reveal window after bidding closes.
    pub reveal_period: Height,
    /// Blocks a TRANSFER must sit before it can be FINALIZEd.
    pub transfer_lockup: Height,
    /// Blocks after REVOKE before the name may be re-OPENed.
    pub auction_maturity: Height,
    /// Blocks between REGISTER/RENEW before the name lapses.
    pub renewal_window: Height,
    /// Blocks a bid's lockup must remain before REDEEM.
    pub lockup_period: Height,

    /// Maximum serialized block weight.
    pub max_block_weight: u64,
    /// Maximum serialized block size, in bytes.
    pub max_block_size: u64,
    /// Maximum sigops per block.
    pub max_block_sigops: u64,
    /// Maximum OPEN covenants per block.
    pub max_block_opens: u32,
    /// Maximum UPDATE covenants per block.
    pub max_block_updates: u32,
    /// Maximum RENEW covenants per block.
    pub max_block_renewals: u32,

    /// Target spacing between blocks, in seconds.
    pub target_spacing: u32,
    /// Whether a stalled chain resets difficulty to the minimum
    /// (`time > prev.time + 2 * target_spacing`).
    pub target_reset: bool,

    /// Maximum number of claims embedded in one coinbase.
    pub max_claims_per_block: usize,
    /// Maximum number of airdrops embedded in one coinbase.
    pub max_airdrops_per_block: usize,

    /// Cumulative transaction weight, by priority order, the assembler
    /// admits before switching its selection comparator from priority to
    /// fee rate.
    pub priority_weight_budget: u64,
    /// Priority score below which the assembler switches to the rate
    /// comparator even if `priority_weight_budget` has not been exhausted.
    pub priority_threshold: f64,

    /// Coinbase maturity, in blocks, before a coinbase output is spendable.
    pub coinbase_maturity: Height,
    /// Halving interval, in blocks, for the block subsidy.
    pub halving_interval: Height,
    /// Initial block subsidy, in the chain's base unit.
    pub initial_reward: u64,
}

impl NetworkParams {
    /// Mainnet-shaped parameters (the production preset). Concrete window
    /// lengths mirror the orders of magnitude named in spec.md §3/§4.2.
    pub fn mainnet() -> Self {
        NetworkParams {
            tree_interval: 36,
            bidding_period: 5 * 36,
            reveal_period: 10 * 36,
            transfer_lockup: 288,
            auction_maturity: 14 * 144,
            renewal_window: 365 * 144,
            lockup_period: 10 * 36,
            max_block_weight: 4_000_000,
            max_block_size: 1_000_000,
            max_block_sigops: 80_000,
            max_block_opens: 300,
            max_block_updates: 300,
            max_block_renewals: 300,
            target_spacing: 10 * 60,
            target_reset: false,
            max_claims_per_block: 10,
            max_airdrops_per_block: 10,
            priority_weight_budget: 48_000,
            priority_threshold: 57_600_000.0,
            coinbase_maturity: 100,
            halving_interval: 170_000,
            initial_reward: 2_000 * 1_000_000,
        }
    }

    /// Small, fast-moving windows for unit and integration tests, so a
    /// reveal/registration lifecycle can be exercised without simulating
    /// tens of thousands of blocks.
    pub fn test_defaults() -> Self {
        NetworkParams {
            tree_interval: 2,
            bidding_period: 4,
            reveal_period: 4,
            transfer_lockup: 4,
            auction_maturity: 8,
            renewal_window: 200,
            lockup_period: 4,
            max_block_weight: 4_000_000,
            max_block_size: 1_000_000,
            max_block_sigops: 80_000,
            max_block_opens: 4,
            max_block_updates: 4,
            max_block_renewals: 4,
            target_spacing: 10,
            target_reset: true,
            max_claims_per_block: 10,
            max_airdrops_per_block: 10,
            priority_weight_budget: 2_000,
            priority_threshold: 1_000.0,
            coinbase_maturity: 2,
            halving_interval: 1_000,
            initial_reward: 2_000 * 1_000_000,
        }
    }

    /// The block height, if any, beyond `renewal`, at which a RENEW is no
    /// longer "too early" under the policy rule (last 1/8th of the
    /// renewal window, spec.md §4.2).
    pub fn renew_not_too_early_height(&self, renewal: Height) -> Height {
        renewal.saturating_add(self.renewal_window - self.renewal_window / 8)
    }

    /// The height at which a name registered/renewed at `renewal` lapses
    /// and becomes re-OPENable again.
    pub fn expiry_height(&self, renewal: Height) -> Height {
        renewal.saturating_add(self.renewal_window)
    }

    /// Block subsidy at `height`, halving every `halving_interval` blocks.
    pub fn reward(&self, height: Height) -> u64 {
        let halvings = height / self.halving_interval;
        if halvings >= 64 {
            0
        } else {
            self.initial_reward >> halvings
        }
    }
}

impl Default for NetworkParams {
    fn default() -> Self { NetworkParams::mainnet() }
}
