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

//! The block template assembler (spec.md §4.3): caps enforcement,
//! claim/airdrop draining, and dependency-ordered transaction selection
//! with a priority-then-rate comparator switch.

use crate::covenant::name::NameHash;
use crate::covenant::transition::Covenant;
use crate::params::NetworkParams;
use bitcoin::Txid;
use std::collections::{HashMap, HashSet};

/// One mempool transaction as the assembler sees it: enough to evaluate
/// consensus caps and ordering, without the full transaction body.
#[derive(Clone, Debug)]
pub struct MempoolEntry {
    /// This transaction's id.
    pub txid: Txid,
    /// Unconfirmed parents this transaction depends on.
    pub parents: Vec<Txid>,
    /// Serialized weight.
    pub weight: u64,
    /// Signature operation count.
    pub sigops: u64,
    /// Fee paid, in the chain's base unit.
    pub fee: u64,
    /// Coin-age priority score at template-assembly time.
    pub priority: f64,
    /// The name-changing covenant this transaction carries, if any.
    pub covenant: Option<(NameHash, Covenant)>,
}

impl MempoolEntry {
    /// Fee rate: fee per unit weight.
    pub fn rate(&self) -> f64 { self.fee as f64 / self.weight.max(1) as f64 }
}

/// A reserved-name claim candidate, ordered by `rate` in the claim max-heap
/// (spec.md §4.3 step 2).
#[derive(Clone, Debug)]
pub struct ClaimCandidate {
    /// The name this claim creates.
    pub name_hash: NameHash,
    /// Ranking key: higher drains first.
    pub rate: u64,
    /// Weight this claim adds to the coinbase once embedded.
    pub weight: u64,
}

/// An airdrop redemption candidate, ordered by `rate` in the airdrop
/// max-heap (spec.md §4.3 step 3).
#[derive(Clone, Debug)]
pub struct AirdropCandidate {
    /// Leaf index in the airdrop tree this redemption spends.
    pub leaf_index: usize,
    /// Ranking key: higher drains first.
    pub rate: u64,
    /// Weight this airdrop adds to the coinbase once embedded.
    pub weight: u64,
}

/// The outcome of one [`Assembler::assemble`] run: everything the caller
/// needs to finish building a block template.
#[derive(Default, Clone, Debug)]
pub struct Selection {
    /// Claims drained from the candidate heap, in drain order.
    pub claims: Vec<ClaimCandidate>,
    /// Airdrops drained from the candidate heap, in drain order.
    pub airdrops: Vec<AirdropCandidate>,
    /// Ordinary transactions selected, in inclusion order.
    pub transactions: Vec<Txid>,
    /// Total serialized weight, including the coinbase's reserved weight.
    pub weight: u64,
    /// Total sigop count, including the coinbase's reserved sigops.
    pub sigops: u64,
    /// Total fees collected from `transactions` (claims/airdrops pay no
    /// assembler-visible fee; their net value is handled by the coinbase).
    pub fees: u64,
    /// OPEN covenants included.
    pub opens: u32,
    /// UPDATE covenants included.
    pub updates: u32,
    /// RENEW covenants included.
    pub renewals: u32,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mode {
    Priority,
    Rate,
}

/// Drives one block template's transaction selection against a snapshot of
/// mempool entries and claim/airdrop candidates.
pub struct Assembler<'p> {
    params: &'p NetworkParams,
}

impl<'p> Assembler<'p> {
    /// Build an assembler bound to `params`'s caps and thresholds.
    pub fn new(params: &'p NetworkParams) -> Self { Assembler { params } }

    /// Run the full algorithm from spec.md §4.3: seed with the coinbase's
    /// reserved weight/sigops, drain up to 10 claims and 10 airdrops by
    /// rate, then select ordinary transactions respecting dependencies,
    /// the priority-then-rate comparator switch, and every consensus cap.
    pub fn assemble(
        &self,
        coinbase_weight: u64,
        coinbase_sigops: u64,
        mut claims: Vec<ClaimCandidate>,
        mut airdrops: Vec<AirdropCandidate>,
        entries: &[MempoolEntry],
    ) -> Selection {
        let mut selection = Selection {
            weight: coinbase_weight,
            sigops: coinbase_sigops,
            ..Selection::default()
        };

        claims.sort_by(|a, b| b.rate.cmp(&a.rate));
        for claim in claims.into_iter().take(self.params.max_claims_per_block) {
            if selection.weight + claim.weight > self.params.max_block_weight {
                continue;
            }
            selection.weight += claim.weight;
            selection.claims.push(claim);
        }

        airdrops.sort_by(|a, b| b.rate.cmp(&a.rate));
        for airdrop in airdrops.into_iter().take(self.params.max_airdrops_per_block) {
            if selection.weight + airdrop.weight > self.params.max_block_weight {
                continue;
            }
            selection.weight += airdrop.weight;
            selection.airdrops.push(airdrop);
        }

        self.select_transactions(entries, &mut selection);
        selection
    }

    fn select_transactions(&self, entries: &[MempoolEntry], selection: &mut Selection) {
        let by_txid: HashMap<Txid, usize> =
            entries.iter().enumerate().map(|(i, e)| (e.txid, i)).collect();

        let mut remaining_parents = vec![0usize; entries.len()];
        let mut dependents: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            let mut unresolved = 0;
            for parent in &entry.parents {
                if let Some(&parent_idx) = by_txid.get(parent) {
                    unresolved += 1;
                    dependents.entry(parent_idx).or_default().push(i);
                }
            }
            remaining_parents[i] = unresolved;
        }

        let mut ready: Vec<usize> =
            (0..entries.len()).filter(|&i| remaining_parents[i] == 0).collect();

        let mut mode = Mode::Priority;
        let mut priority_budget = self.params.priority_weight_budget;
        let mut used_names: HashSet<NameHash> = HashSet::new();
        let mut excluded: HashSet<usize> = HashSet::new();

        while !ready.is_empty() {
            if mode == Mode::Priority
                && (priority_budget == 0
                    || ready
                        .iter()
                        .all(|&i| entries[i].priority < self.params.priority_threshold))
            {
                mode = Mode::Rate;
            }

            let chosen_pos = match mode {
                Mode::Priority => ready
                    .iter()
                    .enumerate()
                    .max_by(|a, b| {
                        let ea = &entries[*a.1];
                        let eb = &entries[*b.1];
                        ea.priority
                            .partial_cmp(&eb.priority)
                            .unwrap_or(std::cmp::Ordering::Equal)
                            .then_with(|| ea.rate().partial_cmp(&eb.rate()).unwrap_or(std::cmp::Ordering::Equal))
                    })
                    .map(|(pos, _)| pos),
                Mode::Rate => ready
                    .iter()
                    .enumerate()
                    .max_by(|a, b| {
                        let ea = &entries[*a.1];
                        let eb = &entries[*b.1];
                        ea.rate()
                            .partial_cmp(&eb.rate())
                            .unwrap_or(std::cmp::Ordering::Equal)
                            .then_with(|| ea.priority.partial_cmp(&eb.priority).unwrap_or(std::cmp::Ordering::Equal))
                    })
                    .map(|(pos, _)| pos),
            };

            let Some(pos) = chosen_pos else { break };
            let idx = ready.remove(pos);
            let entry = &entries[idx];

            if excluded.contains(&idx) || !self.admits(selection, &used_names, entry) {
                excluded.insert(idx);
            } else {
                selection.weight += entry.weight;
                selection.sigops += entry.sigops;
                selection.fees += entry.fee;
                priority_budget = priority_budget.saturating_sub(entry.weight);
                if let Some((name_hash, covenant)) = &entry.covenant {
                    used_names.insert(*name_hash);
                    match covenant {
                        Covenant::Open => selection.opens += 1,
                        Covenant::Update { .. } => selection.updates += 1,
                        Covenant::Renew => selection.renewals += 1,
                        _ => {}
                    }
                }
                selection.transactions.push(entry.txid);

                // A child only becomes ready once every parent that made it into the
                // template has been accounted for; an excluded parent leaves its
                // children's counts above zero forever, so they never enter `ready`.
                if let Some(children) = dependents.get(&idx) {
                    for &child in children {
                        remaining_parents[child] -= 1;
                        if remaining_parents[child] == 0 {
                            ready.push(child);
                        }
                    }
                }
            }
        }
    }

    fn admits(&self, selection: &Selection, used_names: &HashSet<NameHash>, entry: &MempoolEntry) -> bool {
        if selection.weight + entry.weight > self.params.max_block_weight {
            return false;
        }
        if selection.sigops + entry.sigops > self.params.max_block_sigops {
            return false;
        }
        if let Some((name_hash, covenant)) = &entry.covenant {
            if used_names.contains(name_hash) {
                return false;
            }
            match covenant {
                Covenant::Open if selection.opens >= self.params.max_block_opens => return false,
                Covenant::Update { .. } if selection.updates >= self.params.max_block_updates => return false,
                Covenant::Renew if selection.renewals >= self.params.max_block_renewals => return false,
                _ => {}
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;

    fn txid(byte: u8) -> Txid {
        let mut bytes = [0u8; 32];
        bytes[0] = byte;
        Txid::from_slice(&bytes).unwrap()
    }

    #[test]
    fn selects_independent_entries_by_priority_then_rate() {
        let params = NetworkParams::test_defaults();
        let assembler = Assembler::new(&params);

        let entries = vec![
            MempoolEntry { txid: txid(1), parents: vec![], weight: 100, sigops: 1, fee: 1, priority: 10.0, covenant: None },
            MempoolEntry { txid: txid(2), parents: vec![], weight: 100, sigops: 1, fee: 50, priority: 1.0, covenant: None },
        ];

        let selection = assembler.assemble(0, 0, vec![], vec![], &entries);
        assert_eq!(selection.transactions.len(), 2);
        assert_eq!(selection.transactions[0], txid(1));
    }

    #[test]
    fn respects_dependency_order() {
        let params = NetworkParams::test_defaults();
        let assembler = Assembler::new(&params);

        let parent = MempoolEntry { txid: txid(1), parents: vec![], weight: 10, sigops: 0, fee: 1, priority: 0.0, covenant: None };
        let child = MempoolEntry { txid: txid(2), parents: vec![txid(1)], weight: 10, sigops: 0, fee: 100, priority: 0.0, covenant: None };

        let selection = assembler.assemble(0, 0, vec![], vec![], &[child, parent]);
        assert_eq!(selection.transactions, vec![txid(1), txid(2)]);
    }

    #[test]
    fn rejects_duplicate_name_hash_in_same_block() {
        let params = NetworkParams::test_defaults();
        let assembler = Assembler::new(&params);
        let name_hash = NameHash::of("alice");

        let a = MempoolEntry {
            txid: txid(1),
            parents: vec![],
            weight: 10,
            sigops: 0,
            fee: 10,
            priority: 5.0,
            covenant: Some((name_hash, Covenant::Open)),
        };
        let b = MempoolEntry {
            txid: txid(2),
            parents: vec![],
            weight: 10,
            sigops: 0,
            fee: 10,
            priority: 5.0,
            covenant: Some((name_hash, Covenant::Open)),
        };

        let selection = assembler.assemble(0, 0, vec![], vec![], &[a, b]);
        assert_eq!(selection.opens, 1);
        assert_eq!(selection.transactions.len(), 1);
    }

    #[test]
    fn claims_and_airdrops_drain_by_rate_up_to_ten() {
        let params = NetworkParams::test_defaults();
        let assembler = Assembler::new(&params);

        let claims: Vec<ClaimCandidate> = (0..12)
            .map(|i| ClaimCandidate { name_hash: NameHash::of(&format!("n{i}")), rate: i, weight: 10 })
            .collect();

        let selection = assembler.assemble(0, 0, claims, vec![], &[]);
        assert_eq!(selection.claims.len(), 10);
        assert_eq!(selection.claims[0].rate, 11);
    }
}
