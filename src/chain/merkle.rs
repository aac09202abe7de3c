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

//! Blake2b-256 Merkle trees over transaction and witness hashes (spec.md
//! §4.4: "Merkle roots are computed over Blake2b-256 tree leaves").

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;

fn blake2b256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2bVar::new(32).expect("32 is a valid Blake2b output size");
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    hasher.finalize_variable(&mut out).expect("output buffer matches requested size");
    out
}

/// The classic binary Merkle root over `leaves`, duplicating the final leaf
/// at each level when the level's length is odd. An empty leaf set hashes
/// to the all-zero root.
pub fn merkle_root(leaves: &[[u8; 32]]) -> [u8; 32] {
    if leaves.is_empty() {
        return [0u8; 32];
    }
    let mut level: Vec<[u8; 32]> = leaves.to_vec();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            let last = *level.last().unwrap();
            level.push(last);
        }
        level = level
            .chunks_exact(2)
            .map(|pair| blake2b256(&[&pair[0], &pair[1]]))
            .collect();
    }
    level[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_leaf_is_its_own_root() {
        let leaf = [7u8; 32];
        assert_eq!(merkle_root(&[leaf]), leaf);
    }

    #[test]
    fn odd_leaf_count_duplicates_the_last() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        let c = [3u8; 32];
        let with_dup = merkle_root(&[a, b, c, c]);
        let odd = merkle_root(&[a, b, c]);
        assert_eq!(with_dup, odd);
    }

    #[test]
    fn empty_tree_roots_to_zero() {
        assert_eq!(merkle_root(&[]), [0u8; 32]);
    }
}
