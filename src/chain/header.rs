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

//! The 236-byte mining header and its proof-of-work check (spec.md §4.4,
//! §5 "Mining header").

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;

/// Fixed on-wire length of a [`MiningHeader`].
pub const HEADER_LEN: usize = 236;

/// The block header miners hash, in its exact 236-byte little-endian field
/// layout: version(4) prev(32) merkle(32) witness(32) tree(32) reserved(32)
/// time(8) bits(4) nonce(4) extraNonce(24) mask(32).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MiningHeader {
    /// Block version.
    pub version: u32,
    /// Hash of the previous block's header.
    pub prev: [u8; 32],
    /// Root of the plain transaction-hash Merkle tree.
    pub merkle: [u8; 32],
    /// Root of the witness-hash Merkle tree.
    pub witness: [u8; 32],
    /// Root of the authenticated name tree.
    pub tree: [u8; 32],
    /// Reserved for future use; zero unless otherwise specified.
    pub reserved: [u8; 32],
    /// Block timestamp, Unix seconds.
    pub time: u64,
    /// Compact difficulty target.
    pub bits: u32,
    /// Miner-controlled nonce.
    pub nonce: u32,
    /// Miner-controlled extra nonce space.
    pub extra_nonce: [u8; 24],
    /// XOR mask applied to the share hash to obtain the PoW hash.
    pub mask: [u8; 32],
}

impl MiningHeader {
    /// Serialize to the fixed 236-byte little-endian wire form.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        let mut pos = 0;
        macro_rules! put {
            ($bytes:expr) => {{
                let bytes = $bytes;
                out[pos..pos + bytes.len()].copy_from_slice(&bytes);
                pos += bytes.len();
            }};
        }
        put!(self.version.to_le_bytes());
        put!(self.prev);
        put!(self.merkle);
        put!(self.witness);
        put!(self.tree);
        put!(self.reserved);
        put!(self.time.to_le_bytes());
        put!(self.bits.to_le_bytes());
        put!(self.nonce.to_le_bytes());
        put!(self.extra_nonce);
        put!(self.mask);
        debug_assert_eq!(pos, HEADER_LEN);
        out
    }

    /// Parse a header previously produced by [`MiningHeader::to_bytes`].
    pub fn from_bytes(buf: &[u8; HEADER_LEN]) -> Self {
        let mut pos = 0;
        macro_rules! take {
            ($n:expr) => {{
                let slice = &buf[pos..pos + $n];
                pos += $n;
                slice
            }};
        }
        let version = u32::from_le_bytes(take!(4).try_into().unwrap());
        let prev = take!(32).try_into().unwrap();
        let merkle = take!(32).try_into().unwrap();
        let witness = take!(32).try_into().unwrap();
        let tree = take!(32).try_into().unwrap();
        let reserved = take!(32).try_into().unwrap();
        let time = u64::from_le_bytes(take!(8).try_into().unwrap());
        let bits = u32::from_le_bytes(take!(4).try_into().unwrap());
        let nonce = u32::from_le_bytes(take!(4).try_into().unwrap());
        let extra_nonce = take!(24).try_into().unwrap();
        let mask = take!(32).try_into().unwrap();
        debug_assert_eq!(pos, HEADER_LEN);
        MiningHeader {
            version,
            prev,
            merkle,
            witness,
            tree,
            reserved,
            time,
            bits,
            nonce,
            extra_nonce,
            mask,
        }
    }

    /// `Blake2b-256` of the serialized header, before the mask is applied.
    pub fn share_hash(&self) -> [u8; 32] {
        let mut hasher = Blake2bVar::new(32).expect("32 is a valid Blake2b output size");
        hasher.update(&self.to_bytes());
        let mut out = [0u8; 32];
        hasher.finalize_variable(&mut out).expect("output buffer matches requested size");
        out
    }

    /// The proof-of-work hash: `shareHash XOR mask`.
    pub fn pow_hash(&self) -> [u8; 32] {
        let share = self.share_hash();
        let mut out = [0u8; 32];
        for i in 0..32 {
            out[i] = share[i] ^ self.mask[i];
        }
        out
    }

    /// Whether this header's proof of work satisfies `target`, comparing
    /// both as little-endian 256-bit unsigned integers.
    pub fn meets_target(&self, target: &[u8; 32]) -> bool {
        let pow = self.pow_hash();
        for i in (0..32).rev() {
            if pow[i] != target[i] {
                return pow[i] < target[i];
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MiningHeader {
        MiningHeader {
            version: 1,
            prev: [1u8; 32],
            merkle: [2u8; 32],
            witness: [3u8; 32],
            tree: [4u8; 32],
            reserved: [0u8; 32],
            time: 1_700_000_000,
            bits: 0x1d00ffff,
            nonce: 42,
            extra_nonce: [9u8; 24],
            mask: [0u8; 32],
        }
    }

    #[test]
    fn round_trips_through_bytes() {
        let header = sample();
        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(MiningHeader::from_bytes(&bytes), header);
    }

    #[test]
    fn zero_mask_makes_pow_hash_equal_share_hash() {
        let header = sample();
        assert_eq!(header.pow_hash(), header.share_hash());
    }

    #[test]
    fn meets_target_compares_as_little_endian_integer() {
        let header = sample();
        let pow = header.pow_hash();
        let mut just_above = pow;
        just_above[31] = just_above[31].saturating_add(1);
        assert!(header.meets_target(&just_above));

        let mut just_below = pow;
        just_below[31] = just_below[31].saturating_sub(1);
        assert!(!header.meets_target(&just_below) || pow[31] == 0);
    }
}
