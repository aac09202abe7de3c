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

//! The `NAMEPROOF` record: a dedicated inclusion/non-inclusion proof for a
//! name in the authenticated tree, attached to EDNS-enabled queries. Chosen
//! over TXT chunking so a resolver can hand back a proof without splitting
//! it across several TXT strings.

use crate::covenant::name::NameHash;

/// One sibling hash on the path from a tree leaf to its root.
pub type ProofNode = [u8; 32];

/// A Merkle inclusion (or non-inclusion) proof for one name, carried as the
/// payload of a synthesized `NAMEPROOF` record.
///
/// Layout on the wire (inside the record's RDATA): 1 byte `exists` flag, a
/// `u16` node count, that many 32-byte [`ProofNode`]s, then, only if
/// `exists`, a `u16` length-prefixed copy of the name's raw resource bytes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NameProof {
    /// The name this proof concerns.
    pub name_hash: NameHash,
    /// Whether `name_hash` is present in the tree at the proof's root.
    pub exists: bool,
    /// Sibling hashes from the leaf (or the leaf's would-be position) to
    /// the tree root.
    pub nodes: Vec<ProofNode>,
    /// The name's raw resource bytes, present only when `exists` is true.
    pub data: Option<Vec<u8>>,
}

impl NameProof {
    /// Encode this proof's RDATA payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.push(self.exists as u8);
        out.extend_from_slice(&(self.nodes.len() as u16).to_be_bytes());
        for node in &self.nodes {
            out.extend_from_slice(node);
        }
        if let Some(data) = &self.data {
            out.extend_from_slice(&(data.len() as u16).to_be_bytes());
            out.extend_from_slice(data);
        }
        out
    }

    /// Decode a proof previously produced by [`NameProof::encode`], for a
    /// proof concerning `name_hash`.
    pub fn decode(name_hash: NameHash, buf: &[u8]) -> Option<Self> {
        if buf.is_empty() {
            return None;
        }
        let exists = buf[0] != 0;
        if buf.len() < 3 {
            return None;
        }
        let node_count = u16::from_be_bytes([buf[1], buf[2]]) as usize;
        let mut pos = 3;
        let mut nodes = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            let node = buf.get(pos..pos + 32)?;
            nodes.push(node.try_into().ok()?);
            pos += 32;
        }
        let data = if exists {
            let len = u16::from_be_bytes([*buf.get(pos)?, *buf.get(pos + 1)?]) as usize;
            pos += 2;
            Some(buf.get(pos..pos + len)?.to_vec())
        } else {
            None
        };
        Some(NameProof { name_hash, exists, nodes, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_an_existence_proof() {
        let proof = NameProof {
            name_hash: NameHash::of("alice"),
            exists: true,
            nodes: vec![[1u8; 32], [2u8; 32]],
            data: Some(vec![9, 9, 9]),
        };
        let encoded = proof.encode();
        let decoded = NameProof::decode(proof.name_hash, &encoded).unwrap();
        assert_eq!(decoded, proof);
    }

    #[test]
    fn round_trips_a_non_inclusion_proof() {
        let proof = NameProof { name_hash: NameHash::of("bob"), exists: false, nodes: vec![[3u8; 32]], data: None };
        let encoded = proof.encode();
        let decoded = NameProof::decode(proof.name_hash, &encoded).unwrap();
        assert_eq!(decoded, proof);
    }
}
