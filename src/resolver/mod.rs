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

//! The authoritative resolver (spec.md §4.5): DNS message/record wire
//! types, the name-proof record, and the zone projector that turns
//! on-chain name state into signed, proven DNS responses.

pub mod message;
pub mod proof;
pub mod zone;

pub use message::{Answer, QType, Question, RData, Rcode, Response};
pub use proof::{NameProof, ProofNode};
pub use zone::{Resolver, RootConfig, ZoneKey};
