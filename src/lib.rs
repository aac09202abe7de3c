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

#![recursion_limit = "256"]
// Coding conventions
#![deny(
    non_upper_case_globals,
    non_camel_case_types,
    non_snake_case,
    unused_mut,
    unused_imports,
    dead_code
)]

//! `nsconsensus` implements the consensus-critical core of a naming
//! blockchain: the per-name auction state machine and its covenant
//! transition rules, the block template assembler, the coinbase and
//! mining-header builder, the on-chain resource codec, the airdrop
//! bitfield, and the authoritative DNS resolver that projects name state
//! into signed responses.
//!
//! Storage, P2P networking, mempool implementation, wallet signing and
//! the HTTP/RPC surface are treated as external collaborators: this
//! crate defines the traits they must satisfy, not their
//! implementations.

#[macro_use]
extern crate amplify;
#[macro_use]
extern crate strict_encoding;

#[cfg(feature = "serde")]
extern crate serde_crate as serde;

pub mod airdrop;
pub mod chain;
pub mod config;
pub mod covenant;
pub mod error;
pub mod migrations;
pub mod params;
pub mod resolver;
pub mod resource;

pub use covenant::name::{Name, NameHash};
pub use covenant::state::{NameState, Phase};
pub use covenant::transition::Covenant;
pub use error::{ConsensusError, OperationalError, PolicyError, VerifyError};
pub use params::NetworkParams;

/// Crate-wide `Result` alias defaulting to the consensus verify-error type,
/// the outcome callers most commonly need to propagate.
pub type Result<T, E = VerifyError> = std::result::Result<T, E>;

/// Block height, counted from the genesis block (height 0).
pub type Height = u32;
