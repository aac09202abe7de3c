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

//! Coinbase transaction assembly, including claim and airdrop embedding
//! (spec.md §4.4).

use crate::covenant::transition::Covenant;
use bitcoin::blockdata::locktime::PackedLockTime;
use bitcoin::{Address, OutPoint, Script, Sequence, Transaction, TxIn, TxOut, Txid, Witness};

/// Maximum length, in bytes, of the miner-supplied coinbase flags string
/// (spec.md §4.4).
pub const MAX_COINBASE_FLAGS: usize = 20;

/// A reserved-name claim ready to be embedded into a coinbase, carrying its
/// proof blob and the covenant output it mints.
pub struct ClaimEntry {
    /// The raw claim proof, stored verbatim in the input's witness.
    pub proof_blob: Vec<u8>,
    /// The covenant minted for this claim; always a [`Covenant::Claim`].
    pub covenant: Covenant,
    /// Output script for the minted name-carrying coin (a data-carrier,
    /// not a payment to a key).
    pub covenant_script: Script,
}

/// An airdrop redemption ready to be embedded into a coinbase.
pub struct AirdropEntry {
    /// The raw airdrop proof, stored verbatim in the input's witness.
    pub proof_blob: Vec<u8>,
    /// Destination script declared by the proof.
    pub address: Address,
    /// Amount to pay out: `proof.value - proof.fee`.
    pub payout: u64,
}

/// Builds the coinbase transaction for a block template: the miner reward,
/// plus one input/output pair per embedded claim and airdrop.
pub struct CoinbaseBuilder {
    height: u32,
    flags: Vec<u8>,
    random8: [u8; 8],
    random8b: [u8; 8],
    reward_script: Script,
    fees: u64,
}

impl CoinbaseBuilder {
    /// Start a coinbase for `height` paying `reward_script`. `flags` must
    /// be at most [`MAX_COINBASE_FLAGS`] bytes.
    pub fn new(height: u32, reward_script: Script, flags: Vec<u8>, random8: [u8; 8], random8b: [u8; 8]) -> Self {
        debug_assert!(flags.len() <= MAX_COINBASE_FLAGS);
        CoinbaseBuilder { height, flags, random8, random8b, reward_script, fees: 0 }
    }

    /// Record the total fees collected from the block's ordinary
    /// transactions; added to the reward output's value.
    pub fn with_fees(mut self, fees: u64) -> Self {
        self.fees = fees;
        self
    }

    /// Assemble the coinbase transaction: `locktime = height`, a placeholder
    /// input 0, the reward output, and one input/output pair per claim and
    /// airdrop (spec.md §4.4).
    pub fn build(&self, reward: u64, claims: &[ClaimEntry], airdrops: &[AirdropEntry]) -> Transaction {
        let mut input_0_witness = Witness::new();
        input_0_witness.push(&self.flags);
        input_0_witness.push(self.random8);
        input_0_witness.push(self.random8b);

        let mut inputs = vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: Script::new(),
            sequence: Sequence::MAX,
            witness: input_0_witness,
        }];

        let mut outputs = vec![TxOut { value: reward + self.fees, script_pubkey: self.reward_script.clone() }];

        for claim in claims {
            let mut witness = Witness::new();
            witness.push(&claim.proof_blob);
            inputs.push(TxIn {
                previous_output: OutPoint::null(),
                script_sig: Script::new(),
                sequence: Sequence::MAX,
                witness,
            });
            outputs.push(TxOut { value: 0, script_pubkey: claim.covenant_script.clone() });
        }

        for airdrop in airdrops {
            let mut witness = Witness::new();
            witness.push(&airdrop.proof_blob);
            inputs.push(TxIn {
                previous_output: OutPoint::null(),
                script_sig: Script::new(),
                sequence: Sequence::MAX,
                witness,
            });
            outputs.push(TxOut { value: airdrop.payout, script_pubkey: airdrop.address.script_pubkey() });
        }

        Transaction {
            version: 1,
            lock_time: PackedLockTime(self.height),
            input: inputs,
            output: outputs,
        }
    }
}

/// A coinbase's prevout is always the null outpoint; this is the sentinel
/// the validator uses to recognize the coinbase input among a block's
/// transactions.
pub fn is_coinbase_prevout(outpoint: &OutPoint) -> bool { *outpoint == OutPoint::null() }

/// The still-unconfirmed identifier of a freshly built coinbase, useful
/// before the block that contains it has been fully assembled.
pub fn coinbase_txid(tx: &Transaction) -> Txid { tx.txid() }
