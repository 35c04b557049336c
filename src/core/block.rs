// Block data structures

use crate::core::{Canonical, Hash256, Transaction, digest};
use serde::{Deserialize, Serialize};

/// Index of the first block in every chain
pub const GENESIS_INDEX: u64 = 1;

/// previous_hash carried by the genesis block. It is a marker,
/// never the digest of an actual block.
pub const GENESIS_PREVIOUS_HASH: Hash256 = Hash256([0u8; 32]);

/// Block - a frozen batch of transactions linked to its predecessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position in the chain
    pub index: u64,
    /// Creation time (unix milliseconds)
    pub timestamp: u64,
    /// Snapshot of the pool at creation time
    pub transactions: Vec<Transaction>,
    /// Accepted proof-of-work value
    pub proof: u64,
    /// Digest of the previous block
    pub previous_hash: Hash256,
}

impl Block {
    /// Create a new block
    pub fn new(
        index: u64,
        timestamp: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: Hash256,
    ) -> Self {
        Self {
            index,
            timestamp,
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Create the genesis block
    /// The proof is seeded, not mined: there is nothing to mine against.
    pub fn genesis(timestamp: u64, proof: u64) -> Self {
        Self {
            index: GENESIS_INDEX,
            timestamp,
            transactions: Vec::new(),
            proof,
            previous_hash: GENESIS_PREVIOUS_HASH,
        }
    }

    /// Get the block hash
    pub fn hash(&self) -> Hash256 {
        digest(self)
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.index == GENESIS_INDEX && self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}

impl Canonical for Block {}
