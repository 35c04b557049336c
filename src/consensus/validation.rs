// Chain integrity validation

use crate::core::{Block, Canonical, GENESIS_INDEX, GENESIS_PREVIOUS_HASH};
use crate::consensus::pow::ProofOfWork;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Chain has no blocks at all
    EmptyChain,
    /// First block is not a well-formed genesis block
    InvalidGenesis,
    /// Block index does not follow its predecessor
    IndexGap { expected: u64, found: u64 },
    /// previous_hash does not match the predecessor's digest
    BrokenLink { index: u64 },
    /// Proof does not solve the puzzle against the predecessor
    InvalidProofOfWork { index: u64 },
    /// Block timestamp is older than its predecessor's
    TimestampRegression { index: u64 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ValidationError::EmptyChain => write!(f, "Chain has no blocks"),
            ValidationError::InvalidGenesis => write!(f, "Invalid genesis block"),
            ValidationError::IndexGap { expected, found } => {
                write!(f, "Expected block index {}, found {}", expected, found)
            }
            ValidationError::BrokenLink { index } => {
                write!(f, "Block {} does not link to its predecessor", index)
            }
            ValidationError::InvalidProofOfWork { index } => {
                write!(f, "Invalid proof of work in block {}", index)
            }
            ValidationError::TimestampRegression { index } => {
                write!(f, "Block {} is older than its predecessor", index)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Chain validator
pub struct ChainValidator {
    /// Puzzle every non-genesis block must solve
    pow: ProofOfWork,
}

impl ChainValidator {
    /// Create a new chain validator
    pub fn new(pow: ProofOfWork) -> Self {
        Self { pow }
    }

    /// Validate the genesis block
    /// Its proof is seeded and is not checked against the puzzle.
    pub fn validate_genesis(&self, block: &Block) -> Result<(), ValidationError> {
        if block.index != GENESIS_INDEX || block.previous_hash != GENESIS_PREVIOUS_HASH {
            return Err(ValidationError::InvalidGenesis);
        }
        Ok(())
    }

    /// Validate a block against the block it extends
    pub fn validate_block(&self, prev: &Block, block: &Block) -> Result<(), ValidationError> {
        let expected = prev.index + 1;
        if block.index != expected {
            return Err(ValidationError::IndexGap {
                expected,
                found: block.index,
            });
        }

        if block.previous_hash != prev.hash() {
            return Err(ValidationError::BrokenLink { index: block.index });
        }

        if !self.pow.is_valid(&prev.canonical_string(), block.proof) {
            return Err(ValidationError::InvalidProofOfWork { index: block.index });
        }

        if block.timestamp < prev.timestamp {
            return Err(ValidationError::TimestampRegression { index: block.index });
        }

        Ok(())
    }

    /// Validate a complete chain, genesis first
    pub fn validate_chain(&self, blocks: &[Block]) -> Result<(), ValidationError> {
        let genesis = blocks.first().ok_or(ValidationError::EmptyChain)?;
        self.validate_genesis(genesis)?;

        for pair in blocks.windows(2) {
            self.validate_block(&pair[0], &pair[1])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::pow::Miner;
    use crate::core::{Hash256, Transaction};

    /// Build a valid successor of `prev` by searching a proof
    fn mine_next(prev: &Block, transactions: Vec<Transaction>) -> Block {
        let miner = Miner::new(ProofOfWork::default());
        let result = miner.search(&prev.canonical_string(), 0);
        Block::new(prev.index + 1, prev.timestamp + 1, transactions, result.proof, prev.hash())
    }

    fn valid_chain(len: usize) -> Vec<Block> {
        let mut chain = vec![Block::genesis(1_000, 100)];
        while chain.len() < len {
            let next = mine_next(chain.last().unwrap(), vec![Transaction::new("a", "b", 1)]);
            chain.push(next);
        }
        chain
    }

    #[test]
    fn test_validate_valid_chain() {
        let validator = ChainValidator::new(ProofOfWork::default());
        assert!(validator.validate_chain(&valid_chain(3)).is_ok());
    }

    #[test]
    fn test_genesis_only_chain() {
        let validator = ChainValidator::new(ProofOfWork::default());
        assert!(validator.validate_chain(&valid_chain(1)).is_ok());
    }

    #[test]
    fn test_empty_chain() {
        let validator = ChainValidator::new(ProofOfWork::default());
        assert_eq!(validator.validate_chain(&[]), Err(ValidationError::EmptyChain));
    }

    #[test]
    fn test_invalid_genesis() {
        let validator = ChainValidator::new(ProofOfWork::default());
        let mut genesis = Block::genesis(1_000, 100);
        genesis.previous_hash = Hash256::new([1; 32]);

        assert_eq!(
            validator.validate_chain(&[genesis]),
            Err(ValidationError::InvalidGenesis)
        );
    }

    #[test]
    fn test_tampered_transactions_break_link() {
        let validator = ChainValidator::new(ProofOfWork::default());
        let mut chain = valid_chain(3);
        chain[1].transactions.push(Transaction::new("mallory", "mallory", 1_000));

        assert_eq!(
            validator.validate_chain(&chain),
            Err(ValidationError::BrokenLink { index: 3 })
        );
    }

    #[test]
    fn test_index_gap() {
        let validator = ChainValidator::new(ProofOfWork::default());
        let mut chain = valid_chain(2);
        chain[1].index = 5;

        assert_eq!(
            validator.validate_chain(&chain),
            Err(ValidationError::IndexGap { expected: 2, found: 5 })
        );
    }

    #[test]
    fn test_invalid_proof_detected() {
        let validator = ChainValidator::new(ProofOfWork::default());
        let genesis = Block::genesis(1_000, 100);
        let reference = genesis.canonical_string();

        let bad_proof = (0..).find(|p| !ProofOfWork::default().is_valid(&reference, *p)).unwrap();
        let block = Block::new(2, 1_001, vec![], bad_proof, genesis.hash());

        assert_eq!(
            validator.validate_chain(&[genesis, block]),
            Err(ValidationError::InvalidProofOfWork { index: 2 })
        );
    }

    #[test]
    fn test_timestamp_regression() {
        let validator = ChainValidator::new(ProofOfWork::default());
        let genesis = Block::genesis(1_000, 100);
        let mut block = mine_next(&genesis, vec![]);
        block.timestamp = 999;

        assert_eq!(
            validator.validate_block(&genesis, &block),
            Err(ValidationError::TimestampRegression { index: 2 })
        );
    }
}
