// Append-only ledger

use crate::config::{ConfigError, LedgerConfig};
use crate::consensus::{ChainValidator, ProofOfWork, ValidationError};
use crate::core::{Block, Canonical, Transaction};
use crate::ledger::{Clock, SystemClock, TransactionPool};
use parking_lot::RwLock;

/// Ledger error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Candidate proof does not solve the puzzle for the last block
    InvalidProof,
    /// Accessor used before the genesis block exists
    EmptyChain,
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LedgerError::InvalidProof => write!(f, "Invalid proof"),
            LedgerError::EmptyChain => write!(f, "Chain has no blocks"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// Chain and pool, always locked together
struct LedgerState {
    chain: Vec<Block>,
    pool: TransactionPool,
}

/// Append-only proof-of-work ledger
///
/// All mutation goes through one write lock, so reading the last block,
/// draining the pool and appending happen as a single step. Readers get
/// owned snapshots.
pub struct Ledger {
    config: LedgerConfig,
    pow: ProofOfWork,
    clock: Box<dyn Clock>,
    state: RwLock<LedgerState>,
}

impl Ledger {
    /// Create a ledger holding only its genesis block
    pub fn new(config: LedgerConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }

    /// Create a ledger stamping blocks from the given clock
    /// Fails if the config does not pass `LedgerConfig::validate`.
    pub fn with_clock(config: LedgerConfig, clock: impl Clock + 'static) -> Result<Self, ConfigError> {
        config.validate()?;

        let pow = config.proof_of_work();
        let genesis = Self::create_genesis(&config, &clock);

        Ok(Self {
            config,
            pow,
            clock: Box::new(clock),
            state: RwLock::new(LedgerState {
                chain: vec![genesis],
                pool: TransactionPool::new(),
            }),
        })
    }

    /// Genesis bootstrap: the seeded proof is never run through the puzzle
    fn create_genesis(config: &LedgerConfig, clock: &dyn Clock) -> Block {
        let genesis = Block::genesis(clock.now_millis(), config.genesis_proof);
        log::info!("Created genesis block {}", genesis.hash());
        genesis
    }

    /// Queue a transaction for the next block
    /// Returns the index of the block that will hold it.
    pub fn record_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: u64,
    ) -> u64 {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let tx = Transaction::new(sender, recipient, amount);
        let height = state.chain.len();
        let position = state.pool.add(tx, height);

        log::debug!("Queued transaction for block {} ({} pending)", position, state.pool.len());
        position
    }

    /// Submit a proof for the last block
    ///
    /// On success the pool is frozen into a new block and a reward for
    /// `miner_id` is queued for the block after it. On failure nothing
    /// changes.
    pub fn attempt_mine(&self, proof: u64, miner_id: &str) -> Result<Block, LedgerError> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let last = state.chain.last().ok_or(LedgerError::EmptyChain)?;
        let reference = last.canonical_string();

        if !self.pow.is_valid(&reference, proof) {
            log::debug!("Rejected proof {} for block {}", proof, last.index + 1);
            return Err(LedgerError::InvalidProof);
        }

        let previous_hash = last.hash();
        let index = last.index + 1;
        let timestamp = self.clock.now_millis().max(last.timestamp);

        let transactions = state.pool.drain_snapshot();
        let block = Block::new(index, timestamp, transactions, proof, previous_hash);
        state.chain.push(block.clone());

        let reward = Transaction::reward(
            &self.config.reward_sender,
            miner_id,
            self.config.mining_reward,
        );
        state.pool.add(reward, state.chain.len());

        log::info!(
            "Appended block {} ({} transactions, proof {}) mined by {}",
            block.index,
            block.transactions.len(),
            block.proof,
            miner_id
        );

        Ok(block)
    }

    /// Get the tip of the chain
    pub fn last_block(&self) -> Result<Block, LedgerError> {
        self.state
            .read()
            .chain
            .last()
            .cloned()
            .ok_or(LedgerError::EmptyChain)
    }

    /// Canonical form of the last block, the string miners solve against
    pub fn mining_reference(&self) -> Result<String, LedgerError> {
        self.state
            .read()
            .chain
            .last()
            .map(|block| block.canonical_string())
            .ok_or(LedgerError::EmptyChain)
    }

    /// Snapshot of the whole chain, genesis first
    pub fn chain(&self) -> Vec<Block> {
        self.state.read().chain.clone()
    }

    /// Snapshot of the pending pool
    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.state.read().pool.pending().to_vec()
    }

    /// Number of blocks in the chain
    pub fn len(&self) -> usize {
        self.state.read().chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().chain.is_empty()
    }

    /// Re-check links, indices, proofs and timestamps of the whole chain
    pub fn validate_chain(&self) -> Result<(), ValidationError> {
        let state = self.state.read();
        ChainValidator::new(self.pow).validate_chain(&state.chain)
    }

    /// Same as `validate_chain`, as a yes/no answer
    pub fn verify_chain(&self) -> bool {
        match self.validate_chain() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Chain verification failed: {}", e);
                false
            }
        }
    }

    pub fn proof_of_work(&self) -> ProofOfWork {
        self.pow
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}
