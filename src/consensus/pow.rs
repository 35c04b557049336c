// Proof of Work implementation

use crate::core::{Hash256, sha256};
use std::time::Instant;

/// Leading zero hex characters a proof digest needs by default
pub const DEFAULT_DIFFICULTY: usize = 3;

/// A SHA-256 hex digest has 64 characters
pub const MAX_DIFFICULTY: usize = 64;

/// Proof-of-work puzzle
///
/// A proof is accepted for a reference string when
/// `sha256(reference ++ decimal(proof))` in hex starts with
/// `difficulty` zero characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
}

impl ProofOfWork {
    /// Create a puzzle with a fixed difficulty
    /// Values above MAX_DIFFICULTY are clamped.
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty: difficulty.min(MAX_DIFFICULTY),
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Target prefix, e.g. "000"
    pub fn target_prefix(&self) -> String {
        "0".repeat(self.difficulty)
    }

    /// Digest of a reference string combined with a candidate proof
    pub fn proof_hash(reference: &str, proof: u64) -> Hash256 {
        sha256(format!("{}{}", reference, proof).as_bytes())
    }

    /// Check whether `proof` solves the puzzle for `reference`
    pub fn is_valid(&self, reference: &str, proof: u64) -> bool {
        self.meets_target(&Self::proof_hash(reference, proof))
    }

    /// Check whether a digest has enough leading zero nibbles
    #[inline]
    pub fn meets_target(&self, hash: &Hash256) -> bool {
        hash.leading_zero_nibbles() >= self.difficulty
    }
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

/// Proof searcher
pub struct Miner {
    /// Puzzle being solved
    pub pow: ProofOfWork,
}

impl Miner {
    /// Create a new miner for a puzzle
    pub fn new(pow: ProofOfWork) -> Self {
        Self { pow }
    }

    /// Search proofs upward from `start` until one solves the puzzle
    pub fn search(&self, reference: &str, start: u64) -> MiningResult {
        let start_time = Instant::now();
        let mut attempts = 0u64;

        for proof in start..=u64::MAX {
            let hash = ProofOfWork::proof_hash(reference, proof);
            attempts += 1;

            if self.pow.meets_target(&hash) {
                let elapsed = start_time.elapsed();
                log::debug!("Found proof {} after {} attempts", proof, attempts);
                return MiningResult {
                    success: true,
                    proof,
                    hash,
                    attempts,
                    duration: elapsed,
                };
            }

            // Progress indicator every 100k attempts
            if attempts % 100_000 == 0 {
                let elapsed = start_time.elapsed();
                log::debug!("Mining attempts: {} ({:.1} KH/s)",
                    attempts,
                    attempts as f64 / elapsed.as_secs_f64() / 1000.0
                );
            }
        }

        MiningResult {
            success: false,
            proof: 0,
            hash: Hash256::zero(),
            attempts,
            duration: start_time.elapsed(),
        }
    }
}

/// Mining result
#[derive(Debug)]
pub struct MiningResult {
    /// Whether a proof was found
    pub success: bool,
    /// The proof that was found
    pub proof: u64,
    /// Digest of reference + proof
    pub hash: Hash256,
    /// Number of attempts
    pub attempts: u64,
    /// Time taken
    pub duration: std::time::Duration,
}

impl MiningResult {
    /// Calculate hash rate (hashes per second)
    pub fn hash_rate(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return self.attempts as f64;
        }
        self.attempts as f64 / secs
    }
}
