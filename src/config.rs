// Ledger configuration

use crate::consensus::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY, ProofOfWork};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Parameters fixed for the lifetime of a ledger
/// Missing JSON fields fall back to the classic defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Leading zero hex characters a proof digest needs
    #[serde(default = "default_difficulty")]
    pub difficulty: usize,
    /// Proof seeded into the genesis block
    #[serde(default = "default_genesis_proof")]
    pub genesis_proof: u64,
    /// Amount paid to a miner for each accepted block
    #[serde(default = "default_mining_reward")]
    pub mining_reward: u64,
    /// Sender name used for reward transactions
    #[serde(default = "default_reward_sender")]
    pub reward_sender: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            genesis_proof: default_genesis_proof(),
            mining_reward: default_mining_reward(),
            reward_sender: default_reward_sender(),
        }
    }
}

fn default_difficulty() -> usize {
    DEFAULT_DIFFICULTY
}

fn default_genesis_proof() -> u64 {
    100
}

fn default_mining_reward() -> u64 {
    100
}

fn default_reward_sender() -> String {
    "0".to_string()
}

/// Config error types
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    Io(String),
    /// Config file is not valid JSON for `LedgerConfig`
    Parse(String),
    /// A value is out of range
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl LedgerConfig {
    /// Load and validate a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate a JSON config document
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check difficulty is within 1..=MAX_DIFFICULTY and the reward sender is set
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty == 0 || self.difficulty > MAX_DIFFICULTY {
            return Err(ConfigError::Invalid(format!(
                "difficulty must be between 1 and {}, got {}",
                MAX_DIFFICULTY, self.difficulty
            )));
        }
        if self.reward_sender.is_empty() {
            return Err(ConfigError::Invalid("reward_sender must not be empty".to_string()));
        }
        Ok(())
    }

    /// Puzzle described by this config
    pub fn proof_of_work(&self) -> ProofOfWork {
        ProofOfWork::new(self.difficulty)
    }
}
