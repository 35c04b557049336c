// Append-only proof-of-work ledger

pub mod core;
pub mod consensus;
pub mod config;
pub mod ledger;
pub mod cli;

// Re-exports for convenience
pub use core::{Block, Transaction, Hash256, Canonical, digest, GENESIS_PREVIOUS_HASH};
pub use consensus::{ProofOfWork, Miner, MiningResult, ChainValidator, ValidationError};
pub use config::{LedgerConfig, ConfigError};
pub use ledger::{Ledger, LedgerError, TransactionPool, Clock, SystemClock, FixedClock};
pub use cli::{Cli, CliHandler};
