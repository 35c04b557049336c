// Consensus and validation logic

pub mod pow;
pub mod validation;

pub use pow::{Miner, MiningResult, ProofOfWork, DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
pub use validation::{ChainValidator, ValidationError};
