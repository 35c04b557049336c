// CLI commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use crate::{Block, Ledger, LedgerConfig, Miner, ProofOfWork, Transaction};

#[derive(Parser)]
#[command(name = "pow-ledger")]
#[command(about = "In-memory proof-of-work ledger", long_about = None)]
pub struct Cli {
    /// JSON config file (difficulty, genesis_proof, mining_reward, reward_sender)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record transactions, then mine blocks on a fresh ledger
    Mine {
        /// Number of blocks to mine
        #[arg(short, long, default_value = "1")]
        blocks: usize,
        /// Miner identifier credited with the rewards
        #[arg(short, long, default_value = "cli-miner")]
        miner: String,
        /// Transaction as sender:recipient:amount (repeatable)
        #[arg(long = "tx")]
        transactions: Vec<String>,
    },

    /// Search a proof for a reference string
    Prove {
        /// Reference string (canonical form of the last block)
        #[arg(short, long)]
        reference: String,
        /// First proof to try
        #[arg(short, long, default_value = "0")]
        start: u64,
    },

    /// Check whether a proof solves the puzzle for a reference string
    Check {
        #[arg(short, long)]
        reference: String,
        #[arg(short, long)]
        proof: u64,
    },

    /// Mine blocks and dump the chain as JSON
    Chain {
        #[arg(short, long, default_value = "2")]
        blocks: usize,
    },
}

/// CLI handler
pub struct CliHandler {
    ledger: Ledger,
    pow: ProofOfWork,
}

impl CliHandler {
    /// Create a new CLI handler around a fresh ledger
    pub fn new(config: LedgerConfig) -> Result<Self, String> {
        let pow = config.proof_of_work();
        let ledger = Ledger::new(config).map_err(|e| e.to_string())?;

        Ok(Self { ledger, pow })
    }

    /// Handle CLI command
    pub fn handle(&mut self, cli: Cli) -> Result<(), String> {
        match cli.command {
            Commands::Mine { blocks, miner, transactions } => self.mine(blocks, &miner, &transactions),
            Commands::Prove { reference, start } => self.prove(&reference, start),
            Commands::Check { reference, proof } => self.check(&reference, proof),
            Commands::Chain { blocks } => self.dump_chain(blocks),
        }
    }

    fn mine(&mut self, blocks: usize, miner: &str, transactions: &[String]) -> Result<(), String> {
        for raw in transactions {
            let tx = parse_transaction(raw)?;
            let position = self.ledger.record_transaction(tx.sender, tx.recipient, tx.amount);
            println!("Transaction will post to block {}", position);
        }

        for _ in 0..blocks {
            let block = self.mine_one(miner)?;
            self.print_block(&block);
        }

        Ok(())
    }

    /// Search a proof for the current tip and submit it
    fn mine_one(&self, miner: &str) -> Result<Block, String> {
        let reference = self.ledger.mining_reference().map_err(|e| e.to_string())?;
        let result = Miner::new(self.pow).search(&reference, 0);
        if !result.success {
            return Err("Proof search exhausted".to_string());
        }

        log::debug!("Proof {} found in {:?} ({:.0} H/s)",
            result.proof, result.duration, result.hash_rate());

        self.ledger
            .attempt_mine(result.proof, miner)
            .map_err(|e| e.to_string())
    }

    fn prove(&self, reference: &str, start: u64) -> Result<(), String> {
        let result = Miner::new(self.pow).search(reference, start);
        if !result.success {
            return Err("Proof search exhausted".to_string());
        }

        println!("Proof: {}", result.proof);
        println!("Hash: {}", result.hash);
        println!("Attempts: {}", result.attempts);
        println!("Duration: {:?}", result.duration);
        Ok(())
    }

    fn check(&self, reference: &str, proof: u64) -> Result<(), String> {
        let hash = ProofOfWork::proof_hash(reference, proof);
        let valid = self.pow.is_valid(reference, proof);

        println!("Hash: {}", hash);
        println!("Valid: {} (target prefix \"{}\")", valid, self.pow.target_prefix());
        Ok(())
    }

    fn dump_chain(&mut self, blocks: usize) -> Result<(), String> {
        for _ in 0..blocks {
            self.mine_one("cli-miner")?;
        }

        let chain = self.ledger.chain();
        let json = serde_json::to_string_pretty(&chain)
            .map_err(|e| format!("Failed to encode chain: {}", e))?;

        println!("{}", json);
        println!("Length: {}", chain.len());
        println!("Valid: {}", self.ledger.verify_chain());
        Ok(())
    }

    /// Print block information
    fn print_block(&self, block: &Block) {
        println!("Block:");
        println!("  Index: {}", block.index);
        println!("  Hash: {}", block.hash());
        println!("  Previous: {}", block.previous_hash);
        println!("  Timestamp: {}", block.timestamp);
        println!("  Proof: {}", block.proof);
        println!("  Transactions: {}", block.transactions.len());

        for (i, tx) in block.transactions.iter().enumerate() {
            println!("    [{}] {} -> {}: {}", i, tx.sender, tx.recipient, tx.amount);
        }
    }
}

/// Parse `sender:recipient:amount`
pub fn parse_transaction(raw: &str) -> Result<Transaction, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Expected sender:recipient:amount, got '{}'", raw));
    }

    let amount = parts[2]
        .parse::<u64>()
        .map_err(|e| format!("Invalid amount '{}': {}", parts[2], e))?;

    Ok(Transaction::new(parts[0], parts[1], amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transaction() {
        let tx = parse_transaction("alice:bob:10").unwrap();
        assert_eq!(tx, Transaction::new("alice", "bob", 10));
    }

    #[test]
    fn test_parse_transaction_errors() {
        assert!(parse_transaction("alice:bob").is_err());
        assert!(parse_transaction("alice:bob:ten").is_err());
        assert!(parse_transaction("a:b:c:1").is_err());
    }

    #[test]
    fn test_cli_parses_mine() {
        let cli = Cli::parse_from([
            "pow-ledger", "mine", "--blocks", "2", "--tx", "a:b:1", "--tx", "c:d:2",
        ]);
        match cli.command {
            Commands::Mine { blocks, miner, transactions } => {
                assert_eq!(blocks, 2);
                assert_eq!(miner, "cli-miner");
                assert_eq!(transactions, vec!["a:b:1", "c:d:2"]);
            }
            _ => panic!("expected mine command"),
        }
    }

    #[test]
    fn test_handler_rejects_invalid_config() {
        let result = CliHandler::new(LedgerConfig { difficulty: 0, ..LedgerConfig::default() });
        assert!(result.is_err());
    }

    #[test]
    fn test_handler_mines_blocks() {
        let mut handler = CliHandler::new(LedgerConfig { difficulty: 1, ..LedgerConfig::default() }).unwrap();
        handler.mine(2, "tester", &["a:b:5".to_string()]).unwrap();

        let chain = handler.ledger.chain();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[1].transactions, vec![Transaction::new("a", "b", 5)]);
        assert!(handler.ledger.verify_chain());
    }
}
