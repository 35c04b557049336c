// Transaction data structures

use crate::core::Canonical;
use serde::{Deserialize, Serialize};

/// A value transfer waiting for, or frozen into, a block.
/// No balance or signature checks are made on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Name of the sender
    pub sender: String,
    /// Name of the recipient
    pub recipient: String,
    /// Amount transferred
    pub amount: u64,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: u64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Create a mining reward paid by the system sender
    pub fn reward(system_sender: &str, miner: impl Into<String>, amount: u64) -> Self {
        Self::new(system_sender, miner, amount)
    }

    /// Check if this transaction was issued by the given system sender
    pub fn is_reward(&self, system_sender: &str) -> bool {
        self.sender == system_sender
    }
}

impl Canonical for Transaction {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_creation() {
        let tx = Transaction::new("alice", "bob", 10);
        assert_eq!(tx.sender, "alice");
        assert_eq!(tx.recipient, "bob");
        assert_eq!(tx.amount, 10);
        assert!(!tx.is_reward("0"));
    }

    #[test]
    fn test_reward_transaction() {
        let tx = Transaction::reward("0", "miner-1", 100);
        assert!(tx.is_reward("0"));
        assert_eq!(tx.recipient, "miner-1");
        assert_eq!(tx.amount, 100);
    }

    #[test]
    fn test_canonical_form() {
        let tx = Transaction::new("a", "b", 10);
        assert_eq!(
            tx.canonical_string(),
            r#"{"amount":10,"recipient":"b","sender":"a"}"#
        );

        let back = Transaction::from_canonical(&tx.canonical_string()).unwrap();
        assert_eq!(back, tx);
    }
}
