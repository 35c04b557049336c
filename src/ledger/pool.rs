// Pending transaction pool

use crate::core::Transaction;

/// Ordered buffer of transactions waiting for the next block
#[derive(Debug, Clone, Default)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transaction
    /// Returns the index of the block that will hold it if the
    /// next block is mined from this pool: `chain_height + 1`.
    pub fn add(&mut self, transaction: Transaction, chain_height: usize) -> u64 {
        self.pending.push(transaction);
        chain_height as u64 + 1
    }

    /// Remove and return everything queued, oldest first
    pub fn drain_snapshot(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_returns_next_block_index() {
        let mut pool = TransactionPool::new();
        assert_eq!(pool.add(Transaction::new("a", "b", 1), 1), 2);
        assert_eq!(pool.add(Transaction::new("a", "b", 2), 4), 5);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_never_rejects() {
        let mut pool = TransactionPool::new();
        pool.add(Transaction::new("", "", 0), 1);
        pool.add(Transaction::new("a", "a", u64::MAX), 1);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_drain_keeps_order_and_empties() {
        let mut pool = TransactionPool::new();
        for amount in 1..=3 {
            pool.add(Transaction::new("a", "b", amount), 1);
        }

        let drained = pool.drain_snapshot();
        let amounts: Vec<u64> = drained.iter().map(|tx| tx.amount).collect();
        assert_eq!(amounts, vec![1, 2, 3]);
        assert!(pool.is_empty());
        assert!(pool.drain_snapshot().is_empty());
    }
}
