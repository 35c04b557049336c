// Ledger state: chain, pending pool and the mining protocol

mod chain;
mod clock;
mod pool;

pub use chain::{Ledger, LedgerError};
pub use clock::{Clock, FixedClock, SystemClock};
pub use pool::TransactionPool;
