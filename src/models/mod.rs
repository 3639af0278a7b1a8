// Canonical result records served by the lookup endpoints, plus the
// entry-type discriminant shared by the cache, limiter and upstream client.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder address for transaction items without one (e.g. coinbase inputs).
pub const UNKNOWN_ADDRESS: &str = "Unknown";

/// Which of the two lookup kinds an entry belongs to. The same subject string
/// under different types is a distinct cache entry and a distinct rate budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Address,
    Transaction,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Address => "address",
            EntryType::Transaction => "transaction",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Balance and activity summary for a single address. Balance is in satoshis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSummary {
    pub address: String,
    pub balance: i64,
    pub transaction_count: i64,
}

/// One input or output of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub address: String,
    pub value: i64,
}

/// Full detail for a single transaction. Input and output order mirrors the
/// upstream payload so positions line up with on-chain vouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub hash: String,
    pub fee: i64,
    pub transaction_index: i64,
    pub block_time: i64,
    pub inputs: Vec<TransactionItem>,
    pub outputs: Vec<TransactionItem>,
}
