//! Mapping from raw upstream payloads to the canonical result records.
//!
//! Pure functions, no I/O. Input and output order is preserved exactly as
//! received. Transaction items read their address and value through the
//! nested `prev_out` object (inputs) or directly (outputs); a missing
//! address becomes "Unknown" and a missing value becomes 0.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{AddressSummary, TransactionDetail, TransactionItem, UNKNOWN_ADDRESS};

/// The payload was non-empty but did not have the expected shape.
#[derive(Error, Debug)]
#[error("malformed upstream payload: {0}")]
pub struct NormalizeError(#[from] serde_json::Error);

#[derive(Deserialize)]
struct RawAddress {
    final_balance: i64,
    n_tx: i64,
}

#[derive(Deserialize)]
struct RawTransaction {
    hash: String,
    fee: i64,
    tx_index: i64,
    time: i64,
    #[serde(default)]
    inputs: Vec<RawInput>,
    #[serde(default)]
    out: Vec<RawOutput>,
}

#[derive(Deserialize)]
struct RawInput {
    prev_out: Option<RawPrevOut>,
}

#[derive(Deserialize, Default)]
struct RawPrevOut {
    addr: Option<String>,
    value: Option<i64>,
}

#[derive(Deserialize)]
struct RawOutput {
    addr: Option<String>,
    value: Option<i64>,
}

pub fn normalize_address(address: &str, raw: &Value) -> Result<AddressSummary, NormalizeError> {
    let raw: RawAddress = serde_json::from_value(raw.clone())?;

    Ok(AddressSummary {
        address: address.to_string(),
        balance: raw.final_balance,
        transaction_count: raw.n_tx,
    })
}

pub fn normalize_transaction(raw: &Value) -> Result<TransactionDetail, NormalizeError> {
    let raw: RawTransaction = serde_json::from_value(raw.clone())?;

    let inputs = raw
        .inputs
        .into_iter()
        .map(|item| {
            let prev = item.prev_out.unwrap_or_default();
            TransactionItem {
                address: prev.addr.unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
                value: prev.value.unwrap_or(0),
            }
        })
        .collect();

    let outputs = raw
        .out
        .into_iter()
        .map(|item| TransactionItem {
            address: item.addr.unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
            value: item.value.unwrap_or(0),
        })
        .collect();

    Ok(TransactionDetail {
        hash: raw.hash,
        fee: raw.fee,
        transaction_index: raw.tx_index,
        block_time: raw.time,
        inputs,
        outputs,
    })
}
