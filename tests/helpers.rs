//! Shared test helpers for bridge ledger client tests
//!
//! This module provides dummy values and JSON builders for indexing service
//! responses.

#![allow(dead_code)]

use serde_json::{json, Value};

// ============================================================================
// CONSTANTS
// ============================================================================

// -------------------------------- HASHES --------------------------------

/// Dummy deposit transaction hash (66 characters)
pub fn dummy_tx_hash() -> String {
    format!("0x{}", "a".repeat(64))
}

/// Dummy claim transaction hash (66 characters)
pub fn dummy_claim_tx_hash() -> String {
    format!("0x{}", "c".repeat(64))
}

/// Dummy merkle sibling hash built from a single repeated hex digit
pub fn dummy_sibling(digit: char) -> String {
    format!("0x{}", digit.to_string().repeat(64))
}

pub fn dummy_main_exit_root() -> String {
    format!("0x{}", "d".repeat(64))
}

pub fn dummy_rollup_exit_root() -> String {
    format!("0x{}", "e".repeat(64))
}

// ------------------------------- ADDRESSES -------------------------------

/// Zero address standing for the native coin
pub const DUMMY_TOKEN_ADDR_NATIVE: &str = "0x0000000000000000000000000000000000000000";

/// Dummy ERC-20 token address (EVM format, 20 bytes)
pub const DUMMY_TOKEN_ADDR_EVM: &str = "0x000000000000000000000000000000000000000e";

/// Dummy destination address (EVM format, 20 bytes)
pub fn dummy_dest_addr() -> String {
    format!("0x{}", "b".repeat(40))
}

/// Dummy account address whose deposits are listed
pub const DUMMY_ACCOUNT_ADDR: &str = "0x0000000000000000000000000000000000000006";

// -------------------------------- OTHER ---------------------------------

/// One ether in wei; larger than any native integer the client parses
pub const DUMMY_AMOUNT: &str = "1000000000000000000";

// ============================================================================
// JSON BUILDERS
// ============================================================================

/// Deposit record as served by the indexing service.
pub fn create_default_deposit_json() -> Value {
    json!({
        "token_addr": DUMMY_TOKEN_ADDR_NATIVE,
        "amount": DUMMY_AMOUNT,
        "network_id": 1,
        "orig_net": 0,
        "dest_net": 1,
        "dest_addr": dummy_dest_addr(),
        "deposit_cnt": "5",
        "tx_hash": dummy_tx_hash(),
        "claim_tx_hash": "",
        "ready_for_claim": true
    })
}

/// Deposit record with one field replaced.
pub fn deposit_json_with(key: &str, value: Value) -> Value {
    let mut deposit = create_default_deposit_json();
    deposit[key] = value;
    deposit
}

/// Deposit record with one field removed.
pub fn deposit_json_without(key: &str) -> Value {
    let mut deposit = create_default_deposit_json();
    deposit
        .as_object_mut()
        .expect("deposit fixture is an object")
        .remove(key);
    deposit
}

/// Merkle proof record with three siblings.
pub fn create_default_merkle_proof_json() -> Value {
    json!({
        "merkle_proof": [dummy_sibling('1'), dummy_sibling('2'), dummy_sibling('3')],
        "exit_root_num": "12",
        "l2_exit_root_num": "7",
        "main_exit_root": dummy_main_exit_root(),
        "rollup_exit_root": dummy_rollup_exit_root()
    })
}

pub fn merkle_proof_json_with(key: &str, value: Value) -> Value {
    let mut proof = create_default_merkle_proof_json();
    proof[key] = value;
    proof
}
