//! Response Schema Validation
//!
//! Validates untrusted bodies returned by the bridge indexing service and
//! converts them into records that mirror the wire field names. Conversions
//! that can fail (decimal strings to integers, empty claim hashes to `None`)
//! happen here, so nothing downstream ever sees a malformed value.
//!
//! Validation is aggregate: every field is checked and every violation is
//! reported with its JSON path.

mod fields;
pub mod rules;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use fields::{Fields, Issues};

pub use rules::{HASH_LENGTH, MAX_SAFE_INTEGER};

// ============================================================================
// POLICY
// ============================================================================

/// How to treat object keys the schema does not name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFields {
    /// Unknown keys are validation failures.
    #[default]
    Reject,
    /// Unknown keys are skipped.
    Ignore,
}

// ============================================================================
// VALIDATED RECORDS
// ============================================================================

/// Deposit record as served by the indexing service, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositRecord {
    pub token_addr: String,
    pub amount: String,
    pub network_id: u32,
    pub orig_net: u32,
    pub dest_net: u32,
    pub dest_addr: String,
    pub deposit_cnt: u64,
    pub tx_hash: String,
    pub claim_tx_hash: Option<String>,
    pub ready_for_claim: bool,
}

/// Merkle proof record as served by the indexing service, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProofRecord {
    pub merkle_proof: Vec<String>,
    pub exit_root_num: u64,
    pub l2_exit_root_num: u64,
    pub main_exit_root: String,
    pub rollup_exit_root: String,
}

/// Body of `GET /bridges/{address}`. Both fields are optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositsResponse {
    pub deposits: Option<Vec<DepositRecord>>,
    pub total_cnt: Option<u64>,
}

/// Body of `GET /bridge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositResponse {
    pub deposit: DepositRecord,
}

/// Body of `GET /merkle-proof`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProofResponse {
    pub proof: MerkleProofRecord,
}

const DEPOSIT_FIELDS: &[&str] = &[
    "token_addr",
    "amount",
    "network_id",
    "orig_net",
    "dest_net",
    "dest_addr",
    "deposit_cnt",
    "tx_hash",
    "claim_tx_hash",
    "ready_for_claim",
];

const MERKLE_PROOF_FIELDS: &[&str] = &[
    "merkle_proof",
    "exit_root_num",
    "l2_exit_root_num",
    "main_exit_root",
    "rollup_exit_root",
];

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub fn validate_deposit(
    value: &Value,
    policy: UnknownFields,
) -> Result<DepositRecord, ValidationError> {
    run(|issues| deposit_record(value, String::new(), policy, issues))
}

pub fn validate_merkle_proof(
    value: &Value,
    policy: UnknownFields,
) -> Result<MerkleProofRecord, ValidationError> {
    run(|issues| merkle_proof_record(value, String::new(), policy, issues))
}

/// Validates a deposit listing. Absent fields stay `None`; `null` or any
/// other wrong type is a failure.
pub fn validate_deposits_response(
    value: &Value,
    policy: UnknownFields,
) -> Result<DepositsResponse, ValidationError> {
    run(|issues| {
        let mut fields = Fields::open(value, String::new(), &["deposits", "total_cnt"], policy, issues)?;

        let deposits = match fields.optional("deposits") {
            None => Some(None),
            Some(Value::Array(items)) => {
                let base = fields.path("deposits");
                let mut records = Vec::with_capacity(items.len());
                let mut complete = true;
                for (index, item) in items.iter().enumerate() {
                    let path = format!("{}[{}]", base, index);
                    match deposit_record(item, path, policy, fields.issues()) {
                        Some(record) => records.push(record),
                        None => complete = false,
                    }
                }
                complete.then_some(Some(records))
            }
            Some(other) => fields.wrong_type("deposits", "array", other),
        };

        let total_cnt = match fields.optional("total_cnt") {
            None => Some(None),
            Some(raw) => fields.counter_value("total_cnt", raw).map(Some),
        };

        Some(DepositsResponse {
            deposits: deposits?,
            total_cnt: total_cnt?,
        })
    })
}

/// Validates a single-deposit body. A missing `deposit` is a failure, never
/// an empty result.
pub fn validate_deposit_response(
    value: &Value,
    policy: UnknownFields,
) -> Result<DepositResponse, ValidationError> {
    run(|issues| {
        let mut fields = Fields::open(value, String::new(), &["deposit"], policy, issues)?;
        let inner = fields.required("deposit")?;
        let path = fields.path("deposit");
        let deposit = deposit_record(inner, path, policy, fields.issues())?;
        Some(DepositResponse { deposit })
    })
}

pub fn validate_merkle_proof_response(
    value: &Value,
    policy: UnknownFields,
) -> Result<MerkleProofResponse, ValidationError> {
    run(|issues| {
        let mut fields = Fields::open(value, String::new(), &["proof"], policy, issues)?;
        let inner = fields.required("proof")?;
        let path = fields.path("proof");
        let proof = merkle_proof_record(inner, path, policy, fields.issues())?;
        Some(MerkleProofResponse { proof })
    })
}

// ============================================================================
// RECORD BUILDERS
// ============================================================================

fn run<T>(validate: impl FnOnce(&mut Issues) -> Option<T>) -> Result<T, ValidationError> {
    let mut issues = Issues::default();
    let output = validate(&mut issues);
    match output {
        Some(value) if issues.is_empty() => Ok(value),
        _ => Err(ValidationError::new(issues.into_inner())),
    }
}

fn deposit_record(
    value: &Value,
    prefix: String,
    policy: UnknownFields,
    issues: &mut Issues,
) -> Option<DepositRecord> {
    let mut fields = Fields::open(value, prefix, DEPOSIT_FIELDS, policy, issues)?;

    // Read every field before bailing so all violations are reported.
    let token_addr = fields.string("token_addr");
    let amount = fields.string("amount");
    let network_id = fields.network("network_id");
    let orig_net = fields.network("orig_net");
    let dest_net = fields.network("dest_net");
    let dest_addr = fields.string("dest_addr");
    let deposit_cnt = fields.counter("deposit_cnt");
    let tx_hash = fields.hash("tx_hash");
    let claim_tx_hash = fields.claim_hash("claim_tx_hash");
    let ready_for_claim = fields.boolean("ready_for_claim");

    Some(DepositRecord {
        token_addr: token_addr?.to_string(),
        amount: amount?.to_string(),
        network_id: network_id?,
        orig_net: orig_net?,
        dest_net: dest_net?,
        dest_addr: dest_addr?.to_string(),
        deposit_cnt: deposit_cnt?,
        tx_hash: tx_hash?,
        claim_tx_hash: claim_tx_hash?,
        ready_for_claim: ready_for_claim?,
    })
}

fn merkle_proof_record(
    value: &Value,
    prefix: String,
    policy: UnknownFields,
    issues: &mut Issues,
) -> Option<MerkleProofRecord> {
    let mut fields = Fields::open(value, prefix, MERKLE_PROOF_FIELDS, policy, issues)?;

    let merkle_proof = fields.hash_list("merkle_proof");
    let exit_root_num = fields.counter("exit_root_num");
    let l2_exit_root_num = fields.counter("l2_exit_root_num");
    let main_exit_root = fields.hash("main_exit_root");
    let rollup_exit_root = fields.hash("rollup_exit_root");

    Some(MerkleProofRecord {
        merkle_proof: merkle_proof?,
        exit_root_num: exit_root_num?,
        l2_exit_root_num: l2_exit_root_num?,
        main_exit_root: main_exit_root?,
        rollup_exit_root: rollup_exit_root?,
    })
}
