//! Domain Types
//!
//! Canonical shapes handed to the rest of the application. Values are built
//! once from validated records and never mutated afterwards. Conversions from
//! the schema records are total: validation has already rejected anything a
//! mapper could not represent.

use serde::{Deserialize, Serialize};

use crate::schema::{DepositRecord, DepositsResponse, MerkleProofRecord};

/// Token address that stands for the chain's native coin.
pub const NATIVE_TOKEN_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Default number of deposits requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Largest page the indexing service is asked for.
pub const MAX_PAGE_SIZE: u32 = 100;

// ============================================================================
// DEPOSIT
// ============================================================================

/// One cross-chain transfer recorded by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    /// Origin-chain token contract, or [`NATIVE_TOKEN_ADDRESS`]
    pub token_address: String,
    /// Base-unit quantity, passed through exactly as served
    pub amount: String,
    /// Network of the indexing service that reported the deposit
    pub network_id: u32,
    pub origin_network: u32,
    pub destination_network: u32,
    pub destination_address: String,
    pub deposit_count: u64,
    pub transaction_hash: String,
    /// Hash of the claim transaction, once the deposit has been claimed
    pub claim_transaction_hash: Option<String>,
    pub ready_for_claim: bool,
}

impl Deposit {
    pub fn is_native_token(&self) -> bool {
        self.token_address == NATIVE_TOKEN_ADDRESS
    }

    pub fn is_claimed(&self) -> bool {
        self.claim_transaction_hash.is_some()
    }
}

impl From<DepositRecord> for Deposit {
    fn from(record: DepositRecord) -> Self {
        Self {
            token_address: record.token_addr,
            amount: record.amount,
            network_id: record.network_id,
            origin_network: record.orig_net,
            destination_network: record.dest_net,
            destination_address: record.dest_addr,
            deposit_count: record.deposit_cnt,
            transaction_hash: record.tx_hash,
            claim_transaction_hash: record.claim_tx_hash,
            ready_for_claim: record.ready_for_claim,
        }
    }
}

// ============================================================================
// MERKLE PROOF
// ============================================================================

/// Inclusion proof for one deposit. Sibling order is kept as served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerkleProof {
    pub merkle_proof: Vec<String>,
    pub exit_root_number: u64,
    pub l2_exit_root_number: u64,
    pub main_exit_root: String,
    pub rollup_exit_root: String,
}

impl From<MerkleProofRecord> for MerkleProof {
    fn from(record: MerkleProofRecord) -> Self {
        Self {
            merkle_proof: record.merkle_proof,
            exit_root_number: record.exit_root_num,
            l2_exit_root_number: record.l2_exit_root_num,
            main_exit_root: record.main_exit_root,
            rollup_exit_root: record.rollup_exit_root,
        }
    }
}

// ============================================================================
// PAGINATION
// ============================================================================

/// One page of deposits plus the total number the service holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositPage {
    pub deposits: Vec<Deposit>,
    pub total: u64,
}

impl DepositPage {
    /// Whether deposits remain beyond this page, given the offset it was
    /// requested at.
    pub fn has_more(&self, offset: u64) -> bool {
        offset.saturating_add(self.deposits.len() as u64) < self.total
    }

    /// Offset of the following page, if there is one.
    pub fn next_offset(&self, offset: u64) -> Option<u64> {
        self.has_more(offset)
            .then(|| offset.saturating_add(self.deposits.len() as u64))
    }
}

/// Absent `deposits` maps to an empty page and absent `total_cnt` to zero.
impl From<DepositsResponse> for DepositPage {
    fn from(response: DepositsResponse) -> Self {
        Self {
            deposits: response
                .deposits
                .unwrap_or_default()
                .into_iter()
                .map(Deposit::from)
                .collect(),
            total: response.total_cnt.unwrap_or(0),
        }
    }
}

/// Number of deposits per listing request, bounded to `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageSize(u32);

impl PageSize {
    pub fn new(size: u32) -> Option<Self> {
        (1..=MAX_PAGE_SIZE).contains(&size).then_some(Self(size))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

/// Paging parameters of a deposit listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Falls back to the client's configured page size when `None`
    pub limit: Option<PageSize>,
    pub offset: u64,
}

impl PageRequest {
    pub fn new(limit: Option<PageSize>, offset: u64) -> Self {
        Self { limit, offset }
    }
}
