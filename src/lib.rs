//! Bridge Ledger Client Library
//!
//! Retrieves bridge deposits and their merkle inclusion proofs from a bridge
//! indexing service and turns the untrusted JSON it serves into validated
//! domain values. Nothing reaches the caller without passing the response
//! schema, and every failure is either a transport error, a validation error
//! or a cancellation.

pub mod cancel;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod schema;

// Re-export commonly used types
pub use cancel::{cancellation, CancelHandle, CancelTrigger};
pub use client::LedgerClient;
pub use config::{ApiConfig, Config, ValidationConfig};
pub use domain::{
    Deposit, DepositPage, MerkleProof, PageRequest, PageSize, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    NATIVE_TOKEN_ADDRESS,
};
pub use error::{LedgerError, Rule, TransportError, ValidationError, ValidationIssue};
pub use schema::UnknownFields;
