//! Bridge Ledger Client
//!
//! HTTP client for the bridge indexing service. Each operation issues exactly
//! one GET request, waits for the complete body, then validates and maps it
//! into domain values. Nothing is cached or retried, and the client holds no
//! mutable state, so a single instance can serve concurrent calls.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::cancel::CancelHandle;
use crate::config::Config;
use crate::domain::{Deposit, DepositPage, MerkleProof, PageRequest, PageSize};
use crate::error::{LedgerError, TransportError, ValidationError};
use crate::schema::{self, UnknownFields};

/// Client for the bridge indexing service.
///
/// The service base URL is passed per call; the client only carries the
/// connection pool and defaults.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    /// HTTP client instance (connection pool shared by clones)
    http: Client,
    /// Page size used when a listing does not specify one
    page_size: PageSize,
    /// Treatment of response keys outside the schema
    unknown_fields: UnknownFields,
}

impl LedgerClient {
    /// Creates a new ledger client from configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(LedgerClient)` - Successfully created client
    /// * `Err(anyhow::Error)` - Failed to create the HTTP client
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_http_client(
            http,
            config.page_size(),
            config.validation.unknown_fields,
        ))
    }

    /// Creates a client around an existing reqwest client.
    pub fn with_http_client(http: Client, page_size: PageSize, unknown_fields: UnknownFields) -> Self {
        Self {
            http,
            page_size,
            unknown_fields,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Lists deposits sent by or to `address`.
    ///
    /// Issues `GET {api_url}/bridges/{address}?limit=&offset=`. A response
    /// without `deposits` yields an empty page and one without `total_cnt` a
    /// total of zero.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL of the indexing service
    /// * `address` - Account address whose deposits are listed
    /// * `page` - Page size and offset; the size defaults to the configured one
    /// * `cancel` - Optional cancellation handle
    pub async fn list_deposits(
        &self,
        api_url: &str,
        address: &str,
        page: PageRequest,
        cancel: Option<CancelHandle>,
    ) -> Result<DepositPage, LedgerError> {
        let limit = page.limit.unwrap_or(self.page_size);
        let offset = page.offset;
        let url = endpoint(api_url, &["bridges", address])?;
        let query = [
            ("limit", limit.get().to_string()),
            ("offset", offset.to_string()),
        ];

        let body = self.fetch_json(url, &query, cancel).await?;
        let response = self.checked(
            "bridges",
            schema::validate_deposits_response(&body, self.unknown_fields),
        )?;
        let page = DepositPage::from(response);

        debug!(
            "Listed {} of {} deposits for {} at offset {}",
            page.deposits.len(),
            page.total,
            address,
            offset
        );
        Ok(page)
    }

    /// Fetches a single deposit by network and deposit count.
    ///
    /// Issues `GET {api_url}/bridge?net_id=&deposit_cnt=`. A body without a
    /// `deposit` field is a validation error.
    pub async fn get_deposit(
        &self,
        api_url: &str,
        network_id: u32,
        deposit_count: u64,
        cancel: Option<CancelHandle>,
    ) -> Result<Deposit, LedgerError> {
        let url = endpoint(api_url, &["bridge"])?;
        let query = deposit_query(network_id, deposit_count);

        let body = self.fetch_json(url, &query, cancel).await?;
        let response = self.checked(
            "bridge",
            schema::validate_deposit_response(&body, self.unknown_fields),
        )?;

        Ok(Deposit::from(response.deposit))
    }

    /// Fetches the merkle inclusion proof of a deposit.
    ///
    /// Issues `GET {api_url}/merkle-proof?net_id=&deposit_cnt=`.
    pub async fn get_merkle_proof(
        &self,
        api_url: &str,
        network_id: u32,
        deposit_count: u64,
        cancel: Option<CancelHandle>,
    ) -> Result<MerkleProof, LedgerError> {
        let url = endpoint(api_url, &["merkle-proof"])?;
        let query = deposit_query(network_id, deposit_count);

        let body = self.fetch_json(url, &query, cancel).await?;
        let response = self.checked(
            "merkle-proof",
            schema::validate_merkle_proof_response(&body, self.unknown_fields),
        )?;

        Ok(MerkleProof::from(response.proof))
    }

    // ------------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------------

    /// Runs one exchange and decodes the body as JSON.
    ///
    /// When a cancel handle fires first, the in-flight request is dropped and
    /// the body is never inspected.
    async fn fetch_json(
        &self,
        url: Url,
        query: &[(&str, String)],
        cancel: Option<CancelHandle>,
    ) -> Result<Value, LedgerError> {
        let target = url.to_string();
        let exchange = self.exchange(url, query);

        let body = match cancel {
            None => exchange.await?,
            Some(mut handle) => {
                if handle.is_cancelled() {
                    warn!("Request to {} cancelled before it was sent", target);
                    return Err(LedgerError::Cancelled);
                }
                tokio::select! {
                    biased;
                    _ = handle.cancelled() => {
                        warn!("Request to {} cancelled", target);
                        return Err(LedgerError::Cancelled);
                    }
                    body = exchange => body?,
                }
            }
        };

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Response from {} is not valid JSON: {}", target, e);
            LedgerError::Validation(ValidationError::malformed_json(&e))
        })
    }

    async fn exchange(&self, url: Url, query: &[(&str, String)]) -> Result<Vec<u8>, TransportError> {
        debug!("GET {} {:?}", url, query);

        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status,
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    fn checked<T>(&self, operation: &str, result: Result<T, ValidationError>) -> Result<T, LedgerError> {
        result.map_err(|e| {
            warn!("Invalid {} response: {}", operation, e);
            LedgerError::Validation(e)
        })
    }
}

/// Appends path segments to the base URL's path, percent-encoding each one.
fn endpoint(api_url: &str, segments: &[&str]) -> Result<Url, TransportError> {
    let invalid = |reason: String| TransportError::InvalidUrl {
        url: api_url.to_string(),
        reason,
    };

    let mut url = Url::parse(api_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn deposit_query(network_id: u32, deposit_count: u64) -> [(&'static str, String); 2] {
    [
        ("net_id", network_id.to_string()),
        ("deposit_cnt", deposit_count.to_string()),
    ]
}
