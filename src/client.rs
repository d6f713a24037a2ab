use crate::builder::derive::derive_safe_address;
use crate::config::{get_contract_config, ContractConfig};
use crate::endpoints;
use crate::errors::{RelayerApiError, RelayerClientError};
use crate::http_helpers::{build_http_client, get, post};
use crate::models::{RelayTransactionRequest, RelayerTransactionState};
use crate::response::RelayTransactionResponse;
use alloy::primitives::{Address, U256};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Transport-only collaborator: submits finished envelopes to the relayer
/// backend and answers the lookups the estimation pipeline needs (deployment
/// state, nonce). Carries no estimation logic and holds no per-transaction
/// state.
pub struct RelayClient {
    relayer_url: String,
    chain_id: u64,
    contract_config: ContractConfig,
    http: reqwest::Client,
}

impl RelayClient {
    pub fn new(relayer_url: &str, chain_id: u64) -> Result<Self, RelayerClientError> {
        Url::parse(relayer_url).map_err(|e| RelayerClientError::InvalidUrl(e.to_string()))?;
        let relayer_url = relayer_url.trim_end_matches('/').to_string();

        let contract_config = get_contract_config(chain_id)?;
        let http = build_http_client()?;

        Ok(RelayClient { relayer_url, chain_id, contract_config, http })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn contract_config(&self) -> &ContractConfig {
        &self.contract_config
    }

    /// The wallet address this chain's factory would deploy for `owner`.
    pub fn expected_safe(&self, owner: Address) -> Address {
        derive_safe_address(owner, self.contract_config.proxy_factory)
    }

    /// Whether the wallet contract exists on chain, as seen by the relayer.
    pub async fn get_deployed(&self, safe: &Address) -> Result<bool, RelayerClientError> {
        let url = format!("{}{}", self.relayer_url, endpoints::deployed(safe));
        let response = get(&self.http, &url).await?;

        response
            .get("deployed")
            .and_then(Value::as_bool)
            .ok_or_else(|| RelayerClientError::MalformedResponse("missing deployed flag".into()))
    }

    /// The wallet's next sequence number.
    pub async fn get_nonce(&self, safe: &Address) -> Result<U256, RelayerClientError> {
        let url = format!("{}{}", self.relayer_url, endpoints::nonce(safe));
        let response = get(&self.http, &url).await?;

        response
            .get("nonce")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<U256>().ok())
            .ok_or_else(|| RelayerClientError::MalformedResponse("missing or invalid nonce".into()))
    }

    pub async fn get_transaction(&self, transaction_id: &str) -> Result<Value, RelayerApiError> {
        let url = format!(
            "{}{}?id={}",
            self.relayer_url,
            endpoints::GET_TRANSACTION,
            transaction_id
        );
        get(&self.http, &url).await
    }

    /// Submit a signed envelope against the wallet-scoped endpoint. The
    /// envelope is consumed by the relayer as-is; this method adds nothing.
    pub async fn submit_transaction(
        &self,
        safe: &Address,
        request: &RelayTransactionRequest,
    ) -> Result<RelayTransactionResponse<'_>, RelayerClientError> {
        let url = format!("{}{}", self.relayer_url, endpoints::transactions(safe));
        let response = post(&self.http, &url, request).await?;

        let transaction_id = response
            .get("transactionID")
            .and_then(Value::as_str)
            .map(str::to_string);
        let transaction_hash = response
            .get("transactionHash")
            .and_then(Value::as_str)
            .map(str::to_string);

        debug!(?transaction_id, ?transaction_hash, "submitted transaction");
        Ok(RelayTransactionResponse::new(transaction_id, transaction_hash, self))
    }

    /// Poll a submitted transaction until it reaches one of `states`, hits
    /// `fail_state`, or the poll limit runs out.
    pub async fn poll_until_state(
        &self,
        transaction_id: &str,
        states: &[RelayerTransactionState],
        fail_state: Option<RelayerTransactionState>,
        max_polls: Option<usize>,
        poll_frequency: Option<u64>,
    ) -> Result<Option<Value>, RelayerApiError> {
        let target_states: HashSet<&str> = states.iter().map(|s| s.as_str()).collect();
        let poll_limit = max_polls.unwrap_or(10);
        let poll_frequency_ms = poll_frequency.unwrap_or(2000).max(1000);

        debug!(transaction_id, ?target_states, "waiting for transaction state");

        for _ in 0..poll_limit {
            let transactions = self.get_transaction(transaction_id).await?;

            if let Some(txn) = transactions.as_array().and_then(|arr| arr.first()) {
                if let Some(txn_state) = txn.get("state").and_then(Value::as_str) {
                    if target_states.contains(txn_state) {
                        return Ok(Some(txn.clone()));
                    }
                    if fail_state.is_some_and(|fail| txn_state == fail.as_str()) {
                        let txn_hash = txn
                            .get("transactionHash")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown");
                        warn!(transaction_id, txn_hash, "transaction failed onchain");
                        return Ok(None);
                    }
                }
            }

            tokio::time::sleep(Duration::from_millis(poll_frequency_ms)).await;
        }

        warn!(transaction_id, "transaction did not reach a target state, giving up");
        Ok(None)
    }
}
