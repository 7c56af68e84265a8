// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! Flow access node client.
//!
//! Thin HTTP wrapper over the access node REST API: execute a read script,
//! fetch a transaction result, and poll for seal. Scripts and arguments
//! travel base64-encoded; values come back as base64 JSON-Cadence.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::cadence::CadenceError;
use super::types::{SealStatus, TransactionId};

/// How often [`FlowClient::wait_for_seal`] polls the transaction result.
const SEAL_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Poll attempts before giving up on a seal. Bounded so a hung network
/// call cannot wedge the caller's submitting state forever.
const SEAL_MAX_ATTEMPTS: u32 = 150;

/// Errors from the chain-access boundary.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Access node request failed: {0}")]
    Transport(String),

    #[error("Access node rejected the call ({status}): {message}")]
    Rpc { status: u16, message: String },

    #[error("Could not decode chain response: {0}")]
    Decode(String),

    #[error("Wallet agent refused the transaction: {0}")]
    Wallet(String),

    #[error("Transaction {id} failed on chain: {message}")]
    TransactionFailed { id: TransactionId, message: String },

    #[error("Transaction {0} was not sealed before the polling deadline")]
    SealTimeout(TransactionId),
}

impl From<CadenceError> for ChainError {
    fn from(e: CadenceError) -> Self {
        ChainError::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for ChainError {
    fn from(e: reqwest::Error) -> Self {
        ChainError::Transport(e.to_string())
    }
}

/// Result of one transaction-result fetch.
#[derive(Debug, Clone)]
pub struct TransactionResult {
    pub status: SealStatus,
    pub error_message: String,
}

#[derive(Deserialize)]
struct TransactionResultBody {
    status: String,
    #[serde(default)]
    error_message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// HTTP client for a Flow access node REST endpoint.
pub struct FlowClient {
    http: reqwest::Client,
    base: Url,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl FlowClient {
    pub fn new(access_node_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: access_node_url,
            poll_interval: SEAL_POLL_INTERVAL,
            max_poll_attempts: SEAL_MAX_ATTEMPTS,
        }
    }

    /// Execute a read-only script at the latest sealed block and return the
    /// decoded JSON-Cadence value.
    pub async fn execute_script(
        &self,
        source: &str,
        arguments: &[Value],
    ) -> Result<Value, ChainError> {
        let url = self.endpoint("v1/scripts")?;
        let body = script_request_body(source, arguments);

        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_default();
            return Err(ChainError::Rpc {
                status: status.as_u16(),
                message,
            });
        }

        // The response body is a JSON string holding the base64-encoded
        // JSON-Cadence value.
        let encoded: String = response.json().await?;
        let raw = BASE64
            .decode(encoded.trim())
            .map_err(|e| ChainError::Decode(e.to_string()))?;
        serde_json::from_slice(&raw).map_err(|e| ChainError::Decode(e.to_string()))
    }

    /// Fetch the current result of a submitted transaction.
    pub async fn transaction_result(
        &self,
        id: &TransactionId,
    ) -> Result<TransactionResult, ChainError> {
        let url = self.endpoint(&format!("v1/transaction_results/{id}"))?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_default();
            return Err(ChainError::Rpc {
                status: status.as_u16(),
                message,
            });
        }

        let body: TransactionResultBody = response.json().await?;
        Ok(TransactionResult {
            status: SealStatus::from_status_str(&body.status),
            error_message: body.error_message,
        })
    }

    /// Poll until the transaction is sealed.
    ///
    /// A sealed result carrying an execution error, an expired transaction,
    /// or exhausting the polling budget all fail; the effect must never be
    /// treated as durable in those cases.
    pub async fn wait_for_seal(&self, id: &TransactionId) -> Result<SealStatus, ChainError> {
        for attempt in 0..self.max_poll_attempts {
            let result = self.transaction_result(id).await?;

            if result.status.is_sealed() {
                if result.error_message.is_empty() {
                    tracing::debug!(tx = %id, attempts = attempt + 1, "Transaction sealed");
                    return Ok(result.status);
                }
                return Err(ChainError::TransactionFailed {
                    id: id.clone(),
                    message: result.error_message,
                });
            }

            if result.status.is_terminal_failure() {
                return Err(ChainError::TransactionFailed {
                    id: id.clone(),
                    message: "transaction expired before sealing".into(),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }

        Err(ChainError::SealTimeout(id.clone()))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ChainError> {
        self.base
            .join(path)
            .map_err(|e| ChainError::Transport(e.to_string()))
    }
}

/// Build the access node script-execution request body: base64 source plus
/// base64-encoded JSON-Cadence arguments, in order.
fn script_request_body(source: &str, arguments: &[Value]) -> Value {
    let encoded_args: Vec<String> = arguments
        .iter()
        .map(|arg| BASE64.encode(arg.to_string()))
        .collect();

    json!({
        "script": BASE64.encode(source),
        "arguments": encoded_args,
    })
}
