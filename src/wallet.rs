// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! HTTP bridge to an external wallet service.
//!
//! The wallet service holds the keys and performs user-approved signing;
//! this client only hands it transaction templates and reads back ids. The
//! default endpoint is the local Flow dev wallet.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::chain::client::ChainError;
use crate::chain::types::{TransactionId, TransactionTemplate};
use crate::models::FlowAddress;
use crate::session::WalletAgent;

#[derive(Deserialize)]
struct AccountResponse {
    address: String,
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: String,
}

/// Wallet agent backed by a local wallet service over HTTP.
pub struct HttpWalletAgent {
    http: reqwest::Client,
    base: Url,
    address: FlowAddress,
}

impl HttpWalletAgent {
    /// Connect to the wallet service and resolve the active account.
    ///
    /// Failure here is how "not connected" is detected; callers fall back
    /// to a disconnected session rather than treating it as fatal.
    pub async fn connect(base: Url) -> Result<Self, ChainError> {
        let http = reqwest::Client::new();
        let url = base
            .join("v1/account")
            .map_err(|e| ChainError::Wallet(e.to_string()))?;

        let response = http
            .get(url)
            .send()
            .await
            .map_err(|e| ChainError::Wallet(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ChainError::Wallet(format!(
                "wallet service returned {}",
                response.status()
            )));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Wallet(e.to_string()))?;
        let address = FlowAddress::parse(&account.address)
            .map_err(|e| ChainError::Wallet(e.to_string()))?;

        tracing::info!(address = %address, "Wallet session established");

        Ok(Self {
            http,
            base,
            address,
        })
    }
}

#[async_trait]
impl WalletAgent for HttpWalletAgent {
    fn address(&self) -> FlowAddress {
        self.address.clone()
    }

    async fn sign_and_submit(
        &self,
        template: &TransactionTemplate,
    ) -> Result<TransactionId, ChainError> {
        let url = self
            .base
            .join("v1/transactions")
            .map_err(|e| ChainError::Wallet(e.to_string()))?;

        let response = self
            .http
            .post(url)
            .json(template)
            .send()
            .await
            .map_err(|e| ChainError::Wallet(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            // Declined signing and rejected submissions both land here.
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::Wallet(format!(
                "wallet service returned {status}: {body}"
            )));
        }

        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Wallet(e.to_string()))?;

        Ok(TransactionId(submitted.id))
    }
}
