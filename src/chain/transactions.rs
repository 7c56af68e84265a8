// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! Registry write calls.
//!
//! One method per transaction. Each submits exactly one transaction
//! through the session's wallet agent and returns its identifier
//! immediately; callers await [`DomainTransactions::wait_for_seal`] before
//! treating the effect as durable or re-reading state.

use async_trait::async_trait;

use super::cadence::{self, cadence_address, cadence_string, cadence_ufix64};
use super::client::ChainError;
use super::types::{SealStatus, TransactionId, TransactionTemplate};
use super::FlowDomains;
use crate::models::{DurationSeconds, FlowAddress, NameHash};

/// Transaction writes against the domain registry.
#[async_trait]
pub trait DomainTransactions: Send + Sync {
    /// Set the bio on a domain the signer owns.
    async fn update_bio(&self, name_hash: &NameHash, bio: &str)
        -> Result<TransactionId, ChainError>;

    /// Set the linked address on a domain the signer owns.
    async fn update_address(
        &self,
        name_hash: &NameHash,
        address: &FlowAddress,
    ) -> Result<TransactionId, ChainError>;

    /// Extend a domain's expiry by `duration`, paying rent from the
    /// signer's vault. Takes the bare name, without the `.fns` suffix.
    async fn renew(&self, name: &str, duration: DurationSeconds)
        -> Result<TransactionId, ChainError>;

    /// Register a new domain to the signer.
    async fn register(
        &self,
        name: &str,
        duration: DurationSeconds,
    ) -> Result<TransactionId, ChainError>;

    /// One-time collection setup for a newly connected account.
    async fn init_account(&self) -> Result<TransactionId, ChainError>;

    /// Block until the transaction is sealed or the polling budget runs out.
    async fn wait_for_seal(&self, id: &TransactionId) -> Result<SealStatus, ChainError>;
}

impl FlowDomains {
    /// Hand a template to the connected wallet agent for signing and
    /// submission.
    async fn submit(&self, template: TransactionTemplate) -> Result<TransactionId, ChainError> {
        let wallet = self
            .session
            .wallet()
            .ok_or_else(|| ChainError::Wallet("no wallet session connected".into()))?;

        let id = wallet.sign_and_submit(&template).await?;
        tracing::info!(tx = %id, "Transaction submitted");
        Ok(id)
    }
}

#[async_trait]
impl DomainTransactions for FlowDomains {
    async fn update_bio(
        &self,
        name_hash: &NameHash,
        bio: &str,
    ) -> Result<TransactionId, ChainError> {
        self.submit(TransactionTemplate {
            cadence: cadence::instantiate(cadence::UPDATE_BIO_FOR_DOMAIN, &self.contracts),
            arguments: vec![cadence_string(name_hash.as_str()), cadence_string(bio)],
        })
        .await
    }

    async fn update_address(
        &self,
        name_hash: &NameHash,
        address: &FlowAddress,
    ) -> Result<TransactionId, ChainError> {
        self.submit(TransactionTemplate {
            cadence: cadence::instantiate(cadence::UPDATE_ADDRESS_FOR_DOMAIN, &self.contracts),
            arguments: vec![cadence_string(name_hash.as_str()), cadence_address(address)],
        })
        .await
    }

    async fn renew(
        &self,
        name: &str,
        duration: DurationSeconds,
    ) -> Result<TransactionId, ChainError> {
        self.submit(TransactionTemplate {
            cadence: cadence::instantiate(cadence::RENEW_DOMAIN, &self.contracts),
            arguments: vec![cadence_string(name), cadence_ufix64(&duration)],
        })
        .await
    }

    async fn register(
        &self,
        name: &str,
        duration: DurationSeconds,
    ) -> Result<TransactionId, ChainError> {
        self.submit(TransactionTemplate {
            cadence: cadence::instantiate(cadence::REGISTER_DOMAIN, &self.contracts),
            arguments: vec![cadence_string(name), cadence_ufix64(&duration)],
        })
        .await
    }

    async fn init_account(&self) -> Result<TransactionId, ChainError> {
        self.submit(TransactionTemplate {
            cadence: cadence::instantiate(cadence::INIT_ACCOUNT, &self.contracts),
            arguments: vec![],
        })
        .await
    }

    async fn wait_for_seal(&self, id: &TransactionId) -> Result<SealStatus, ChainError> {
        self.client.wait_for_seal(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::config::ContractAddresses;
    use crate::session::{SessionHandle, WalletAgent};

    struct RecordingWallet {
        address: FlowAddress,
        submitted: Mutex<Vec<TransactionTemplate>>,
    }

    #[async_trait]
    impl WalletAgent for RecordingWallet {
        fn address(&self) -> FlowAddress {
            self.address.clone()
        }

        async fn sign_and_submit(
            &self,
            template: &TransactionTemplate,
        ) -> Result<TransactionId, ChainError> {
            self.submitted.lock().unwrap().push(template.clone());
            Ok(TransactionId("tx-1".into()))
        }
    }

    fn registry_with_wallet() -> (FlowDomains, Arc<RecordingWallet>) {
        let contracts = ContractAddresses {
            domains: FlowAddress::parse("0x5b0c4736f717fe9c").unwrap(),
            fungible_token: FlowAddress::parse("0x9a0766d93b6608b7").unwrap(),
            non_fungible_token: FlowAddress::parse("0x631e88ae7f1d7c20").unwrap(),
            flow_token: FlowAddress::parse("0x7e60df042a9c0868").unwrap(),
        };
        let wallet = Arc::new(RecordingWallet {
            address: FlowAddress::parse("0xf8d6e0586b0a20c7").unwrap(),
            submitted: Mutex::new(Vec::new()),
        });
        let client = crate::chain::FlowClient::new("http://localhost:8888".parse().unwrap());
        let session = SessionHandle::connected(wallet.clone());
        (FlowDomains::new(client, contracts, session), wallet)
    }

    #[tokio::test]
    async fn update_bio_submits_one_transaction() {
        let (registry, wallet) = registry_with_wallet();
        let hash = NameHash::parse(&"a".repeat(64)).unwrap();

        let id = registry.update_bio(&hash, "hello").await.unwrap();
        assert_eq!(id, TransactionId("tx-1".into()));

        let submitted = wallet.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert!(submitted[0].cadence.contains("setBio"));
        assert_eq!(submitted[0].arguments.len(), 2);
    }

    #[tokio::test]
    async fn renew_passes_ufix64_duration() {
        let (registry, wallet) = registry_with_wallet();
        let duration = DurationSeconds::try_new(31_536_000).unwrap();

        registry.renew("alice", duration).await.unwrap();

        let submitted = wallet.submitted.lock().unwrap();
        assert_eq!(
            submitted[0].arguments[1],
            serde_json::json!({ "type": "UFix64", "value": "31536000.0" })
        );
    }

    #[tokio::test]
    async fn writes_require_a_connected_wallet() {
        let contracts = ContractAddresses {
            domains: FlowAddress::parse("0x5b0c4736f717fe9c").unwrap(),
            fungible_token: FlowAddress::parse("0x9a0766d93b6608b7").unwrap(),
            non_fungible_token: FlowAddress::parse("0x631e88ae7f1d7c20").unwrap(),
            flow_token: FlowAddress::parse("0x7e60df042a9c0868").unwrap(),
        };
        let client = crate::chain::FlowClient::new("http://localhost:8888".parse().unwrap());
        let registry =
            FlowDomains::new(client, contracts, SessionHandle::disconnected());

        let hash = NameHash::parse(&"a".repeat(64)).unwrap();
        let err = registry.update_bio(&hash, "hello").await.unwrap_err();
        assert!(matches!(err, ChainError::Wallet(_)));
    }
}
