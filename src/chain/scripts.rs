// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! Read-only registry queries.
//!
//! One method per script. Each call executes fresh against the latest
//! sealed block; nothing is cached on this side of the boundary.

use async_trait::async_trait;

use super::cadence::{
    self, cadence_address, cadence_string, cadence_ufix64, decode_bool, decode_domain_info,
    decode_domain_info_list, decode_ufix64,
};
use super::client::ChainError;
use super::FlowDomains;
use crate::models::{DomainInfo, DurationSeconds, FlowAddress, NameHash};

/// Script reads against the domain registry.
#[async_trait]
pub trait DomainScripts: Send + Sync {
    /// Resolve one domain owned by `owner` via its name hash. Fails when
    /// the hash does not resolve to a domain in that account's collection
    /// or the underlying read call errors.
    async fn domain_info_by_name_hash(
        &self,
        owner: &FlowAddress,
        name_hash: &NameHash,
    ) -> Result<DomainInfo, ChainError>;

    /// Rent cost for holding `name` for `duration`. A pure function of its
    /// arguments as interpreted by the registry contract; no pricing logic
    /// is owned here.
    async fn rent_cost(&self, name: &str, duration: DurationSeconds) -> Result<f64, ChainError>;

    /// Every domain currently registered.
    async fn all_domain_infos(&self) -> Result<Vec<DomainInfo>, ChainError>;

    /// Domains registered to `owner`.
    async fn my_domain_infos(&self, owner: &FlowAddress) -> Result<Vec<DomainInfo>, ChainError>;

    /// Whether `name` is free to register.
    async fn is_available(&self, name: &str) -> Result<bool, ChainError>;
}

#[async_trait]
impl DomainScripts for FlowDomains {
    async fn domain_info_by_name_hash(
        &self,
        owner: &FlowAddress,
        name_hash: &NameHash,
    ) -> Result<DomainInfo, ChainError> {
        let source = cadence::instantiate(cadence::GET_DOMAIN_INFO_BY_NAME_HASH, &self.contracts);
        let args = [
            cadence_address(owner),
            cadence_string(name_hash.as_str()),
        ];
        let value = self.client.execute_script(&source, &args).await?;
        Ok(decode_domain_info(&value)?)
    }

    async fn rent_cost(&self, name: &str, duration: DurationSeconds) -> Result<f64, ChainError> {
        let source = cadence::instantiate(cadence::GET_RENT_COST, &self.contracts);
        let args = [cadence_string(name), cadence_ufix64(&duration)];
        let value = self.client.execute_script(&source, &args).await?;
        Ok(decode_ufix64(&value)?)
    }

    async fn all_domain_infos(&self) -> Result<Vec<DomainInfo>, ChainError> {
        let source = cadence::instantiate(cadence::GET_ALL_DOMAIN_INFOS, &self.contracts);
        let value = self.client.execute_script(&source, &[]).await?;
        Ok(decode_domain_info_list(&value)?)
    }

    async fn my_domain_infos(&self, owner: &FlowAddress) -> Result<Vec<DomainInfo>, ChainError> {
        let source = cadence::instantiate(cadence::GET_DOMAIN_INFOS_FOR_ACCOUNT, &self.contracts);
        let args = [cadence_address(owner)];
        let value = self.client.execute_script(&source, &args).await?;
        Ok(decode_domain_info_list(&value)?)
    }

    async fn is_available(&self, name: &str) -> Result<bool, ChainError> {
        let source = cadence::instantiate(cadence::CHECK_IS_AVAILABLE, &self.contracts);
        let args = [cadence_string(name)];
        let value = self.client.execute_script(&source, &args).await?;
        Ok(decode_bool(&value)?)
    }
}
