// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! Chain-access layer for the Flow Name Service registry.
//!
//! This module provides:
//! - Script reads against the registry (domain lookup, pricing,
//!   availability) via [`scripts::DomainScripts`]
//! - Transaction writes (bio/address updates, renewal, registration) via
//!   [`transactions::DomainTransactions`]
//! - The access node HTTP client and JSON-Cadence codec underneath
//!
//! All registry semantics live on chain; every function here wraps exactly
//! one script or one transaction.

pub mod cadence;
pub mod client;
pub mod scripts;
pub mod transactions;
pub mod types;

pub use client::{ChainError, FlowClient};
pub use scripts::DomainScripts;
pub use transactions::DomainTransactions;
pub use types::*;

use crate::config::ContractAddresses;
use crate::session::SessionHandle;

/// Registry access bound to one access node, one contract deployment and
/// one wallet session.
pub struct FlowDomains {
    pub(crate) client: FlowClient,
    pub(crate) contracts: ContractAddresses,
    pub(crate) session: SessionHandle,
}

impl FlowDomains {
    pub fn new(client: FlowClient, contracts: ContractAddresses, session: SessionHandle) -> Self {
        Self {
            client,
            contracts,
            session,
        }
    }
}
