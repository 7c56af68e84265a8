// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! # Wallet Session
//!
//! The identity layer: which external account is connected, and whether the
//! wallet subsystem has finished its asynchronous bootstrap.
//!
//! The session is an explicitly passed handle, never ambient state, so any
//! consumer can be tested against a fake [`WalletAgent`]. An absent address
//! means "not connected" — a legitimate, renderable state, not an error.
//! Consumers must not issue chain reads or writes until
//! [`SessionHandle::is_initialized`] reports true.

use std::sync::Arc;

use async_trait::async_trait;

use crate::chain::client::ChainError;
use crate::chain::types::{TransactionId, TransactionTemplate};
use crate::models::FlowAddress;

/// External wallet subsystem, reduced to its fixed call contract: an
/// account address, and signing + submission of one transaction template.
///
/// Key custody, user approval and the actual signature scheme all live on
/// the other side of this trait.
#[async_trait]
pub trait WalletAgent: Send + Sync {
    /// The connected account.
    fn address(&self) -> FlowAddress;

    /// Sign and submit one transaction, returning its identifier
    /// immediately. Finality is the caller's concern.
    async fn sign_and_submit(
        &self,
        template: &TransactionTemplate,
    ) -> Result<TransactionId, ChainError>;
}

/// Injected session handle shared by every view.
#[derive(Clone)]
pub struct SessionHandle {
    agent: Option<Arc<dyn WalletAgent>>,
    initialized: bool,
}

impl SessionHandle {
    /// A session whose wallet bootstrap completed with a connected account.
    pub fn connected(agent: Arc<dyn WalletAgent>) -> Self {
        Self {
            agent: Some(agent),
            initialized: true,
        }
    }

    /// A session whose wallet bootstrap completed with no account.
    pub fn disconnected() -> Self {
        Self {
            agent: None,
            initialized: true,
        }
    }

    /// A session still waiting on the wallet subsystem. No chain calls may
    /// be issued against it.
    pub fn uninitialized() -> Self {
        Self {
            agent: None,
            initialized: false,
        }
    }

    /// Whether the wallet subsystem finished its bootstrap.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The connected account address, if any.
    pub fn current_address(&self) -> Option<FlowAddress> {
        self.agent.as_ref().map(|a| a.address())
    }

    /// The wallet agent, if connected.
    pub fn wallet(&self) -> Option<&Arc<dyn WalletAgent>> {
        self.agent.as_ref()
    }
}
