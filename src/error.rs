// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! View-action error taxonomy.
//!
//! Every failure is contained at the view-action boundary: the controller
//! records it, the view renders it, and nothing propagates further.

use crate::chain::client::ChainError;
use crate::models::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A read call failed: the name hash did not resolve, or the
    /// underlying script call errored.
    #[error("Read failed: {0}")]
    Read(#[source] ChainError),

    /// A write call failed: the transaction was rejected, signing was
    /// declined, or the network errored. No ledger state is assumed
    /// changed.
    #[error("Write failed: {0}")]
    Write(#[source] ChainError),

    /// Input rejected before submission; the chain layer was never
    /// invoked.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The wallet session has no connected account.
    #[error("Wallet session is not connected")]
    NotConnected,
}

impl From<ValidationError> for ActionError {
    fn from(e: ValidationError) -> Self {
        ActionError::Validation(e.to_string())
    }
}
