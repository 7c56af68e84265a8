// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! Chain-access types and network constants.

use serde::{Deserialize, Serialize};

/// Flow network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Access node REST endpoint
    pub rest_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Flow testnet configuration.
pub const FLOW_TESTNET: NetworkConfig = NetworkConfig {
    name: "Flow Testnet",
    rest_url: "https://rest-testnet.onflow.org",
    explorer_url: "https://testnet.flowscan.io",
};

/// Flow mainnet configuration.
pub const FLOW_MAINNET: NetworkConfig = NetworkConfig {
    name: "Flow Mainnet",
    rest_url: "https://rest-mainnet.onflow.org",
    explorer_url: "https://www.flowscan.io",
};

/// Identifier of a submitted transaction, valid until finality is observed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TransactionId(pub String);

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionId {
    /// Explorer URL for this transaction on the given network.
    pub fn explorer_url(&self, network: &NetworkConfig) -> String {
        format!("{}/tx/{}", network.explorer_url, self.0)
    }
}

/// Lifecycle status of a submitted transaction, as reported by the
/// access node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SealStatus {
    Unknown,
    Pending,
    Finalized,
    Executed,
    Sealed,
    Expired,
}

impl SealStatus {
    /// Parse the access node's status string. Unrecognized values map to
    /// `Unknown` rather than failing the poll.
    pub fn from_status_str(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => SealStatus::Pending,
            "finalized" => SealStatus::Finalized,
            "executed" => SealStatus::Executed,
            "sealed" => SealStatus::Sealed,
            "expired" => SealStatus::Expired,
            _ => SealStatus::Unknown,
        }
    }

    /// Whether the transaction's effects are confirmed irreversible.
    pub fn is_sealed(&self) -> bool {
        matches!(self, SealStatus::Sealed)
    }

    /// Whether the access node will never seal this transaction.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, SealStatus::Expired)
    }
}

/// One transaction ready for the external wallet agent: fixed Cadence
/// source plus JSON-Cadence arguments, in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionTemplate {
    pub cadence: String,
    pub arguments: Vec<serde_json::Value>,
}
