// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! Flow Name Service client.
//!
//! Wallet-connected client for an on-chain domain registry. All registry
//! semantics (name hashing, ownership, expiry, pricing) live in the
//! external contracts; this crate invokes them as fixed scripts and
//! transactions and renders the results.
//!
//! ## Modules
//!
//! - `chain` - Chain-access layer (access node client, script/transaction wrappers)
//! - `session` - Wallet session handle and the external wallet agent contract
//! - `manage` - Per-domain view controller (submit, seal, re-fetch)
//! - `models` - Boundary value types and the `DomainInfo` projection

pub mod chain;
pub mod config;
pub mod error;
pub mod manage;
pub mod models;
pub mod session;
pub mod wallet;
