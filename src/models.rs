// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! # Domain Data Models
//!
//! Value types crossing the chain-access boundary. Addresses, name hashes
//! and durations are validated here, before anything is encoded into a
//! script or transaction argument.
//!
//! ## DomainInfo
//!
//! [`DomainInfo`] is a read-only projection of registry state. It is decoded
//! fresh from every read call and never persisted or cached across loads;
//! the ledger is the single source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed suffix every registered domain name carries.
pub const DOMAIN_SUFFIX: &str = ".fns";

/// Whole seconds in a registration year: 365 days, no leap-year
/// adjustment. The registry contract prices against this same figure.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Validation failures for boundary value types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid Flow address `{0}`: expected 0x followed by 16 hex characters")]
    InvalidAddress(String),

    #[error("Invalid name hash `{0}`: expected 64 hex characters")]
    InvalidNameHash(String),

    #[error("Duration must be positive")]
    NonPositiveDuration,
}

// =============================================================================
// Flow Address Type
// =============================================================================

/// Flow account address wrapper.
///
/// Format: `0x` followed by 16 hexadecimal characters (8 bytes). Provides
/// type safety for account identifiers throughout the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlowAddress(String);

impl FlowAddress {
    /// Parse and validate an address string.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .ok_or_else(|| ValidationError::InvalidAddress(raw.to_string()))?;

        if hex.len() != 16 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidAddress(raw.to_string()));
        }

        Ok(FlowAddress(format!("0x{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FlowAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FlowAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlowAddress::parse(s)
    }
}

// =============================================================================
// Name Hash Type
// =============================================================================

/// Derived lookup key for a domain name.
///
/// Produced by the on-chain registry; the client only validates shape
/// (64 hex characters) and otherwise treats it as opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NameHash(String);

impl NameHash {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidNameHash(raw.to_string()));
        }

        Ok(NameHash(hex.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NameHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NameHash {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NameHash::parse(s)
    }
}

// =============================================================================
// Duration Type
// =============================================================================

/// Registration/renewal duration in whole seconds.
///
/// Always positive. Encoded on the wire as a decimal UFix64 string
/// (e.g. `"31536000.0"`), which is what the registry contract expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DurationSeconds(u64);

impl DurationSeconds {
    pub fn try_new(seconds: u64) -> Result<Self, ValidationError> {
        if seconds == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        Ok(DurationSeconds(seconds))
    }

    /// Whole registration years converted at [`SECONDS_PER_YEAR`].
    /// Rejects zero years.
    pub fn from_years(years: u32) -> Result<Self, ValidationError> {
        Self::try_new(u64::from(years) * SECONDS_PER_YEAR)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Decimal UFix64 representation for script/transaction arguments.
    pub fn to_ufix64(&self) -> String {
        format!("{}.0", self.0)
    }
}

// =============================================================================
// Domain Info
// =============================================================================

/// Read-only projection of one registered domain, as returned by the
/// registry read script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainInfo {
    /// Opaque registry identifier.
    pub id: u64,
    /// Full domain name, including the `.fns` suffix.
    pub name: String,
    /// Lookup key the registry derived from the name.
    pub name_hash: NameHash,
    /// Owning account.
    pub owner: FlowAddress,
    /// Registration time, Unix seconds (set by the ledger).
    pub created_at: i64,
    /// Expiry time, Unix seconds (advanced by renewal transactions).
    pub expires_at: i64,
    /// User-settable metadata.
    pub bio: Option<String>,
    /// User-settable linked external address.
    pub address: Option<String>,
}

impl DomainInfo {
    /// Domain name with the fixed suffix stripped, as the registry
    /// contract expects it in pricing and renewal calls.
    pub fn bare_name(&self) -> &str {
        self.name.strip_suffix(DOMAIN_SUFFIX).unwrap_or(&self.name)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}
