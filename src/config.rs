// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup. Endpoint URLs
//! and contract addresses are validated at load time so malformed values
//! fail fast instead of surfacing as opaque chain errors later.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `FLOW_ACCESS_NODE_URL` | Flow access node REST endpoint | Flow testnet |
//! | `FNS_WALLET_URL` | External wallet agent bridge endpoint | `http://localhost:8701` |
//! | `FNS_DOMAINS_ADDRESS` | `Domains` contract account | testnet deployment |
//! | `FNS_FUNGIBLE_TOKEN_ADDRESS` | `FungibleToken` contract account | testnet deployment |
//! | `FNS_NON_FUNGIBLE_TOKEN_ADDRESS` | `NonFungibleToken` contract account | testnet deployment |
//! | `FNS_FLOW_TOKEN_ADDRESS` | `FlowToken` contract account | testnet deployment |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;

use url::Url;

use crate::models::{FlowAddress, ValidationError};

/// Environment variable name for the access node REST endpoint.
pub const ACCESS_NODE_URL_ENV: &str = "FLOW_ACCESS_NODE_URL";

/// Environment variable name for the wallet agent bridge endpoint.
pub const WALLET_URL_ENV: &str = "FNS_WALLET_URL";

/// Environment variable names for the contract import addresses.
pub const DOMAINS_ADDRESS_ENV: &str = "FNS_DOMAINS_ADDRESS";
pub const FUNGIBLE_TOKEN_ADDRESS_ENV: &str = "FNS_FUNGIBLE_TOKEN_ADDRESS";
pub const NON_FUNGIBLE_TOKEN_ADDRESS_ENV: &str = "FNS_NON_FUNGIBLE_TOKEN_ADDRESS";
pub const FLOW_TOKEN_ADDRESS_ENV: &str = "FNS_FLOW_TOKEN_ADDRESS";

/// Environment variable name selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_ACCESS_NODE_URL: &str = "https://rest-testnet.onflow.org";
const DEFAULT_WALLET_URL: &str = "http://localhost:8701";

// Flow testnet deployments of the registry and the standard token contracts.
const DEFAULT_DOMAINS_ADDRESS: &str = "0x5b0c4736f717fe9c";
const DEFAULT_FUNGIBLE_TOKEN_ADDRESS: &str = "0x9a0766d93b6608b7";
const DEFAULT_NON_FUNGIBLE_TOKEN_ADDRESS: &str = "0x631e88ae7f1d7c20";
const DEFAULT_FLOW_TOKEN_ADDRESS: &str = "0x7e60df042a9c0868";

/// Contract accounts substituted into Cadence `import` statements.
#[derive(Debug, Clone)]
pub struct ContractAddresses {
    pub domains: FlowAddress,
    pub fungible_token: FlowAddress,
    pub non_fungible_token: FlowAddress,
    pub flow_token: FlowAddress,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Flow access node REST endpoint.
    pub access_node_url: Url,
    /// External wallet agent bridge endpoint.
    pub wallet_url: Url,
    /// Contract import addresses.
    pub contracts: ContractAddresses,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL in `{var}`: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },

    #[error("Invalid address in `{var}`: {source}")]
    InvalidContractAddress {
        var: &'static str,
        source: ValidationError,
    },
}

impl Config {
    /// Load configuration from the environment, falling back to the Flow
    /// testnet defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            access_node_url: url_var(ACCESS_NODE_URL_ENV, DEFAULT_ACCESS_NODE_URL)?,
            wallet_url: url_var(WALLET_URL_ENV, DEFAULT_WALLET_URL)?,
            contracts: ContractAddresses {
                domains: address_var(DOMAINS_ADDRESS_ENV, DEFAULT_DOMAINS_ADDRESS)?,
                fungible_token: address_var(
                    FUNGIBLE_TOKEN_ADDRESS_ENV,
                    DEFAULT_FUNGIBLE_TOKEN_ADDRESS,
                )?,
                non_fungible_token: address_var(
                    NON_FUNGIBLE_TOKEN_ADDRESS_ENV,
                    DEFAULT_NON_FUNGIBLE_TOKEN_ADDRESS,
                )?,
                flow_token: address_var(FLOW_TOKEN_ADDRESS_ENV, DEFAULT_FLOW_TOKEN_ADDRESS)?,
            },
        })
    }
}

fn url_var(var: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = env::var(var).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|source| ConfigError::InvalidUrl { var, source })
}

fn address_var(var: &'static str, default: &str) -> Result<FlowAddress, ConfigError> {
    let raw = env::var(var).unwrap_or_else(|_| default.to_string());
    FlowAddress::parse(&raw)
        .map_err(|source| ConfigError::InvalidContractAddress { var, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DEFAULT_ACCESS_NODE_URL.parse::<Url>().is_ok());
        assert!(DEFAULT_WALLET_URL.parse::<Url>().is_ok());
        assert!(FlowAddress::parse(DEFAULT_DOMAINS_ADDRESS).is_ok());
        assert!(FlowAddress::parse(DEFAULT_FUNGIBLE_TOKEN_ADDRESS).is_ok());
        assert!(FlowAddress::parse(DEFAULT_NON_FUNGIBLE_TOKEN_ADDRESS).is_ok());
        assert!(FlowAddress::parse(DEFAULT_FLOW_TOKEN_ADDRESS).is_ok());
    }
}
