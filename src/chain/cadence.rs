// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! Fixed Cadence call payloads and the JSON-Cadence codec.
//!
//! Every read and write the client performs is one of the sources below,
//! with contract import addresses substituted from configuration and
//! arguments encoded as JSON-Cadence values. The registry's semantics
//! (hashing, ownership, expiry, pricing) live entirely on the other side
//! of these payloads.

use serde_json::{json, Value};

use crate::config::ContractAddresses;
use crate::models::{DomainInfo, DurationSeconds, FlowAddress, NameHash};

// =============================================================================
// Script sources (read calls)
// =============================================================================

/// Resolve one domain owned by `account` via its name hash.
pub const GET_DOMAIN_INFO_BY_NAME_HASH: &str = r#"
import Domains from 0xDomains

pub fun main(account: Address, nameHash: String): Domains.DomainInfo {
  let capability = getAccount(account)
    .getCapability<&Domains.Collection{Domains.CollectionPublic}>(Domains.DomainsPublicPath)
  let collection = capability.borrow() ?? panic("Collection capability could not be borrowed")

  let id = Domains.nameHashToIDs[nameHash]
  if id == nil {
    panic("Domain not found")
  }

  let domain = collection.borrowDomain(id: id!)
  return domain.getInfo()
}
"#;

/// Price a registration/renewal for `duration` seconds.
pub const GET_RENT_COST: &str = r#"
import Domains from 0xDomains

pub fun main(name: String, duration: UFix64): UFix64 {
  return Domains.getRentCost(name: name, duration: duration)
}
"#;

/// Every domain currently registered.
pub const GET_ALL_DOMAIN_INFOS: &str = r#"
import Domains from 0xDomains

pub fun main(): [Domains.DomainInfo] {
  let allOwners = Domains.owners.keys
  let infos: [Domains.DomainInfo] = []

  for nameHash in allOwners {
    let publicCap = getAccount(Domains.owners[nameHash]!)
      .getCapability<&Domains.Collection{Domains.CollectionPublic}>(Domains.DomainsPublicPath)
    let collection = publicCap.borrow() ?? panic("Collection capability could not be borrowed")
    let id = Domains.nameHashToIDs[nameHash]!
    let domain = collection.borrowDomain(id: id)
    infos.append(domain.getInfo())
  }

  return infos
}
"#;

/// Domains registered to a single account.
pub const GET_DOMAIN_INFOS_FOR_ACCOUNT: &str = r#"
import Domains from 0xDomains

pub fun main(account: Address): [Domains.DomainInfo] {
  let capability = getAccount(account)
    .getCapability<&Domains.Collection{Domains.CollectionPublic}>(Domains.DomainsPublicPath)
  let collection = capability.borrow() ?? panic("Collection capability could not be borrowed")

  let infos: [Domains.DomainInfo] = []
  for id in collection.getIDs() {
    infos.append(collection.borrowDomain(id: id).getInfo())
  }
  return infos
}
"#;

/// Whether `name` is free to register.
pub const CHECK_IS_AVAILABLE: &str = r#"
import Domains from 0xDomains

pub fun main(name: String): Bool {
  return Domains.isAvailable(nameHash: Domains.getDomainNameHash(name: name))
}
"#;

// =============================================================================
// Transaction sources (write calls)
// =============================================================================

/// Set the bio on a domain the signer owns.
pub const UPDATE_BIO_FOR_DOMAIN: &str = r#"
import Domains from 0xDomains

transaction(nameHash: String, bio: String) {
  var domain: &{Domains.DomainPrivate}

  prepare(account: AuthAccount) {
    var domainRef: &{Domains.DomainPrivate}? = nil
    let collectionPvt = account
      .borrow<&{Domains.CollectionPrivate}>(from: Domains.DomainsStoragePath)
      ?? panic("Could not load collection")

    let id = Domains.nameHashToIDs[nameHash]
    if id == nil {
      panic("Could not find domain")
    }

    domainRef = collectionPvt.borrowDomainPrivate(id: id!)
    self.domain = domainRef!
  }

  execute {
    self.domain.setBio(bio: bio)
  }
}
"#;

/// Set the linked address on a domain the signer owns.
pub const UPDATE_ADDRESS_FOR_DOMAIN: &str = r#"
import Domains from 0xDomains

transaction(nameHash: String, addr: Address) {
  var domain: &{Domains.DomainPrivate}

  prepare(account: AuthAccount) {
    var domainRef: &{Domains.DomainPrivate}? = nil
    let collectionPvt = account
      .borrow<&{Domains.CollectionPrivate}>(from: Domains.DomainsStoragePath)
      ?? panic("Could not load collection")

    let id = Domains.nameHashToIDs[nameHash]
    if id == nil {
      panic("Could not find domain")
    }

    domainRef = collectionPvt.borrowDomainPrivate(id: id!)
    self.domain = domainRef!
  }

  execute {
    self.domain.setAddress(addr: addr)
  }
}
"#;

/// Extend a domain's expiry, paying rent from the signer's Flow vault.
pub const RENEW_DOMAIN: &str = r#"
import Domains from 0xDomains
import FungibleToken from 0xFungibleToken
import FlowToken from 0xFlowToken

transaction(name: String, duration: UFix64) {
  let vault: @FungibleToken.Vault
  var domain: &Domains.NFT

  prepare(account: AuthAccount) {
    let collectionRef = account
      .borrow<&{Domains.CollectionPublic}>(from: Domains.DomainsStoragePath)
      ?? panic("Could not load collection")

    var domainRef: &Domains.NFT? = nil
    let nameHash = Domains.getDomainNameHash(name: name)
    let id = Domains.nameHashToIDs[nameHash]
    if id == nil {
      panic("Could not find domain")
    }

    domainRef = collectionRef.borrowDomain(id: id!) as! &Domains.NFT
    self.domain = domainRef!

    let vaultRef = account
      .borrow<&FlowToken.Vault>(from: /storage/flowTokenVault)
      ?? panic("Could not load Flow vault")
    let rentCost = Domains.getRentCost(name: name, duration: duration)
    self.vault <- vaultRef.withdraw(amount: rentCost)
  }

  execute {
    Domains.renewDomain(domain: self.domain, duration: duration, feeTokens: <- self.vault)
  }
}
"#;

/// Register a new domain to the signer.
pub const REGISTER_DOMAIN: &str = r#"
import Domains from 0xDomains
import FungibleToken from 0xFungibleToken
import FlowToken from 0xFlowToken

transaction(name: String, duration: UFix64) {
  let nftReceiverCap: Capability<&{Domains.CollectionPublic}>
  let vault: @FungibleToken.Vault

  prepare(account: AuthAccount) {
    self.nftReceiverCap = account.getCapability<&{Domains.CollectionPublic}>(Domains.DomainsPublicPath)

    let vaultRef = account
      .borrow<&FlowToken.Vault>(from: /storage/flowTokenVault)
      ?? panic("Could not load Flow vault")
    let rentCost = Domains.getRentCost(name: name, duration: duration)
    self.vault <- vaultRef.withdraw(amount: rentCost)
  }

  execute {
    Domains.registerDomain(
      name: name,
      duration: duration,
      feeTokens: <- self.vault,
      receiver: self.nftReceiverCap
    )
  }
}
"#;

/// One-time collection setup for a newly connected account.
pub const INIT_ACCOUNT: &str = r#"
import NonFungibleToken from 0xNonFungibleToken
import Domains from 0xDomains

transaction() {
  prepare(account: AuthAccount) {
    account.save(<- Domains.createEmptyCollection(), to: Domains.DomainsStoragePath)
    account.link<&Domains.Collection{NonFungibleToken.CollectionPublic, Domains.CollectionPublic}>(
      Domains.DomainsPublicPath,
      target: Domains.DomainsStoragePath
    )
    account.link<&Domains.Collection{Domains.CollectionPrivate}>(
      Domains.DomainsPrivatePath,
      target: Domains.DomainsStoragePath
    )
  }
}
"#;

/// Substitute the placeholder import addresses with the configured
/// contract accounts.
pub fn instantiate(source: &str, contracts: &ContractAddresses) -> String {
    source
        .replace("0xDomains", contracts.domains.as_str())
        .replace("0xFungibleToken", contracts.fungible_token.as_str())
        .replace("0xNonFungibleToken", contracts.non_fungible_token.as_str())
        .replace("0xFlowToken", contracts.flow_token.as_str())
}

// =============================================================================
// JSON-Cadence argument encoding
// =============================================================================

pub fn cadence_string(value: &str) -> Value {
    json!({ "type": "String", "value": value })
}

pub fn cadence_address(value: &FlowAddress) -> Value {
    json!({ "type": "Address", "value": value.as_str() })
}

pub fn cadence_ufix64(value: &DurationSeconds) -> Value {
    json!({ "type": "UFix64", "value": value.to_ufix64() })
}

// =============================================================================
// JSON-Cadence value decoding
// =============================================================================

/// Decoding failures for JSON-Cadence responses.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CadenceError {
    #[error("Unexpected JSON-Cadence shape: {0}")]
    UnexpectedShape(String),

    #[error("Missing struct field `{0}`")]
    MissingField(&'static str),

    #[error("Invalid numeric value `{0}`")]
    InvalidNumber(String),
}

fn inner<'a>(value: &'a Value, expected: &str) -> Result<&'a Value, CadenceError> {
    match value.get("type").and_then(Value::as_str) {
        Some(t) if t == expected => value
            .get("value")
            .ok_or_else(|| CadenceError::UnexpectedShape(format!("{expected} without value"))),
        other => Err(CadenceError::UnexpectedShape(format!(
            "expected {expected}, got {other:?}"
        ))),
    }
}

pub fn decode_bool(value: &Value) -> Result<bool, CadenceError> {
    inner(value, "Bool")?
        .as_bool()
        .ok_or_else(|| CadenceError::UnexpectedShape("Bool without boolean value".into()))
}

pub fn decode_ufix64(value: &Value) -> Result<f64, CadenceError> {
    let raw = inner(value, "UFix64")?
        .as_str()
        .ok_or_else(|| CadenceError::UnexpectedShape("UFix64 without string value".into()))?;
    raw.parse()
        .map_err(|_| CadenceError::InvalidNumber(raw.to_string()))
}

fn decode_u64(value: &Value) -> Result<u64, CadenceError> {
    let raw = inner(value, "UInt64")?
        .as_str()
        .ok_or_else(|| CadenceError::UnexpectedShape("UInt64 without string value".into()))?;
    raw.parse()
        .map_err(|_| CadenceError::InvalidNumber(raw.to_string()))
}

fn decode_string(value: &Value) -> Result<String, CadenceError> {
    Ok(inner(value, "String")?
        .as_str()
        .ok_or_else(|| CadenceError::UnexpectedShape("String without string value".into()))?
        .to_string())
}

fn decode_address(value: &Value) -> Result<String, CadenceError> {
    Ok(inner(value, "Address")?
        .as_str()
        .ok_or_else(|| CadenceError::UnexpectedShape("Address without string value".into()))?
        .to_string())
}

/// Unwrap an `Optional`; `None` when the inner value is null.
fn decode_optional(value: &Value) -> Result<Option<&Value>, CadenceError> {
    let v = inner(value, "Optional")?;
    if v.is_null() {
        Ok(None)
    } else {
        Ok(Some(v))
    }
}

/// UFix64 timestamps come back as decimal strings; the registry stores
/// whole seconds, so the fraction is always zero and truncation is exact.
fn decode_timestamp(value: &Value) -> Result<i64, CadenceError> {
    Ok(decode_ufix64(value)? as i64)
}

/// Decode a `Domains.DomainInfo` struct.
pub fn decode_domain_info(value: &Value) -> Result<DomainInfo, CadenceError> {
    let body = inner(value, "Struct")?;
    let fields = body
        .get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| CadenceError::UnexpectedShape("Struct without fields".into()))?;

    let field = |name: &'static str| -> Result<&Value, CadenceError> {
        fields
            .iter()
            .find(|f| f.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|f| f.get("value"))
            .ok_or(CadenceError::MissingField(name))
    };

    let owner = decode_address(field("owner")?)?;
    let name_hash = decode_string(field("nameHash")?)?;

    // The contract models an unset bio as the empty string.
    let bio = match decode_string(field("bio")?)? {
        b if b.is_empty() => None,
        b => Some(b),
    };

    let address = decode_optional(field("address")?)?
        .map(decode_address)
        .transpose()?;

    Ok(DomainInfo {
        id: decode_u64(field("id")?)?,
        name: decode_string(field("name")?)?,
        name_hash: NameHash::parse(&name_hash)
            .map_err(|e| CadenceError::UnexpectedShape(e.to_string()))?,
        owner: FlowAddress::parse(&owner)
            .map_err(|e| CadenceError::UnexpectedShape(e.to_string()))?,
        created_at: decode_timestamp(field("createdAt")?)?,
        expires_at: decode_timestamp(field("expiresAt")?)?,
        bio,
        address,
    })
}

/// Decode a `[Domains.DomainInfo]` array.
pub fn decode_domain_info_list(value: &Value) -> Result<Vec<DomainInfo>, CadenceError> {
    let items = inner(value, "Array")?
        .as_array()
        .ok_or_else(|| CadenceError::UnexpectedShape("Array without elements".into()))?;
    items.iter().map(decode_domain_info).collect()
}
