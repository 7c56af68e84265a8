// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! `fns` - command-line view onto the Flow Name Service.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use url::Url;

use fns_client::chain::types::{NetworkConfig, FLOW_MAINNET, FLOW_TESTNET};
use fns_client::chain::{DomainScripts, DomainTransactions, FlowClient, FlowDomains};
use fns_client::config::{self, Config};
use fns_client::manage::ManageDomain;
use fns_client::models::{DomainInfo, DurationSeconds, NameHash};
use fns_client::session::SessionHandle;
use fns_client::wallet::HttpWalletAgent;

#[derive(Parser)]
#[command(name = "fns", version, about = "Flow Name Service client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a domain owned by the connected account, by name hash
    Show { name_hash: String },
    /// List every registered domain
    List,
    /// List the connected account's domains
    Mine,
    /// Check whether a name is free to register
    Available { name: String },
    /// Update the bio on a domain
    SetBio { name_hash: String, bio: String },
    /// Update the linked address on a domain
    SetAddress { name_hash: String, address: String },
    /// Renew a domain's registration
    Renew {
        name_hash: String,
        #[arg(long, default_value_t = 1)]
        years: u32,
    },
    /// Register a new domain to the connected account
    Register {
        name: String,
        #[arg(long, default_value_t = 1)]
        years: u32,
    },
    /// Set up the domain collection on the connected account
    Init,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let session = bootstrap_session(&config).await;
    let client = FlowClient::new(config.access_node_url.clone());
    let registry = Arc::new(FlowDomains::new(
        client,
        config.contracts.clone(),
        session.clone(),
    ));

    match run(cli.command, &config, session, registry).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match std::env::var(config::LOG_FORMAT_ENV).as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Complete the wallet bootstrap. An unreachable wallet is a disconnected
/// session, not a failure: read-only commands still work.
async fn bootstrap_session(config: &Config) -> SessionHandle {
    match HttpWalletAgent::connect(config.wallet_url.clone()).await {
        Ok(agent) => SessionHandle::connected(Arc::new(agent)),
        Err(e) => {
            tracing::info!(error = %e, "No wallet session; running disconnected");
            SessionHandle::disconnected()
        }
    }
}

async fn run(
    command: Command,
    config: &Config,
    session: SessionHandle,
    registry: Arc<FlowDomains>,
) -> Result<(), Box<dyn std::error::Error>> {
    let network = network_for(&config.access_node_url);

    match command {
        Command::Show { name_hash } => {
            let mut view = ManageDomain::new(session, registry, NameHash::parse(&name_hash)?);
            view.load().await?;
            if let Some(info) = view.domain_info() {
                render_domain(info);
                if let Some(cost) = view.cost() {
                    println!("Renewal cost (1 year): {cost} FLOW");
                }
            }
        }
        Command::List => {
            for info in registry.all_domain_infos().await? {
                println!("{}\t{}\texpires {}", info.name, info.owner, date(info.expires_at()));
            }
        }
        Command::Mine => {
            let Some(owner) = session.current_address() else {
                println!("Wallet not connected.");
                return Ok(());
            };
            for info in registry.my_domain_infos(&owner).await? {
                println!("{}\t{}\texpires {}", info.name, info.name_hash, date(info.expires_at()));
            }
        }
        Command::Available { name } => {
            if registry.is_available(&name).await? {
                println!("{name} is available");
            } else {
                println!("{name} is taken");
            }
        }
        Command::SetBio { name_hash, bio } => {
            let mut view = ManageDomain::new(session, registry, NameHash::parse(&name_hash)?);
            view.load().await?;
            view.set_bio_input(bio);
            view.update_bio().await?;
            if let Some(info) = view.domain_info() {
                render_domain(info);
            }
        }
        Command::SetAddress { name_hash, address } => {
            let mut view = ManageDomain::new(session, registry, NameHash::parse(&name_hash)?);
            view.load().await?;
            view.set_address_input(address);
            view.update_address().await?;
            if let Some(info) = view.domain_info() {
                render_domain(info);
            }
        }
        Command::Renew { name_hash, years } => {
            let mut view = ManageDomain::new(session, registry, NameHash::parse(&name_hash)?);
            view.load().await?;
            view.set_renew_years(years).await;
            if let Some(cost) = view.cost() {
                println!("Renewing for {years} year(s) at {cost} FLOW");
            }
            view.renew().await?;
            if let Some(info) = view.domain_info() {
                println!("{} now expires {}", info.name, date(info.expires_at()));
            }
        }
        Command::Register { name, years } => {
            let duration = DurationSeconds::from_years(years)?;
            let cost = registry.rent_cost(&name, duration).await?;
            println!("Registering {name} for {years} year(s) at {cost} FLOW");

            let id = registry.register(&name, duration).await?;
            println!("Submitted: {}", id.explorer_url(network));
            registry.wait_for_seal(&id).await?;
            println!("Registered {name}");
        }
        Command::Init => {
            let id = registry.init_account().await?;
            println!("Submitted: {}", id.explorer_url(network));
            registry.wait_for_seal(&id).await?;
            println!("Account initialized");
        }
    }

    Ok(())
}

fn network_for(access_node_url: &Url) -> &'static NetworkConfig {
    if access_node_url.as_str().contains("mainnet") {
        &FLOW_MAINNET
    } else {
        &FLOW_TESTNET
    }
}

fn render_domain(info: &DomainInfo) {
    println!("{}", info.name);
    println!("  ID:         {}", info.id);
    println!("  Owner:      {}", info.owner);
    println!("  Created At: {}", date(info.created_at()));
    println!("  Expires At: {}", date(info.expires_at()));
    println!("  Bio:        {}", info.bio.as_deref().unwrap_or("Not Set"));
    println!(
        "  Address:    {}",
        info.address.as_deref().unwrap_or("Not Set")
    );
}

fn date(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into())
}
