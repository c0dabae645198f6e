// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Store Administration
//!
//! Maintenance entry point for a file-backed inventory store.
//!
//! Run with: cargo run --bin inventory-admin -- <command>
//!
//! The store root comes from `--root` or `INVENTORY_ROOT`.

use anyhow::{Context, Result};
use cim_inventory::{default_factory, ResourceStore, Store, StoreConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

/// Inventory store maintenance
#[derive(Parser, Debug)]
#[command(name = "inventory-admin", version, about, long_about = None)]
struct Args {
    /// Store root directory (overrides INVENTORY_ROOT)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Write documents without indentation
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the store layout
    Init,
    /// Delete the whole store
    Wipe,
    /// Delete every record, keeping the store
    Clear,
    /// Print stored resources as JSON, optionally restricted to some types
    List {
        types: Vec<String>,
    },
    /// Print the installed resource types
    Types {
        names: Vec<String>,
    },
}

fn load_config(args: &Args) -> Result<StoreConfig> {
    let config = match &args.root {
        Some(root) => StoreConfig::new(root),
        None => StoreConfig::from_env().context("Invalid store configuration")?,
    };
    Ok(config.with_pretty(!args.compact))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!("Using store at {}", config.root.display());

    let factory = default_factory();
    let store = ResourceStore::new(config, factory.clone()).context("Failed to open store")?;

    match args.command {
        Command::Init => {
            store.initialize().await.context("Failed to initialize store")?;
        }
        Command::Wipe => {
            store.wipe().await.context("Failed to wipe store")?;
        }
        Command::Clear => {
            store.clear().await.context("Failed to clear store")?;
        }
        Command::List { types } => {
            let loaded = store.load().await.context("Failed to load store")?;
            for failure in &loaded.failures {
                warn!("Unreadable record {}: {}", failure.path.display(), failure.reason);
            }

            let resources = if types.is_empty() {
                loaded.into_resources()
            } else {
                cim_inventory::filter::filter_type(&types, &loaded.resources)
            };
            println!("{}", serde_json::to_string_pretty(&resources)?);
        }
        Command::Types { names } => {
            println!("{}", serde_json::to_string_pretty(&factory.describe(&names))?);
        }
    }

    Ok(())
}
