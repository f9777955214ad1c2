// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use catalog_search::{
    CatalogSearchEngine, JsonDirCatalogStore, ResolverConfig, find_drive_wwid_by_index,
};
use catalog_types::DriveFilter;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "catalog-resolve")]
#[command(about = "Resolve recorded hardware catalogs into extended drive records")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog directory (overrides `catalog_root` from the config)
    #[arg(long)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print extended drive records as JSON
    Extend {
        #[arg(long)]
        node: String,

        /// Drive identifier or device name to include (repeatable)
        #[arg(long = "filter")]
        filter: Vec<String>,
    },
    /// Print the WWID of one drive
    Wwid {
        #[arg(long)]
        node: String,

        #[arg(long)]
        index: u64,

        /// Print the ESXi formatted WWID instead of the Linux one
        #[arg(long)]
        esxi: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_search=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = run(Args::parse()).await?;
    println!("{output}");
    Ok(())
}

async fn run(args: Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };
    let root = config.resolve_root(args.root)?;

    tracing::debug!("Reading catalogs from {}", root.display());
    let engine = CatalogSearchEngine::new(Arc::new(JsonDirCatalogStore::new(root)))
        .with_sources(config.sources);

    match args.command {
        Command::Extend { node, filter } => {
            let filter: DriveFilter = filter.into_iter().collect();
            let records = engine.get_extended_catalog(&node, Some(&filter)).await?;
            Ok(serde_json::to_string_pretty(&records)?)
        }
        Command::Wwid { node, index, esxi } => {
            let entries = engine.drive_identity_entries(&node).await?;
            let wwid = find_drive_wwid_by_index(&entries, esxi, index)
                .with_context(|| format!("no WWID recorded for drive {index} on node {node}"))?;
            Ok(wwid.to_string())
        }
    }
}
