//! freightctl - derive and verify Freight IDs from JSON documents
//!
//! ## Commands
//!
//! - `id`: Print the derived ID of every Freight in a document
//! - `verify`: Fail if any stored ID is missing or stale
//! - `canonical`: Print the canonical token string that is hashed
//! - `stamp`: Rewrite every `id` field and print the document
//!
//! Every command reads a `Freight` or `FreightList` JSON document from a
//! file, or from stdin when the path is `-`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use freight_core::obs::FreightSpan;
use freight_core::{ambiguous_tokens, canonical_string, Freight, FreightDocument, FreightError};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "freightctl")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Derive and verify content-based Freight IDs", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, env = "FREIGHT_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived ID of every Freight in the document
    Id {
        /// Document path, or `-` for stdin
        #[arg(default_value = "-")]
        path: PathBuf,
    },

    /// Check that every stored ID matches the artifacts
    Verify {
        /// Document path, or `-` for stdin
        #[arg(default_value = "-")]
        path: PathBuf,
    },

    /// Print the canonical token string of every Freight
    Canonical {
        /// Document path, or `-` for stdin
        #[arg(default_value = "-")]
        path: PathBuf,
    },

    /// Re-derive every ID and print the updated document
    Stamp {
        /// Document path, or `-` for stdin
        #[arg(default_value = "-")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    freight_core::telemetry::init_tracing(cli.log_format == LogFormat::Json, level);

    match cli.command {
        Commands::Id { path } => cmd_id(&path),
        Commands::Verify { path } => cmd_verify(&path),
        Commands::Canonical { path } => cmd_canonical(&path),
        Commands::Stamp { path } => cmd_stamp(&path),
    }
}

fn read_document(path: &Path) -> Result<FreightDocument> {
    let mut input = String::new();
    if path == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read Freight document from stdin")?;
    } else {
        input = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read Freight document {:?}", path))?;
    }
    FreightDocument::from_json_str(&input)
        .with_context(|| format!("Failed to parse Freight document {:?}", path))
}

fn display_name(freight: &Freight) -> &str {
    if freight.metadata.name.is_empty() {
        "<unnamed>"
    } else {
        &freight.metadata.name
    }
}

fn cmd_id(path: &Path) -> Result<()> {
    let doc = read_document(path)?;
    for freight in doc.freights() {
        let ambiguous = ambiguous_tokens(freight);
        if !ambiguous.is_empty() {
            freight_core::obs::emit_ambiguous_tokens(&freight.metadata.name, &ambiguous);
        }
        println!("{}  {}", freight.derive_id(), display_name(freight));
    }
    Ok(())
}

fn cmd_verify(path: &Path) -> Result<()> {
    let doc = read_document(path)?;
    let mut failures = 0usize;

    for freight in doc.freights() {
        let name = display_name(freight);
        let _span = FreightSpan::enter(name);
        match freight.verify_id() {
            Ok(id) => println!("ok       {}  {}", id, name),
            Err(FreightError::Unidentified) => {
                failures += 1;
                println!("missing  {}  {}", freight.derive_id(), name);
            }
            Err(FreightError::StaleId { stored, derived }) => {
                failures += 1;
                println!("stale    {}  {} (stored {})", derived, name, stored);
            }
            Err(FreightError::InvalidId(stored)) => {
                failures += 1;
                println!("invalid  {}  {} (stored {})", freight.derive_id(), name, stored);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if failures > 0 {
        bail!(
            "{} of {} Freight ID(s) missing, stale or invalid",
            failures,
            doc.freights().len()
        );
    }
    info!("All {} Freight ID(s) verified", doc.freights().len());
    Ok(())
}

fn cmd_canonical(path: &Path) -> Result<()> {
    let doc = read_document(path)?;
    for freight in doc.freights() {
        println!("{}", canonical_string(freight));
    }
    Ok(())
}

fn cmd_stamp(path: &Path) -> Result<()> {
    let mut doc = read_document(path)?;
    doc.stamp_ids();
    println!("{}", doc.to_json_pretty()?);
    Ok(())
}
