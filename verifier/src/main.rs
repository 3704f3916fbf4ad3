//! Operator CLI for credential records. Secrets are taken as arguments and
//! never echoed; only records, match results and login outcomes are printed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use credential_verifier::config::resolve_config;
use credential_verifier::credentials::{enroll, verify_stored};
use credential_verifier::{login, logging, signup, JsonFileStore};

#[derive(Debug, Parser)]
#[command(name = "credential-verifier")]
#[command(about = "Enroll and verify salted Argon2id credential records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file (overrides $VERIFIER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a new credential record as JSON
    Enroll { identifier: String, secret: String },
    /// Check a secret against a stored `salt_hex:key_hex` value
    Verify { stored: String, secret: String },
    /// Enroll into the configured credential store
    Signup { identifier: String, secret: String },
    /// Check a secret against the configured credential store
    Login { identifier: String, secret: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref()).context("loading configuration")?;
    logging::init(&config.debug_level);

    match cli.command {
        Command::Enroll { identifier, secret } => {
            let record = enroll(&identifier, &secret)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Verify { stored, secret } => {
            let matches = verify_stored(&stored, &secret)?;
            println!("{}", if matches { "match" } else { "no-match" });
        }
        Command::Signup { identifier, secret } => {
            let mut store = JsonFileStore::open(&config.store_path)
                .with_context(|| format!("opening store {}", config.store_path.display()))?;
            signup(&mut store, &identifier, &secret)?;
            println!("signup complete for {identifier}");
        }
        Command::Login { identifier, secret } => {
            let store = JsonFileStore::open(&config.store_path)
                .with_context(|| format!("opening store {}", config.store_path.display()))?;
            let outcome = login(&store, &identifier, &secret)?;
            println!("{}", outcome.message());
        }
    }

    Ok(())
}
