//! Main module for the Meme Vault CLI application (mvault).
//!
//! This module provides the main function and auxiliary functionalities for
//! the CLI application. It handles command parsing, configuration loading,
//! and initialization, as well as invoking the appropriate functionalities
//! based on the provided command-line arguments.
//!
//! # Examples
//!
//! Building an index over a folder of memes:
//!
//! ```sh
//! cargo run -- index ~/Pictures/memes -o memes.json
//! mvault index ~/Pictures/memes -o memes.json
//! ```
//!
//! Searching that folder later, locally:
//!
//! ```sh
//! mvault search "confused guy looking at butterfly" -i memes.json -f ~/Pictures/memes
//! ```
//!
//! Initializing the application's configuration:
//!
//! ```sh
//! cargo run -- init
//! mvault init
//! ```

use clap::Parser;
use crossterm::{
    ExecutableCommand,
    style::{Attribute, Color, Print, SetAttribute, SetForegroundColor},
};
use indicatif::{ProgressBar, ProgressStyle};
use meme_vault::{
    api::EmbeddingClient,
    commands,
    config::{self, MemeVaultConfig},
    config_dir,
    files::enumerate_folder,
    indexer::{BuildPhase, IndexBuilder, export_index},
    search,
    session::SessionState,
};
use once_cell::sync::OnceCell;
use std::{error::Error, fs, io::stdout, path::Path};
use tracing::{debug, info};

static TRACING: OnceCell<()> = OnceCell::new();

fn main() -> Result<(), Box<dyn Error>> {
    TRACING.get_or_init(|| {
        tracing_subscriber::fmt::init();
    });
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run())
}

/// Main asynchronous function of the Meme Vault CLI application.
///
/// Parses command-line arguments, loads configuration where the command
/// needs it, and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if there is an issue loading the configuration, parsing
/// the command-line arguments, or executing the specified command.
async fn run() -> Result<(), Box<dyn Error>> {
    let cli = commands::Cli::parse();

    match cli.command {
        commands::Commands::Index { folder, output } => {
            let vault_config = load_vault_config()?;
            build_index(&vault_config, &folder, &output).await?;
        }
        commands::Commands::Search {
            query,
            index,
            folder,
        } => {
            let vault_config = load_vault_config()?;
            run_search(&vault_config, &query, &index, &folder).await?;
        }
        commands::Commands::Init => {
            debug!("Initializing configuration");
            init()?;
        }
    }

    Ok(())
}

fn load_vault_config() -> Result<MemeVaultConfig, Box<dyn Error>> {
    let config_path = config_dir()?.join("config.yaml");
    debug!("Loading config from: {}", config_path.display());

    let path = config_path
        .to_str()
        .ok_or("Config path is not valid UTF-8")?;
    let vault_config = config::load_config(path)?;
    debug!("Config loaded: {:?}", vault_config);

    Ok(vault_config)
}

/// Builds an index over `folder` and writes the exported artifact to `output`.
///
/// Progress is rendered as a progress bar; per-file failures are printed
/// after the run, which continues past them.
async fn build_index(
    vault_config: &MemeVaultConfig,
    folder: &Path,
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    let client = EmbeddingClient::new(vault_config)?;
    let candidates = enumerate_folder(folder)?;

    if candidates.is_empty() {
        println!("No files found under {}", folder.display());
        return Ok(());
    }

    println!("Found {} files. Starting processing...", candidates.len());

    let bar = ProgressBar::new(candidates.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} {msg}",
    )?);

    let mut builder = IndexBuilder::new(&client);
    let (index, report) = builder
        .build(&candidates, |phase| {
            if let BuildPhase::Processing { current, .. } = phase {
                bar.set_position(*current as u64);
            }
        })
        .await;
    bar.finish_and_clear();

    for failure in &report.failures {
        eprintln!("Could not process {}: {}", failure.path, failure.error);
    }

    fs::write(output, export_index(&index)?)?;
    info!("Index written to {}", output.display());

    println!(
        "Indexing complete! {} of {} files indexed ({} skipped, {} failed). Index saved to {}",
        report.indexed,
        report.examined,
        report.skipped,
        report.failures.len(),
        output.display()
    );

    Ok(())
}

/// Loads both session halves from disk and renders the ranked results of a
/// single query.
async fn run_search(
    vault_config: &MemeVaultConfig,
    query: &str,
    index_path: &Path,
    folder: &Path,
) -> Result<(), Box<dyn Error>> {
    let client = EmbeddingClient::new(vault_config)?;

    let mut session = SessionState::new();
    let artifact = fs::read(index_path)?;
    let record_count = session.load_index(&artifact)?;
    let file_count = session.load_folder(folder)?;
    info!("Session ready: {record_count} indexed memes, {file_count} local files");

    let results = search::search(&client, &session, query).await?;

    if results.is_empty() {
        println!("No matching memes found.");
        return Ok(());
    }

    println!("Found {} results.", results.len());

    let mut stdout = stdout();
    for result in &results {
        stdout.execute(SetForegroundColor(Color::Blue))?;
        stdout.execute(SetAttribute(Attribute::Bold))?;
        stdout.execute(Print(format!(
            "{:.3}  {}\n",
            result.similarity,
            result.handle.path().display()
        )))?;
        stdout.execute(SetAttribute(Attribute::Reset))?;
        stdout.execute(SetForegroundColor(Color::Reset))?;
        stdout.execute(Print(format!("       {}\n", result.description)))?;
    }

    Ok(())
}

/// Initializes the application's configuration.
///
/// Creates the configuration directory and writes a default config file in
/// YAML format.
///
/// # Errors
///
/// Returns an error if there is an issue creating the directory or file, or
/// serializing the configuration to YAML.
fn init() -> Result<(), Box<dyn Error>> {
    let config_dir = config_dir()?;
    info!("Creating config directory: {}", config_dir.display());
    fs::create_dir_all(&config_dir)?;

    let config_path = config_dir.join("config.yaml");
    info!("Creating config file: {}", config_path.display());
    let vault_config = MemeVaultConfig {
        api_base: "http://localhost:8000/memeselector".to_string(),
        api_key: "".to_string(),
    };
    let config_yaml = serde_yaml::to_string(&vault_config)?;
    fs::write(config_path, config_yaml)?;

    Ok(())
}
