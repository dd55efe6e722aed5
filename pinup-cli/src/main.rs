//! PINUP CLI
//!
//! Pins a directory of assets to IPFS through Pinata, each followed by a
//! metadata document that points at it.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pinup_core::constants::{
    API_KEY_ENV, DEFAULT_ASSETS_DIR, DEFAULT_DESCRIPTION, DEFAULT_TIMEOUT_SECS, PINATA_API_URL,
    SECRET_KEY_ENV,
};
use pinup_core::types::PinResult;
use pinup_ipfs::{PinataClient, PinataConfig};
use pinup_uploader::{asset_name, AssetUploader, UploadReport, UploaderConfig};

/// PINUP - pin assets and their metadata to IPFS
#[derive(Parser)]
#[command(name = "pinup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    pinata: PinataArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Connection settings shared by every command.
#[derive(Args)]
struct PinataArgs {
    /// Pinata API key
    #[arg(long, env = API_KEY_ENV, default_value = "", hide_env_values = true, global = true)]
    api_key: String,

    /// Pinata API secret
    #[arg(long, env = SECRET_KEY_ENV, default_value = "", hide_env_values = true, global = true)]
    secret_key: String,

    /// Pinata API base URL
    #[arg(long, env = "PINATA_API_URL", default_value = PINATA_API_URL, global = true)]
    api_url: String,

    /// Request timeout in seconds (0 = none)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout: u64,
}

impl PinataArgs {
    fn config(&self) -> PinataConfig {
        PinataConfig::new(&self.api_key, &self.secret_key)
            .with_api_url(&self.api_url)
            .with_timeout(self.timeout)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Pin every file in a directory, then a metadata document for each
    Upload {
        /// Directory holding the assets (not searched recursively)
        #[arg(short, long, env = "PINUP_ASSETS_DIR", default_value = DEFAULT_ASSETS_DIR)]
        assets_dir: PathBuf,
        /// Description written into each metadata document
        #[arg(short, long, default_value = DEFAULT_DESCRIPTION)]
        description: String,
        /// Skip failed assets instead of aborting the batch
        #[arg(short, long)]
        keep_going: bool,
        /// Write a JSON report of pinned hashes to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pin a single file
    PinFile {
        /// File to pin
        path: PathBuf,
        /// Name to pin it under (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Pin a JSON document
    PinJson {
        /// File containing the JSON document
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed arguments
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pinup=debug,info"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = PinataClient::new(&cli.pinata.config()).context("Failed to create Pinata client")?;
    let cancel = cancel_on_ctrl_c();

    match cli.command {
        Commands::Upload {
            assets_dir,
            description,
            keep_going,
            output,
        } => {
            let mut config = UploaderConfig::new().description(description);
            if keep_going {
                config = config.keep_going();
            }
            cmd_upload(client, cancel, config, &assets_dir, output.as_deref()).await
        }
        Commands::PinFile { path, name } => cmd_pin_file(&client, &cancel, &path, name).await,
        Commands::PinJson { path } => cmd_pin_json(&client, &cancel, &path).await,
    }
}

/// Cancels the returned token on Ctrl+C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight request");
            trigger.cancel();
        }
    });

    cancel
}

/// Upload a directory of assets
async fn cmd_upload(
    client: PinataClient,
    cancel: CancellationToken,
    config: UploaderConfig,
    assets_dir: &Path,
    output: Option<&Path>,
) -> Result<()> {
    println!("{}", "📤 Uploading files to IPFS...".cyan().bold());
    println!("   {} {}", "Assets:".dimmed(), assets_dir.display());

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let bar = pb.clone();
    let uploader = AssetUploader::with_config(client, config)
        .with_cancellation(cancel)
        .on_progress(move |progress| {
            bar.set_length(progress.total as u64);
            match progress.result {
                Ok(record) => bar.println(format!(
                    "   {} Uploaded {} to IPFS: {}",
                    "✓".green(),
                    record.file,
                    record.metadata_hash
                )),
                Err(e) => bar.println(format!("   {} {}: {}", "✗".red(), progress.file, e)),
            }
            bar.set_position(progress.processed as u64);
        });

    let result = uploader.run(assets_dir).await;
    pb.finish_and_clear();
    let report = result.context("Upload aborted")?;

    if report.total() == 0 {
        println!("\n{}", "⚠️  No assets found.".yellow());
        return Ok(());
    }

    if let Some(path) = output {
        write_report(&report, path)?;
        println!("{} {}", "📋 Report saved to:".green(), path.display());
    }

    println!(
        "\n{} {} uploaded, {} failed",
        "📈 Results:".green().bold(),
        report.uploaded.len(),
        report.failed.len()
    );

    if !report.is_success() {
        bail!("{} of {} assets failed", report.failed.len(), report.total());
    }

    Ok(())
}

fn write_report(report: &UploadReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

/// Pin a single file
async fn cmd_pin_file(
    client: &PinataClient,
    cancel: &CancellationToken,
    path: &Path,
    name: Option<String>,
) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => asset_name(path)?,
    };
    println!("{} {}", "📤 Pinning file:".cyan().bold(), name);

    let mut file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let result = client
        .pin_file(cancel, &mut file, &name)
        .await
        .context("Failed to pin file")?;

    print_pin_result(&result);
    Ok(())
}

/// Pin a JSON document
async fn cmd_pin_json(client: &PinataClient, cancel: &CancellationToken, path: &Path) -> Result<()> {
    println!("{} {}", "📤 Pinning JSON:".cyan().bold(), path.display());

    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: serde_json::Value =
        serde_json::from_slice(&raw).context("Invalid JSON document")?;

    let result = client
        .pin_json(cancel, &document)
        .await
        .context("Failed to pin JSON")?;

    print_pin_result(&result);
    Ok(())
}

fn print_pin_result(result: &PinResult) {
    let pinned_at = result
        .parsed_timestamp()
        .map(|t| t.to_rfc2822())
        .unwrap_or_else(|| result.timestamp.clone());

    println!("\n{}", "✅ Pinned:".green().bold());
    println!("   {} {}", "CID:".yellow(), result.content_hash);
    println!("   {} {}", "URI:".dimmed(), result.ipfs_uri());
    println!("   {} {} bytes", "Size:".dimmed(), result.size_bytes);
    println!("   {} {}", "Pinned at:".dimmed(), pinned_at);
    if result.is_duplicate {
        println!("   {}", "(already pinned)".dimmed());
    }
}
