//! Cascade CLI
//!
//! Upload files through the provider fallback chain, delete them again by
//! provider tag, and inspect which providers a file name would be sent to.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use cascade_gateway::{Uploader, UploaderConfig};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Cascade: resilient media uploads with provider fallback.
#[derive(Parser, Debug)]
#[command(name = "cascade", version, about)]
struct Cli {
    /// Path of the TOML configuration file.
    #[arg(
        long,
        env = "CASCADE_CONFIG",
        default_value = "cascade.toml",
        global = true
    )]
    config: PathBuf,

    /// Signed storage access key, overriding the configuration file.
    #[arg(long, env = "CASCADE_R2_ACCESS_KEY", hide_env_values = true, global = true)]
    r2_access_key: Option<String>,

    /// Signed storage secret key, overriding the configuration file.
    #[arg(long, env = "CASCADE_R2_SECRET_KEY", hide_env_values = true, global = true)]
    r2_secret_key: Option<String>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a file, falling back across providers.
    Upload(commands::upload::UploadArgs),
    /// Delete an upload by its provider tag.
    Delete(commands::delete::DeleteArgs),
    /// Show the category and provider chain for a file name.
    Classify(commands::classify::ClassifyArgs),
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<UploaderConfig> {
        let mut config = UploaderConfig::load(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;

        if let (Some(access), Some(secret)) = (&self.r2_access_key, &self.r2_secret_key) {
            config.signed_storage = config
                .signed_storage
                .map(|storage| storage.with_credentials(access, secret));
        }
        Ok(config)
    }

    fn uploader(&self) -> anyhow::Result<Uploader> {
        Ok(Uploader::new(self.load_config()?)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Upload(args) => commands::upload::run(&cli.uploader()?, args, &cli.format).await,
        Command::Delete(args) => commands::delete::run(&cli.uploader()?, args, &cli.format).await,
        Command::Classify(args) => {
            let uploader = match cli.uploader() {
                Ok(uploader) => Some(uploader),
                Err(err) => {
                    debug!(error = %err, "no usable configuration, listing every provider");
                    None
                }
            };
            commands::classify::run(uploader.as_ref(), args, &cli.format)
        }
    }
}
