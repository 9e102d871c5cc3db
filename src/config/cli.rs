use crate::config::{StationConfig, StoreBackend};
use crate::utils::logger::LogFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "station-forecast")]
#[command(about = "Predicts station weather and writes an irrigation recommendation")]
pub struct CliArgs {
    /// Path to the station TOML configuration file
    #[arg(short, long, default_value = "config/aws_02.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Compute and print the forecast without writing it back
    #[arg(long)]
    pub dry_run: bool,

    /// Read and write a local directory mirror instead of the remote database
    #[arg(long)]
    pub store_root: Option<String>,
}

impl CliArgs {
    /// Applies command line overrides on top of the loaded file.
    pub fn apply_overrides(&self, config: &mut StationConfig) {
        if let Some(root) = &self.store_root {
            config.store.backend = StoreBackend::File;
            config.store.root = Some(root.clone());
            tracing::info!("🔧 Store overridden to local directory: {}", root);
        }
    }
}
