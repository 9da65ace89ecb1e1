use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use libris_kernel::settings::Settings;

/// Library catalog and lending service
#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Cli {
    /// Directory holding base.toml and <env>.toml (defaults to LIBRIS_CONFIG_DIR or ./config)
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Print the effective configuration as JSON
    ShowConfig,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let settings = match &self.config_dir {
            Some(dir) => Settings::load_from(dir),
            None => Settings::load(),
        };
        settings.with_context(|| "failed to load libris settings")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    match cli.command {
        Command::Serve => {
            libris_telemetry::init(&settings.telemetry);
            tracing::info!(env = ?settings.environment, "libris serve");
            libris_app::run(settings).await
        }
        Command::ShowConfig => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
    }
}
