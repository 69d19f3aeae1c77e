use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use hcms_core::config::{StorageKind, TokenPlacement};
use hcms_core::route::Location;
use hcms_infrastructure::{ConfigOverrides, HcmsPaths};

mod app;
mod command;
mod helper;
mod host;
mod logging;
mod repl;

#[derive(Parser, Debug)]
#[command(name = "hcms")]
#[command(about = "HCMS - Hospital appointment portal in the terminal", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config.toml and HCMS_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Where the auth token travels: `query` or `header`
    #[arg(long)]
    token_placement: Option<TokenPlacement>,

    /// Per-request timeout in seconds; 0 disables it
    #[arg(long)]
    timeout: Option<u64>,

    /// Delay before a filter input is sent, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Session storage backend: `file` or `memory`
    #[arg(long)]
    storage: Option<StorageKind>,

    /// Directory holding config.toml, session.json and logs
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Page to open first, e.g. `/patientDashboard.html`
    #[arg(long, default_value = "/")]
    page: String,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            token_placement: self.token_placement,
            request_timeout_secs: self.timeout,
            filter_debounce_ms: self.debounce_ms,
            storage: self.storage,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = HcmsPaths::new(cli.config_dir.clone())?;
    paths.ensure_dirs()?;
    let _log_guard = logging::init(&paths.log_dir());

    let start = Location::parse(&cli.page)
        .ok_or_else(|| anyhow::anyhow!("Unknown page: {}", cli.page))?;

    let app::AppBootstrap { app_state } = app::bootstrap(&paths, &cli.overrides())?;
    repl::run(app_state, start).await
}
