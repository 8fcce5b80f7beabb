//! # Oshud CLI Library
//!
//! Command-line front end for Oshud Kini payroll.
//!
//! ## Module Organization
//! ```text
//! oshud_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── AppConfig (TOML + OSHUD_* env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── AppContext, dispatch
//! │   ├── payroll.rs  ◄─── roster, adjust, process
//! │   ├── history.rs  ◄─── salary history CRUD
//! │   └── shop.rs     ◄─── sell quote, dashboard totals
//! ├── output.rs       ◄─── Tables, currency display, --json
//! └── error.rs        ◄─── ApiError for command failures
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use anyhow::Context;
use chrono::Local;
use oshud_store::SalaryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::AppContext;
use config::AppConfig;
use error::ApiError;

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (stderr, RUST_LOG or info,oshud=debug)           │
/// │  2. Load config: defaults → oshud.toml → OSHUD_* env                    │
/// │  3. Resolve the data file: --data → config → platform data dir          │
/// │  4. Open the salary store                                               │
/// │  5. Dispatch the subcommand                                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// With `--json`, a failure is also printed to stdout as an `ApiError`
/// object so scripts can read the error code.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing();

    let json = cli.json;
    match execute(cli).await {
        Ok(()) => Ok(()),
        Err(err) => {
            if json {
                let body = serde_json::to_string_pretty(&err)
                    .context("failed to encode error output")?;
                println!("{}", body);
            }
            Err(anyhow::Error::new(err))
        }
    }
}

async fn execute(cli: Cli) -> Result<(), ApiError> {
    let config = AppConfig::load(cli.config.clone())?;
    let data_path = config.resolve_data_path(cli.data);

    info!(path = %data_path.display(), "Using data file");
    let store = SalaryStore::open(data_path).await?;

    let ctx = AppContext {
        store,
        config,
        config_path: cli.config,
        today: Local::now().date_naive(),
    };

    commands::dispatch(&ctx, cli.command, cli.json).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=oshud=trace` - Show trace for oshud crates only
/// - Default: INFO, DEBUG for oshud crates
///
/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,oshud=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
