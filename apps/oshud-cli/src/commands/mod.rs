//! # Commands
//!
//! Each subcommand is an async function taking the [`AppContext`] and
//! returning a serializable result or an [`ApiError`].
//!
//! ```text
//! Cli ──► dispatch() ──► payroll::{show_roster, import_roster, clear_adjustments,
//!                   │              adjust, process}
//!                   ├──► history::{list, show, add, edit, delete}
//!                   └──► shop::{sell, dashboard}
//! ```

pub mod history;
pub mod payroll;
pub mod shop;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use oshud_store::SalaryStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cli::{Commands, HistoryCommand, RosterCommand};
use crate::config::AppConfig;
use crate::error::{ApiError, ErrorCode};
use crate::output::{emit, Render};

/// Everything a command needs.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub store: SalaryStore,
    pub config: AppConfig,
    /// `--config`, if given; where `config --save` writes.
    pub config_path: Option<PathBuf>,
    /// Date used for default months and processed dates.
    pub today: NaiveDate,
}

impl AppContext {
    pub fn currency_symbol(&self) -> &str {
        &self.config.display.currency_symbol
    }
}

/// Runs one subcommand and prints its result.
pub async fn dispatch(ctx: &AppContext, command: Commands, json: bool) -> Result<(), ApiError> {
    let symbol = ctx.currency_symbol();

    match command {
        Commands::Roster { command } => match command {
            None | Some(RosterCommand::Show) => {
                emit(&payroll::show_roster(ctx).await, json, symbol)
            }
            Some(RosterCommand::Import { file }) => {
                emit(&payroll::import_roster(ctx, &file).await?, json, symbol)
            }
            Some(RosterCommand::ClearAdjustments) => {
                emit(&payroll::clear_adjustments(ctx).await?, json, symbol)
            }
        },
        Commands::Adjust {
            employee_id,
            kind,
            amount,
        } => emit(
            &payroll::adjust(ctx, &employee_id, kind.into(), amount).await?,
            json,
            symbol,
        ),
        Commands::Process { month, dry_run } => emit(
            &payroll::process(ctx, month.as_deref(), dry_run).await?,
            json,
            symbol,
        ),
        Commands::History { command } => match command {
            HistoryCommand::List => emit(&history::list(ctx).await, json, symbol),
            HistoryCommand::Show { id } => emit(&history::show(ctx, id).await?, json, symbol),
            HistoryCommand::Add(record) => emit(&history::add(ctx, record).await?, json, symbol),
            HistoryCommand::Edit { id, record } => {
                emit(&history::edit(ctx, id, record).await?, json, symbol)
            }
            HistoryCommand::Delete { id } => emit(&history::delete(ctx, id).await?, json, symbol),
        },
        Commands::Sell(args) => emit(&shop::sell(&args)?, json, symbol),
        Commands::Dashboard {
            products,
            sales,
            expenses,
        } => emit(
            &shop::dashboard(products.as_deref(), sales.as_deref(), expenses.as_deref()).await?,
            json,
            symbol,
        ),
        Commands::Config { save: false } => emit(&ConfigView(ctx.config.clone()), json, symbol),
        Commands::Config { save: true } => {
            let path = ctx.config.save(ctx.config_path.clone())?;
            emit(&ConfigSaved { path }, json, symbol)
        }
    }
}

/// Reads a file holding a JSON array. No path means an empty list.
pub(crate) async fn read_json_list<T>(path: Option<&Path>) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
{
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        ApiError::new(
            ErrorCode::StorageError,
            format!("Failed to read {}: {}", path.display(), e),
        )
    })?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::validation(format!("Invalid JSON list in {}: {}", path.display(), e)))
}

/// `oshud config` output.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigView(pub AppConfig);

impl Render for ConfigView {
    fn render(&self, _currency_symbol: &str) -> String {
        self.0
            .to_toml()
            .unwrap_or_else(|e| format!("# failed to render config: {}", e))
    }
}

/// `oshud config --save` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSaved {
    pub path: PathBuf,
}

impl Render for ConfigSaved {
    fn render(&self, _currency_symbol: &str) -> String {
        format!("Config written to {}", self.path.display())
    }
}
