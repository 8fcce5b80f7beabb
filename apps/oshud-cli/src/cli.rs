//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use oshud_core::sale::CatalogProduct;
use oshud_core::AdjustmentKind;

#[derive(Debug, Parser)]
#[command(name = "oshud")]
#[command(about = "Oshud Kini payroll: roster, adjustments, runs and salary history")]
#[command(version)]
#[command(
    after_help = "Environment:\n  RUST_LOG                                Log filter (default: info,oshud=debug)\n  OSHUD_DATA_PATH                         Data file override\n  OSHUD_CURRENCY_SYMBOL                   Currency symbol for output\n  OSHUD_REJECT_NON_POSITIVE_ADJUSTMENTS   Reject zero/negative adjustments"
)]
pub struct Cli {
    /// Payroll data file.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current roster with monthly amounts and run totals.
    Roster {
        #[command(subcommand)]
        command: Option<RosterCommand>,
    },

    /// Add a bonus or deduction to one employee.
    Adjust {
        employee_id: String,
        #[arg(value_enum)]
        kind: AdjustmentArg,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Commit the current roster as a payroll run.
    Process {
        /// Period as YYYY-MM (defaults to the current month).
        #[arg(long)]
        month: Option<String>,
        /// Show the payload without recording anything.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Salary history records.
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Price a sale and print the create-sale request. Nothing is stored.
    Sell(SellArgs),

    /// Stock, sales and expense totals from exported JSON lists.
    Dashboard {
        #[arg(long)]
        products: Option<PathBuf>,
        #[arg(long)]
        sales: Option<PathBuf>,
        #[arg(long)]
        expenses: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML.
    Config {
        /// Also write it to --config (or the platform config file).
        #[arg(long, default_value_t = false)]
        save: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum RosterCommand {
    /// Show the roster (the default).
    Show,
    /// Replace the roster with the employees in a JSON array file.
    Import { file: PathBuf },
    /// Reset every bonus and deduction to zero.
    ClearAdjustments,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    List,
    Show {
        id: u32,
    },
    Add(RecordArgs),
    Edit {
        id: u32,
        #[command(flatten)]
        record: RecordArgs,
    },
    Delete {
        id: u32,
    },
}

/// Salary record fields, taken as typed and validated later.
#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    #[arg(long)]
    pub month: String,
    #[arg(long, allow_hyphen_values = true)]
    pub total: String,
    #[arg(long, allow_hyphen_values = true)]
    pub count: String,
    /// Processed date as YYYY-MM-DD (defaults to today).
    #[arg(long)]
    pub date: Option<String>,
}

/// `oshud sell` arguments.
#[derive(Debug, Clone, Args)]
pub struct SellArgs {
    #[arg(long, default_value = "")]
    pub customer: String,

    /// Cart line as ID:NAME:PRICE[:QTY]; repeat for more lines.
    #[arg(long = "item", value_parser = parse_sale_item)]
    pub items: Vec<SaleItemArg>,

    /// Charged price override as ID=PRICE.
    #[arg(long = "price", value_parser = parse_price_override)]
    pub prices: Vec<PriceOverride>,

    /// Drop a product's line again before checkout.
    #[arg(long = "remove")]
    pub removed: Vec<String>,

    #[arg(long, default_value_t = 0.0)]
    pub discount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleItemArg {
    pub product: CatalogProduct,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceOverride {
    pub product_id: String,
    pub price: f64,
}

fn parse_sale_item(raw: &str) -> Result<SaleItemArg, String> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    let (id, name, price, quantity) = match parts.as_slice() {
        [id, name, price] => (*id, *name, *price, "1"),
        [id, name, price, quantity] => (*id, *name, *price, *quantity),
        _ => return Err(format!("expected ID:NAME:PRICE[:QTY], got '{}'", raw)),
    };

    if id.is_empty() {
        return Err("product id is empty".to_string());
    }
    let price: f64 = price
        .parse()
        .map_err(|_| format!("invalid price '{}'", price))?;
    let quantity: i64 = quantity
        .parse()
        .map_err(|_| format!("invalid quantity '{}'", quantity))?;

    Ok(SaleItemArg {
        product: CatalogProduct {
            id: id.to_string(),
            name: name.to_string(),
            price,
        },
        quantity,
    })
}

fn parse_price_override(raw: &str) -> Result<PriceOverride, String> {
    let (id, price) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=PRICE, got '{}'", raw))?;
    let price = price.trim();

    Ok(PriceOverride {
        product_id: id.trim().to_string(),
        price: price
            .parse()
            .map_err(|_| format!("invalid price '{}'", price))?,
    })
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AdjustmentArg {
    Bonus,
    Deduction,
}

impl From<AdjustmentArg> for AdjustmentKind {
    fn from(arg: AdjustmentArg) -> Self {
        match arg {
            AdjustmentArg::Bonus => AdjustmentKind::Bonus,
            AdjustmentArg::Deduction => AdjustmentKind::Deduction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_adjust_with_negative_amount() {
        let cli = Cli::try_parse_from(["oshud", "adjust", "e1", "bonus", "-5"]).unwrap();
        match cli.command {
            Commands::Adjust { employee_id, kind, amount } => {
                assert_eq!(employee_id, "e1");
                assert!(matches!(kind, AdjustmentArg::Bonus));
                assert_eq!(amount, -5.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_history_edit_with_global_flags() {
        let cli = Cli::try_parse_from([
            "oshud", "history", "edit", "3", "--month", "October 2023", "--total", "45000",
            "--count", "3", "--json", "--data", "pay.json",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.data, Some(PathBuf::from("pay.json")));
        match cli.command {
            Commands::History {
                command: HistoryCommand::Edit { id, record },
            } => {
                assert_eq!(id, 3);
                assert_eq!(record.total, "45000");
                assert!(record.date.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_sell_lines() {
        let cli = Cli::try_parse_from([
            "oshud", "sell", "--customer", "Karim", "--item", "p1:Napa:2.5:4", "--item",
            "p2:Seclo:8", "--price", "p2=7", "--discount", "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Sell(args) => {
                assert_eq!(args.items.len(), 2);
                assert_eq!(args.items[0].product.price, 2.5);
                assert_eq!(args.items[0].quantity, 4);
                assert_eq!(args.items[1].quantity, 1);
                assert_eq!(args.prices[0].product_id, "p2");
                assert_eq!(args.prices[0].price, 7.0);
                assert_eq!(args.discount, 3.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_sell_item_rejected() {
        assert!(parse_sale_item("p1:Napa").is_err());
        assert!(parse_sale_item("p1:Napa:cheap").is_err());
        assert!(parse_sale_item(":Napa:5").is_err());
        assert!(parse_price_override("p1:5").is_err());
    }

    #[test]
    fn test_roster_defaults_to_show() {
        let cli = Cli::try_parse_from(["oshud", "roster"]).unwrap();
        assert!(matches!(cli.command, Commands::Roster { command: None }));

        let cli = Cli::try_parse_from(["oshud", "roster", "import", "staff.json"]).unwrap();
        match cli.command {
            Commands::Roster {
                command: Some(RosterCommand::Import { file }),
            } => assert_eq!(file, PathBuf::from("staff.json")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_adjustment_kind_rejected() {
        assert!(Cli::try_parse_from(["oshud", "adjust", "e1", "fine", "5"]).is_err());
    }
}
