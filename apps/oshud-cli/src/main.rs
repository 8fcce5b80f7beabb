//! # oshud
//!
//! Entry point for the Oshud Kini payroll CLI. The actual setup is in
//! lib.rs so it can be tested.

use clap::Parser;
use oshud_cli::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    oshud_cli::run(Cli::parse()).await
}
