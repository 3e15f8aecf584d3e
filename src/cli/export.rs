//! Export CLI commands

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::Labels;
use crate::error::PocketResult;
use crate::export::{export_full_json, export_transactions_csv, FullExport};
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::args::parse_period;
use super::report::create_file;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Write transactions to a CSV file, oldest first
    Transactions {
        /// Output file path
        output: PathBuf,
        /// Only export one month (YYYY-MM) or year (YYYY)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Write every transaction, category and payment method to one JSON file
    Json {
        /// Output file path
        output: PathBuf,
        /// Write a single line instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },
}

/// Handle an export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> PocketResult<()> {
    match cmd {
        ExportCommands::Transactions { output, period } => {
            let mut filter = TransactionFilter::new();
            if let Some(period) = period {
                filter = filter.range(parse_period(Some(&period))?.date_range());
            }

            let mut transactions = TransactionService::new(storage).get_all()?;
            transactions.retain(|t| filter.matches(t));
            transactions.sort_by_key(|t| t.date);

            let labels = Labels::load(storage, settings)?;
            export_transactions_csv(
                &transactions,
                &labels,
                BufWriter::new(create_file(&output)?),
            )?;

            println!(
                "Exported {} transaction(s) to {}",
                transactions.len(),
                output.display()
            );
        }

        ExportCommands::Json { output, compact } => {
            let export = FullExport::from_storage(storage)?;
            let mut writer = BufWriter::new(create_file(&output)?);
            export_full_json(&export, &mut writer, !compact)?;
            writer.flush()?;

            println!("Exported to {}", output.display());
            println!("  Transactions:    {}", export.metadata.transaction_count);
            println!("  Categories:      {}", export.metadata.category_count);
            println!("  Payment methods: {}", export.metadata.payment_method_count);

            let dangling = export.dangling_references();
            if !dangling.is_empty() {
                println!();
                println!("Warnings:");
                for problem in dangling {
                    println!("  - {}", problem);
                }
            }
        }
    }

    Ok(())
}
