//! Report CLI commands
//!
//! Summaries over calendar periods and breakdowns over day ranges.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{
    format_category_breakdown, format_daily_table, format_month_calendar, format_monthly_table,
    format_payment_method_breakdown, format_period_summary, format_totals, Labels,
};
use crate::error::{PocketError, PocketResult};
use crate::export::{export_category_breakdown_csv, export_payment_method_breakdown_csv};
use crate::models::{DateRange, Period, TransactionType};
use crate::services::TransactionService;
use crate::storage::Storage;

use super::args::{parse_kind, parse_month, parse_year, resolve_range};

/// Options shared by both breakdown reports
#[derive(Args)]
pub struct BreakdownArgs {
    /// Month (YYYY-MM) or year (YYYY), defaults to the current month
    period: Option<String>,
    /// Start date (YYYY-MM-DD), overrides the period
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// End date (YYYY-MM-DD), overrides the period
    #[arg(long, requires = "from")]
    to: Option<String>,
    /// Only count one type (income or expense)
    #[arg(short = 't', long = "type")]
    kind: Option<String>,
    /// Count income and expense together, ignoring the configured default type
    #[arg(long, conflicts_with = "kind")]
    mixed: bool,
    /// Also write the breakdown to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl BreakdownArgs {
    fn range(&self) -> PocketResult<DateRange> {
        resolve_range(
            self.period.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
        )
    }

    fn kind(&self, settings: &Settings) -> PocketResult<Option<TransactionType>> {
        if self.mixed {
            return Ok(None);
        }
        match &self.kind {
            Some(kind) => parse_kind(kind).map(Some),
            None => Ok(settings.default_breakdown_type),
        }
    }
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expense and balance for one month
    Month {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
    },
    /// Yearly totals with a per-month table
    Year {
        /// Year (YYYY), defaults to the current year
        year: Option<String>,
    },
    /// One row per day with transactions
    Daily {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
    },
    /// Month calendar with each day's balance
    Calendar {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
    },
    /// Amounts per category, largest first
    Categories(BreakdownArgs),
    /// Amounts per payment method, largest first
    Payments(BreakdownArgs),
    /// All-time income, expense and balance
    Totals,
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> PocketResult<()> {
    let service = TransactionService::new(storage);
    let labels = Labels::load(storage, settings)?;

    match cmd {
        ReportCommands::Month { month } => {
            let (year, month) = parse_month(month.as_deref())?;
            let summary = service.monthly_summary(year, month)?;
            let title = format!("Summary for {:04}-{:02}", year, month);
            print!("{}", format_period_summary(&title, &summary, &labels));
        }

        ReportCommands::Year { year } => {
            let year = parse_year(year.as_deref())?;
            let summary = service.yearly_summary(year)?;
            let months = service.monthly_summaries(year)?;

            let title = format!("Summary for {:04}", year);
            print!("{}", format_period_summary(&title, &summary, &labels));
            println!();
            print!("{}", format_monthly_table(year, &months, &labels));
        }

        ReportCommands::Daily { month } => {
            let (year, month) = parse_month(month.as_deref())?;
            let days = service.daily_summaries(year, month)?;
            print!("{}", format_daily_table(&days, &labels));
        }

        ReportCommands::Calendar { month } => {
            let (year, month) = parse_month(month.as_deref())?;
            let days = service.daily_summaries(year, month)?;
            let calendar = format_month_calendar(year, month, &days).ok_or_else(|| {
                PocketError::Validation(format!("Invalid month {:04}-{:02}", year, month))
            })?;
            print!("{}", calendar);

            let summary = service.period_summary(Period::month(year, month).map_err(|e| {
                PocketError::Parse(e.to_string())
            })?)?;
            println!(
                "Income {}  Expense {}  Balance {}",
                labels.money(summary.total_income),
                labels.money(summary.total_expense),
                labels.balance(summary.balance)
            );
        }

        ReportCommands::Categories(args) => {
            let range = args.range()?;
            let kind = args.kind(settings)?;
            let rows = service.category_breakdown(range.start, range.end, kind)?;

            println!("{}", breakdown_title("Categories", &range, kind));
            print!("{}", format_category_breakdown(&rows, &labels));

            if let Some(path) = &args.csv {
                export_category_breakdown_csv(&rows, &labels, create_file(path)?)?;
                println!("Wrote {} row(s) to {}", rows.len(), path.display());
            }
        }

        ReportCommands::Payments(args) => {
            let range = args.range()?;
            let kind = args.kind(settings)?;
            let rows = service.payment_method_breakdown(range.start, range.end, kind)?;

            println!("{}", breakdown_title("Payment methods", &range, kind));
            print!("{}", format_payment_method_breakdown(&rows, &labels));

            if let Some(path) = &args.csv {
                export_payment_method_breakdown_csv(&rows, &labels, create_file(path)?)?;
                println!("Wrote {} row(s) to {}", rows.len(), path.display());
            }
        }

        ReportCommands::Totals => {
            print!(
                "{}",
                format_totals(
                    service.total_income()?,
                    service.total_expense()?,
                    service.balance()?,
                    &labels
                )
            );
        }
    }

    Ok(())
}

fn breakdown_title(subject: &str, range: &DateRange, kind: Option<TransactionType>) -> String {
    match kind {
        Some(kind) => format!("{} ({}) {}", subject, kind, range),
        None => format!("{} (income and expense) {}", subject, range),
    }
}

pub(crate) fn create_file(path: &Path) -> PocketResult<File> {
    File::create(path).map_err(|e| {
        PocketError::Export(format!("Cannot create {}: {}", path.display(), e))
    })
}
