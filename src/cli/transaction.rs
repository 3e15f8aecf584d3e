//! Transaction CLI commands
//!
//! Implements CLI commands for recording and browsing transactions.

use clap::Subcommand;
use tracing::warn;

use crate::config::Settings;
use crate::display::{
    format_day_detail, format_transaction_details, format_transaction_table, Labels,
};
use crate::error::{PocketError, PocketResult};
use crate::models::{NewTransaction, TransactionId, TransactionPatch};
use crate::services::{
    CategoryService, PaymentMethodService, TransactionFilter, TransactionService,
};
use crate::storage::Storage;

use super::args::{parse_amount, parse_datetime, parse_day, parse_kind, resolve_range};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new income or expense
    Add {
        /// Transaction type (income or expense)
        kind: String,
        /// Amount in whole currency units (e.g., "12000" or "12,000")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Payment method name or ID
        #[arg(short, long)]
        payment: String,
        /// Date (YYYY-MM-DD or "YYYY-MM-DD HH:MM"), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Memo
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Filter by category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by payment method name or ID
        #[arg(short, long)]
        payment: Option<String>,
        /// Restrict to a month (YYYY-MM) or year (YYYY)
        #[arg(long)]
        period: Option<String>,
        /// Start date (YYYY-MM-DD), requires --to
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), requires --from
        #[arg(long)]
        to: Option<String>,
        /// Exact calendar day (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New payment method name or ID
        #[arg(short, long)]
        payment: Option<String>,
        /// New memo
        #[arg(short, long)]
        memo: Option<String>,
        /// Remove the memo
        #[arg(long, conflicts_with = "memo")]
        clear_memo: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Show every transaction of one day with its totals
    Day {
        /// Day (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PocketResult<()> {
    let service = TransactionService::new(storage);
    let category_service = CategoryService::new(storage);
    let method_service = PaymentMethodService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            payment,
            date,
            memo,
        } => {
            let kind = parse_kind(&kind)?;
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(date) => parse_datetime(&date)?,
                None => chrono::Local::now().naive_local(),
            };

            let category = category_service
                .find(&category)?
                .ok_or_else(|| PocketError::category_not_found(&category))?;
            if category.kind != kind {
                warn!(
                    category = %category.name,
                    "Category type {} does not match transaction type {}",
                    category.kind,
                    kind
                );
            }

            let method = method_service
                .find(&payment)?
                .ok_or_else(|| PocketError::payment_method_not_found(&payment))?;

            let mut input = NewTransaction::new(kind, amount, date, category.id, method.id);
            if let Some(memo) = memo.filter(|m| !m.trim().is_empty()) {
                input = input.with_memo(memo);
            }
            input
                .validate()
                .map_err(|e| PocketError::Validation(e.to_string()))?;

            let txn = service.create(input)?;
            let labels = Labels::load(storage, settings)?;

            println!("Recorded transaction:");
            print!("{}", format_transaction_details(&txn, &labels));
        }

        TransactionCommands::List {
            kind,
            category,
            payment,
            period,
            from,
            to,
            date,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);

            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(name) = &category {
                let category = category_service
                    .find(name)?
                    .ok_or_else(|| PocketError::category_not_found(name))?;
                filter = filter.category(category.id);
            }
            if let Some(name) = &payment {
                let method = method_service
                    .find(name)?
                    .ok_or_else(|| PocketError::payment_method_not_found(name))?;
                filter = filter.payment_method(method.id);
            }
            if period.is_some() || from.is_some() || to.is_some() {
                filter = filter.range(resolve_range(
                    period.as_deref(),
                    from.as_deref(),
                    to.as_deref(),
                )?);
            }
            if let Some(date) = date {
                filter = filter.date(parse_day(&date)?);
            }

            let transactions = service.list(&filter)?;
            let labels = Labels::load(storage, settings)?;
            print!("{}", format_transaction_table(&transactions, &labels));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .get_by_id(&TransactionId::from(id.clone()))?
                .ok_or_else(|| PocketError::transaction_not_found(&id))?;
            let labels = Labels::load(storage, settings)?;
            print!("{}", format_transaction_details(&txn, &labels));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            date,
            category,
            payment,
            memo,
            clear_memo,
        } => {
            let mut patch = TransactionPatch::new();

            if let Some(kind) = kind {
                patch = patch.kind(parse_kind(&kind)?);
            }
            if let Some(amount) = amount {
                patch = patch.amount(parse_amount(&amount)?);
            }
            if let Some(date) = date {
                patch = patch.date(parse_datetime(&date)?);
            }
            if let Some(name) = &category {
                let category = category_service
                    .find(name)?
                    .ok_or_else(|| PocketError::category_not_found(name))?;
                patch = patch.category(category.id);
            }
            if let Some(name) = &payment {
                let method = method_service
                    .find(name)?
                    .ok_or_else(|| PocketError::payment_method_not_found(name))?;
                patch = patch.payment_method(method.id);
            }
            if clear_memo {
                patch = patch.memo(None);
            } else if let Some(memo) = memo {
                patch = patch.memo(Some(memo).filter(|m| !m.trim().is_empty()));
            }

            if patch.is_empty() {
                return Err(PocketError::Validation(
                    "Nothing to change. Pass at least one field to edit".into(),
                ));
            }
            patch
                .validate()
                .map_err(|e| PocketError::Validation(e.to_string()))?;

            let txn = service
                .update(&TransactionId::from(id.clone()), patch)?
                .ok_or_else(|| PocketError::transaction_not_found(&id))?;
            let labels = Labels::load(storage, settings)?;

            println!("Updated transaction:");
            print!("{}", format_transaction_details(&txn, &labels));
        }

        TransactionCommands::Delete { id } => {
            if !service.delete(&TransactionId::from(id.clone()))? {
                return Err(PocketError::transaction_not_found(&id));
            }
            println!("Deleted transaction {}", id);
        }

        TransactionCommands::Day { date } => {
            let date = match date {
                Some(date) => parse_day(&date)?,
                None => chrono::Local::now().date_naive(),
            };
            let detail = service.day_detail(date)?;
            let labels = Labels::load(storage, settings)?;
            print!("{}", format_day_detail(&detail, &labels));
        }
    }

    Ok(())
}
