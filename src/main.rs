use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cloudpocket::cli::{
    handle_audit_command, handle_category_command, handle_config_command, handle_export_command,
    handle_payment_command, handle_report_command, handle_transaction_command, CategoryCommands,
    ConfigCommands, ExportCommands, PaymentCommands, ReportCommands, TransactionCommands,
};
use cloudpocket::config::{PocketPaths, Settings};
use cloudpocket::storage::{initialize_storage, Storage};

/// Environment variable holding the tracing filter, e.g. `POCKET_LOG=debug`
const LOG_ENV: &str = "POCKET_LOG";

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "Personal income and expense tracker",
    long_about = "CloudPocket records income and expenses with categories and payment \
                  methods, and summarizes them by day, month and year with per-category \
                  and per-payment-method breakdowns."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Tx(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Payment method management commands
    #[command(subcommand, alias = "payments")]
    Payment(PaymentCommands),

    /// Summaries and breakdowns
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to CSV or JSON
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent entries of the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory with default categories and payment methods
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = PocketPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all()?;

    let uses_data = !matches!(
        cli.command,
        None | Some(Commands::Init) | Some(Commands::Config { .. })
    );
    if uses_data && !storage.is_initialized() {
        info!("first run, seeding defaults");
        setup(&storage, &paths, &mut settings)?;
    }

    match cli.command {
        Some(Commands::Tx(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Payment(cmd)) => handle_payment_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &settings, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing CloudPocket at: {}", paths.base_dir().display());
            setup(&storage, &paths, &mut settings)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories and payment methods are ready:");
            println!("  - Expense: Food, Transport, Housing, Utilities, Entertainment, ...");
            println!("  - Income:  Salary, Bonus, Allowance, Gift");
            println!("  - Payment: Card, Cash, Bank Transfer, Mobile Pay");
            println!();
            println!("Run 'pocket tx add expense 12000 -c Food -p Card' to record a transaction.");
        }
        Some(Commands::Config { action }) => {
            handle_config_command(&paths, &mut settings, action)?;
        }
        None => {
            println!("CloudPocket - personal income and expense tracker");
            println!();
            println!("Run 'pocket --help' for usage information.");
            println!("Run 'pocket init' to set up default categories.");
        }
    }

    Ok(())
}

fn setup(storage: &Storage, paths: &PocketPaths, settings: &mut Settings) -> Result<()> {
    initialize_storage(storage)?;
    settings.setup_completed = true;
    settings.save(paths)?;
    Ok(())
}
