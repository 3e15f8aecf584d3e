//! Payment method CLI commands

use clap::Subcommand;

use crate::display::format_payment_method_table;
use crate::error::{PocketError, PocketResult};
use crate::models::{NewPaymentMethod, PaymentMethodPatch};
use crate::services::{PaymentMethodService, TransactionService};
use crate::storage::Storage;

/// Payment method subcommands
#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Create a new payment method
    Add {
        /// Payment method name
        name: String,
        /// Icon shown before the name (usually an emoji)
        #[arg(short, long)]
        icon: Option<String>,
    },
    /// List payment methods
    List,
    /// Edit a payment method
    Edit {
        /// Payment method name or ID
        method: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New icon
        #[arg(short, long)]
        icon: Option<String>,
        /// Remove the icon
        #[arg(long, conflicts_with = "icon")]
        clear_icon: bool,
    },
    /// Delete a payment method
    Delete {
        /// Payment method name or ID
        method: String,
    },
}

/// Handle a payment method command
pub fn handle_payment_command(storage: &Storage, cmd: PaymentCommands) -> PocketResult<()> {
    let service = PaymentMethodService::new(storage);

    match cmd {
        PaymentCommands::Add { name, icon } => {
            let mut input = NewPaymentMethod::new(name.trim());
            if let Some(icon) = icon {
                input = input.with_icon(icon);
            }
            input
                .validate()
                .map_err(|e| PocketError::Validation(e.to_string()))?;

            if service.find(&input.name)?.is_some() {
                return Err(PocketError::Validation(format!(
                    "Payment method '{}' already exists",
                    input.name
                )));
            }

            let method = service.create(input)?;
            println!("Created payment method: {}", method);
            println!("  ID: {}", method.id);
        }

        PaymentCommands::List => {
            print!("{}", format_payment_method_table(&service.get_all()?));
        }

        PaymentCommands::Edit {
            method,
            name,
            icon,
            clear_icon,
        } => {
            let existing = service
                .find(&method)?
                .ok_or_else(|| PocketError::payment_method_not_found(&method))?;

            let mut patch = PaymentMethodPatch::new();
            if let Some(name) = name {
                let name = name.trim();
                if let Some(other) = service.find(name)? {
                    if other.id != existing.id {
                        return Err(PocketError::Validation(format!(
                            "Payment method '{}' already exists",
                            name
                        )));
                    }
                }
                patch = patch.name(name);
            }
            if clear_icon {
                patch = patch.icon(None);
            } else if icon.is_some() {
                patch = patch.icon(icon);
            }

            if patch == PaymentMethodPatch::default() {
                return Err(PocketError::Validation(
                    "Nothing to change. Pass at least one field to edit".into(),
                ));
            }
            patch
                .validate()
                .map_err(|e| PocketError::Validation(e.to_string()))?;

            let updated = service
                .update(&existing.id, patch)?
                .ok_or_else(|| PocketError::payment_method_not_found(&method))?;
            println!("Updated payment method: {}", updated);
        }

        PaymentCommands::Delete { method } => {
            let existing = service
                .find(&method)?
                .ok_or_else(|| PocketError::payment_method_not_found(&method))?;

            let in_use = TransactionService::new(storage)
                .get_by_payment_method_id(&existing.id)?
                .len();

            service.delete(&existing.id)?;
            println!("Deleted payment method: {}", existing.name);
            if in_use > 0 {
                println!(
                    "  {} transaction(s) still reference it and will be listed under the fallback label",
                    in_use
                );
            }
        }
    }

    Ok(())
}
