//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_table;
use crate::error::{PocketError, PocketResult};
use crate::models::{CategoryPatch, NewCategory};
use crate::services::{CategoryService, TransactionService};
use crate::storage::Storage;

use super::args::parse_kind;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Transaction type the category is offered for (income or expense)
        #[arg(short = 't', long = "type")]
        kind: String,
        /// Icon shown before the name (usually an emoji)
        #[arg(short, long)]
        icon: Option<String>,
        /// Display color (e.g., "#FF6B6B")
        #[arg(long)]
        color: Option<String>,
    },
    /// List categories
    List {
        /// Only show categories of one type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },
    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New icon
        #[arg(short, long)]
        icon: Option<String>,
        /// Remove the icon
        #[arg(long, conflicts_with = "icon")]
        clear_icon: bool,
        /// New color
        #[arg(long)]
        color: Option<String>,
        /// Remove the color
        #[arg(long, conflicts_with = "color")]
        clear_color: bool,
    },
    /// Delete a category
    ///
    /// Transactions that use it are kept and shown under the fallback label.
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> PocketResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add {
            name,
            kind,
            icon,
            color,
        } => {
            let mut input = NewCategory::new(name.trim(), parse_kind(&kind)?);
            if let Some(icon) = icon {
                input = input.with_icon(icon);
            }
            if let Some(color) = color {
                input = input.with_color(color);
            }
            input
                .validate()
                .map_err(|e| PocketError::Validation(e.to_string()))?;

            if service.find(&input.name)?.is_some() {
                return Err(PocketError::Validation(format!(
                    "Category '{}' already exists",
                    input.name
                )));
            }

            let category = service.create(input)?;
            println!("Created category: {} ({})", category, category.kind);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { kind } => {
            let categories = match kind {
                Some(kind) => service.get_by_type(parse_kind(&kind)?)?,
                None => service.get_all()?,
            };
            print!("{}", format_category_table(&categories));
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
            icon,
            clear_icon,
            color,
            clear_color,
        } => {
            let existing = service
                .find(&category)?
                .ok_or_else(|| PocketError::category_not_found(&category))?;

            let mut patch = CategoryPatch::new();
            if let Some(name) = name {
                let name = name.trim();
                if let Some(other) = service.find(name)? {
                    if other.id != existing.id {
                        return Err(PocketError::Validation(format!(
                            "Category '{}' already exists",
                            name
                        )));
                    }
                }
                patch = patch.name(name);
            }
            if let Some(kind) = kind {
                patch = patch.kind(parse_kind(&kind)?);
            }
            if clear_icon {
                patch = patch.icon(None);
            } else if icon.is_some() {
                patch = patch.icon(icon);
            }
            if clear_color {
                patch = patch.color(None);
            } else if color.is_some() {
                patch = patch.color(color);
            }
            if patch == CategoryPatch::default() {
                return Err(PocketError::Validation(
                    "Nothing to change. Pass at least one field to edit".into(),
                ));
            }
            patch
                .validate()
                .map_err(|e| PocketError::Validation(e.to_string()))?;

            let updated = service
                .update(&existing.id, patch)?
                .ok_or_else(|| PocketError::category_not_found(&category))?;
            println!("Updated category: {} ({})", updated, updated.kind);
        }

        CategoryCommands::Delete { category } => {
            let existing = service
                .find(&category)?
                .ok_or_else(|| PocketError::category_not_found(&category))?;

            let in_use = TransactionService::new(storage)
                .get_by_category_id(&existing.id)?
                .len();

            service.delete(&existing.id)?;
            println!("Deleted category: {}", existing.name);
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
