//! Storage initialization
//!
//! First-run setup: data directories plus a starter set of categories and
//! payment methods.

use tracing::debug;

use crate::error::PocketError;
use crate::models::{NewCategory, NewPaymentMethod, TransactionType};

use super::Storage;

const EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("Food", "🍔"),
    ("Transport", "🚌"),
    ("Housing", "🏠"),
    ("Utilities", "💡"),
    ("Entertainment", "🎬"),
    ("Clothing", "👕"),
    ("Health", "💊"),
    ("Education", "📚"),
    ("Travel", "✈️"),
];

const INCOME_CATEGORIES: &[(&str, &str)] = &[
    ("Salary", "💰"),
    ("Bonus", "🎁"),
    ("Allowance", "💵"),
    ("Gift", "🎀"),
];

const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("Card", "💳"),
    ("Cash", "💵"),
    ("Bank Transfer", "🏦"),
    ("Mobile Pay", "📱"),
];

/// Initialize storage for a fresh installation
///
/// Seeds defaults only into stores that are still empty, so running it twice
/// is harmless.
pub fn initialize_storage(storage: &Storage) -> Result<(), PocketError> {
    if let Some(paths) = storage.paths() {
        paths.ensure_directories()?;
    }

    if storage.categories.is_empty()? {
        seed_default_categories(storage)?;
    }

    if storage.payment_methods.is_empty()? {
        seed_default_payment_methods(storage)?;
    }

    storage.save_all()
}

/// Add the starter expense and income categories
pub fn seed_default_categories(storage: &Storage) -> Result<(), PocketError> {
    let expense = EXPENSE_CATEGORIES
        .iter()
        .map(|(name, icon)| (TransactionType::Expense, *name, *icon));
    let income = INCOME_CATEGORIES
        .iter()
        .map(|(name, icon)| (TransactionType::Income, *name, *icon));

    for (kind, name, icon) in expense.chain(income) {
        storage
            .categories
            .create(NewCategory::new(name, kind).with_icon(icon))?;
    }

    debug!(
        count = EXPENSE_CATEGORIES.len() + INCOME_CATEGORIES.len(),
        "seeded default categories"
    );
    Ok(())
}

/// Add the starter payment methods
pub fn seed_default_payment_methods(storage: &Storage) -> Result<(), PocketError> {
    for (name, icon) in PAYMENT_METHODS {
        storage
            .payment_methods
            .create(NewPaymentMethod::new(*name).with_icon(*icon))?;
    }

    debug!(count = PAYMENT_METHODS.len(), "seeded default payment methods");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketPaths;
    use tempfile::TempDir;

    #[test]
    fn test_seeds_defaults() {
        let storage = Storage::in_memory();
        initialize_storage(&storage).unwrap();

        let categories = storage.categories.get_all().unwrap();
        assert_eq!(categories.len(), 13);
        assert_eq!(categories[0].name, "Food");
        assert_eq!(categories[0].kind, TransactionType::Expense);
        assert_eq!(
            categories
                .iter()
                .filter(|c| c.kind == TransactionType::Income)
                .count(),
            4
        );

        let methods = storage.payment_methods.get_all().unwrap();
        let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Card", "Cash", "Bank Transfer", "Mobile Pay"]);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let storage = Storage::in_memory();
        initialize_storage(&storage).unwrap();
        initialize_storage(&storage).unwrap();

        assert_eq!(storage.categories.count().unwrap(), 13);
        assert_eq!(storage.payment_methods.count().unwrap(), 4);
    }

    #[test]
    fn test_initialize_writes_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        assert!(!storage.is_initialized());
        initialize_storage(&storage).unwrap();

        assert!(paths.categories_file().exists());
        assert!(paths.payment_methods_file().exists());
        assert!(paths.transactions_file().exists());
    }
}
