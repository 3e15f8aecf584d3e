//! Display formatting for terminal output
//!
//! Turns models and summaries into tables and text blocks. Nothing here reads
//! storage except `Labels::load`, which snapshots names once per command.

pub mod calendar;
pub mod category;
pub mod report;
pub mod transaction;

pub use calendar::format_month_calendar;
pub use category::{format_category_table, format_payment_method_table};
pub use report::{
    format_category_breakdown, format_daily_table, format_monthly_table,
    format_payment_method_breakdown, format_period_summary, format_totals,
};
pub use transaction::{format_day_detail, format_transaction_details, format_transaction_table};

use std::collections::HashMap;

use crate::config::Settings;
use crate::error::PocketResult;
use crate::models::{
    Category, CategoryId, Money, PaymentMethod, PaymentMethodId, TransactionType,
};
use crate::storage::Storage;

/// Whole-number percentage, e.g. `70%`
pub fn format_percent(percentage: i64) -> String {
    format!("{}%", percentage)
}

/// Name and money rendering shared by every view
///
/// Unknown category or payment method ids render as that kind's fallback
/// label (deleted entities, or ids typed in by hand).
pub struct Labels {
    categories: HashMap<CategoryId, Category>,
    payment_methods: HashMap<PaymentMethodId, PaymentMethod>,
    category_fallback: String,
    payment_method_fallback: String,
    currency: String,
}

impl Labels {
    pub fn new(
        categories: Vec<Category>,
        payment_methods: Vec<PaymentMethod>,
        settings: &Settings,
    ) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
            payment_methods: payment_methods
                .into_iter()
                .map(|m| (m.id.clone(), m))
                .collect(),
            category_fallback: settings.category_fallback_label.clone(),
            payment_method_fallback: settings.payment_method_fallback_label.clone(),
            currency: settings.currency_suffix.clone(),
        }
    }

    /// Snapshot current names from storage
    pub fn load(storage: &Storage, settings: &Settings) -> PocketResult<Self> {
        Ok(Self::new(
            storage.categories.get_all()?,
            storage.payment_methods.get_all()?,
            settings,
        ))
    }

    /// Icon and name, or the category fallback label
    pub fn category(&self, id: &CategoryId) -> String {
        self.categories
            .get(id)
            .map(|c| c.to_string())
            .unwrap_or_else(|| self.category_fallback.clone())
    }

    /// Icon and name, or the payment method fallback label
    pub fn payment_method(&self, id: &PaymentMethodId) -> String {
        self.payment_methods
            .get(id)
            .map(|m| m.to_string())
            .unwrap_or_else(|| self.payment_method_fallback.clone())
    }

    /// `1,234,000원`
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_suffix(&self.currency)
    }

    /// `+100,000원` for income, `-30,000원` for expense
    pub fn signed(&self, amount: Money, kind: TransactionType) -> String {
        amount.format_signed(kind, &self.currency)
    }

    /// `+70,000원` when zero or positive, `-15,000원` otherwise
    pub fn balance(&self, amount: Money) -> String {
        amount.format_balance(&self.currency)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::labels;
    use super::*;

    #[test]
    fn test_names_with_fallback() {
        let labels = labels();
        assert_eq!(labels.category(&CategoryId::from("food")), "🍔 Food");
        assert_eq!(labels.category(&CategoryId::from("gone")), "Uncategorized");
        assert_eq!(labels.payment_method(&PaymentMethodId::from("card")), "Card");
        assert_eq!(labels.payment_method(&PaymentMethodId::from("gone")), "Unassigned");
    }

    #[test]
    fn test_money_contracts() {
        let labels = labels();
        assert_eq!(labels.money(Money::new(1234000)), "1,234,000원");
        assert_eq!(
            labels.signed(Money::new(100000), TransactionType::Income),
            "+100,000원"
        );
        assert_eq!(
            labels.signed(Money::new(30000), TransactionType::Expense),
            "-30,000원"
        );
        assert_eq!(labels.balance(Money::new(70000)), "+70,000원");
        assert_eq!(labels.balance(Money::zero()), "+0원");
        assert_eq!(labels.balance(Money::new(-15000)), "-15,000원");
        assert_eq!(format_percent(70), "70%");
    }
}
