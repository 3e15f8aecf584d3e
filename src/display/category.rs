//! Category and payment method tables

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Category, PaymentMethod};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Color")]
    color: String,
}

#[derive(Tabled)]
struct PaymentMethodRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

pub fn format_category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        name: c.to_string(),
        kind: c.kind.to_string(),
        color: c.color.clone().unwrap_or_default(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

pub fn format_payment_method_table(methods: &[PaymentMethod]) -> String {
    if methods.is_empty() {
        return "No payment methods found.\n".to_string();
    }

    let rows = methods.iter().map(|m| PaymentMethodRow {
        id: m.id.to_string(),
        name: m.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
