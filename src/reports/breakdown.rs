//! Category and payment method breakdowns
//!
//! Breakdowns select transactions by inclusive instant comparison against a
//! `DateRange` (not by calendar components), optionally narrowed to one
//! transaction type. With no type filter, income and expense rows share a
//! single percentage base.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{
    CategoryBreakdown, DateRange, Money, PaymentMethodBreakdown, Transaction, TransactionType,
};

/// One aggregated group before it is turned into a typed breakdown row
#[derive(Debug, Clone, PartialEq, Eq)]
struct Group<K> {
    key: K,
    amount: Money,
    count: usize,
}

/// Whole-number share of `total`, rounded half up
///
/// Returns 0 when `total` is not positive.
pub fn percentage_of(amount: Money, total: Money) -> i64 {
    let total = i128::from(total.value());
    if total <= 0 {
        return 0;
    }
    let amount = i128::from(amount.value());
    // floor(100a/t + 1/2) == floor((200a + t) / 2t)
    let rounded = (200 * amount + total).div_euclid(2 * total);
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

/// Transactions a breakdown counts: inside `range`, and of `kind` when given
pub fn breakdown_candidates<'a>(
    transactions: &'a [Transaction],
    range: &'a DateRange,
    kind: Option<TransactionType>,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions
        .iter()
        .filter(move |t| range.contains(t.date))
        .filter(move |t| kind.map_or(true, |k| t.kind == k))
}

/// Group by key in first-seen order, then stable-sort by amount descending
fn group_by<'a, K, I, F>(transactions: I, key_of: F) -> (Vec<Group<K>>, Money)
where
    K: Clone + Eq + Hash,
    I: Iterator<Item = &'a Transaction>,
    F: Fn(&Transaction) -> &K,
{
    let mut groups: Vec<Group<K>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut total = Money::zero();

    for txn in transactions {
        let key = key_of(txn);
        let slot = match index.get(key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key: key.clone(),
                    amount: Money::zero(),
                    count: 0,
                });
                groups.len() - 1
            }
        };

        groups[slot].amount += txn.amount;
        groups[slot].count += 1;
        total += txn.amount;
    }

    // Vec::sort_by is stable: equal amounts keep first-seen order
    groups.sort_by(|a, b| b.amount.cmp(&a.amount));
    (groups, total)
}

/// Per-category totals over `range`, largest first
///
/// Empty when nothing matches or when the grand total is not positive.
pub fn category_breakdown(
    transactions: &[Transaction],
    range: &DateRange,
    kind: Option<TransactionType>,
) -> Vec<CategoryBreakdown> {
    let (groups, total) = group_by(breakdown_candidates(transactions, range, kind), |t| {
        &t.category_id
    });

    if !total.is_positive() {
        return Vec::new();
    }

    groups
        .into_iter()
        .map(|group| CategoryBreakdown {
            category_id: group.key,
            amount: group.amount,
            percentage: percentage_of(group.amount, total),
            transaction_count: group.count,
        })
        .collect()
}

/// Per-payment-method totals over `range`, largest first
///
/// Empty when nothing matches or when the grand total is not positive.
pub fn payment_method_breakdown(
    transactions: &[Transaction],
    range: &DateRange,
    kind: Option<TransactionType>,
) -> Vec<PaymentMethodBreakdown> {
    let (groups, total) = group_by(breakdown_candidates(transactions, range, kind), |t| {
        &t.payment_method_id
    });

    if !total.is_positive() {
        return Vec::new();
    }

    groups
        .into_iter()
        .map(|group| PaymentMethodBreakdown {
            payment_method_id: group.key,
            amount: group.amount,
            percentage: percentage_of(group.amount, total),
            transaction_count: group.count,
        })
        .collect()
}
