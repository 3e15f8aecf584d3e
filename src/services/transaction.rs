//! Transaction service
//!
//! CRUD over the transaction store plus every query, derived metric and
//! aggregation the rest of the app reads. Queries work on `get_all()`
//! snapshots and never mutate the store.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::audit::EntityType;
use crate::error::PocketResult;
use crate::models::{
    CategoryBreakdown, CategoryId, DailySummary, DateRange, Money, NewTransaction,
    PaymentMethodBreakdown, PaymentMethodId, Period, PeriodSummary, Transaction, TransactionId,
    TransactionPatch, TransactionType,
};
use crate::reports;
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Composable transaction filter; every set field must match
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    /// Inclusive instant range
    pub range: Option<DateRange>,
    /// Calendar date, time of day ignored
    pub date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
    pub payment_method_id: Option<PaymentMethodId>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn category(mut self, category_id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn payment_method(mut self, payment_method_id: impl Into<PaymentMethodId>) -> Self {
        self.payment_method_id = Some(payment_method_id.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a transaction passes every set criterion (`limit` is ignored)
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.kind.map_or(true, |kind| txn.kind == kind)
            && self.range.map_or(true, |range| range.contains(txn.date))
            && self.date.map_or(true, |date| txn.calendar_date() == date)
            && self
                .category_id
                .as_ref()
                .map_or(true, |id| &txn.category_id == id)
            && self
                .payment_method_id
                .as_ref()
                .map_or(true, |id| &txn.payment_method_id == id)
    }
}

/// Category and payment method breakdowns for one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBreakdowns {
    pub period: Period,
    pub kind: Option<TransactionType>,
    pub categories: Vec<CategoryBreakdown>,
    pub payment_methods: Vec<PaymentMethodBreakdown>,
}

/// Everything shown for a single calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail {
    pub date: NaiveDate,
    /// Ordered by time of day, creation order on ties
    pub transactions: Vec<Transaction>,
    pub summary: PeriodSummary,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Store a new transaction; the input is trusted as-is
    pub fn create(&self, input: NewTransaction) -> PocketResult<Transaction> {
        let txn = self.storage.transactions.create(input)?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(audit_label(&txn)),
            &txn,
        )?;

        Ok(txn)
    }

    pub fn get_by_id(&self, id: &TransactionId) -> PocketResult<Option<Transaction>> {
        self.storage.transactions.get_by_id(id)
    }

    /// All transactions in creation order
    pub fn get_all(&self) -> PocketResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    /// Merge `patch` into an existing transaction; `None` if the id is unknown
    pub fn update(
        &self,
        id: &TransactionId,
        patch: TransactionPatch,
    ) -> PocketResult<Option<Transaction>> {
        let Some((before, after)) = self.storage.transactions.update_tracked(id, patch)? else {
            return Ok(None);
        };
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            after.id.to_string(),
            Some(audit_label(&after)),
            &before,
            &after,
            diff_summary(&before, &after),
        )?;

        Ok(Some(after))
    }

    /// Remove a transaction; `true` iff it existed
    pub fn delete(&self, id: &TransactionId) -> PocketResult<bool> {
        let Some(removed) = self.storage.transactions.remove(id)? else {
            return Ok(false);
        };
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            removed.id.to_string(),
            Some(audit_label(&removed)),
            &removed,
        )?;

        Ok(true)
    }

    /// Remove every transaction and rewind id generation
    pub fn clear(&self) -> PocketResult<()> {
        let removed = self.storage.transactions.count()?;
        self.storage.transactions.clear()?;
        self.storage.transactions.save()?;
        self.storage.log_clear(EntityType::Transaction, removed)
    }

    fn filtered<F>(&self, keep: F) -> PocketResult<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut transactions = self.get_all()?;
        transactions.retain(|t| keep(t));
        Ok(transactions)
    }

    pub fn get_by_type(&self, kind: TransactionType) -> PocketResult<Vec<Transaction>> {
        self.filtered(|t| t.kind == kind)
    }

    /// Transactions whose date-time lies in `[start, end]`, compared as instants
    pub fn get_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> PocketResult<Vec<Transaction>> {
        let range = DateRange::new(start, end);
        self.filtered(|t| range.contains(t.date))
    }

    /// Transactions on the calendar date `date`, whatever their time of day
    pub fn get_by_date(&self, date: NaiveDate) -> PocketResult<Vec<Transaction>> {
        self.filtered(|t| t.calendar_date() == date)
    }

    pub fn get_by_category_id(&self, category_id: &CategoryId) -> PocketResult<Vec<Transaction>> {
        self.filtered(|t| &t.category_id == category_id)
    }

    pub fn get_by_payment_method_id(
        &self,
        payment_method_id: &PaymentMethodId,
    ) -> PocketResult<Vec<Transaction>> {
        self.filtered(|t| &t.payment_method_id == payment_method_id)
    }

    /// Transactions matching `filter`, newest first (creation order on ties)
    pub fn list(&self, filter: &TransactionFilter) -> PocketResult<Vec<Transaction>> {
        let mut transactions = self.filtered(|t| filter.matches(t))?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// The `limit` most recent transactions
    pub fn list_recent(&self, limit: usize) -> PocketResult<Vec<Transaction>> {
        self.list(&TransactionFilter::new().limit(limit))
    }

    fn total_of(&self, kind: TransactionType) -> PocketResult<Money> {
        Ok(self.get_by_type(kind)?.iter().map(|t| t.amount).sum())
    }

    /// Sum of all income, over the whole store
    pub fn total_income(&self) -> PocketResult<Money> {
        self.total_of(TransactionType::Income)
    }

    /// Sum of all expenses, over the whole store
    pub fn total_expense(&self) -> PocketResult<Money> {
        self.total_of(TransactionType::Expense)
    }

    /// Income minus expense, over the whole store
    pub fn balance(&self) -> PocketResult<Money> {
        Ok(self.summarize(&TransactionFilter::new())?.balance)
    }

    /// Derived metrics over the transactions matching `filter` (`limit` is ignored)
    pub fn summarize(&self, filter: &TransactionFilter) -> PocketResult<PeriodSummary> {
        let transactions = self.filtered(|t| filter.matches(t))?;
        Ok(PeriodSummary::from_transactions(&transactions))
    }

    pub fn daily_summaries(&self, year: i32, month: u32) -> PocketResult<Vec<DailySummary>> {
        Ok(reports::daily_summaries(&self.get_all()?, year, month))
    }

    pub fn monthly_summary(&self, year: i32, month: u32) -> PocketResult<PeriodSummary> {
        Ok(reports::monthly_summary(&self.get_all()?, year, month))
    }

    pub fn yearly_summary(&self, year: i32) -> PocketResult<PeriodSummary> {
        Ok(reports::yearly_summary(&self.get_all()?, year))
    }

    pub fn period_summary(&self, period: Period) -> PocketResult<PeriodSummary> {
        Ok(reports::period_summary(&self.get_all()?, period))
    }

    /// Per-month totals for a year, January first
    pub fn monthly_summaries(&self, year: i32) -> PocketResult<Vec<(u32, PeriodSummary)>> {
        Ok(reports::monthly_summaries(&self.get_all()?, year))
    }

    pub fn category_breakdown(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: Option<TransactionType>,
    ) -> PocketResult<Vec<CategoryBreakdown>> {
        Ok(reports::category_breakdown(
            &self.get_all()?,
            &DateRange::new(start, end),
            kind,
        ))
    }

    pub fn payment_method_breakdown(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: Option<TransactionType>,
    ) -> PocketResult<Vec<PaymentMethodBreakdown>> {
        Ok(reports::payment_method_breakdown(
            &self.get_all()?,
            &DateRange::new(start, end),
            kind,
        ))
    }

    /// Both breakdowns over the whole-day range of `period`, from one snapshot
    pub fn period_breakdowns(
        &self,
        period: Period,
        kind: Option<TransactionType>,
    ) -> PocketResult<PeriodBreakdowns> {
        let transactions = self.get_all()?;
        let range = period.date_range();

        Ok(PeriodBreakdowns {
            period,
            kind,
            categories: reports::category_breakdown(&transactions, &range, kind),
            payment_methods: reports::payment_method_breakdown(&transactions, &range, kind),
        })
    }

    pub fn day_detail(&self, date: NaiveDate) -> PocketResult<DayDetail> {
        let mut transactions = self.get_by_date(date)?;
        transactions.sort_by_key(|t| t.date);
        let summary = PeriodSummary::from_transactions(&transactions);

        Ok(DayDetail {
            date,
            transactions,
            summary,
        })
    }
}

fn audit_label(txn: &Transaction) -> String {
    format!("{} {} {}", txn.date_key(), txn.kind, txn.amount)
}

/// Human-readable list of changed fields, `None` when nothing changed
fn diff_summary(before: &Transaction, after: &Transaction) -> Option<String> {
    let mut changes = Vec::new();

    if before.kind != after.kind {
        changes.push(format!("type: {} -> {}", before.kind, after.kind));
    }
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.date != after.date {
        changes.push(format!(
            "date: {} -> {}",
            before.date.format("%Y-%m-%d %H:%M"),
            after.date.format("%Y-%m-%d %H:%M")
        ));
    }
    if before.category_id != after.category_id {
        changes.push(format!(
            "category: {} -> {}",
            before.category_id, after.category_id
        ));
    }
    if before.payment_method_id != after.payment_method_id {
        changes.push(format!(
            "payment method: {} -> {}",
            before.payment_method_id, after.payment_method_id
        ));
    }
    if before.memo != after.memo {
        changes.push("memo changed".to_string());
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::PocketPaths;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn add(
        service: &TransactionService,
        kind: TransactionType,
        amount: i64,
        date: NaiveDateTime,
        category: &str,
        method: &str,
    ) -> Transaction {
        service
            .create(NewTransaction::new(kind, Money::new(amount), date, category, method))
            .unwrap()
    }

    fn sample(service: &TransactionService) {
        add(service, TransactionType::Income, 3000000, at(2024, 1, 25, 9, 0), "salary", "bank");
        add(service, TransactionType::Expense, 60000, at(2024, 1, 5, 12, 0), "food", "card");
        add(service, TransactionType::Expense, 30000, at(2024, 1, 10, 8, 0), "transport", "cash");
        add(service, TransactionType::Expense, 10000, at(2024, 1, 20, 19, 0), "food", "card");
        add(service, TransactionType::Expense, 45000, at(2024, 2, 3, 13, 0), "food", "card");
    }

    #[test]
    fn test_crud() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);

        let txn = add(&service, TransactionType::Expense, 10000, at(2024, 1, 15, 9, 30), "food", "card");
        assert_eq!(service.get_by_id(&txn.id).unwrap(), Some(txn.clone()));

        let updated = service
            .update(
                &txn.id,
                TransactionPatch::new()
                    .amount(Money::new(15000))
                    .memo(Some("lunch".into())),
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.amount, Money::new(15000));
        assert_eq!(updated.memo.as_deref(), Some("lunch"));
        assert_eq!(updated.category_id.as_str(), "food");

        assert!(service.delete(&txn.id).unwrap());
        assert!(!service.delete(&txn.id).unwrap());
        assert_eq!(service.get_by_id(&txn.id).unwrap(), None);
    }

    #[test]
    fn test_unknown_ids_are_absent() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        let unknown = TransactionId::from("missing");

        assert!(!service.delete(&unknown).unwrap());
        assert_eq!(service.get_by_id(&unknown).unwrap(), None);
        assert_eq!(
            service.update(&unknown, TransactionPatch::new()).unwrap(),
            None
        );
    }

    #[test]
    fn test_queries() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        sample(&service);

        assert_eq!(service.get_by_type(TransactionType::Income).unwrap().len(), 1);
        assert_eq!(service.get_by_type(TransactionType::Expense).unwrap().len(), 4);
        assert_eq!(service.get_by_category_id(&CategoryId::from("food")).unwrap().len(), 3);
        assert_eq!(
            service
                .get_by_payment_method_id(&PaymentMethodId::from("cash"))
                .unwrap()
                .len(),
            1
        );
        assert!(service
            .get_by_category_id(&CategoryId::from("nothing"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive_instants() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        sample(&service);

        let both_ends = service
            .get_by_date_range(at(2024, 1, 5, 12, 0), at(2024, 1, 10, 8, 0))
            .unwrap();
        assert_eq!(both_ends.len(), 2);

        // Midnight end excludes a same-day transaction later in the day
        let midnight_end = service
            .get_by_date_range(at(2024, 1, 1, 0, 0), at(2024, 1, 20, 0, 0))
            .unwrap();
        assert_eq!(midnight_end.len(), 2);
    }

    #[test]
    fn test_get_by_date_ignores_time() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        add(&service, TransactionType::Expense, 1000, at(2024, 1, 15, 0, 0), "food", "card");
        add(&service, TransactionType::Expense, 2000, at(2024, 1, 15, 23, 59), "food", "card");
        add(&service, TransactionType::Expense, 4000, at(2024, 1, 16, 0, 0), "food", "card");

        let day = service
            .get_by_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
            .unwrap();
        assert_eq!(day.len(), 2);
    }

    #[test]
    fn test_derived_metrics() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);

        assert_eq!(service.total_income().unwrap(), Money::zero());
        assert_eq!(service.balance().unwrap(), Money::zero());

        sample(&service);
        let income = service.total_income().unwrap();
        let expense = service.total_expense().unwrap();
        assert_eq!(income, Money::new(3000000));
        assert_eq!(expense, Money::new(145000));
        assert_eq!(service.balance().unwrap(), income - expense);
    }

    #[test]
    fn test_filter_composition() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        sample(&service);

        let filter = TransactionFilter::new()
            .kind(TransactionType::Expense)
            .category("food")
            .payment_method("card")
            .range(Period::month(2024, 1).unwrap().date_range());

        let found = service.list(&filter).unwrap();
        let amounts: Vec<_> = found.iter().map(|t| t.amount.value()).collect();
        assert_eq!(amounts, vec![10000, 60000]);

        let summary = service.summarize(&filter).unwrap();
        assert_eq!(summary.total_expense, Money::new(70000));
        assert_eq!(summary.transaction_count, 2);
    }

    #[test]
    fn test_list_recent_is_newest_first_and_stable() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        let first = add(&service, TransactionType::Expense, 1, at(2024, 1, 15, 9, 0), "a", "card");
        let second = add(&service, TransactionType::Expense, 2, at(2024, 1, 15, 9, 0), "b", "card");
        let newest = add(&service, TransactionType::Expense, 3, at(2024, 3, 1, 9, 0), "c", "card");

        let recent = service.list_recent(10).unwrap();
        let ids: Vec<_> = recent.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec![newest.id, first.id, second.id]);

        assert_eq!(service.list_recent(1).unwrap().len(), 1);
    }

    #[test]
    fn test_aggregations() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        sample(&service);

        let january = service.monthly_summary(2024, 1).unwrap();
        assert_eq!(january.transaction_count, 4);
        assert_eq!(january.balance, Money::new(2900000));

        let days = service.daily_summaries(2024, 1).unwrap();
        assert_eq!(days.len(), 4);
        assert!(days.iter().all(|d| d.date.starts_with("2024-01")));

        assert_eq!(service.yearly_summary(2024).unwrap().transaction_count, 5);
        assert_eq!(service.yearly_summary(2023).unwrap(), PeriodSummary::zero());
        assert_eq!(
            service.period_summary(Period::month(2024, 2).unwrap()).unwrap().total_expense,
            Money::new(45000)
        );

        let breakdown = service
            .category_breakdown(
                at(2024, 1, 1, 0, 0),
                at(2024, 1, 31, 23, 59),
                Some(TransactionType::Expense),
            )
            .unwrap();
        assert_eq!(breakdown[0].category_id.as_str(), "food");
        assert_eq!(breakdown[0].percentage, 70);

        let methods = service
            .payment_method_breakdown(
                at(2024, 1, 1, 0, 0),
                at(2024, 1, 31, 23, 59),
                Some(TransactionType::Expense),
            )
            .unwrap();
        assert_eq!(methods[0].payment_method_id.as_str(), "card");
    }

    #[test]
    fn test_period_breakdowns() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        sample(&service);

        let year = service
            .period_breakdowns(Period::year(2024).unwrap(), Some(TransactionType::Expense))
            .unwrap();
        assert_eq!(year.categories[0].category_id.as_str(), "food");
        assert_eq!(year.categories[0].amount, Money::new(115000));
        assert_eq!(year.payment_methods.len(), 2);

        let empty = service
            .period_breakdowns(Period::month(2023, 5).unwrap(), None)
            .unwrap();
        assert!(empty.categories.is_empty());
        assert!(empty.payment_methods.is_empty());
    }

    #[test]
    fn test_day_detail() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        add(&service, TransactionType::Expense, 20000, at(2024, 1, 15, 18, 0), "food", "card");
        add(&service, TransactionType::Income, 100000, at(2024, 1, 15, 9, 0), "salary", "bank");
        add(&service, TransactionType::Expense, 10000, at(2024, 1, 16, 9, 0), "food", "card");

        let detail = service
            .day_detail(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
            .unwrap();
        assert_eq!(detail.transactions.len(), 2);
        assert_eq!(detail.transactions[0].kind, TransactionType::Income);
        assert_eq!(detail.summary.balance, Money::new(80000));
    }

    #[test]
    fn test_clear() {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        sample(&service);

        service.clear().unwrap();
        assert!(service.get_all().unwrap().is_empty());
        assert_eq!(service.monthly_summary(2024, 1).unwrap(), PeriodSummary::zero());
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(PocketPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = TransactionService::new(&storage);

        let txn = add(&service, TransactionType::Expense, 10000, at(2024, 1, 15, 9, 30), "food", "card");
        service
            .update(
                &txn.id,
                TransactionPatch::new()
                    .amount(Money::new(15000))
                    .memo(Some("dinner".into())),
            )
            .unwrap();
        service.delete(&txn.id).unwrap();
        service.clear().unwrap();

        let entries = storage.audit_logger().unwrap().read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            ops,
            vec![Operation::Create, Operation::Update, Operation::Delete, Operation::Clear]
        );
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("amount: 10,000원 -> 15,000원, memo changed")
        );
    }

    #[test]
    fn test_file_backed_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());

        {
            let storage = Storage::new(paths.clone()).unwrap();
            sample(&TransactionService::new(&storage));
        }

        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let service = TransactionService::new(&storage);
        assert_eq!(service.get_all().unwrap().len(), 5);
        assert_eq!(service.monthly_summary(2024, 1).unwrap().transaction_count, 4);
    }
}
