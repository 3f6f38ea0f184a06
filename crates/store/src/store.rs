use api_types::record::{Record, RecordNew};
use serde_json::Value;
use tokio::sync::watch;

use crate::client::ApiClient;

/// At most this many entries come back from [`FinanceStore::transaction_history`].
const HISTORY_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Income,
    Expense,
}

/// One line of the recent-transactions view.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub kind: RecordKind,
    pub record: Record,
}

/// State container for the WalletSync UI.
///
/// Owns the income and expense collections and a single last-error slot.
/// Mutating operations call the remote API and then re-fetch the affected
/// collection wholesale; there is no local patching. All operations take
/// `&mut self`, so requests are sequential by construction.
///
/// Failures follow the original two-tier contract: a failed add lands in the
/// error slot for the UI to display, while failed fetches and deletes only
/// log through `tracing`.
#[derive(Debug)]
pub struct FinanceStore {
    client: ApiClient,
    incomes: Vec<Record>,
    expenses: Vec<Record>,
    error: Option<String>,
    revision: watch::Sender<u64>,
}

impl FinanceStore {
    pub fn new(client: ApiClient) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            client,
            incomes: Vec::new(),
            expenses: Vec::new(),
            error: None,
            revision,
        }
    }

    /// Observe state changes: the receiver's value bumps on every visible
    /// change (collection replacement, error slot set or cleared).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn incomes(&self) -> &[Record] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Record] {
        &self.expenses
    }

    /// Last add failure, if any. Never cleared automatically.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.touch();
    }

    pub async fn add_income(&mut self, record: RecordNew) {
        match self.client.create_income(&record).await {
            Ok(()) => self.fetch_incomes().await,
            Err(err) => self.set_error(format!("failed to add income: {err}")),
        }
    }

    pub async fn fetch_incomes(&mut self) {
        match self.client.list_incomes().await {
            Ok(data) => self.incomes = coerce_records("incomes", data),
            Err(err) => {
                tracing::error!("failed to fetch incomes: {err}");
                self.incomes = Vec::new();
            }
        }
        self.touch();
    }

    pub async fn delete_income(&mut self, id: &str) {
        match self.client.remove_income(id).await {
            Ok(()) => self.fetch_incomes().await,
            Err(err) => tracing::error!("failed to delete income {id}: {err}"),
        }
    }

    pub async fn add_expense(&mut self, record: RecordNew) {
        match self.client.create_expense(&record).await {
            Ok(()) => self.fetch_expenses().await,
            Err(err) => self.set_error(format!("failed to add expense: {err}")),
        }
    }

    pub async fn fetch_expenses(&mut self) {
        match self.client.list_expenses().await {
            Ok(data) => self.expenses = coerce_records("expenses", data),
            Err(err) => {
                tracing::error!("failed to fetch expenses: {err}");
                self.expenses = Vec::new();
            }
        }
        self.touch();
    }

    pub async fn delete_expense(&mut self, id: &str) {
        match self.client.remove_expense(id).await {
            Ok(()) => self.fetch_expenses().await,
            Err(err) => tracing::error!("failed to delete expense {id}: {err}"),
        }
    }

    /// Fetch both collections, as the UI does on mount.
    pub async fn fetch_all(&mut self) {
        self.fetch_incomes().await;
        self.fetch_expenses().await;
    }

    pub fn total_income(&self) -> f64 {
        self.incomes.iter().map(|record| record.amount).sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|record| record.amount).sum()
    }

    pub fn total_balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    /// The most recent entries across both collections, newest first.
    ///
    /// Tie order between equal timestamps is unspecified.
    pub fn transaction_history(&self) -> Vec<HistoryEntry> {
        let mut history: Vec<HistoryEntry> = self
            .incomes
            .iter()
            .map(|record| HistoryEntry {
                kind: RecordKind::Income,
                record: record.clone(),
            })
            .chain(self.expenses.iter().map(|record| HistoryEntry {
                kind: RecordKind::Expense,
                record: record.clone(),
            }))
            .collect();

        history.sort_unstable_by(|a, b| b.record.created_at.cmp(&a.record.created_at));
        history.truncate(HISTORY_LIMIT);
        history
    }
}

/// Replace anything that is not an array of records with an empty collection.
fn coerce_records(what: &str, data: Value) -> Vec<Record> {
    if !data.is_array() {
        tracing::error!("{what} response is not an array: {data}");
        return Vec::new();
    }

    match serde_json::from_value(data) {
        Ok(records) => records,
        Err(err) => {
            tracing::error!("malformed {what} response: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::{Map, json};

    fn record(id: &str, amount: f64, day: u32) -> Record {
        Record {
            id: id.to_string(),
            amount,
            created_at: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
            extra: Map::new(),
        }
    }

    fn store_with(incomes: Vec<Record>, expenses: Vec<Record>) -> FinanceStore {
        let mut store = FinanceStore::new(ApiClient::new("http://127.0.0.1:0"));
        store.incomes = incomes;
        store.expenses = expenses;
        store
    }

    #[test]
    fn totals_over_empty_collections_are_zero() {
        let store = store_with(Vec::new(), Vec::new());
        assert_eq!(store.total_income(), 0.0);
        assert_eq!(store.total_expenses(), 0.0);
        assert_eq!(store.total_balance(), 0.0);
    }

    #[test]
    fn totals_sum_amounts() {
        let store = store_with(
            vec![record("a", 10.0, 1), record("b", 5.0, 2)],
            vec![record("c", 2.5, 3)],
        );
        assert_eq!(store.total_income(), 15.0);
        assert_eq!(store.total_expenses(), 2.5);
        assert_eq!(store.total_balance(), 12.5);
    }

    #[test]
    fn history_caps_at_three_newest_first() {
        let store = store_with(
            vec![record("i1", 1.0, 1), record("i2", 1.0, 4)],
            vec![record("e1", 1.0, 2), record("e2", 1.0, 3), record("e3", 1.0, 5)],
        );

        let history = store.transaction_history();
        let ids: Vec<&str> = history.iter().map(|e| e.record.id.as_str()).collect();
        assert_eq!(ids, ["e3", "i2", "e2"]);
        assert_eq!(history[0].kind, RecordKind::Expense);
        assert_eq!(history[1].kind, RecordKind::Income);
    }

    #[test]
    fn history_over_fewer_entries_returns_them_all() {
        let store = store_with(vec![record("i1", 1.0, 1)], Vec::new());
        assert_eq!(store.transaction_history().len(), 1);
    }

    #[test]
    fn coerce_rejects_non_arrays() {
        assert!(coerce_records("incomes", json!({"error": "boom"})).is_empty());
        assert!(coerce_records("incomes", json!("nope")).is_empty());
        assert!(coerce_records("incomes", Value::Null).is_empty());
    }

    #[test]
    fn coerce_rejects_arrays_of_malformed_records() {
        let data = json!([{"id": "a", "amount": "not a number"}]);
        assert!(coerce_records("incomes", data).is_empty());
    }

    #[test]
    fn coerce_accepts_record_arrays() {
        let data = json!([
            {"id": "a", "amount": 3.0, "createdAt": "2026-03-01T00:00:00Z", "title": "t"}
        ]);
        let records = coerce_records("incomes", data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a");
    }

    #[test]
    fn clear_error_empties_the_slot_and_bumps_revision() {
        let mut store = store_with(Vec::new(), Vec::new());
        let rx = store.subscribe();
        store.set_error("failed to add income: 500".to_string());
        assert_eq!(store.error(), Some("failed to add income: 500"));

        store.clear_error();
        assert_eq!(store.error(), None);
        assert_eq!(*rx.borrow(), 2);

        // Clearing an already-empty slot is not a visible change.
        store.clear_error();
        assert_eq!(*rx.borrow(), 2);
    }
}
