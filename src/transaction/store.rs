//! JSON-file-backed storage for the transaction collection.
//!
//! The whole collection is one serialized array: loaded once at startup and
//! rewritten after every mutation. The in-memory list is authoritative for
//! the session, so write failures are logged and otherwise ignored.

use std::{fs, io, path::PathBuf};

use crate::Error;

use super::core::{Transaction, TransactionBuilder, TransactionId};

/// The ordered collection of transactions.
///
/// Invariants:
/// - sorted descending by date after every mutation, with same-date entries
///   keeping their insertion order;
/// - IDs are assigned monotonically and never reused within a session.
///
/// The only mutations are [TransactionStore::append] and
/// [TransactionStore::remove].
#[derive(Debug)]
pub struct TransactionStore {
    /// Where the collection is persisted. `None` keeps the store in memory
    /// only, which the tests use.
    path: Option<PathBuf>,
    transactions: Vec<Transaction>,
    next_id: TransactionId,
}

impl TransactionStore {
    /// Load the collection from the JSON file at `path`.
    ///
    /// A missing file or a file that cannot be read or parsed is not fatal:
    /// the store starts empty and a warning is logged. The file is created
    /// on the first mutation.
    pub fn open(path: PathBuf) -> Self {
        let transactions = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<Transaction>>(&contents) {
                Ok(transactions) => transactions,
                Err(error) => {
                    tracing::warn!(
                        "could not parse transactions from {}, starting empty: {error}",
                        path.display()
                    );
                    Vec::new()
                }
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                tracing::warn!(
                    "could not read transactions from {}, starting empty: {error}",
                    path.display()
                );
                Vec::new()
            }
        };

        let mut store = Self::from_transactions(transactions);
        store.path = Some(path);
        store
    }

    /// Create an empty store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::from_transactions(Vec::new())
    }

    fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .unwrap_or(0)
            + 1;

        let mut store = Self {
            path: None,
            transactions,
            next_id,
        };
        store.sort();
        store
    }

    /// The transactions, sorted descending by date.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Validate `builder`, assign it the next ID, and add it to the
    /// collection.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if the amount is zero or negative,
    /// - or [Error::InvalidCategory] if the category does not belong to the
    ///   set for the transaction kind.
    pub fn append(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = builder.finalize(self.next_id)?;
        self.next_id += 1;

        self.transactions.push(transaction.clone());
        self.sort();
        self.save();

        Ok(transaction)
    }

    /// Remove the transaction with the given `id` from the collection.
    ///
    /// The relative order of the remaining transactions is unchanged.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if no transaction has `id`.
    pub fn remove(&mut self, id: TransactionId) -> Result<Transaction, Error> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or(Error::DeleteMissingTransaction)?;

        let removed = self.transactions.remove(index);
        self.save();

        Ok(removed)
    }

    /// Stable sort, so same-date entries keep their insertion order.
    fn sort(&mut self) {
        self.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };

        let json = match serde_json::to_string_pretty(&self.transactions) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!("could not serialize transactions: {error}");
                return;
            }
        };

        if let Err(error) = fs::write(path, json) {
            tracing::warn!(
                "could not persist transactions to {}: {error}",
                path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        money::Amount,
        transaction::{Frequency, Transaction, TransactionKind},
    };

    use super::TransactionStore;

    fn expense(amount: i64, date: time::Date) -> crate::transaction::TransactionBuilder {
        Transaction::build(TransactionKind::Expense, Amount::from_cents(amount), date)
            .category("Food")
    }

    #[test]
    fn append_assigns_monotonic_ids() {
        let mut store = TransactionStore::in_memory();

        let first = store.append(expense(100, date!(2024 - 01 - 01))).unwrap();
        let second = store.append(expense(200, date!(2024 - 01 - 02))).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn append_keeps_collection_sorted_descending_by_date() {
        let mut store = TransactionStore::in_memory();

        store.append(expense(100, date!(2024 - 01 - 05))).unwrap();
        store.append(expense(200, date!(2024 - 01 - 20))).unwrap();
        store.append(expense(300, date!(2024 - 01 - 10))).unwrap();

        let dates: Vec<_> = store
            .transactions()
            .iter()
            .map(|transaction| transaction.date)
            .collect();

        assert_eq!(
            dates,
            vec![
                date!(2024 - 01 - 20),
                date!(2024 - 01 - 10),
                date!(2024 - 01 - 05)
            ]
        );
    }

    #[test]
    fn same_date_entries_keep_insertion_order() {
        let mut store = TransactionStore::in_memory();
        let day = date!(2024 - 01 - 05);

        store.append(expense(100, day)).unwrap();
        store.append(expense(200, date!(2024 - 01 - 01))).unwrap();
        store.append(expense(300, day)).unwrap();

        let same_day_ids: Vec<_> = store
            .transactions()
            .iter()
            .filter(|transaction| transaction.date == day)
            .map(|transaction| transaction.id)
            .collect();

        assert_eq!(same_day_ids, vec![1, 3]);
    }

    #[test]
    fn remove_deletes_exactly_one_and_keeps_order() {
        let mut store = TransactionStore::in_memory();
        let day = date!(2024 - 01 - 05);

        for amount in [100, 200, 300] {
            store.append(expense(amount, day)).unwrap();
        }

        store.remove(2).unwrap();

        let ids: Vec<_> = store
            .transactions()
            .iter()
            .map(|transaction| transaction.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn remove_missing_id_fails() {
        let mut store = TransactionStore::in_memory();

        assert_eq!(store.remove(42), Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn append_rejects_invalid_builders() {
        let mut store = TransactionStore::in_memory();

        let result = store.append(
            Transaction::build(
                TransactionKind::Income,
                Amount::ZERO,
                date!(2024 - 01 - 01),
            )
            .category("Salary"),
        );

        assert_eq!(result, Err(Error::NonPositiveAmount));
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn round_trips_through_the_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.json");

        {
            let mut store = TransactionStore::open(path.clone());
            store
                .append(
                    Transaction::build(
                        TransactionKind::Income,
                        Amount::from_cents(100_000),
                        date!(2024 - 01 - 01),
                    )
                    .category("Salary")
                    .description("January pay")
                    .frequency(Frequency::Monthly),
                )
                .unwrap();
        }

        let store = TransactionStore::open(path);
        let transactions = store.transactions();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, Amount::from_cents(100_000));
        assert_eq!(transactions[0].description, "January pay");
        assert_eq!(transactions[0].frequency, Frequency::Monthly);
    }

    #[test]
    fn reopened_store_does_not_reuse_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.json");

        {
            let mut store = TransactionStore::open(path.clone());
            store.append(expense(100, date!(2024 - 01 - 01))).unwrap();
            store.append(expense(200, date!(2024 - 01 - 02))).unwrap();
        }

        let mut store = TransactionStore::open(path);
        let transaction = store.append(expense(300, date!(2024 - 01 - 03))).unwrap();

        assert_eq!(transaction.id, 3);
    }

    #[test]
    fn corrupt_file_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        std::fs::write(&path, "not json {").unwrap();

        let store = TransactionStore::open(path);

        assert!(store.transactions().is_empty());
    }
}
