//! Defines the core data model for transactions.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, money::Amount};

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Whether a transaction brought money in or sent money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in, e.g. a salary payment.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The capitalised label used in page copy.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Income => "income",
            Self::Expense => "expense",
        };
        write!(f, "{text}")
    }
}

/// How often a transaction counts toward totals.
///
/// A [Frequency::Monthly] transaction contributes to every calendar month's
/// totals regardless of its stored date. This models recurring costs such as
/// rent: recorded once, counted every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Counts only toward the month containing the stored date.
    Once,
    /// Counts toward every month.
    Monthly,
}

/// The categories an expense may be filed under.
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Housing",
    "Entertainment",
    "Healthcare",
    "Shopping",
    "Utilities",
    "Other",
];

/// The categories an income may be filed under.
pub const INCOME_CATEGORIES: [&str; 6] = [
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Gift",
    "Other",
];

/// A category name validated against the fixed set for a transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category, checking that `name` belongs to the set for `kind`.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if `name` is not in the set.
    pub fn new(name: &str, kind: TransactionKind) -> Result<Self, Error> {
        if Self::allowed(kind).contains(&name) {
            Ok(Self(name.to_owned()))
        } else {
            Err(Error::InvalidCategory {
                category: name.to_owned(),
                kind,
            })
        }
    }

    /// Create a category without validating the name.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// The fixed category set for a transaction kind.
    pub fn allowed(kind: TransactionKind) -> &'static [&'static str] {
        match kind {
            TransactionKind::Income => &INCOME_CATEGORIES,
            TransactionKind::Expense => &EXPENSE_CATEGORIES,
        }
    }

    /// The category name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and append the
/// builder to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
    /// A text description of what the transaction was for. May be empty.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
    /// The category the transaction is filed under.
    pub category: Category,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the transaction recurs every month.
    pub frequency: Frequency,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(kind: TransactionKind, amount: Amount, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            date,
            description: String::new(),
            category: "Other".to_owned(),
            frequency: Frequency::Once,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The builder holds everything except the ID, which the store assigns when
/// the builder is appended. Validation (positive amount, category in the
/// kind's set) happens at that point.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// let builder = Transaction::build(
///         TransactionKind::Expense,
///         Amount::from_cents(4599),
///         date!(2025 - 01 - 15),
///     )
///     .description("Coffee shop")
///     .category("Food")
///     .frequency(Frequency::Once);
/// let transaction = store.append(builder)?;
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,

    /// The monetary amount of the transaction.
    ///
    /// Always unsigned; direction comes from `kind`. Must be greater than
    /// zero to pass validation.
    pub amount: Amount,

    /// The date when the transaction occurred.
    pub date: Date,

    /// A human-readable description of the transaction.
    ///
    /// Optional; defaults to the empty string.
    pub description: String,

    /// The category name, e.g. "Food" or "Salary".
    ///
    /// Must belong to the fixed set for `kind`. Defaults to "Other", which
    /// exists in both sets.
    pub category: String,

    /// Whether the transaction recurs every month. Defaults to
    /// [Frequency::Once].
    pub frequency: Frequency,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category name for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set how often the transaction recurs.
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Validate the builder and produce a [Transaction] with the given `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if the amount is zero or negative,
    /// - or [Error::InvalidCategory] if the category is not in the set for
    ///   the transaction kind.
    pub(crate) fn finalize(self, id: TransactionId) -> Result<Transaction, Error> {
        if !self.amount.is_positive() {
            return Err(Error::NonPositiveAmount);
        }

        let category = Category::new(&self.category, self.kind)?;

        Ok(Transaction {
            id,
            kind: self.kind,
            description: self.description,
            amount: self.amount,
            category,
            date: self.date,
            frequency: self.frequency,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
