//! Transaction management for the budgeting application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The JSON-file-backed store that owns the collection
//! - The aggregation functions that derive monthly, weekly, and trend views
//! - View handlers for transaction-related web pages

pub(crate) mod aggregation;
mod core;
mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod new_transaction_page;
mod store;
mod transactions_page;

pub use core::{
    Category, EXPENSE_CATEGORIES, Frequency, INCOME_CATEGORIES, Transaction, TransactionBuilder,
    TransactionId, TransactionKind,
};
pub use store::TransactionStore;

pub(crate) use create_transaction_endpoint::create_transaction_endpoint;
pub(crate) use delete_transaction_endpoint::delete_transaction_endpoint;
pub(crate) use new_transaction_page::get_new_transaction_page;
pub(crate) use transactions_page::get_transactions_page;
