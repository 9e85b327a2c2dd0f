//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{AppState, Error, endpoints, money::Amount};

use super::{
    core::{Frequency, Transaction, TransactionKind},
    store::TransactionStore,
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The store that holds the transaction collection.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the transaction is an income or an expense.
    pub kind: TransactionKind,
    /// The value of the transaction in dollars, as entered.
    ///
    /// Kept as text so that parse failures produce an alert rather than a
    /// rejected form.
    pub amount: String,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction. May be empty.
    #[serde(default)]
    pub description: String,
    /// The category name for the transaction.
    pub category: String,
    /// Whether the transaction recurs every month.
    pub frequency: Frequency,
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
///
/// Validation failures (unparseable or non-positive amount, category not in
/// the set for the kind) return an error alert and create nothing.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let amount = match Amount::parse(&form.amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_alert_response(),
    };

    let builder = Transaction::build(form.kind, amount, form.date)
        .description(&form.description)
        .category(&form.category)
        .frequency(form.frequency);

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if let Err(error) = store.append(builder) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
