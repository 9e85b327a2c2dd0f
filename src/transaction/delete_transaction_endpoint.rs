use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{AppState, Error, alert::Alert, html::render};

use super::{core::TransactionId, store::TransactionStore};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The store that holds the transaction collection.
    store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting a transaction by its ID.
///
/// On success the swapped-in content is empty so that HTMX removes the row
/// it targeted; the confirmation alert rides along as an out-of-band swap.
/// The status code has to be 200 OK or HTMX will not remove the row.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.remove(transaction_id) {
        Ok(_) => render(
            StatusCode::OK,
            html!(
                div hx-swap-oob="afterbegin:#alert-container"
                {
                    (Alert::success("Transaction deleted successfully!", "").into_html())
                }
            ),
        ),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
