//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use crate::transaction::TransactionStore;

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction store shared between request handlers.
    pub store: Arc<Mutex<TransactionStore>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] that serves `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland". It decides what "today" means for the month and
    /// week views.
    pub fn new(store: TransactionStore, local_timezone: &str) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
