//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{budget::BudgetStore, transaction::TransactionStore};

/// The state of the REST server.
///
/// Both stores live in memory for the lifetime of the server process. Route
/// handlers extract the parts they need via `FromRef` sub-states so that
/// each handler only sees the stores it actually uses.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The in-memory transaction ledger.
    pub transactions: Arc<Mutex<TransactionStore>>,

    /// The in-memory budget state, including per-category budgets.
    pub budgets: Arc<Mutex<BudgetStore>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Used to work out what "today" means when bucketing transactions for
    /// display.
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] from pre-built stores.
    ///
    /// `local_timezone` should be a valid, canonical timezone name,
    /// e.g. "Pacific/Auckland".
    pub fn new(
        transactions: TransactionStore,
        budgets: BudgetStore,
        local_timezone: &str,
    ) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(transactions)),
            budgets: Arc::new(Mutex::new(budgets)),
            local_timezone: local_timezone.to_owned(),
        }
    }
}
