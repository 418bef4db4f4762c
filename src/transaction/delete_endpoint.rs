//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{AppState, Error, transaction::TransactionStore};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The in-memory transaction store.
    transactions: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// Deleting an unknown transaction id is a silent no-op, so this handler
/// always responds with an empty fragment on 200 OK, which HTMX swaps in
/// place of the deleted list row.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let mut transactions = match state.transactions.lock() {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let count_before = transactions.list().len();
    transactions.delete(&transaction_id);

    if transactions.list().len() == count_before {
        tracing::debug!("delete of unknown transaction {transaction_id} was a no-op");
    }

    // The status code has to be 200 OK or HTMX will not delete the list row.
    html!().into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::transaction::{NewTransaction, TransactionKind, TransactionStore};

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn get_test_state(store: TransactionStore) -> DeleteTransactionState {
        DeleteTransactionState {
            transactions: Arc::new(Mutex::new(store)),
        }
    }

    #[tokio::test]
    async fn deletes_transaction() {
        let mut store = TransactionStore::new();
        let transaction = store
            .add(NewTransaction::new(
                date!(2025 - 10 - 26),
                1.23,
                "Food",
                TransactionKind::Expense,
            ))
            .unwrap();
        let state = get_test_state(store);

        let response =
            delete_transaction_endpoint(State(state.clone()), Path(transaction.id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.transactions.lock().unwrap().list().is_empty());
    }

    #[tokio::test]
    async fn deleting_unknown_transaction_succeeds() {
        let state = get_test_state(TransactionStore::new());

        let response =
            delete_transaction_endpoint(State(state.clone()), Path("txn-404".to_owned())).await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}
