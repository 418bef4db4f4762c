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

use crate::{
    AppState, Error, endpoints,
    transaction::{DebtDetails, DebtKind, NewTransaction, TransactionKind, TransactionStore},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The in-memory transaction store.
    pub transactions: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The category the transaction belongs to.
    pub category: String,
    /// Free-text notes describing the transaction.
    #[serde(default)]
    pub notes: String,
    /// Whether this is an expense or income.
    pub kind: TransactionKind,
    /// The kind of debt, for debt payment transactions.
    #[serde(default)]
    pub debt_kind: Option<DebtKind>,
    /// The minimum payment due on the debt.
    #[serde(default)]
    pub minimum_payment: Option<f64>,
    /// The interest rate on the debt, as a percentage.
    #[serde(default)]
    pub interest_rate: Option<f64>,
}

impl TransactionForm {
    fn into_new_transaction(self) -> NewTransaction {
        let debt_details = self.debt_kind.map(|debt_kind| DebtDetails {
            debt_kind,
            minimum_payment: self.minimum_payment.unwrap_or(0.0),
            interest_rate: self.interest_rate.unwrap_or(0.0),
        });

        NewTransaction {
            date: self.date,
            amount: self.amount,
            category: self.category,
            notes: self.notes,
            kind: self.kind,
            debt_details,
        }
    }
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut transactions = match state.transactions.lock() {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if let Err(error) = transactions.add(form.into_new_transaction()) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use time::macros::date;

    use crate::transaction::{DebtKind, TransactionKind, TransactionStore};

    use super::{CreateTransactionState, TransactionForm, create_transaction_endpoint};

    fn get_test_state() -> CreateTransactionState {
        CreateTransactionState {
            transactions: Arc::new(Mutex::new(TransactionStore::new())),
        }
    }

    fn get_test_form() -> TransactionForm {
        TransactionForm {
            amount: 12.3,
            date: date!(2025 - 10 - 05),
            category: "Food".to_owned(),
            notes: "test transaction".to_owned(),
            kind: TransactionKind::Expense,
            debt_kind: None,
            minimum_payment: None,
            interest_rate: None,
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();

        let response = create_transaction_endpoint(State(state.clone()), Form(get_test_form()))
            .await
            .into_response();

        assert_redirects_to_transactions_view(response);

        let transactions = state.transactions.lock().unwrap();
        assert_eq!(transactions.list().len(), 1);
        assert_eq!(transactions.list()[0].amount, 12.3);
        assert_eq!(transactions.list()[0].notes, "test transaction");
    }

    #[tokio::test]
    async fn can_create_debt_payment() {
        let state = get_test_state();
        let form = TransactionForm {
            category: "Other".to_owned(),
            debt_kind: Some(DebtKind::CreditCard),
            minimum_payment: Some(35.0),
            interest_rate: Some(19.99),
            ..get_test_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_redirects_to_transactions_view(response);

        let transactions = state.transactions.lock().unwrap();
        let debt_details = transactions.list()[0]
            .debt_details
            .clone()
            .expect("debt details should be stored");
        assert_eq!(debt_details.debt_kind, DebtKind::CreditCard);
        assert_eq!(debt_details.minimum_payment, 35.0);
        assert_eq!(debt_details.interest_rate, 19.99);
    }

    #[tokio::test]
    async fn invalid_amount_returns_alert_and_does_not_mutate() {
        let state = get_test_state();
        let form = TransactionForm {
            amount: -1.0,
            ..get_test_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(state.transactions.lock().unwrap().list().is_empty());
    }

    #[test]
    fn form_parses_without_optional_fields() {
        let form_data = "amount=12.30&date=2025-10-05&category=Food&kind=expense";
        let form: TransactionForm = serde_html_form::from_str(form_data).unwrap();

        assert_eq!(form.amount, 12.3);
        assert_eq!(form.kind, TransactionKind::Expense);
        assert_eq!(form.notes, "");
        assert!(form.debt_kind.is_none());
    }

    #[test]
    fn form_parses_debt_fields() {
        let form_data = "amount=250&date=2025-10-05&category=Other&kind=expense\
            &debt_kind=credit-card&minimum_payment=35&interest_rate=19.99";
        let form: TransactionForm = serde_html_form::from_str(form_data).unwrap();

        assert_eq!(form.debt_kind, Some(DebtKind::CreditCard));
        assert_eq!(form.minimum_payment, Some(35.0));
        assert_eq!(form.interest_rate, Some(19.99));
    }

    #[track_caller]
    fn assert_redirects_to_transactions_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/transactions",
            "got redirect to {location:?}, want redirect to /transactions"
        );
    }
}
