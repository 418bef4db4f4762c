//! Defines the endpoints for updating the monthly budget and the
//! per-category budgets.

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

use crate::{AppState, Error, budget::BudgetStore, endpoints};

/// The state needed to update budgets.
#[derive(Debug, Clone)]
pub struct UpdateBudgetState {
    /// The in-memory budget store.
    pub budgets: Arc<Mutex<BudgetStore>>,
}

impl FromRef<AppState> for UpdateBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budgets: state.budgets.clone(),
        }
    }
}

/// The form data for setting the total monthly budget.
#[derive(Debug, Deserialize)]
pub struct MonthlyBudgetForm {
    /// The new total monthly budget in dollars.
    pub amount: f64,
}

/// The form data for setting one category's budget.
#[derive(Debug, Deserialize)]
pub struct CategoryBudgetForm {
    /// The category to update.
    pub category: String,
    /// The new budget for the category in dollars.
    pub amount: f64,
}

/// A route handler that replaces the total monthly budget, redirects to the
/// budgets view on success.
pub async fn set_monthly_budget_endpoint(
    State(state): State<UpdateBudgetState>,
    Form(form): Form<MonthlyBudgetForm>,
) -> Response {
    let mut budgets = match state.budgets.lock() {
        Ok(budgets) => budgets,
        Err(error) => {
            tracing::error!("could not acquire budget store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if let Err(error) = budgets.set_monthly_budget(form.amount) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// A route handler that sets one category's budget via the reallocation
/// engine, redirects to the budgets view on success.
pub async fn set_category_budget_endpoint(
    State(state): State<UpdateBudgetState>,
    Form(form): Form<CategoryBudgetForm>,
) -> Response {
    let mut budgets = match state.budgets.lock() {
        Ok(budgets) => budgets,
        Err(error) => {
            tracing::error!("could not acquire budget store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if let Err(error) = budgets.set_category_budget(&form.category, form.amount) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
