//! Spendwise is a web app for tracking day-to-day spending against a set of
//! per-category budgets.
//!
//! This library provides a REST API that directly serves HTML pages. All
//! application state lives in process memory for the lifetime of the server;
//! there is no database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod budget;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pages;
mod routing;
mod summary;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use budget::BudgetStore;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use timezone::local_date_today;
pub use transaction::TransactionStore;

use crate::{
    alert::AlertView,
    internal_server_error::{InternalServerErrorPageTemplate, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction or budget amount was negative, NaN or infinite.
    ///
    /// Amounts are always non-negative; the direction of a transaction is
    /// carried by its kind, not by the sign of the amount.
    #[error("{0} is not a valid amount, expected a non-negative number")]
    InvalidAmount(f64),

    /// An empty string was used as a transaction category.
    #[error("transaction category cannot be empty")]
    EmptyCategory,

    /// The named category does not exist in the budget store.
    ///
    /// The category set is fixed when the store is created, so this means
    /// the client sent a name that was never seeded.
    #[error("no budget exists for the category \"{0}\"")]
    CategoryNotFound(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the lock on one of the in-memory stores.
    ///
    /// This only happens if another thread panicked while holding the lock.
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => {
                render_internal_server_error(InternalServerErrorPageTemplate {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                })
            }
            Error::StoreLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidAmount(amount) => AlertView::error(
                "Invalid amount",
                &format!("{amount} is not a valid amount. Enter a non-negative number."),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::EmptyCategory => AlertView::error(
                "Missing category",
                "Choose a category for the transaction and try again.",
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::CategoryNotFound(category) => AlertView::error(
                "Unknown category",
                &format!(
                    "There is no budget for the category \"{category}\". \
                    Try refreshing the page to get the current list of categories."
                ),
            )
            .into_response(StatusCode::NOT_FOUND),
            _ => AlertView::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
