//! The JSON endpoint that generates a spending summary for a time period.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState,
    dashboard::{TimePeriod, by_category, current_window},
    html::format_currency,
    timezone::local_date_today,
    transaction::{Transaction, TransactionStore},
};

/// The summary shown when the real one cannot be generated. The panel is
/// never left without text.
pub(crate) const FALLBACK_SUMMARY: &str = "Your spending is on track this period!";

/// The state needed to generate a summary.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The in-memory transaction store.
    pub transactions: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The request body for the summary endpoint.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    /// The time period to summarise.
    #[serde(rename = "timePeriod")]
    pub time_period: TimePeriod,
}

/// The response body of the summary endpoint.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Present when summary generation failed and `summary` holds the
    /// fallback text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The display text. Always safe to show as-is.
    pub summary: String,
}

/// A route handler that generates the spending summary for the requested
/// time period as JSON.
///
/// Failures never propagate to the client as an empty panel: the response
/// degrades to a fixed fallback sentence, with the error noted in the body
/// and logged on the server.
pub async fn generate_summary_endpoint(
    State(state): State<SummaryState>,
    Json(request): Json<SummaryRequest>,
) -> Response {
    match build_summary(&state, request.time_period) {
        Ok(summary) => Json(SummaryResponse {
            error: None,
            summary,
        })
        .into_response(),
        Err(error) => {
            tracing::error!("could not generate summary: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SummaryResponse {
                    error: Some(error),
                    summary: FALLBACK_SUMMARY.to_owned(),
                }),
            )
                .into_response()
        }
    }
}

/// Compute the summary sentence for `period` from the live stores.
///
/// Errors are returned as strings: the caller only ever logs them and falls
/// back to [FALLBACK_SUMMARY].
pub(crate) fn build_summary(state: &SummaryState, period: TimePeriod) -> Result<String, String> {
    let today = local_date_today(&state.local_timezone)
        .ok_or_else(|| format!("invalid timezone {}", state.local_timezone))?;

    let transactions = state
        .transactions
        .lock()
        .map_err(|error| format!("could not acquire transaction store lock: {error}"))?;

    Ok(summary_sentence(transactions.list(), period, today))
}

/// Select the per-period sentence referencing total spent and the top
/// category within the current window.
fn summary_sentence(transactions: &[Transaction], period: TimePeriod, today: Date) -> String {
    let (start, end) = current_window(period, today);
    let in_window: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect();

    let grouped = by_category(&in_window);
    let total_spent: f64 = grouped.iter().map(|(_, total)| total).sum();

    let Some((top_category, top_amount)) = grouped.first() else {
        // Nothing spent in the window; the fallback doubles as the
        // all-quiet message.
        return FALLBACK_SUMMARY.to_owned();
    };

    match period {
        TimePeriod::Daily => format!(
            "You spent {} today. Your biggest expense was {} at {}. \
            Keep an eye on discretionary spending!",
            format_currency(total_spent),
            top_category,
            format_currency(*top_amount),
        ),
        TimePeriod::Weekly => format!(
            "This week's total: {}. {} was your top category. \
            Consider setting spending limits to stay on budget.",
            format_currency(total_spent),
            top_category,
        ),
        TimePeriod::Monthly => format!(
            "Monthly overview: {} spent. {} represents your largest expense \
            category at {}. Great tracking progress!",
            format_currency(total_spent),
            top_category,
            format_currency(*top_amount),
        ),
    }
}
