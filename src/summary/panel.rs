//! The HTML fragment the dashboard's insights panel loads over HTMX.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{
    dashboard::TimePeriod,
    summary::endpoint::{FALLBACK_SUMMARY, SummaryState, build_summary},
};

/// The query parameters accepted by the summary panel fragment.
#[derive(Debug, Deserialize)]
pub struct SummaryPanelQuery {
    /// The time period to summarise. Defaults to monthly.
    pub period: Option<TimePeriod>,
}

/// A route handler that renders the spending summary as an HTML fragment.
///
/// The panel always gets text: if summary generation fails the fallback
/// sentence is rendered instead, and the failure is logged.
pub async fn get_summary_panel(
    State(state): State<SummaryState>,
    Query(query): Query<SummaryPanelQuery>,
) -> Response {
    let period = query.period.unwrap_or(TimePeriod::Monthly);

    let summary = build_summary(&state, period).unwrap_or_else(|error| {
        tracing::error!("could not generate summary for insights panel: {error}");
        FALLBACK_SUMMARY.to_owned()
    });

    html!(
        p class="text-gray-600 dark:text-gray-400 leading-relaxed text-sm"
        {
            (summary)
        }
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };

    use crate::{
        dashboard::TimePeriod,
        summary::endpoint::{FALLBACK_SUMMARY, SummaryState},
        transaction::{NewTransaction, TransactionKind, TransactionStore},
    };

    use super::{SummaryPanelQuery, get_summary_panel};

    async fn response_text(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8_lossy(&body).to_string()
    }

    #[tokio::test]
    async fn panel_renders_summary_text() {
        // The panel summarises the current window, so the test data must be
        // dated today.
        let mut store = TransactionStore::new();
        store
            .add(NewTransaction::new(
                time::OffsetDateTime::now_utc().date(),
                200.0,
                "Housing",
                TransactionKind::Expense,
            ))
            .unwrap();
        let state = SummaryState {
            transactions: Arc::new(Mutex::new(store)),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_summary_panel(
            State(state),
            Query(SummaryPanelQuery {
                period: Some(TimePeriod::Monthly),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let text = response_text(response).await;
        assert!(text.contains("Housing"), "summary text missing: {text}");
    }

    #[tokio::test]
    async fn panel_falls_back_when_generation_fails() {
        let state = SummaryState {
            transactions: Arc::new(Mutex::new(TransactionStore::new())),
            local_timezone: "Atlantis/Capital".to_owned(),
        };

        let response = get_summary_panel(State(state), Query(SummaryPanelQuery { period: None })).await;

        // The panel never surfaces the failure to the user.
        assert_eq!(response.status(), StatusCode::OK);
        let text = response_text(response).await;
        assert!(text.contains(FALLBACK_SUMMARY));
    }
}
