//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    budget::BudgetStore,
    dashboard::{
        TimePeriod, bucketize, by_category,
        cards::overview_cards,
        charts::{
            CategorySlice, DashboardChart, category_breakdown_chart, charts_script,
            spending_overview_chart,
        },
    },
    endpoints,
    html::{CARD_STYLE, CARD_TITLE_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    timezone::local_date_today,
    transaction::{TransactionStore, transaction_list_view},
};

/// The display color used for expense categories that have no budget entry.
const UNBUDGETED_CATEGORY_COLOR: &str = "#64748b";

/// How many transactions the dashboard's recent-transactions list shows.
const RECENT_TRANSACTION_COUNT: usize = 6;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The in-memory transaction store.
    pub transactions: Arc<Mutex<TransactionStore>>,
    /// The in-memory budget store, used for category display colors.
    pub budgets: Arc<Mutex<BudgetStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            budgets: state.budgets.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters accepted by the dashboard page.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// The time period to display. Defaults to monthly.
    pub period: Option<TimePeriod>,
}

/// Display a page with an overview of the user's spending.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let period = query.period.unwrap_or(TimePeriod::Monthly);

    let today = local_date_today(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let transactions = state
        .transactions
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;
    let budgets = state
        .budgets
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire budget store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let buckets = bucketize(transactions.list(), period, today);
    let total_spent: f64 = buckets.iter().map(|b| b.spent).sum();
    let total_income: f64 = buckets.iter().map(|b| b.income).sum();

    let color_for = |category: &str| {
        budgets
            .state()
            .category_budgets
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.color)
            .unwrap_or(UNBUDGETED_CATEGORY_COLOR)
    };
    let slices: Vec<CategorySlice> = by_category(transactions.list())
        .into_iter()
        .map(|(name, total)| CategorySlice {
            color: color_for(&name),
            name,
            total,
        })
        .collect();

    let charts = [
        DashboardChart {
            id: "spending-overview-chart",
            options: spending_overview_chart(&buckets).to_string(),
        },
        DashboardChart {
            id: "category-breakdown-chart",
            options: category_breakdown_chart(&slices).to_string(),
        },
    ];

    let recent_count = transactions.list().len().min(RECENT_TRANSACTION_COUNT);
    let recent_transactions = &transactions.list()[..recent_count];

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex items-center justify-between flex-wrap gap-4 mb-8"
            {
                div
                {
                    h1 class="text-4xl font-bold mb-2" { "Financial Overview" }
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "Track your spending and income trends"
                    }
                }

                (period_toggle(period))
            }

            (overview_cards(total_income, total_spent))

            div class="grid grid-cols-1 xl:grid-cols-3 gap-4 mb-6"
            {
                div class={ "xl:col-span-2 " (CARD_STYLE) }
                {
                    div id="spending-overview-chart" class="min-h-[380px]" {}
                }

                div class=(CARD_STYLE)
                {
                    div id="category-breakdown-chart" class="min-h-[380px]" {}
                }
            }

            (insights_panel(period))

            div class=(CARD_STYLE)
            {
                h3 class=(CARD_TITLE_STYLE) { "Recent Transactions" }

                @if recent_transactions.is_empty() {
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "Nothing here yet. The charts will fill in once you add
                        some transactions "
                        (link(endpoints::TRANSACTIONS_VIEW, "over here"))
                        "."
                    }
                } @else {
                    (transaction_list_view(recent_transactions, false))
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
    ];

    Ok(base("Dashboard", &scripts, &content).into_response())
}

/// Renders the daily/weekly/monthly toggle as a row of pill links.
fn period_toggle(active: TimePeriod) -> Markup {
    html!(
        div class="flex gap-2 bg-white dark:bg-gray-800 rounded-full p-1
            border border-gray-200 dark:border-gray-700"
        {
            @for period in TimePeriod::ALL {
                @let style = if period == active {
                    "px-4 py-2 rounded-full text-sm font-medium bg-blue-600 text-white shadow-lg"
                } else {
                    "px-4 py-2 rounded-full text-sm font-medium text-gray-600
                    dark:text-gray-400 hover:text-gray-900 dark:hover:text-white"
                };

                a
                    href=(format!("{}?period={}", endpoints::DASHBOARD_VIEW, period.as_query_value()))
                    class=(style)
                {
                    (period.label())
                }
            }
        }
    )
}

/// Renders the insights panel, which loads the generated spending summary
/// over HTMX once the page is in the browser.
fn insights_panel(period: TimePeriod) -> Markup {
    let summary_url = format!(
        "{}?period={}",
        endpoints::SUMMARY_PANEL,
        period.as_query_value()
    );

    html!(
        div class={ "mb-6 " (CARD_STYLE) }
        {
            div class="flex items-start gap-4"
            {
                div class="w-12 h-12 bg-blue-600 rounded-full flex items-center justify-center flex-shrink-0"
                {
                    span class="text-white text-lg" { "✨" }
                }

                div class="flex-1"
                {
                    h3 class="font-bold mb-2" { (period.label()) " Insights" }

                    div
                        id="insights-summary"
                        hx-get=(summary_url)
                        hx-trigger="load"
                        hx-swap="innerHTML"
                    {
                        // Loading skeleton, replaced by the summary text.
                        div class="space-y-2 animate-pulse"
                        {
                            div class="h-4 bg-blue-600/20 rounded-full w-full" {}
                            div class="h-4 bg-blue-600/20 rounded-full w-5/6" {}
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{Query, State},
        http::{Response, StatusCode},
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        budget::BudgetStore,
        dashboard::TimePeriod,
        transaction::{NewTransaction, TransactionKind, TransactionStore},
    };

    use super::{DashboardQuery, DashboardState, get_dashboard_page};

    fn get_test_state(transactions: TransactionStore) -> DashboardState {
        DashboardState {
            transactions: Arc::new(Mutex::new(transactions)),
            budgets: Arc::new(Mutex::new(BudgetStore::new())),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let mut store = TransactionStore::new();
        store
            .add(NewTransaction::new(
                date!(2025 - 10 - 05),
                45.99,
                "Food",
                TransactionKind::Expense,
            ))
            .unwrap();
        let state = get_test_state(store);

        let response = get_dashboard_page(State(state), Query(DashboardQuery { period: None }))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert_chart_exists(&html, "spending-overview-chart");
        assert_chart_exists(&html, "category-breakdown-chart");
    }

    #[tokio::test]
    async fn dashboard_defaults_to_monthly_period() {
        let state = get_test_state(TransactionStore::new());

        let response = get_dashboard_page(State(state), Query(DashboardQuery { period: None }))
            .await
            .unwrap();

        let html = parse_html(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Monthly Insights"));
    }

    #[tokio::test]
    async fn dashboard_honours_period_query() {
        let state = get_test_state(TransactionStore::new());

        let response = get_dashboard_page(
            State(state),
            Query(DashboardQuery {
                period: Some(TimePeriod::Daily),
            }),
        )
        .await
        .unwrap();

        let html = parse_html(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Daily Insights"));
    }

    #[tokio::test]
    async fn insights_panel_loads_summary_over_htmx() {
        let state = get_test_state(TransactionStore::new());

        let response = get_dashboard_page(
            State(state),
            Query(DashboardQuery {
                period: Some(TimePeriod::Weekly),
            }),
        )
        .await
        .unwrap();

        let html = parse_html(response).await;
        let selector =
            Selector::parse("[hx-get='/dashboard/summary?period=weekly']").unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "insights panel should request the weekly summary"
        );
    }

    #[tokio::test]
    async fn recent_transactions_are_capped_at_six() {
        let mut store = TransactionStore::new();
        for i in 0..10 {
            store
                .add(NewTransaction::new(
                    date!(2025 - 10 - 05),
                    i as f64 + 1.0,
                    "Food",
                    TransactionKind::Expense,
                ))
                .unwrap();
        }
        let state = get_test_state(store);

        let response = get_dashboard_page(State(state), Query(DashboardQuery { period: None }))
            .await
            .unwrap();

        let html = parse_html(response).await;
        let selector = Selector::parse(".transaction-row").unwrap();
        assert_eq!(html.select(&selector).count(), 6);
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{}", chart_id)).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{}' not found",
            chart_id
        );
    }
}
