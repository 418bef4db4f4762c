//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    budget::{get_budgets_page, set_category_budget_endpoint, set_monthly_budget_endpoint},
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    pages::{get_goals_page, get_insights_page, get_settings_page},
    summary::{generate_summary_endpoint, get_summary_panel},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::SUMMARY_PANEL, get(get_summary_panel))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::BUDGETS_VIEW, get(get_budgets_page))
        .route(endpoints::GOALS_VIEW, get(get_goals_page))
        .route(endpoints::INSIGHTS_VIEW, get(get_insights_page))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::MONTHLY_BUDGET_API,
            post(set_monthly_budget_endpoint),
        )
        .route(
            endpoints::CATEGORY_BUDGET_API,
            post(set_category_budget_endpoint),
        )
        .route(endpoints::SUMMARY_API, post(generate_summary_endpoint))
        .route(endpoints::COFFEE, get(get_coffee));

    view_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{AppState, BudgetStore, TransactionStore, build_router};

    fn get_test_server() -> TestServer {
        let state = AppState::new(TransactionStore::new(), BudgetStore::new(), "Etc/UTC");
        let app = build_router(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn summary_api_round_trips_json() {
        let server = get_test_server();

        let response = server
            .post("/api/summary")
            .json(&json!({ "timePeriod": "monthly" }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert!(body["summary"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_renders_not_found_page() {
        let server = get_test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }

    #[tokio::test]
    async fn coffee_route_is_a_teapot() {
        let server = get_test_server();

        let response = server.get("/api/coffee").await;

        assert_eq!(response.status_code(), 418);
    }

    #[tokio::test]
    async fn dashboard_page_is_served() {
        let server = get_test_server();

        let response = server.get("/dashboard").await;

        response.assert_status_ok();
        assert!(response.text().contains("Financial Overview"));
    }
}
