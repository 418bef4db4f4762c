//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with charts and the spending summary.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing and adding transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for viewing and editing category budgets.
pub const BUDGETS_VIEW: &str = "/budgets";
/// The page for savings and spending goals.
pub const GOALS_VIEW: &str = "/goals";
/// The page for spending insights.
pub const INSIGHTS_VIEW: &str = "/insights";
/// The page for account settings.
pub const SETTINGS_VIEW: &str = "/settings";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a single transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to set the total monthly budget.
pub const MONTHLY_BUDGET_API: &str = "/api/budgets/monthly";
/// The route to set one category's budget.
pub const CATEGORY_BUDGET_API: &str = "/api/budgets/category";
/// The route to generate a spending summary as JSON.
pub const SUMMARY_API: &str = "/api/summary";
/// The route for the HTML fragment that displays the spending summary.
pub const SUMMARY_PANEL: &str = "/dashboard/summary";
/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::BUDGETS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::GOALS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INSIGHTS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SETTINGS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::MONTHLY_BUDGET_API);
        assert_endpoint_is_valid_uri(endpoints::CATEGORY_BUDGET_API);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY_API);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY_PANEL);
        assert_endpoint_is_valid_uri(endpoints::COFFEE);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::DELETE_TRANSACTION, "txn-42");

        assert_eq!(formatted_path, "/api/transactions/txn-42");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", "txn-1");

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", "txn-1");

        assert_eq!(formatted_path, "/hello/txn-1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
