//! Placeholder pages for features that are not built yet.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// Display the goals page.
pub async fn get_goals_page() -> Response {
    placeholder_page(
        endpoints::GOALS_VIEW,
        "Financial Goals",
        "Set and track your financial goals",
        "Your Goals",
        "Coming soon - Goal tracking and progress visualization will be available here",
    )
}

/// Display the insights page.
pub async fn get_insights_page() -> Response {
    placeholder_page(
        endpoints::INSIGHTS_VIEW,
        "Insights",
        "Financial insights and recommendations",
        "Financial Insights",
        "Coming soon - Advanced insights and recommendations will be available here",
    )
}

/// Display the settings page.
pub async fn get_settings_page() -> Response {
    placeholder_page(
        endpoints::SETTINGS_VIEW,
        "Settings",
        "Manage your account and preferences",
        "Account Settings",
        "Coming soon - Account settings and preferences will be available here",
    )
}

fn placeholder_page(
    active_endpoint: &str,
    title: &str,
    subtitle: &str,
    card_title: &str,
    card_body: &str,
) -> Response {
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content: Markup = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="mb-8"
            {
                h1 class="text-4xl font-bold mb-2" { (title) }
                p class="text-gray-600 dark:text-gray-400" { (subtitle) }
            }

            div class=(CARD_STYLE)
            {
                h3 class="text-lg font-bold mb-2" { (card_title) }
                p class="text-gray-600 dark:text-gray-400" { (card_body) }
            }
        }
    );

    base(title, &[], &content).into_response()
}
