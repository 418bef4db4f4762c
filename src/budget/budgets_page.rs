//! The budgets page: the total monthly budget and per-category budget cards.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    budget::{BudgetStore, CategoryBudget},
    dashboard::by_category,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::TransactionStore,
};

/// The state needed for the budgets page.
#[derive(Debug, Clone)]
pub struct BudgetsPageState {
    /// The in-memory transaction store, used to compute spending per category.
    pub transactions: Arc<Mutex<TransactionStore>>,
    /// The in-memory budget store.
    pub budgets: Arc<Mutex<BudgetStore>>,
}

impl FromRef<AppState> for BudgetsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            budgets: state.budgets.clone(),
        }
    }
}

/// Display the budgets page.
///
/// Non-essential categories are the shock absorbers for budget changes, so
/// each card notes whether its category is essential, and the page explains
/// where edited amounts are drawn from.
pub async fn get_budgets_page(State(state): State<BudgetsPageState>) -> Result<Response, Error> {
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

    let spent_by_category = by_category(transactions.list());
    let spent_for = |category: &str| {
        spent_by_category
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
            .unwrap_or(0.0)
    };

    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();
    let budget_state = budgets.state();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="mb-8"
            {
                h1 class="text-4xl font-bold mb-2" { "Budgets" }
                p class="text-gray-600 dark:text-gray-400"
                {
                    "Set a total monthly budget and fine-tune each category. \
                    Changes to a category are balanced against the non-essential \
                    categories (Entertainment, Transport, Other)."
                }
            }

            (monthly_budget_view(budget_state.monthly_budget))

            div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4 mt-6"
            {
                @for category_budget in &budget_state.category_budgets {
                    (category_card(category_budget, spent_for(&category_budget.category)))
                }
            }
        }
    );

    Ok(base("Budgets", &[], &content).into_response())
}

fn monthly_budget_view(monthly_budget: f64) -> Markup {
    html!(
        div class=(CARD_STYLE)
        {
            h3 class=(CARD_TITLE_STYLE) { "Monthly Budget" }

            div class="flex items-end justify-between gap-6 flex-wrap"
            {
                p class="text-3xl font-bold" { (format_currency(monthly_budget)) }

                form
                    hx-post=(endpoints::MONTHLY_BUDGET_API)
                    hx-target-error="#alert-container"
                    class="flex items-end gap-2"
                {
                    div
                    {
                        label for="monthly-amount" class=(FORM_LABEL_STYLE) { "New total ($)" }
                        input
                            type="number"
                            name="amount"
                            id="monthly-amount"
                            step="0.01"
                            min="0"
                            value=(monthly_budget)
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
                }
            }
        }
    )
}

/// Renders a single category card with spent-vs-budget progress and an
/// inline edit form.
fn category_card(category_budget: &CategoryBudget, spent: f64) -> Markup {
    let is_under_budget = spent <= category_budget.budget;
    let percent_used = if category_budget.budget > 0.0 {
        (spent / category_budget.budget) * 100.0
    } else {
        0.0
    };
    let remaining = (category_budget.budget - spent).max(0.0);

    let status_style = if is_under_budget {
        "font-bold text-teal-600 dark:text-teal-400"
    } else {
        "font-bold text-orange-600 dark:text-orange-400"
    };
    let bar_style = if is_under_budget {
        "h-full rounded-full bg-teal-500"
    } else {
        "h-full rounded-full bg-orange-500"
    };
    let input_id = format!("budget-{}", category_budget.category.to_lowercase());

    html!(
        div class=(CARD_STYLE)
        {
            div class="flex items-start justify-between mb-4"
            {
                div
                {
                    p class="text-sm text-gray-600 dark:text-gray-400 font-medium mb-1" { "Category" }
                    h3 class="text-xl font-bold" { (category_budget.category) }
                }

                div class="flex items-center gap-2"
                {
                    @if category_budget.is_essential {
                        span class="text-xs font-semibold px-2.5 py-0.5 rounded-full
                            bg-blue-100 text-blue-800 dark:bg-blue-900 dark:text-blue-300"
                        {
                            "Essential"
                        }
                    }

                    div
                        class="w-3 h-3 rounded-full"
                        style=(format!("background-color: {}", category_budget.color))
                    {}
                }
            }

            div class="mb-2 flex items-center justify-between text-sm"
            {
                span class="text-gray-600 dark:text-gray-400" { "Spent vs Budget" }
                span class=(status_style) { (format!("{percent_used:.0}%")) }
            }

            div class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-2 overflow-hidden mb-4"
            {
                div class=(bar_style) style=(format!("width: {:.0}%", percent_used.min(100.0))) {}
            }

            div class="grid grid-cols-3 gap-2 text-sm mb-4"
            {
                div
                {
                    p class="text-gray-600 dark:text-gray-400 text-xs" { "Spent" }
                    p class="font-bold" { (format_currency(spent)) }
                }
                div
                {
                    p class="text-gray-600 dark:text-gray-400 text-xs" { "Budget" }
                    p class="font-bold" { (format_currency(category_budget.budget)) }
                }
                div
                {
                    p class="text-gray-600 dark:text-gray-400 text-xs" { "Remaining" }
                    p class=(status_style) { (format_currency(remaining)) }
                }
            }

            form
                hx-post=(endpoints::CATEGORY_BUDGET_API)
                hx-target-error="#alert-container"
                class="flex items-end gap-2"
            {
                input type="hidden" name="category" value=(category_budget.category);

                div class="flex-1"
                {
                    label for=(input_id) class=(FORM_LABEL_STYLE) { "New budget ($)" }
                    input
                        type="number"
                        name="amount"
                        id=(input_id)
                        step="0.01"
                        min="0"
                        value=(category_budget.budget)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
            }
        }
    )
}
