//! The transactions page: an add-transaction form and the full ledger.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, CARD_TITLE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, format_currency,
    },
    navigation::NavBar,
    timezone::local_date_today,
    transaction::{Transaction, TransactionKind, TransactionStore},
};

/// The categories offered by the transaction form, matching the seeded
/// budget categories.
const FORM_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Housing",
    "Other",
];

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The in-memory transaction store.
    pub transactions: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the transactions page with the add-transaction form and the full
/// newest-first ledger.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
) -> Result<Response, Error> {
    let today = local_date_today(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let transactions = state
        .transactions
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let form = transaction_form_view(&today.to_string());
    let list = html!(
        div class=(CARD_STYLE)
        {
            h3 class=(CARD_TITLE_STYLE) { "All Transactions" }
            (transaction_list_view(transactions.list(), true))
        }
    );

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="mb-8"
            {
                h1 class="text-4xl font-bold mb-2" { "Transactions" }
                p class="text-gray-600 dark:text-gray-400" { "View and manage all your transactions" }
            }

            div class="flex flex-col gap-6 max-w-4xl"
            {
                (form)
                (list)
            }
        }
    );

    Ok(base("Transactions", &[], &content).into_response())
}

/// Renders the add-transaction form.
///
/// The debt fields only apply to debt payments and start out collapsed; a
/// checkbox toggles their visibility without any server round trip.
fn transaction_form_view(max_date: &str) -> Markup {
    html!(
        div class=(CARD_STYLE)
        {
            h3 class=(CARD_TITLE_STYLE) { "Add Transaction" }
            p class="text-sm text-gray-600 dark:text-gray-400 mb-4"
            {
                "Manually add a new expense or income"
            }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="flex flex-col gap-4"
            {
                div class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    div
                    {
                        label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                        input
                            type="date"
                            name="date"
                            id="date"
                            value=(max_date)
                            max=(max_date)
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="amount" class=(FORM_LABEL_STYLE) { "Amount ($)" }
                        input
                            type="number"
                            name="amount"
                            id="amount"
                            step="0.01"
                            min="0"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    div
                    {
                        label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                        select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            @for category in FORM_CATEGORIES {
                                option value=(category) { (category) }
                            }
                        }
                    }

                    div
                    {
                        label for="kind" class=(FORM_LABEL_STYLE) { "Type" }
                        select name="kind" id="kind" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="expense" { "Expense" }
                            option value="income" { "Income" }
                        }
                    }
                }

                div
                {
                    label for="notes" class=(FORM_LABEL_STYLE) { "Notes (optional)" }
                    textarea
                        name="notes"
                        id="notes"
                        placeholder="Add any notes about this transaction..."
                        class=(FORM_TEXT_INPUT_STYLE)
                    {}
                }

                details
                {
                    summary class="text-sm text-gray-600 dark:text-gray-400 cursor-pointer"
                    {
                        "Debt payment details"
                    }

                    div class="grid grid-cols-1 md:grid-cols-3 gap-4 mt-4"
                    {
                        div
                        {
                            label for="debt_kind" class=(FORM_LABEL_STYLE) { "Debt type" }
                            select name="debt_kind" id="debt_kind" class=(FORM_TEXT_INPUT_STYLE)
                            {
                                option value="" selected { "Not a debt payment" }
                                option value="credit-card" { "Credit Card" }
                                option value="vehicle" { "Vehicle" }
                                option value="home" { "Home" }
                                option value="personal-loan" { "Personal Loan" }
                            }
                        }

                        div
                        {
                            label for="minimum_payment" class=(FORM_LABEL_STYLE) { "Minimum payment ($)" }
                            input
                                type="number"
                                name="minimum_payment"
                                id="minimum_payment"
                                step="0.01"
                                min="0"
                                class=(FORM_TEXT_INPUT_STYLE);
                        }

                        div
                        {
                            label for="interest_rate" class=(FORM_LABEL_STYLE) { "Interest rate (%)" }
                            input
                                type="number"
                                name="interest_rate"
                                id="interest_rate"
                                step="0.01"
                                min="0"
                                class=(FORM_TEXT_INPUT_STYLE);
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
            }
        }
    )
}

/// Renders a newest-first list of transactions.
///
/// When `deletable` is set, each row gets a delete button that removes the
/// row in place via HTMX. Shows an empty-state message when there are no
/// transactions.
pub(crate) fn transaction_list_view(transactions: &[Transaction], deletable: bool) -> Markup {
    if transactions.is_empty() {
        return html!(
            p class="text-center text-gray-600 dark:text-gray-400 py-8"
            {
                "No transactions yet. Add one to get started."
            }
        );
    }

    html!(
        div class="flex flex-col gap-3"
        {
            @for transaction in transactions {
                (transaction_row(transaction, deletable))
            }
        }
    )
}

fn transaction_row(transaction: &Transaction, deletable: bool) -> Markup {
    let is_income = transaction.kind == TransactionKind::Income;
    let icon_style = if is_income {
        "w-10 h-10 rounded-full flex items-center justify-center bg-emerald-100 dark:bg-emerald-900/30"
    } else {
        "w-10 h-10 rounded-full flex items-center justify-center bg-rose-100 dark:bg-rose-900/30"
    };
    let amount_style = if is_income {
        "text-lg font-bold text-emerald-600 dark:text-emerald-400"
    } else {
        "text-lg font-bold text-rose-600 dark:text-rose-400"
    };
    let sign = if is_income { "+" } else { "-" };
    let description = if transaction.notes.is_empty() {
        &transaction.category
    } else {
        &transaction.notes
    };
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, &transaction.id);

    html!(
        div class="transaction-row flex items-center justify-between p-4 rounded-2xl
            bg-gray-50 dark:bg-gray-700/50 border border-gray-200/50 dark:border-gray-600/50"
        {
            div class="flex items-center gap-4 flex-1"
            {
                div class=(icon_style)
                {
                    span { @if is_income { "📈" } @else { "📉" } }
                }

                div
                {
                    p class="font-medium" { (description) }
                    p class="text-xs text-gray-600 dark:text-gray-400"
                    {
                        (transaction.category) " • " (transaction.date)

                        @if let Some(debt_details) = &transaction.debt_details {
                            " • " (debt_details.debt_kind.label())
                        }
                    }
                }
            }

            div class="flex items-center gap-4"
            {
                span class=(amount_style) { (sign) (format_currency(transaction.amount)) }

                @if deletable {
                    button
                        type="button"
                        class=(BUTTON_DELETE_STYLE)
                        hx-delete=(delete_url)
                        hx-target="closest .transaction-row"
                        hx-swap="outerHTML"
                        aria-label=(format!("Delete {description}"))
                    {
                        "🗑"
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response, http::StatusCode};
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::transaction::{NewTransaction, TransactionKind, TransactionStore};

    use super::{TransactionsPageState, get_transactions_page, transaction_list_view};

    fn get_test_state(store: TransactionStore) -> TransactionsPageState {
        TransactionsPageState {
            transactions: Arc::new(Mutex::new(store)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn transactions_page_renders_form_and_list() {
        let mut store = TransactionStore::new();
        store
            .add(
                NewTransaction::new(
                    date!(2025 - 10 - 05),
                    45.99,
                    "Food",
                    TransactionKind::Expense,
                )
                .notes("Grocery Store"),
            )
            .unwrap();
        let state = get_test_state(store);

        let response = get_transactions_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert_valid_html(&html);

        let form_selector = Selector::parse("form[hx-post='/api/transactions']").unwrap();
        assert!(
            html.select(&form_selector).next().is_some(),
            "add-transaction form not found"
        );

        let row_selector = Selector::parse(".transaction-row").unwrap();
        assert_eq!(html.select(&row_selector).count(), 1);
    }

    #[tokio::test]
    async fn empty_store_shows_empty_state() {
        let state = get_test_state(TransactionStore::new());

        let response = get_transactions_page(State(state)).await.unwrap();

        let html = parse_html(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No transactions yet"));
    }

    #[test]
    fn list_rows_include_delete_buttons_when_deletable() {
        let mut store = TransactionStore::new();
        let transaction = store
            .add(NewTransaction::new(
                date!(2025 - 10 - 05),
                5.0,
                "Food",
                TransactionKind::Expense,
            ))
            .unwrap();

        let markup = transaction_list_view(store.list(), true);
        let html = Html::parse_fragment(&markup.into_string());

        let selector =
            Selector::parse(&format!("[hx-delete='/api/transactions/{}']", transaction.id))
                .unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "delete button not found"
        );
    }

    #[test]
    fn list_rows_omit_delete_buttons_when_not_deletable() {
        let mut store = TransactionStore::new();
        store
            .add(NewTransaction::new(
                date!(2025 - 10 - 05),
                5.0,
                "Food",
                TransactionKind::Expense,
            ))
            .unwrap();

        let markup = transaction_list_view(store.list(), false);
        let html = Html::parse_fragment(&markup.into_string());

        let selector = Selector::parse("button[hx-delete]").unwrap();
        assert!(html.select(&selector).next().is_none());
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
}
