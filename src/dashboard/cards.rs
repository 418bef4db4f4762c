//! The income/spent/balance stat cards shown above the overview chart.

use maud::{Markup, html};

use crate::html::format_currency;

/// Renders the three stat cards for the displayed buckets: total income,
/// total spent and the resulting balance.
///
/// The balance card changes color depending on whether the balance is
/// positive or negative over the displayed window.
pub(super) fn overview_cards(total_income: f64, total_spent: f64) -> Markup {
    let balance = total_income - total_spent;

    let balance_container_style = if balance >= 0.0 {
        "rounded-2xl p-4 border bg-teal-50 border-teal-200/50 dark:bg-teal-950/30 dark:border-teal-800/50"
    } else {
        "rounded-2xl p-4 border bg-amber-50 border-amber-200/50 dark:bg-amber-950/30 dark:border-amber-800/50"
    };
    let balance_value_style = if balance >= 0.0 {
        "text-2xl font-bold text-teal-600 dark:text-teal-400"
    } else {
        "text-2xl font-bold text-amber-600 dark:text-amber-400"
    };

    html!(
        div class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-6"
        {
            div class="rounded-2xl p-4 border bg-emerald-50 border-emerald-200/50
                dark:bg-emerald-950/30 dark:border-emerald-800/50"
            {
                p class="text-xs font-medium text-gray-600 dark:text-gray-400 mb-1" { "Income" }
                p class="text-2xl font-bold text-emerald-600 dark:text-emerald-400"
                {
                    (format_currency(total_income))
                }
            }

            div class="rounded-2xl p-4 border bg-rose-50 border-rose-200/50
                dark:bg-rose-950/30 dark:border-rose-800/50"
            {
                p class="text-xs font-medium text-gray-600 dark:text-gray-400 mb-1" { "Spent" }
                p class="text-2xl font-bold text-rose-600 dark:text-rose-400"
                {
                    (format_currency(total_spent))
                }
            }

            div class=(balance_container_style)
            {
                p class="text-xs font-medium text-gray-600 dark:text-gray-400 mb-1" { "Balance" }
                p class=(balance_value_style) { (format_currency(balance)) }
            }
        }
    )
}
