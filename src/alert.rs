//! Alert fragments for displaying error and success messages to users.
//!
//! Alerts are rendered into the fixed `#alert-container` element of the page
//! shell via HTMX's `hx-target-error` attribute on forms.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// The kind of alert, which controls the styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlertKind {
    Success,
    Error,
}

/// An alert message with a short title and a longer explanation.
pub(crate) struct AlertView<'a> {
    kind: AlertKind,
    message: &'a str,
    details: &'a str,
}

impl<'a> AlertView<'a> {
    /// Create a new success alert.
    #[allow(dead_code)]
    pub(crate) fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            kind: AlertKind::Success,
            message,
            details,
        }
    }

    /// Create a new error alert.
    pub(crate) fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            kind: AlertKind::Error,
            message,
            details,
        }
    }

    fn into_markup(self) -> Markup {
        let container_style = match self.kind {
            AlertKind::Success => {
                "p-4 mb-4 rounded-2xl border border-green-300 bg-green-50 \
                text-green-800 dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
            }
            AlertKind::Error => {
                "p-4 mb-4 rounded-2xl border border-red-300 bg-red-50 \
                text-red-800 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            }
        };

        html!(
            div class=(container_style) role="alert"
            {
                div class="flex items-center justify-between"
                {
                    h3 class="text-lg font-medium" { (self.message) }

                    button
                        type="button"
                        class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex items-center justify-center h-8 w-8 cursor-pointer"
                        onclick="this.closest('[role=alert]').remove(); document.getElementById('alert-container').classList.add('hidden');"
                        aria-label="Close"
                    {
                        "✕"
                    }
                }

                @if !self.details.is_empty() {
                    div class="mt-2 text-sm" { (self.details) }
                }
            }
        )
    }

    /// Render the alert as a response targeting the page's alert container.
    pub(crate) fn into_response(self, status_code: StatusCode) -> Response {
        let markup = html!(
            div hx-swap-oob="innerHTML:#alert-container"
            {
                (self.into_markup())
            }

            script
            {
                "document.getElementById('alert-container').classList.remove('hidden');"
            }
        );

        (status_code, markup).into_response()
    }
}
