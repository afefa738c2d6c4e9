//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTMX out-of-band swaps into the `#alert-container`
//! element of the base page, so any response fragment can carry one.

use maud::{Markup, html};

/// A dismissable notification shown after an action completes or fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action succeeded.
    Success {
        /// Short summary of what happened.
        message: String,
        /// Extra detail shown under the message.
        details: String,
    },
    /// The action failed.
    Error {
        /// Short summary of what went wrong.
        message: String,
        /// How the user can fix the problem.
        details: String,
    },
}

impl Alert {
    /// Render the alert as an out-of-band swap for `#alert-container`.
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (
                "text-green-800 border-green-300 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "text-red-800 border-red-300 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message,
                details,
            ),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class={ "flex items-start justify-between gap-4 p-4 mb-4 text-sm border rounded-lg shadow " (container_style) }
                {
                    div
                    {
                        p class="font-semibold" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Fechar"
                        class="font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}
