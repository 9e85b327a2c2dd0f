//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as small fragments that htmx swaps into the
//! `#alert-container` element of the base layout.

use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy)]
pub enum AlertType {
    Success,
    Error,
}

/// An alert message with a headline and optional details.
pub struct Alert<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    pub fn into_html(self) -> Markup {
        let style = match self.alert_type {
            AlertType::Success => {
                "flex items-start gap-3 p-4 mb-4 rounded-lg border \
                text-green-800 border-green-300 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
            }
            AlertType::Error => {
                "flex items-start gap-3 p-4 mb-4 rounded-lg border \
                text-red-800 border-red-300 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            }
        };

        html!(
            div class=(style) role="alert"
            {
                div class="text-sm"
                {
                    span class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        " " (self.details)
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 text-lg leading-none"
                    aria-label="Close"
                    onclick="this.parentElement.remove()"
                {
                    "\u{00d7}"
                }
            }
        )
    }
}
