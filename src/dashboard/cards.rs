//! Summary cards for the dashboard.
//!
//! Three figures sit above the charts: the month's expenses, the month's
//! balance, and the current week's income, expenses, and net with a trend
//! marker.

use maud::{Markup, html};

use crate::{
    html::{AMOUNT_NEGATIVE_STYLE, AMOUNT_POSITIVE_STYLE, format_currency},
    money::Amount,
    transaction::aggregation::Totals,
};

const CARD_STYLE: &str = "flex flex-col gap-1 bg-white dark:bg-gray-800 rounded-lg shadow p-4";
const CARD_TITLE_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400";
const CARD_FIGURE_STYLE: &str = "text-2xl font-bold";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
fn amount_color_class(amount: Amount) -> &'static str {
    if amount.cents() >= 0 {
        AMOUNT_POSITIVE_STYLE
    } else {
        AMOUNT_NEGATIVE_STYLE
    }
}

/// The trend marker shown next to the weekly net figure.
fn trend_marker(net: Amount) -> (&'static str, &'static str) {
    if net.is_positive() {
        ("\u{2197}", AMOUNT_POSITIVE_STYLE)
    } else if net.cents() < 0 {
        ("\u{2198}", AMOUNT_NEGATIVE_STYLE)
    } else {
        ("\u{2192}", "text-gray-500")
    }
}

/// Renders the row of summary cards for the displayed month and the current
/// week.
pub(super) fn summary_cards(month_label: &str, month: Totals, week: Totals) -> Markup {
    let (marker, marker_style) = trend_marker(week.balance());

    html!(
        section class="w-full grid grid-cols-1 md:grid-cols-3 gap-4 mb-6"
        {
            div class=(CARD_STYLE)
            {
                span class=(CARD_TITLE_STYLE) { "Expenses \u{00b7} " (month_label) }

                span class={(CARD_FIGURE_STYLE) " " (AMOUNT_NEGATIVE_STYLE)}
                {
                    (format_currency(month.expenses))
                }
            }

            div class=(CARD_STYLE)
            {
                span class=(CARD_TITLE_STYLE) { "Balance \u{00b7} " (month_label) }

                span class={(CARD_FIGURE_STYLE) " " (amount_color_class(month.balance()))}
                {
                    (format_currency(month.balance()))
                }
            }

            div class=(CARD_STYLE)
            {
                span class=(CARD_TITLE_STYLE) { "This Week" }

                div class="flex items-baseline gap-2"
                {
                    span class={(CARD_FIGURE_STYLE) " " (amount_color_class(week.balance()))}
                    {
                        (format_currency(week.balance()))
                    }

                    span class={(marker_style) " text-xl"} aria-hidden="true" { (marker) }
                }

                span class="text-sm"
                {
                    span class=(AMOUNT_POSITIVE_STYLE) { "+" (format_currency(week.income)) }
                    " / "
                    span class=(AMOUNT_NEGATIVE_STYLE) { "-" (format_currency(week.expenses)) }
                }
            }
        }
    )
}
