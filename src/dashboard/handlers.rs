//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - State and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{HeadElement, base, format_month_label, link},
    navigation::NavBar,
    timezone::current_local_date,
    transaction::{
        Transaction, TransactionKind, TransactionStore,
        aggregation::{
            Totals, category_breakdown, first_of_month, month_set, next_month, previous_month,
            six_month_trend, totals, week_window,
        },
    },
};

use super::{
    cards::summary_cards,
    charts::{DashboardChart, category_chart, charts_script, charts_view, trend_chart},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The store that holds the transaction collection.
    pub store: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the dashboard page.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Any date within the month to display. Defaults to today.
    pub month: Option<Date>,
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    /// The first day of the displayed month.
    month: Date,
    month_label: String,
    month_totals: Totals,
    week_totals: Totals,
    charts: [DashboardChart; 3],
}

/// Display a page with an overview of the user's data.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let anchor = query.month.unwrap_or(today);

    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    match build_dashboard_data(store.transactions(), anchor, today) {
        Some(data) => Ok(dashboard_view(nav_bar, &data).into_response()),
        None => Ok(dashboard_no_data_view(nav_bar).into_response()),
    }
}

/// Builds all data needed for the dashboard display.
///
/// Returns `None` when the collection is empty, in which case the dashboard
/// shows a prompt to add transactions instead of empty charts.
fn build_dashboard_data(
    transactions: &[Transaction],
    anchor: Date,
    today: Date,
) -> Option<DashboardData> {
    if transactions.is_empty() {
        return None;
    }

    let month = first_of_month(anchor);
    let month_label = format_month_label(month);

    let month_transactions = month_set(transactions, month);
    let month_totals = totals(&month_transactions);
    let week_totals = totals(&week_window(transactions, today));

    let income_shares = category_breakdown(&month_transactions, TransactionKind::Income);
    let expense_shares = category_breakdown(&month_transactions, TransactionKind::Expense);
    let trend = six_month_trend(transactions, month);

    let charts = [
        DashboardChart {
            id: "income-chart",
            options: category_chart("Income", &month_label, &income_shares).to_string(),
        },
        DashboardChart {
            id: "expenses-chart",
            options: category_chart("Expenses", &month_label, &expense_shares).to_string(),
        },
        DashboardChart {
            id: "trend-chart",
            options: trend_chart(&trend).to_string(),
        },
    ];

    Some(DashboardData {
        month,
        month_label,
        month_totals,
        week_totals,
        charts,
    })
}

/// Renders the dashboard page when no transaction data exists.
///
/// Displays a helpful message with a link to add transactions.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Summaries and charts will show up here once you add some
                transactions. Start by " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with month navigation, summary cards, and
/// charts.
fn dashboard_view(nav_bar: NavBar, data: &DashboardData) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (month_navigation(data.month))

            (summary_cards(&data.month_label, data.month_totals, data.week_totals))

            (charts_view(&data.charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(
            "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js".to_owned(),
        ),
        charts_script(&data.charts),
    ];

    base("Dashboard", &scripts, &content)
}

fn month_navigation(month: Date) -> Markup {
    let arrow_style = "px-3 py-1 rounded hover:bg-gray-200 dark:hover:bg-gray-700";

    html!(
        nav class="flex items-center justify-between w-full mb-4" aria-label="Month"
        {
            a href=(dashboard_url(previous_month(month))) class=(arrow_style) rel="prev"
            {
                "\u{2039} "
            }

            h2 class="text-xl font-semibold" { (format_month_label(month)) }

            a href=(dashboard_url(next_month(month))) class=(arrow_style) rel="next"
            {
                " \u{203a}"
            }
        }
    )
}

/// Build the dashboard URL for a month.
fn dashboard_url(month: Date) -> String {
    let query = serde_urlencoded::to_string([("month", month.to_string())])
        .expect("string pairs should always encode");

    format!("{}?{query}", endpoints::DASHBOARD_VIEW)
}
