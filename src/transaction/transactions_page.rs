//! Defines the route handler for the page that displays transactions as
//! day-grouped lists.

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
    html::{
        AMOUNT_NEGATIVE_STYLE, AMOUNT_POSITIVE_STYLE, BADGE_STYLE, BUTTON_DELETE_STYLE,
        PAGE_CONTAINER_STYLE, base, format_currency, format_day_heading, format_month_label, link,
    },
    navigation::NavBar,
    timezone::current_local_date,
};

use super::{
    aggregation::{
        DayGroup, Totals, first_of_month, group_by_date, month_set, next_month, previous_month,
        totals,
    },
    core::{Frequency, Transaction, TransactionKind},
    store::TransactionStore,
};

/// The tabs that select which slice of the month's transactions to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionTab {
    /// Every transaction relevant to the month.
    #[default]
    All,
    /// One-time transactions dated within the month.
    Daily,
    /// Monthly-recurring transactions.
    Monthly,
}

impl TransactionTab {
    const ALL_TABS: [TransactionTab; 3] = [Self::All, Self::Daily, Self::Monthly];

    fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
        }
    }

    fn empty_state_message(self) -> &'static str {
        match self {
            Self::All => "No transactions yet",
            Self::Daily => "No daily expenses yet",
            Self::Monthly => "No monthly recurring transactions yet",
        }
    }
}

/// The query parameters for the transactions page.
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// Any date within the month to display. Defaults to today.
    pub month: Option<Date>,
    /// The tab to display. Defaults to [TransactionTab::All].
    pub tab: Option<TransactionTab>,
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The store that holds the transaction collection.
    pub store: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

struct TransactionsViewModel<'a> {
    /// The first day of the displayed month.
    month: Date,
    /// Today in the configured timezone, for relative day headings.
    today: Date,
    /// The selected tab.
    tab: TransactionTab,
    /// Income and expense sums for the tab's transactions.
    summary: Totals,
    /// The tab's transactions grouped per day, newest day first.
    groups: Vec<DayGroup<'a>>,
}

/// Render an overview of the user's transactions.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let anchor = query.month.unwrap_or(today);
    let tab = query.tab.unwrap_or_default();

    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let model = build_transactions_view_model(store.transactions(), anchor, tab, today);

    Ok(transactions_view(&model).into_response())
}

fn build_transactions_view_model(
    transactions: &[Transaction],
    anchor: Date,
    tab: TransactionTab,
    today: Date,
) -> TransactionsViewModel<'_> {
    let subset: Vec<&Transaction> = match tab {
        TransactionTab::All => month_set(transactions, anchor),
        TransactionTab::Daily => month_set(transactions, anchor)
            .into_iter()
            .filter(|transaction| transaction.frequency == Frequency::Once)
            .collect(),
        TransactionTab::Monthly => transactions
            .iter()
            .filter(|transaction| transaction.frequency == Frequency::Monthly)
            .collect(),
    };

    TransactionsViewModel {
        month: first_of_month(anchor),
        today,
        tab,
        summary: totals(&subset),
        groups: group_by_date(&subset),
    }
}

/// Build the transactions page URL for a month and tab.
fn transactions_url(month: Date, tab: TransactionTab) -> String {
    let query = serde_urlencoded::to_string([
        ("month", month.to_string()),
        ("tab", tab.as_query_value().to_owned()),
    ])
    .expect("string pairs should always encode");

    format!("{}?{query}", endpoints::TRANSACTIONS_VIEW)
}

fn transactions_view(model: &TransactionsViewModel) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-md"}
        {
            (month_navigation(model.month, model.tab))

            (tab_navigation(model.month, model.tab))

            (summary_line(model.tab, model.summary))

            @if model.groups.is_empty() {
                div class="py-12 text-center text-gray-500 dark:text-gray-400"
                {
                    p { (model.tab.empty_state_message()) }
                    p class="mt-2"
                    {
                        "Add one " (link(endpoints::NEW_TRANSACTION_VIEW, "here")) "."
                    }
                }
            } @else {
                div class="w-full flex flex-col gap-6"
                {
                    @for group in &model.groups {
                        (day_group_view(group, model.today))
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

fn month_navigation(month: Date, tab: TransactionTab) -> Markup {
    let prev_href = transactions_url(previous_month(month), tab);
    let next_href = transactions_url(next_month(month), tab);
    let arrow_style = "px-3 py-1 rounded hover:bg-gray-200 dark:hover:bg-gray-700";

    html!(
        nav class="flex items-center justify-between w-full mb-4" aria-label="Month"
        {
            a href=(prev_href) class=(arrow_style) rel="prev" { "\u{2039} " }

            h2 class="text-xl font-semibold" { (format_month_label(month)) }

            a href=(next_href) class=(arrow_style) rel="next" { " \u{203a}" }
        }
    )
}

fn tab_navigation(month: Date, active: TransactionTab) -> Markup {
    html!(
        nav class="flex gap-2 mb-4" aria-label="Tabs"
        {
            @for tab in TransactionTab::ALL_TABS {
                @let style = if tab == active {
                    "px-4 py-2 rounded bg-blue-600 text-white"
                } else {
                    "px-4 py-2 rounded bg-gray-200 text-gray-700 hover:bg-gray-300 \
                    dark:bg-gray-700 dark:text-gray-200 dark:hover:bg-gray-600"
                };

                a
                    href=(transactions_url(month, tab))
                    class=(style)
                    aria-current=[(tab == active).then_some("page")]
                {
                    (tab.label())
                }
            }
        }
    )
}

fn summary_line(tab: TransactionTab, summary: Totals) -> Markup {
    if tab == TransactionTab::All {
        return html!();
    }

    html!(
        p class="w-full mb-4 text-sm text-gray-600 dark:text-gray-400"
        {
            "Income: "
            span class=(AMOUNT_POSITIVE_STYLE) { (format_currency(summary.income)) }
            " | Expenses: "
            span class=(AMOUNT_NEGATIVE_STYLE) { (format_currency(summary.expenses)) }
        }
    )
}

fn day_group_view(group: &DayGroup, today: Date) -> Markup {
    let day_totals = totals(&group.transactions);

    html!(
        section class="w-full"
        {
            header class="flex items-center justify-between border-b border-gray-200 dark:border-gray-700 pb-1 mb-2"
            {
                h3 class="font-semibold" { (format_day_heading(group.date, today)) }

                div class="text-sm"
                {
                    @if day_totals.income.is_positive() {
                        span class=(AMOUNT_POSITIVE_STYLE)
                        {
                            "+" (format_currency(day_totals.income))
                        }
                    }
                    @if day_totals.expenses.is_positive() {
                        span class={(AMOUNT_NEGATIVE_STYLE) " ml-2"}
                        {
                            "-" (format_currency(day_totals.expenses))
                        }
                    }
                }
            }

            ul class="flex flex-col gap-2"
            {
                @for transaction in &group.transactions {
                    (transaction_row(transaction))
                }
            }
        }
    )
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let amount_style = match transaction.kind {
        TransactionKind::Income => AMOUNT_POSITIVE_STYLE,
        TransactionKind::Expense => AMOUNT_NEGATIVE_STYLE,
    };
    let sign = match transaction.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

    html!(
        li
            class="flex items-center justify-between gap-4 bg-white dark:bg-gray-800 rounded p-3 shadow-sm"
            data-transaction-row="true"
        {
            div class="min-w-0"
            {
                div class="flex items-center gap-2"
                {
                    span class="font-medium" { (transaction.category) }

                    @if transaction.frequency == Frequency::Monthly {
                        span class=(BADGE_STYLE) { "MONTHLY" }
                    }
                }

                @if !transaction.description.is_empty() {
                    p class="text-sm text-gray-500 dark:text-gray-400 truncate"
                    {
                        (transaction.description)
                    }
                }
            }

            span class={(amount_style) " font-semibold whitespace-nowrap"}
            {
                (sign) (format_currency(transaction.amount))
            }

            button
                class=(BUTTON_DELETE_STYLE)
                hx-delete=(delete_url)
                hx-target="closest li"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                hx-confirm="Delete this transaction?"
            {
                "Delete"
            }
        }
    )
}
