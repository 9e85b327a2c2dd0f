//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for the month's
//! data:
//! - **Income / Expenses by Category**: doughnut charts of each side of the
//!   ledger for the displayed month
//! - **Six-Month Trend**: income and expense bars with a net line for the
//!   six months ending at the displayed month
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::{HeadElement, month_abbrev},
    transaction::aggregation::{CategoryShare, MonthTotals},
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A doughnut chart of one side of the ledger, one slice per category.
///
/// `shares` may be empty (no breakdown for the month); the chart then shows
/// only its title, which reads better than a lone grey disc.
pub(super) fn category_chart(title: &str, month_label: &str, shares: &[CategoryShare]) -> Chart {
    let data: Vec<(f64, &str)> = shares
        .iter()
        .map(|share| (share.total.as_dollars(), share.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text(title).subtext(month_label))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name(title)
                .radius(vec!["45%", "70%"])
                .avoid_label_overlap(false)
                .data(data),
        )
}

/// Income and expense bars with a net line, one bucket per month.
pub(super) fn trend_chart(trend: &[MonthTotals]) -> Chart {
    let labels: Vec<String> = trend
        .iter()
        .map(|bucket| month_abbrev(bucket.month.month()).to_owned())
        .collect();
    let income: Vec<f64> = trend
        .iter()
        .map(|bucket| bucket.totals.income.as_dollars())
        .collect();
    let expenses: Vec<f64> = trend
        .iter()
        .map(|bucket| bucket.totals.expenses.as_dollars())
        .collect();
    let net: Vec<f64> = trend
        .iter()
        .map(|bucket| bucket.totals.balance().as_dollars())
        .collect();

    Chart::new()
        .title(Title::new().text("Trend").subtext("Last six months"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%").right("4%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Income").data(income))
        .series(Bar::new().name("Expenses").data(expenses))
        .series(Line::new().name("Net").data(net))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
