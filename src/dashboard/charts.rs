//! Chart generation for the dashboard.
//!
//! This module creates the ECharts visualizations for spending data:
//! - **Spending Overview**: spent and income per bucket for the selected
//!   time period
//! - **Category Breakdown**: a pie chart of expenses grouped by category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered into an HTML container with JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Label, Tooltip,
        Trigger,
    },
    series::{Line, Pie},
};
use maud::PreEscaped;

use crate::{dashboard::PeriodBucket, html::HeadElement};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// One slice of the category breakdown pie: a category name, its expense
/// total and its display color.
pub(super) struct CategorySlice {
    pub name: String,
    pub total: f64,
    pub color: &'static str,
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates a script that initializes each ECharts instance with dark mode
/// support and responsive resizing.
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

/// The spent/income line chart for the selected time period.
pub(super) fn spending_overview_chart(buckets: &[PeriodBucket]) -> Chart {
    let labels: Vec<String> = buckets.iter().map(|b| b.label.clone()).collect();
    let spent: Vec<f64> = buckets.iter().map(|b| b.spent).collect();
    let income: Vec<f64> = buckets.iter().map(|b| b.income).collect();

    let subtext = match (buckets.first(), buckets.last()) {
        (Some(first), Some(last)) => format!("{} to {}", first.start, last.end),
        _ => String::new(),
    };

    Chart::new()
        .title(Title::new().text("Spending Overview").subtext(subtext))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .legend(Legend::new().left(250).top("1%"))
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Income").data(income))
        .series(Line::new().name("Spent").data(spent))
}

/// The category breakdown pie chart, using each category's display color.
pub(super) fn category_breakdown_chart(slices: &[CategorySlice]) -> Chart {
    let data: Vec<DataPointItem> = slices
        .iter()
        .map(|slice| {
            DataPointItem::new(slice.total)
                .name(slice.name.clone())
                .item_style(ItemStyle::new().color(slice.color))
        })
        .collect();

    Chart::new()
        .title(Title::new().text("Category Breakdown"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").bottom("0%"))
        .series(
            Pie::new()
                .name("Spending")
                .radius("65%")
                .label(Label::new().formatter("{b} {d}%"))
                .data(data),
        )
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

#[cfg(test)]
mod chart_tests {
    use time::macros::date;

    use crate::dashboard::PeriodBucket;

    use super::{CategorySlice, category_breakdown_chart, spending_overview_chart};

    #[test]
    fn overview_chart_options_contain_labels_and_values() {
        let buckets = vec![PeriodBucket {
            label: "Week 1".to_owned(),
            start: date!(2025 - 09 - 07),
            end: date!(2025 - 09 - 13),
            spent: 725.0,
            income: 800.0,
        }];

        let options = spending_overview_chart(&buckets).to_string();

        assert!(options.contains("Week 1"));
        assert!(options.contains("725"));
        assert!(options.contains("800"));
        assert!(options.contains("2025-09-07 to 2025-09-13"));
    }

    #[test]
    fn breakdown_chart_options_contain_category_colors() {
        let slices = vec![
            CategorySlice {
                name: "Housing".to_owned(),
                total: 1200.0,
                color: "#0ea5e9",
            },
            CategorySlice {
                name: "Food".to_owned(),
                total: 450.0,
                color: "#10b981",
            },
        ];

        let options = category_breakdown_chart(&slices).to_string();

        assert!(options.contains("Housing"));
        assert!(options.contains("#0ea5e9"));
        assert!(options.contains("Food"));
    }
}
