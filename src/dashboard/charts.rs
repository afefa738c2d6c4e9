//! The category breakdown donut chart.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with its HTML container and an inline initialization script, so
//! the chart is redrawn whenever HTMX swaps in fresh dashboard content.

use charming::{
    Chart,
    component::Legend,
    element::{JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};
use rust_decimal::prelude::ToPrimitive;

use crate::{aggregation::CategoryTotal, html::CARD_STYLE};

/// Where the ECharts library is loaded from.
pub(super) const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the "Despesas por Categoria" card.
///
/// Shows an empty state instead of a chart when `breakdown` is empty.
pub(super) fn category_chart_view(breakdown: &[CategoryTotal]) -> Markup {
    html! {
        section class=(CARD_STYLE) id="category-chart"
        {
            @if breakdown.is_empty() {
                div class="py-8 text-center text-gray-500 dark:text-gray-400"
                {
                    p class="mb-2 text-lg font-medium" { "Nenhuma despesa encontrada" }
                    p class="text-sm"
                    {
                        "Adicione algumas despesas para ver o gráfico de categorias."
                    }
                }
            } @else {
                @let chart = DashboardChart {
                    id: "category-breakdown-chart",
                    options: category_breakdown_chart(breakdown).to_string(),
                };

                h2 class="text-xl font-bold" { "Despesas por Categoria" }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Distribuição das suas despesas mensais"
                }

                div id=(chart.id) class="h-[300px] w-full" {}

                (chart_script(&chart))
            }
        }
    }
}

/// Generates the JavaScript that draws `chart` into its container.
///
/// Category names come from saved data, so markup that would end the script
/// element early is escaped inside the options.
fn chart_script(chart: &DashboardChart) -> Markup {
    let options = chart
        .options
        .replace("</", "<\\/")
        .replace("<!--", "\\u003C!--");

    let script = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);
        }})();"#,
        chart.id, options
    );

    html! {
        script { (PreEscaped(script)) }
    }
}

fn category_breakdown_chart(breakdown: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = breakdown
        .iter()
        .map(|total| {
            (
                total.total.to_f64().unwrap_or_default(),
                total.category.as_str(),
            )
        })
        .collect();

    Chart::new()
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom(0))
        .series(
            Pie::new()
                .name("Valor")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return currencyFormatter.format(number);",
    )
}
