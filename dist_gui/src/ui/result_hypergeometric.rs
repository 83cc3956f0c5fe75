//! Results view for hypergeometric summaries (direct entry and file analysis)

use iced::widget::{column, text, Column, Space};

use dist_core::calculations::hypergeometric::HypergeometricSummary;
use dist_core::format::{format_fixed, format_percent, format_probability};
use dist_core::settings::DisplaySettings;

use crate::ui::shared::chart::ChartView;
use crate::ui::shared::fields::stat_row;
use crate::Message;

/// Render the summary and chart
pub fn view<'a>(
    summary: &'a HypergeometricSummary,
    settings: &DisplaySettings,
    chart: &'a ChartView,
) -> Column<'a, Message> {
    let d = settings.decimals;
    let params = &summary.params;

    let mut probabilities: Column<'a, Message> = column![text("Probabilidades P(X ≤ x)").size(12)].spacing(2);
    for &(x, prob) in &summary.range_probabilities {
        probabilities = probabilities.push(
            text(format!(
                "P(X={}) = {}  ({})",
                x,
                format_probability(prob),
                format_percent(prob, settings.percent_decimals)
            ))
            .size(11),
        );
    }

    column![
        text("Resultados del análisis").size(14),
        Space::new().height(8),
        stat_row("Modelo:", summary.model.to_string()),
        stat_row("Proporción n/N:", format_percent(params.sample_ratio(), 2)),
        Space::new().height(8),
        text("Parámetros").size(12),
        stat_row("Población (N):", params.population.to_string()),
        stat_row("Éxitos en población (K):", params.successes.to_string()),
        stat_row("Tamaño de muestra (n):", params.sample.to_string()),
        stat_row("Éxitos deseados (x):", summary.x.to_string()),
        Space::new().height(8),
        text("Estadísticas").size(12),
        text(format!(
            "P(X={}) = {}  ({})",
            summary.x,
            format_probability(summary.probability_x),
            format_percent(summary.probability_x, settings.percent_decimals)
        ))
        .size(13)
        .color([0.2, 0.6, 0.2]),
        stat_row("Media:", format_fixed(summary.mean, d)),
        stat_row("Desviación estándar:", format_fixed(summary.std_dev, d)),
        stat_row("Mediana:", format_fixed(summary.median, 0)),
        Space::new().height(8),
        text("Forma de la distribución").size(12),
        stat_row("Sesgo:", summary.skew.to_string()),
        stat_row(
            "Curtosis:",
            format!("{} ({})", format_fixed(summary.kurtosis.value, d), summary.kurtosis.kind.name())
        ),
        Space::new().height(12),
        probabilities,
        Space::new().height(15),
        text("Gráfico").size(14),
        Space::new().height(8),
        chart.view(),
    ]
    .spacing(2)
}
