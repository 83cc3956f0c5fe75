//! Results view for binomial calculations
//!
//! Shows:
//! - Population type and correction factor
//! - Mean, variance, standard deviation, coefficient of variation, mode
//! - Skewness and kurtosis with their interpretation
//! - P(X = x) for every requested x
//! - The probability chart

use iced::widget::{column, text, Column, Space};

use dist_core::calculations::binomial::BinomialResult;
use dist_core::format::{
    coefficient_of_variation_label, format_fixed, format_percent, format_probability, mode_label, population_label,
};
use dist_core::settings::DisplaySettings;

use crate::ui::shared::chart::ChartView;
use crate::ui::shared::fields::stat_row;
use crate::Message;

/// Render the binomial results and chart
pub fn view<'a>(result: &'a BinomialResult, settings: &DisplaySettings, chart: &'a ChartView) -> Column<'a, Message> {
    view_statistics(result, settings)
        .push(Space::new().height(12))
        .push(view_probabilities(result, settings))
        .push(Space::new().height(15))
        .push(text("Gráfico").size(14))
        .push(Space::new().height(8))
        .push(chart.view())
}

fn view_statistics<'a>(result: &'a BinomialResult, settings: &DisplaySettings) -> Column<'a, Message> {
    let d = settings.decimals;
    let params = &result.params;

    let population = match result.correction_factor {
        Some(fpc) => column![
            stat_row("Población:", population_label(result)),
            stat_row("Factor de corrección:", format_fixed(fpc, 6)),
        ],
        None => column![stat_row("Población:", population_label(result))],
    };

    let variance_label = if result.correction_factor.is_some() {
        "Varianza (con FPC):"
    } else {
        "Varianza:"
    };

    column![
        text("Resultados del cálculo").size(14),
        Space::new().height(8),
        population.spacing(2),
        Space::new().height(8),
        text("Parámetros").size(12),
        stat_row("n:", params.n.to_string()),
        stat_row("p:", format_fixed(params.p, d)),
        stat_row("q = 1 - p:", format_fixed(params.q(), d)),
        Space::new().height(8),
        text("Estadísticas").size(12),
        stat_row("Media (μ):", format_fixed(result.mean, d)),
        stat_row(variance_label, format_fixed(result.variance, d)),
        stat_row("Desviación estándar (σ):", format_fixed(result.std_dev, d)),
        stat_row("Coef. de variación:", coefficient_of_variation_label(result)),
        stat_row("Moda:", mode_label(result.mode)),
        Space::new().height(8),
        text("Forma de la distribución").size(12),
        stat_row(
            "Sesgo:",
            format!("{} ({})", format_fixed(result.skewness.value, d), result.skewness.kind)
        ),
        stat_row(
            "Curtosis:",
            format!("{} ({})", format_fixed(result.kurtosis.value, d), result.kurtosis.kind)
        ),
    ]
    .spacing(2)
}

fn view_probabilities<'a>(result: &'a BinomialResult, settings: &DisplaySettings) -> Column<'a, Message> {
    let mut rows: Column<'a, Message> = column![text("Probabilidades").size(12)].spacing(2);

    for (&x, &prob) in result.x_values.iter().zip(&result.probabilities) {
        rows = rows.push(
            text(format!(
                "P(X={}) = {}  ({})",
                x,
                format_probability(prob),
                format_percent(prob, settings.percent_decimals)
            ))
            .size(11),
        );
    }

    rows = rows.push(Space::new().height(4)).push(
        text(format!("Suma: {}", format_fixed(result.probability_sum(), 10)))
            .size(11)
            .color([0.5, 0.5, 0.5]),
    );

    if let Some((x, prob)) = result.max_probability() {
        rows = rows.push(
            text(format!("Máxima: P(X={}) = {}", x, format_probability(prob)))
                .size(11)
                .color([0.2, 0.6, 0.2]),
        );
    }

    rows
}
