//! # Result Formatting
//!
//! Display strings for results: fixed-decimal numbers, percentages, the
//! boxed text report and the one-line summary used in the status bar.
//! All labels are Spanish.

use std::fmt::Write;

use crate::calculations::binomial::{BinomialResult, Mode};
use crate::calculations::hypergeometric::HypergeometricSummary;
use crate::settings::DisplaySettings;

const REPORT_WIDTH: usize = 58;

/// Fixed-point with `decimals` places; never prints `-0.000`
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// A fraction shown as a percentage, e.g. 0.2461 -> "24.609%"
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{}%", format_fixed(fraction * 100.0, decimals))
}

/// Probability with 8 decimals
pub fn format_probability(probability: f64) -> String {
    format_fixed(probability, 8)
}

pub fn mode_label(mode: Mode) -> String {
    match mode {
        Mode::Single(k) => k.to_string(),
        Mode::Bimodal(a, b) => format!("{} y {}", a, b),
    }
}

/// "Infinita" or "Finita (N=100)"
pub fn population_label(result: &BinomialResult) -> String {
    match result.params.population {
        Some(big_n) if !result.infinite_population => format!("Finita (N={})", big_n),
        _ => "Infinita".to_string(),
    }
}

/// Coefficient of variation as a percentage, "N/A" when the mean is zero
pub fn coefficient_of_variation_label(result: &BinomialResult) -> String {
    match result.coefficient_of_variation() {
        Some(cv) => format_percent(cv, 2),
        None => "N/A".to_string(),
    }
}

/// `Binomial(n=10, p=0.5000) | μ=5.0000 | σ=1.5811 | Infinita`
pub fn short_summary(result: &BinomialResult) -> String {
    let population = match result.params.population {
        Some(big_n) if !result.infinite_population => format!("Finita(N={})", big_n),
        _ => "Infinita".to_string(),
    };
    format!(
        "Binomial(n={}, p={}) | μ={} | σ={} | {}",
        result.params.n,
        format_fixed(result.params.p, 4),
        format_fixed(result.mean, 4),
        format_fixed(result.std_dev, 4),
        population,
    )
}

fn banner(out: &mut String, title: &str) {
    let inner = REPORT_WIDTH - 2;
    let padding = inner.saturating_sub(title.chars().count());
    let left = padding / 2;
    let _ = writeln!(out, "╔{}╗", "═".repeat(inner));
    let _ = writeln!(out, "║{}{}{}║", " ".repeat(left), title, " ".repeat(padding - left));
    let _ = writeln!(out, "╚{}╝", "═".repeat(inner));
    out.push('\n');
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "─".repeat(REPORT_WIDTH));
}

fn probability_table(out: &mut String, rows: &[(u64, f64)], settings: &DisplaySettings) {
    section(out, "PROBABILIDADES CALCULADAS");
    let _ = writeln!(out, "   Valores   Probabilidad    Porcentaje     Visual");
    let _ = writeln!(out, "{}", "─".repeat(REPORT_WIDTH));
    for &(x, prob) in rows {
        let percent = prob * 100.0;
        let _ = writeln!(
            out,
            "   P(X={:2})    {}    {:>7}%     {}",
            x,
            format_probability(prob),
            format_fixed(percent, settings.percent_decimals),
            "█".repeat(settings.bar_cells(percent)),
        );
    }
    let _ = writeln!(out, "{}", "─".repeat(REPORT_WIDTH));
}

/// Full text report for a binomial result
pub fn report(result: &BinomialResult, settings: &DisplaySettings) -> String {
    let d = settings.decimals;
    let params = &result.params;
    let mut out = String::new();

    banner(&mut out, "RESULTADOS DEL CÁLCULO");

    section(&mut out, "TIPO DE POBLACIÓN");
    match params.population {
        None => {
            let _ = writeln!(out, "   • Tipo: INFINITA (no se especificó población)");
        }
        Some(big_n) => {
            if result.infinite_population {
                let _ = writeln!(out, "   • Tipo: INFINITA (muestra ≤ 5% de población)");
            } else {
                let _ = writeln!(out, "   • Tipo: FINITA (muestra > 5% de población)");
            }
            let _ = writeln!(out, "   • Población (N): {}", big_n);
            let _ = writeln!(
                out,
                "   • Proporción muestra/población: {}",
                format_percent(params.n as f64 / big_n as f64, 2)
            );
            if let Some(fpc) = result.correction_factor {
                let _ = writeln!(out, "   • Factor de corrección (FPC): {}", format_fixed(fpc, 6));
            }
        }
    }
    out.push('\n');

    section(&mut out, "PARÁMETROS DE LA DISTRIBUCIÓN");
    let _ = writeln!(out, "   • Tamaño de muestra (n): {}", params.n);
    let _ = writeln!(out, "   • Probabilidad de éxito (p): {}", format_fixed(params.p, d));
    let _ = writeln!(out, "   • Probabilidad de fracaso (q): {}", format_fixed(params.q(), d));
    out.push('\n');

    section(&mut out, "ESTADÍSTICAS");
    let _ = writeln!(out, "   • Media (μ = n × p): {}", format_fixed(result.mean, d));
    if result.correction_factor.is_some() {
        let _ = writeln!(out, "   • Varianza (σ² = n × p × q × FPC²): {}", format_fixed(result.variance, d));
        let _ = writeln!(
            out,
            "   • Desviación estándar (σ = √(n × p × q) × FPC): {}",
            format_fixed(result.std_dev, d)
        );
    } else {
        let _ = writeln!(out, "   • Varianza (σ² = n × p × q): {}", format_fixed(result.variance, d));
        let _ = writeln!(out, "   • Desviación estándar (σ = √(n × p × q)): {}", format_fixed(result.std_dev, d));
    }
    let _ = writeln!(out, "   • Coeficiente de variación: {}", coefficient_of_variation_label(result));
    let _ = writeln!(out, "   • Moda: {}", mode_label(result.mode));
    out.push('\n');

    section(&mut out, "FORMA DE LA DISTRIBUCIÓN");
    let _ = writeln!(out, "   • Sesgo (Asimetría): {}", format_fixed(result.skewness.value, d));
    let _ = writeln!(out, "   • Interpretación: {}", result.skewness.kind);
    let _ = writeln!(out, "   • Curtosis: {}", format_fixed(result.kurtosis.value, d));
    let _ = writeln!(out, "   • Interpretación: {}", result.kurtosis.kind);
    out.push('\n');

    let rows: Vec<(u64, f64)> = result
        .x_values
        .iter()
        .copied()
        .zip(result.probabilities.iter().copied())
        .collect();
    probability_table(&mut out, &rows, settings);

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Suma de probabilidades calculadas: {}",
        format_fixed(result.probability_sum(), 10)
    );
    if let Some((x, prob)) = result.max_probability() {
        let _ = writeln!(
            out,
            "Probabilidad máxima: P(X={}) = {} ({})",
            x,
            format_probability(prob),
            format_percent(prob, settings.percent_decimals)
        );
    }

    out
}

/// Full text report for a hypergeometric summary
pub fn hypergeometric_report(summary: &HypergeometricSummary, settings: &DisplaySettings) -> String {
    let d = settings.decimals;
    let params = &summary.params;
    let mut out = String::new();

    banner(&mut out, "RESULTADOS DEL ANÁLISIS");

    section(&mut out, "MODELO SELECCIONADO");
    let _ = writeln!(out, "   • Modelo: {}", summary.model);
    let _ = writeln!(
        out,
        "   • Proporción muestra/población: {} (umbral 20%)",
        format_percent(params.sample_ratio(), 2)
    );
    out.push('\n');

    section(&mut out, "PARÁMETROS");
    let _ = writeln!(out, "   • Población (N): {}", params.population);
    let _ = writeln!(out, "   • Éxitos en población (K): {}", params.successes);
    let _ = writeln!(out, "   • Tamaño de muestra (n): {}", params.sample);
    let _ = writeln!(out, "   • Éxitos deseados (x): {}", summary.x);
    out.push('\n');

    section(&mut out, "ESTADÍSTICAS");
    let _ = writeln!(
        out,
        "   • P(X={}): {} ({})",
        summary.x,
        format_probability(summary.probability_x),
        format_percent(summary.probability_x, settings.percent_decimals)
    );
    let _ = writeln!(out, "   • Media (μ = n × K / N): {}", format_fixed(summary.mean, d));
    let _ = writeln!(out, "   • Desviación estándar: {}", format_fixed(summary.std_dev, d));
    let _ = writeln!(out, "   • Mediana: {}", format_fixed(summary.median, 0));
    out.push('\n');

    section(&mut out, "FORMA DE LA DISTRIBUCIÓN");
    let _ = writeln!(out, "   • Sesgo: {}", summary.skew);
    let _ = writeln!(
        out,
        "   • Curtosis: {} ({})",
        format_fixed(summary.kurtosis.value, d),
        summary.kurtosis.kind.name()
    );
    out.push('\n');

    probability_table(&mut out, &summary.range_probabilities, settings);
    out
}
