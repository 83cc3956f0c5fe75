//! # Chart Series
//!
//! Everything a front end needs to draw the probability bar chart, computed
//! without any drawing dependency: bars (with an optional highlighted bar),
//! the distribution curve through the bar tops, a normal reference curve
//! scaled to the tallest bar, and the mean marker.
//!
//! ## Example
//!
//! ```rust
//! use dist_core::calculations::binomial::{calculate, BinomialInput, BinomialParameters};
//! use dist_core::chart::ChartData;
//!
//! let result = calculate(&BinomialInput::full(BinomialParameters::new(10, 0.5))).unwrap();
//! let chart = ChartData::binomial(&result);
//!
//! assert_eq!(chart.bars.len(), 11);
//! assert_eq!(chart.mean, 5.0);
//! assert!(chart.bars.iter().all(|bar| bar.x <= 10));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::binomial::BinomialResult;
use crate::calculations::hypergeometric::HypergeometricSummary;
use crate::format::format_fixed;

/// Points sampled along the normal reference curve
pub const NORMAL_CURVE_POINTS: usize = 200;

/// Bars below this share of the tallest bar get no value label
pub const LABEL_THRESHOLD: f64 = 0.05;

pub const X_AXIS_LABEL: &str = "Número de éxitos (X)";
pub const Y_AXIS_LABEL: &str = "Probabilidad P(X)";

/// One bar of the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub x: u64,
    pub probability: f64,
    /// Drawn in the accent color with a boxed `P(X=x)=` label
    pub highlighted: bool,
    /// Small value label above the bar
    pub show_label: bool,
}

/// Series and annotations for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub subtitle: String,
    pub bars: Vec<Bar>,
    /// Polyline through the bar tops, sorted by x, extended half a unit each side
    pub curve: Vec<(f64, f64)>,
    /// N(μ, σ) sampled over [max(0, μ - 4σ), μ + 4σ] and scaled to the tallest bar
    pub normal_curve: Vec<(f64, f64)>,
    pub mean: f64,
    pub std_dev: f64,
    pub max_probability: f64,
    /// Visible x range
    pub x_min: f64,
    pub x_max: f64,
    /// Bar width in x units; thinner bars for wider charts
    pub bar_width: f64,
}

impl ChartData {
    /// Chart for a binomial result; highlights the X when only one was requested
    pub fn binomial(result: &BinomialResult) -> Self {
        let points: Vec<(u64, f64)> = result
            .x_values
            .iter()
            .copied()
            .zip(result.probabilities.iter().copied())
            .collect();

        let subtitle = match result.params.population {
            Some(big_n) if !result.infinite_population => format!("Población Finita (N={})", big_n),
            _ => "Población Infinita".to_string(),
        };

        Self::build(
            format!(
                "Distribución Binomial (n={}, p={})",
                result.params.n,
                format_fixed(result.params.p, 4)
            ),
            subtitle,
            &points,
            result.highlighted_x(),
            result.params.n,
            result.mean,
            result.std_dev,
        )
    }

    /// Chart over every x of a hypergeometric summary, highlighting the requested x
    pub fn hypergeometric(summary: &HypergeometricSummary) -> Self {
        let params = &summary.params;
        Self::build(
            format!(
                "Distribución Hipergeométrica (N={}, K={}, n={})",
                params.population, params.successes, params.sample
            ),
            format!("Modelo: {}", summary.model),
            &summary.all_probabilities,
            Some(summary.x),
            params.sample,
            summary.mean,
            summary.std_dev,
        )
    }

    fn build(
        title: String,
        subtitle: String,
        points: &[(u64, f64)],
        highlighted: Option<u64>,
        n: u64,
        mean: f64,
        std_dev: f64,
    ) -> Self {
        let max_probability = points.iter().map(|(_, p)| *p).fold(0.0f64, f64::max);

        let bars = points
            .iter()
            .map(|&(x, probability)| {
                let is_highlighted = highlighted == Some(x);
                Bar {
                    x,
                    probability,
                    highlighted: is_highlighted,
                    show_label: !is_highlighted && probability > max_probability * LABEL_THRESHOLD,
                }
            })
            .collect();

        let mut sorted: Vec<(f64, f64)> = points.iter().map(|&(x, p)| (x as f64, p)).collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        sorted.dedup_by(|a, b| a.0 == b.0);

        let (x_min, x_max) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (first.0 - 0.5, last.0 + 0.5),
            _ => (-0.5, 0.5),
        };

        let curve = if sorted.len() > 1 {
            let mut curve = Vec::with_capacity(sorted.len() + 2);
            curve.push((x_min, sorted[0].1));
            curve.extend(sorted.iter().copied());
            curve.push((x_max, sorted[sorted.len() - 1].1));
            curve
        } else {
            Vec::new()
        };

        ChartData {
            title,
            subtitle,
            bars,
            curve,
            normal_curve: normal_curve(mean, std_dev, max_probability),
            mean,
            std_dev,
            max_probability,
            x_min,
            x_max,
            bar_width: bar_width(n),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Top of the y axis, with headroom for labels
    pub fn y_max(&self) -> f64 {
        if self.max_probability > 0.0 {
            self.max_probability * 1.15
        } else {
            1.0
        }
    }

    /// Label for the mean marker, e.g. "μ=5.00"
    pub fn mean_label(&self) -> String {
        format!("μ={}", format_fixed(self.mean, 2))
    }
}

/// Bar width by number of trials
pub fn bar_width(n: u64) -> f64 {
    if n <= 20 {
        0.7
    } else if n <= 50 {
        0.6
    } else {
        0.5
    }
}

/// Normal density N(μ, σ) sampled on [max(0, μ - 4σ), μ + 4σ], rescaled so its
/// peak equals `peak`. Empty when σ is zero.
pub fn normal_curve(mean: f64, std_dev: f64, peak: f64) -> Vec<(f64, f64)> {
    if !(std_dev > 0.0) || !(peak > 0.0) {
        return Vec::new();
    }
    let start = (mean - 4.0 * std_dev).max(0.0);
    let end = mean + 4.0 * std_dev;
    let step = (end - start) / (NORMAL_CURVE_POINTS - 1) as f64;
    let norm = 1.0 / (std_dev * (2.0 * std::f64::consts::PI).sqrt());

    let raw: Vec<(f64, f64)> = (0..NORMAL_CURVE_POINTS)
        .map(|i| {
            let x = start + step * i as f64;
            let z = (x - mean) / std_dev;
            (x, norm * (-0.5 * z * z).exp())
        })
        .collect();

    let raw_peak = raw.iter().map(|(_, y)| *y).fold(0.0f64, f64::max);
    if raw_peak <= 0.0 {
        return raw;
    }
    let scale = peak / raw_peak;
    raw.into_iter().map(|(x, y)| (x, y * scale)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::binomial::{calculate, BinomialInput, BinomialParameters};
    use crate::calculations::hypergeometric::summarize;

    #[test]
    fn test_binomial_chart() {
        let result = calculate(&BinomialInput::full(BinomialParameters::new(10, 0.5))).unwrap();
        let chart = ChartData::binomial(&result);

        assert_eq!(chart.title, "Distribución Binomial (n=10, p=0.5000)");
        assert_eq!(chart.subtitle, "Población Infinita");
        assert!(chart.bars.iter().all(|b| !b.highlighted));
        // P(0) = P(10) ≈ 0.001 are below 5% of the 0.246 peak
        assert!(!chart.bars[0].show_label);
        assert!(chart.bars[5].show_label);
        assert_eq!(chart.curve.len(), 13);
        assert_eq!(chart.curve[0], (-0.5, chart.bars[0].probability));
        assert_eq!((chart.x_min, chart.x_max), (-0.5, 10.5));
        assert_eq!(chart.bar_width, 0.7);
        assert_eq!(chart.mean_label(), "μ=5.00");
    }

    #[test]
    fn test_normal_curve_scaled_to_peak() {
        let curve = normal_curve(5.0, 1.58, 0.246);
        assert_eq!(curve.len(), NORMAL_CURVE_POINTS);
        let peak = curve.iter().map(|(_, y)| *y).fold(0.0f64, f64::max);
        assert!((peak - 0.246).abs() < 1e-12);
        assert!(curve.iter().all(|(x, _)| *x >= 0.0));
        assert!(normal_curve(0.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_single_value_is_highlighted() {
        let params = BinomialParameters::new(60, 0.2).with_population(200);
        let result = calculate(&BinomialInput::new(params, vec![12])).unwrap();
        let chart = ChartData::binomial(&result);
        assert_eq!(chart.bars.len(), 1);
        assert!(chart.bars[0].highlighted);
        assert!(!chart.bars[0].show_label);
        assert!(chart.curve.is_empty());
        assert_eq!(chart.subtitle, "Población Finita (N=200)");
        assert_eq!(chart.bar_width, 0.5);
    }

    #[test]
    fn test_unsorted_values_give_sorted_curve() {
        let result = calculate(&BinomialInput::new(BinomialParameters::new(5, 0.5), vec![3, 1, 3, 0])).unwrap();
        let chart = ChartData::binomial(&result);
        let xs: Vec<f64> = chart.curve.iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, vec![-0.5, 0.0, 1.0, 3.0, 3.5]);
    }

    #[test]
    fn test_hypergeometric_chart() {
        let summary = summarize(20, 6, 5, 2).unwrap();
        let chart = ChartData::hypergeometric(&summary);
        assert_eq!(chart.bars.len(), 6);
        assert!(chart.bars[2].highlighted);
        assert_eq!(chart.title, "Distribución Hipergeométrica (N=20, K=6, n=5)");
        assert_eq!(chart.subtitle, "Modelo: Hipergeométrica");
    }
}
