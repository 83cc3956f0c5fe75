//! # Binomial Distribution
//!
//! Closed-form statistics for X ~ B(n, p), with an optional finite population
//! size `N` that applies the finite population correction (FPC).
//!
//! ## Population Model
//!
//! - No `N`, or `n <= 5%` of `N`: infinite population, no correction
//! - Otherwise: variance is multiplied by FPC² = (N - n) / (N - 1),
//!   skewness divided by FPC, kurtosis divided by FPC²
//!
//! ## Example
//!
//! ```rust
//! use dist_core::calculations::binomial::{calculate, BinomialInput, BinomialParameters};
//!
//! let params = BinomialParameters::new(10, 0.5);
//! let result = calculate(&BinomialInput::full(params)).unwrap();
//!
//! assert_eq!(result.mean, 5.0);
//! assert!((result.variance - 2.5).abs() < 1e-12);
//! assert!((result.std_dev - 1.58114).abs() < 1e-5);
//! assert!((result.probability_sum() - 1.0).abs() < 1e-9);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::shape::{Kurtosis, Skewness};
use crate::errors::{DistError, DistResult};

/// Sample share of the population at or below which the population is
/// treated as infinite
pub const INFINITE_POPULATION_RATIO: f64 = 0.05;

/// Largest sample size accepted. The full distribution (n + 1 values) is
/// built, tabulated and charted for every calculation.
pub const MAX_TRIALS: u64 = 100_000;

/// Largest population size accepted
pub const MAX_POPULATION: u64 = 1_000_000_000;

/// Validated parameters of a binomial distribution.
///
/// ## JSON Example
///
/// ```json
/// { "n": 10, "p": 0.5, "population": 100 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinomialParameters {
    /// Number of independent trials (sample size), > 0
    pub n: u64,

    /// Probability of success per trial, in [0, 1]
    pub p: f64,

    /// Population size; `None` means infinite
    #[serde(default)]
    pub population: Option<u64>,
}

impl BinomialParameters {
    pub fn new(n: u64, p: f64) -> Self {
        BinomialParameters { n, p, population: None }
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    /// Probability of failure
    pub fn q(&self) -> f64 {
        1.0 - self.p
    }

    pub fn is_infinite_population(&self) -> bool {
        is_infinite_population(self.n, self.population)
    }

    /// Range checks for parameters that did not come through `validation`
    pub fn validate(&self) -> DistResult<()> {
        if self.n == 0 {
            return Err(DistError::invalid_input(
                "n",
                self.n.to_string(),
                "El número de ensayos (n) debe ser mayor a 0",
            ));
        }
        if self.n > MAX_TRIALS {
            return Err(DistError::invalid_input(
                "n",
                self.n.to_string(),
                format!("El número de ensayos (n) no puede ser mayor a {}", MAX_TRIALS),
            ));
        }
        if !(0.0..=1.0).contains(&self.p) {
            return Err(DistError::invalid_input(
                "p",
                self.p.to_string(),
                "La probabilidad (p) debe estar entre 0 y 1",
            ));
        }
        if let Some(population) = self.population {
            if population == 0 {
                return Err(DistError::invalid_input(
                    "N",
                    population.to_string(),
                    "El tamaño de población (N) debe ser mayor a 0 (deje vacío para población infinita)",
                ));
            }
            if population > MAX_POPULATION {
                return Err(DistError::invalid_input(
                    "N",
                    population.to_string(),
                    format!("El tamaño de población (N) no puede ser mayor a {}", MAX_POPULATION),
                ));
            }
            if self.n >= population {
                return Err(DistError::invalid_input(
                    "N",
                    population.to_string(),
                    "El tamaño de muestra (n) debe ser menor que el tamaño de población (N)",
                ));
            }
        }
        Ok(())
    }
}

/// Input for a full binomial calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinomialInput {
    pub params: BinomialParameters,

    /// X values to evaluate, each in 0..=n
    pub x_values: Vec<u64>,
}

impl BinomialInput {
    pub fn new(params: BinomialParameters, x_values: Vec<u64>) -> Self {
        BinomialInput { params, x_values }
    }

    /// Evaluate every k in 0..=n
    pub fn full(params: BinomialParameters) -> Self {
        let x_values = (0..=params.n).collect();
        BinomialInput { params, x_values }
    }

    pub fn validate(&self) -> DistResult<()> {
        self.params.validate()?;
        if self.x_values.is_empty() {
            return Err(DistError::missing_field("X"));
        }
        if let Some(x) = self.x_values.iter().find(|&&x| x > self.params.n) {
            return Err(DistError::invalid_input(
                "X",
                x.to_string(),
                format!("El valor X={} debe estar entre 0 y {}", x, self.params.n),
            ));
        }
        Ok(())
    }
}

/// Most probable value(s) of X
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values")]
pub enum Mode {
    Single(u64),
    /// Two adjacent values with equal probability
    Bimodal(u64, u64),
}

/// Results of a binomial calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinomialResult {
    pub params: BinomialParameters,

    /// Requested X values, in input order
    pub x_values: Vec<u64>,

    /// P(X = x) for each requested x
    pub probabilities: Vec<f64>,

    /// P(X = k) for every k in 0..=n
    pub distribution: Vec<f64>,

    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,

    /// FPC, present only when the population is finite
    pub correction_factor: Option<f64>,
    pub infinite_population: bool,

    pub skewness: Skewness,
    pub kurtosis: Kurtosis,
    pub mode: Mode,
}

impl BinomialResult {
    /// Sum of the requested probabilities
    pub fn probability_sum(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Requested (x, P(X = x)) with the largest probability; first wins ties
    pub fn max_probability(&self) -> Option<(u64, f64)> {
        self.x_values
            .iter()
            .copied()
            .zip(self.probabilities.iter().copied())
            .fold(None, |best, (x, prob)| match best {
                Some((_, best_prob)) if best_prob >= prob => best,
                _ => Some((x, prob)),
            })
    }

    /// σ / μ, undefined when the mean is zero
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        if self.mean == 0.0 {
            None
        } else {
            Some(self.std_dev / self.mean)
        }
    }

    /// The single requested X, when exactly one was asked for
    pub fn highlighted_x(&self) -> Option<u64> {
        match self.x_values.as_slice() {
            [x] => Some(*x),
            _ => None,
        }
    }
}

/// Exact binomial coefficient C(n, k).
///
/// Returns `Some(0)` when `k > n` and `None` when the value does not fit in
/// a `u128`.
pub fn binomial_coefficient(n: u64, k: u64) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut c: u128 = 1;
    for i in 0..k {
        // c * (n - i) is always divisible by (i + 1)
        c = c.checked_mul(u128::from(n - i))? / u128::from(i + 1);
    }
    Some(c)
}

/// Natural log of C(n, k), for sizes where the exact value overflows
pub fn ln_binomial_coefficient(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    let k = k.min(n - k);
    (0..k)
        .map(|i| ((n - i) as f64 / (i + 1) as f64).ln())
        .sum()
}

/// P(X = k) = C(n, k) · p^k · (1 - p)^(n - k)
pub fn binomial_pmf(k: u64, n: u64, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    // 0^0 = 1: all mass on one end
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }

    let q = 1.0 - p;
    let success_term = p.powf(k as f64);
    let failure_term = q.powf((n - k) as f64);

    if let Some(c) = binomial_coefficient(n, k) {
        let c = c as f64;
        if c.is_finite() && success_term >= f64::MIN_POSITIVE && failure_term >= f64::MIN_POSITIVE {
            return c * success_term * failure_term;
        }
    }

    let ln_pmf = ln_binomial_coefficient(n, k) + k as f64 * p.ln() + (n - k) as f64 * q.ln();
    ln_pmf.exp()
}

/// P(X = k) for every k in 0..=n in a single O(n) pass.
///
/// Starts at the mode and walks outward with
/// P(k + 1) / P(k) = (n - k) / (k + 1) · p / q, accumulating in log space so
/// the tails underflow to zero instead of poisoning the peak.
pub fn distribution(n: u64, p: f64) -> Vec<f64> {
    let len = n as usize + 1;
    if p == 0.0 || p == 1.0 {
        let mut probs = vec![0.0; len];
        probs[if p == 0.0 { 0 } else { n as usize }] = 1.0;
        return probs;
    }

    let q = 1.0 - p;
    let ln_odds = (p / q).ln();
    let peak = match mode(n, p) {
        Mode::Single(k) | Mode::Bimodal(_, k) => k,
    };

    let mut ln_probs = vec![0.0; len];
    let start = peak as usize;
    ln_probs[start] = ln_binomial_coefficient(n, peak) + peak as f64 * p.ln() + (n - peak) as f64 * q.ln();

    let trials = n as f64;
    for k in start..n as usize {
        let k_f = k as f64;
        ln_probs[k + 1] = ln_probs[k] + ((trials - k_f) / (k_f + 1.0)).ln() + ln_odds;
    }
    for k in (1..=start).rev() {
        let k_f = k as f64;
        ln_probs[k - 1] = ln_probs[k] + (k_f / (trials - k_f + 1.0)).ln() - ln_odds;
    }

    ln_probs.into_iter().map(f64::exp).collect()
}

/// μ = n · p
pub fn mean(n: u64, p: f64) -> f64 {
    n as f64 * p
}

/// σ² = n · p · (1 - p)
pub fn variance(n: u64, p: f64) -> f64 {
    n as f64 * p * (1.0 - p)
}

/// σ = √(n · p · (1 - p))
pub fn std_dev(n: u64, p: f64) -> f64 {
    variance(n, p).sqrt()
}

/// True when no population is given or the sample is at most 5% of it
pub fn is_infinite_population(n: u64, population: Option<u64>) -> bool {
    match population {
        None => true,
        Some(big_n) => n as f64 <= INFINITE_POPULATION_RATIO * big_n as f64,
    }
}

/// FPC = √((N - n) / (N - 1))
pub fn correction_factor(n: u64, population: u64) -> f64 {
    if population <= 1 {
        return 0.0;
    }
    ((population as f64 - n as f64) / (population as f64 - 1.0)).sqrt()
}

fn finite_correction(n: u64, population: Option<u64>) -> Option<f64> {
    match population {
        Some(big_n) if !is_infinite_population(n, population) => Some(correction_factor(n, big_n)),
        _ => None,
    }
}

/// Variance with FPC² applied for finite populations
pub fn variance_with_population(n: u64, p: f64, population: Option<u64>) -> f64 {
    let base = variance(n, p);
    match finite_correction(n, population) {
        Some(fpc) => base * fpc * fpc,
        None => base,
    }
}

/// Standard deviation with FPC applied for finite populations
pub fn std_dev_with_population(n: u64, p: f64, population: Option<u64>) -> f64 {
    let base = std_dev(n, p);
    match finite_correction(n, population) {
        Some(fpc) => base * fpc,
        None => base,
    }
}

/// P(X = x) for each x
pub fn probabilities(x_values: &[u64], n: u64, p: f64) -> Vec<f64> {
    x_values.iter().map(|&x| binomial_pmf(x, n, p)).collect()
}

/// P(X <= x)
pub fn cumulative(x: u64, n: u64, p: f64) -> f64 {
    distribution(n, p)[..=x.min(n) as usize].iter().sum()
}

/// P(X > x)
pub fn greater_than(x: u64, n: u64, p: f64) -> f64 {
    1.0 - cumulative(x, n, p)
}

/// P(a <= X <= b); zero when a > b
pub fn between(a: u64, b: u64, n: u64, p: f64) -> f64 {
    if a > b {
        return 0.0;
    }
    if a > n {
        return 0.0;
    }
    distribution(n, p)[a as usize..=b.min(n) as usize].iter().sum()
}

/// γ₁ = (1 - 2p) / √(npq), divided by FPC for finite populations
pub fn skewness(n: u64, p: f64, population: Option<u64>) -> Skewness {
    let npq = variance(n, p);
    if npq == 0.0 {
        return Skewness::new(0.0);
    }
    let mut value = (1.0 - 2.0 * p) / npq.sqrt();
    if let Some(fpc) = finite_correction(n, population) {
        if fpc > 0.0 {
            value /= fpc;
        }
    }
    Skewness::new(value)
}

/// Excess kurtosis γ₂ = (1 - 6pq) / (npq), divided by FPC² for finite populations
pub fn kurtosis(n: u64, p: f64, population: Option<u64>) -> Kurtosis {
    let q = 1.0 - p;
    let npq = variance(n, p);
    if npq == 0.0 {
        return Kurtosis::new(0.0);
    }
    let mut value = (1.0 - 6.0 * p * q) / npq;
    if let Some(fpc) = finite_correction(n, population) {
        let fpc_squared = fpc * fpc;
        if fpc_squared > 0.0 {
            value /= fpc_squared;
        }
    }
    Kurtosis::new(value)
}

/// Mode: ⌊(n + 1)p⌋, bimodal when (n + 1)p is an integer inside 1..=n
pub fn mode(n: u64, p: f64) -> Mode {
    let scaled = (n as f64 + 1.0) * p;
    let floor = scaled.floor();
    let k = (floor as u64).min(n);
    if scaled == floor && k >= 1 && (floor as u64) <= n {
        Mode::Bimodal(k - 1, k)
    } else {
        Mode::Single(k)
    }
}

/// Run the complete binomial calculation.
pub fn calculate(input: &BinomialInput) -> DistResult<BinomialResult> {
    input.validate()?;

    let BinomialParameters { n, p, population } = input.params;
    let distribution = distribution(n, p);
    let probabilities = input
        .x_values
        .iter()
        .map(|&x| distribution[x as usize])
        .collect::<Vec<_>>();

    if let Some(bad) = distribution.iter().find(|v| !v.is_finite()) {
        return Err(DistError::calculation_failed(
            "probabilidades",
            format!("valor no finito {} para n={}, p={}", bad, n, p),
        ));
    }

    let result = BinomialResult {
        params: input.params,
        x_values: input.x_values.clone(),
        probabilities,
        distribution,
        mean: mean(n, p),
        variance: variance_with_population(n, p, population),
        std_dev: std_dev_with_population(n, p, population),
        correction_factor: finite_correction(n, population),
        infinite_population: is_infinite_population(n, population),
        skewness: skewness(n, p, population),
        kurtosis: kurtosis(n, p, population),
        mode: mode(n, p),
    };

    debug!(
        "binomial n={} p={} N={:?}: mean={} variance={}",
        n, p, population, result.mean, result.variance
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::shape::{KurtosisKind, SkewnessKind};

    #[test]
    fn test_binomial_coefficient() {
        assert_eq!(binomial_coefficient(5, 2), Some(10));
        assert_eq!(binomial_coefficient(10, 0), Some(1));
        assert_eq!(binomial_coefficient(10, 10), Some(1));
        assert_eq!(binomial_coefficient(3, 4), Some(0));
        assert_eq!(binomial_coefficient(52, 5), Some(2_598_960));
        // C(200, 100) ≈ 9.05e58 overflows u128
        assert_eq!(binomial_coefficient(200, 100), None);
    }

    #[test]
    fn test_ln_coefficient_matches_exact() {
        let exact = binomial_coefficient(30, 12).unwrap() as f64;
        assert!((ln_binomial_coefficient(30, 12) - exact.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_pmf_sums_to_one() {
        for &n in &[1u64, 2, 5, 10, 37, 100, 500, 2000] {
            for &p in &[0.0, 0.01, 0.3, 0.5, 0.77, 0.999, 1.0] {
                let total: f64 = (0..=n).map(|k| binomial_pmf(k, n, p)).sum();
                assert!((total - 1.0).abs() < 1e-9, "n={} p={} sum={}", n, p, total);
            }
        }
    }

    #[test]
    fn test_distribution_matches_pmf() {
        for &(n, p) in &[(1u64, 0.3), (10, 0.5), (9, 0.5), (60, 0.3), (150, 0.02), (400, 0.97)] {
            let dist = distribution(n, p);
            assert_eq!(dist.len(), n as usize + 1);
            for (k, &prob) in dist.iter().enumerate() {
                let direct = binomial_pmf(k as u64, n, p);
                assert!((prob - direct).abs() < 1e-12, "n={} p={} k={}: {} vs {}", n, p, k, prob, direct);
            }
        }
        assert_eq!(distribution(4, 0.0), vec![1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(distribution(3, 1.0), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_distribution_at_max_trials() {
        let dist = distribution(MAX_TRIALS, 0.37);
        let total: f64 = dist.iter().sum();
        assert!((total - 1.0).abs() < 1e-8, "sum={}", total);
        assert!(dist.iter().all(|v| v.is_finite() && *v >= 0.0));

        let k = 37_000;
        assert!((dist[k] - binomial_pmf(k as u64, MAX_TRIALS, 0.37)).abs() < 1e-12);
    }

    #[test]
    fn test_pmf_small_case() {
        assert!((binomial_pmf(0, 1, 0.3) - 0.7).abs() < 1e-12);
        assert!((binomial_pmf(1, 1, 0.3) - 0.3).abs() < 1e-12);
        assert_eq!(binomial_pmf(2, 1, 0.3), 0.0);
    }

    #[test]
    fn test_pmf_degenerate_p() {
        assert_eq!(binomial_pmf(0, 4, 0.0), 1.0);
        assert_eq!(binomial_pmf(1, 4, 0.0), 0.0);
        assert_eq!(binomial_pmf(4, 4, 1.0), 1.0);
        assert_eq!(binomial_pmf(3, 4, 1.0), 0.0);
    }

    #[test]
    fn test_moments() {
        assert_eq!(mean(10, 0.5), 10.0 * 0.5);
        assert_eq!(mean(7, 0.25), 1.75);
        assert_eq!(variance(10, 0.5), 2.5);
        assert!((std_dev(10, 0.5) - 1.5811388).abs() < 1e-6);
        assert_eq!(variance(9, 0.0), 0.0);
        assert_eq!(variance(9, 1.0), 0.0);
    }

    #[test]
    fn test_population_model() {
        assert!(is_infinite_population(10, None));
        assert!(is_infinite_population(5, Some(100)));
        assert!(!is_infinite_population(6, Some(100)));

        let fpc = correction_factor(20, 100);
        assert!((fpc - (80.0f64 / 99.0).sqrt()).abs() < 1e-12);

        let v = variance_with_population(20, 0.5, Some(100));
        assert!((v - 5.0 * 80.0 / 99.0).abs() < 1e-12);
        // Small samples keep the plain variance
        assert_eq!(variance_with_population(5, 0.5, Some(100)), variance(5, 0.5));
    }

    #[test]
    fn test_cumulative_family() {
        let below = cumulative(4, 10, 0.5);
        assert!((below - 386.0 / 1024.0).abs() < 1e-12);
        assert!((greater_than(4, 10, 0.5) - 638.0 / 1024.0).abs() < 1e-12);
        assert!((between(4, 6, 10, 0.5) - 672.0 / 1024.0).abs() < 1e-12);
        assert_eq!(between(6, 4, 10, 0.5), 0.0);
        assert!((cumulative(50, 10, 0.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shape() {
        let s = skewness(10, 0.5, None);
        assert_eq!(s.value, 0.0);
        assert_eq!(s.kind, SkewnessKind::Symmetric);

        let s = skewness(10, 0.2, None);
        assert!((s.value - 0.6 / 1.6f64.sqrt()).abs() < 1e-12);
        assert_eq!(s.kind, SkewnessKind::Positive);

        // (1 - 6 * 0.25) / 2.5 = -0.2
        let k = kurtosis(10, 0.5, None);
        assert!((k.value + 0.2).abs() < 1e-12);
        assert_eq!(k.kind, KurtosisKind::Platykurtic);

        let k = kurtosis(10, 0.0, None);
        assert_eq!(k.value, 0.0);
        assert_eq!(k.kind, KurtosisKind::Mesokurtic);
    }

    #[test]
    fn test_mode() {
        assert_eq!(mode(10, 0.5), Mode::Single(5));
        assert_eq!(mode(9, 0.5), Mode::Bimodal(4, 5));
        assert_eq!(mode(5, 0.0), Mode::Single(0));
        assert_eq!(mode(5, 1.0), Mode::Single(5));
    }

    #[test]
    fn test_calculate_full() {
        let result = calculate(&BinomialInput::full(BinomialParameters::new(10, 0.5))).unwrap();
        assert_eq!(result.x_values.len(), 11);
        assert_eq!(result.mean, 5.0);
        assert!((result.variance - 2.5).abs() < 1e-12);
        assert!((result.std_dev - 1.58114).abs() < 1e-5);
        assert!((result.probability_sum() - 1.0).abs() < 1e-9);
        assert!(result.infinite_population);
        assert_eq!(result.correction_factor, None);
        assert_eq!(result.max_probability().map(|(x, _)| x), Some(5));
        assert_eq!(result.highlighted_x(), None);
    }

    #[test]
    fn test_calculate_selected_values_and_population() {
        let params = BinomialParameters::new(20, 0.3).with_population(100);
        let result = calculate(&BinomialInput::new(params, vec![3])).unwrap();
        assert_eq!(result.probabilities.len(), 1);
        assert_eq!(result.distribution.len(), 21);
        assert_eq!(result.highlighted_x(), Some(3));
        assert!(!result.infinite_population);
        let fpc = result.correction_factor.unwrap();
        assert!((result.std_dev - std_dev(20, 0.3) * fpc).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_rejects_bad_input() {
        let err = calculate(&BinomialInput::new(BinomialParameters::new(5, 0.5), vec![6])).unwrap_err();
        assert_eq!(err.to_string(), "El valor X=6 debe estar entre 0 y 5");

        let err = calculate(&BinomialInput::full(BinomialParameters::new(5, 1.5))).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let params = BinomialParameters::new(10, 0.5).with_population(10);
        assert!(calculate(&BinomialInput::full(params)).is_err());

        let params = BinomialParameters::new(MAX_TRIALS + 1, 0.5);
        let err = calculate(&BinomialInput::new(params, vec![0])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_coefficient_of_variation() {
        let result = calculate(&BinomialInput::full(BinomialParameters::new(4, 0.0))).unwrap();
        assert_eq!(result.coefficient_of_variation(), None);
    }
}
