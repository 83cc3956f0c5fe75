//! # Hypergeometric Distribution
//!
//! Sampling without replacement: a sample of `n` drawn from a population of
//! `N` that contains `K` successes. When the sample is small relative to the
//! population (n/N < 20%) the binomial model with p = K/N is recommended
//! instead; [`select_model`] makes that choice.
//!
//! ## Example
//!
//! ```rust
//! use dist_core::calculations::hypergeometric::{summarize, Model};
//!
//! // 20 items, 6 defective, draw 5, ask for exactly 2 defective
//! let summary = summarize(20, 6, 5, 2).unwrap();
//! assert_eq!(summary.model, Model::Hypergeometric);
//! assert!((summary.probability_x - 0.3521672).abs() < 1e-6);
//! assert!((summary.mean - 1.5).abs() < 1e-12);
//! ```

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::binomial::{
    binomial_coefficient, binomial_pmf, ln_binomial_coefficient, MAX_POPULATION, MAX_TRIALS,
};
use super::binomial;
use super::shape::{Kurtosis, KurtosisKind, MedianSkew};
use crate::errors::{DistError, DistResult};

/// Sample share of the population from which the hypergeometric model is used
pub const HYPERGEOMETRIC_THRESHOLD: f64 = 0.20;

/// Probability model applied to a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    Binomial,
    Hypergeometric,
}

impl Model {
    pub fn display_name(&self) -> &'static str {
        match self {
            Model::Binomial => "Binomial",
            Model::Hypergeometric => "Hipergeométrica",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Parameters of a hypergeometric experiment.
///
/// ## JSON Example
///
/// ```json
/// { "population": 25, "successes": 6, "sample": 4 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypergeometricParameters {
    /// Population size N
    pub population: u64,
    /// Successes in the population K
    pub successes: u64,
    /// Sample size n
    pub sample: u64,
}

impl HypergeometricParameters {
    pub fn new(population: u64, successes: u64, sample: u64) -> Self {
        HypergeometricParameters {
            population,
            successes,
            sample,
        }
    }

    pub fn validate(&self) -> DistResult<()> {
        let HypergeometricParameters {
            population: big_n,
            successes: big_k,
            sample: n,
        } = *self;
        if big_n == 0 {
            return Err(DistError::invalid_input(
                "N",
                big_n.to_string(),
                "El tamaño de población (N) es obligatorio y debe ser mayor a 0",
            ));
        }
        if big_n > MAX_POPULATION {
            return Err(DistError::invalid_input(
                "N",
                big_n.to_string(),
                format!("El tamaño de población (N) no puede ser mayor a {}", MAX_POPULATION),
            ));
        }
        if big_k > big_n {
            return Err(DistError::invalid_input(
                "K",
                big_k.to_string(),
                format!("El número de éxitos (K={}) no puede ser mayor que la población (N={})", big_k, big_n),
            ));
        }
        if n == 0 {
            return Err(DistError::invalid_input(
                "n",
                n.to_string(),
                "El tamaño de muestra (n) debe ser mayor a 0",
            ));
        }
        if n > MAX_TRIALS {
            return Err(DistError::invalid_input(
                "n",
                n.to_string(),
                format!("El tamaño de muestra (n) no puede ser mayor a {}", MAX_TRIALS),
            ));
        }
        if n > big_n {
            return Err(DistError::invalid_input(
                "n",
                n.to_string(),
                format!("El tamaño de muestra (n={}) no puede ser mayor que la población (N={})", n, big_n),
            ));
        }
        Ok(())
    }

    /// Largest attainable X: min(n, K)
    pub fn max_x(&self) -> u64 {
        self.sample.min(self.successes)
    }

    /// Success proportion K / N
    pub fn p(&self) -> f64 {
        self.successes as f64 / self.population as f64
    }

    /// Sample share n / N
    pub fn sample_ratio(&self) -> f64 {
        self.sample as f64 / self.population as f64
    }
}

/// Full set of statistics for one experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypergeometricSummary {
    pub params: HypergeometricParameters,
    pub model: Model,
    /// Requested x
    pub x: u64,
    /// P(X = x)
    pub probability_x: f64,
    /// (x, P(X = x)) for x in 0..=min(x, limit)
    pub range_probabilities: Vec<(u64, f64)>,
    /// (x, P(X = x)) for x in 0..=n
    pub all_probabilities: Vec<(u64, f64)>,
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub skew: MedianSkew,
    pub kurtosis: Kurtosis,
}

/// Pick the model for a sample of `n` out of `population`.
pub fn select_model(n: u64, population: u64) -> DistResult<Model> {
    if population == 0 {
        return Err(DistError::invalid_input(
            "N",
            population.to_string(),
            "El tamaño de población (N) debe ser mayor a 0.",
        ));
    }
    if n == 0 {
        return Err(DistError::invalid_input(
            "n",
            n.to_string(),
            "El tamaño de muestra (n) debe ser mayor a 0.",
        ));
    }
    if n > population {
        return Err(DistError::invalid_input(
            "n",
            n.to_string(),
            format!("El tamaño de muestra (n={}) no puede ser mayor que la población (N={}).", n, population),
        ));
    }
    let ratio = n as f64 / population as f64;
    Ok(if ratio >= HYPERGEOMETRIC_THRESHOLD {
        Model::Hypergeometric
    } else {
        Model::Binomial
    })
}

fn coefficient_f64(n: u64, k: u64) -> Option<f64> {
    binomial_coefficient(n, k).map(|c| c as f64)
}

/// P(X = x) = C(K, x) · C(N - K, n - x) / C(N, n)
pub fn pmf(population: u64, successes: u64, sample: u64, x: u64) -> f64 {
    if successes > population || sample > population {
        return 0.0;
    }
    if x > sample || x > successes || sample - x > population - successes {
        return 0.0;
    }
    let exact = (
        coefficient_f64(successes, x),
        coefficient_f64(population - successes, sample - x),
        coefficient_f64(population, sample),
    );
    if let (Some(a), Some(b), Some(total)) = exact {
        if total > 0.0 && (a * b).is_finite() {
            return a * b / total;
        }
    }
    (ln_binomial_coefficient(successes, x) + ln_binomial_coefficient(population - successes, sample - x)
        - ln_binomial_coefficient(population, sample))
    .exp()
}

/// P(X = x) for every x in 0..=n in a single O(n) pass; zero outside the
/// support max(0, n - (N - K))..=min(n, K).
///
/// Walks outward from the mode with
/// P(x + 1) / P(x) = (K - x)(n - x) / ((x + 1)(N - K - n + x + 1)) in log space.
pub fn distribution(params: &HypergeometricParameters) -> Vec<f64> {
    let HypergeometricParameters {
        population: big_n,
        successes: big_k,
        sample: n,
    } = *params;

    if big_k > big_n || n > big_n {
        return vec![0.0; n as usize + 1];
    }
    let mut ln_probs = vec![f64::NEG_INFINITY; n as usize + 1];
    let low = n.saturating_sub(big_n - big_k);
    let high = n.min(big_k);

    let mode = ((n as f64 + 1.0) * (big_k as f64 + 1.0) / (big_n as f64 + 2.0)).floor() as u64;
    let peak = mode.clamp(low, high);
    ln_probs[peak as usize] = ln_binomial_coefficient(big_k, peak) + ln_binomial_coefficient(big_n - big_k, n - peak)
        - ln_binomial_coefficient(big_n, n);

    for x in peak..high {
        let up = (big_k - x) as f64 * (n - x) as f64;
        let down = (x + 1) as f64 * (big_n - big_k + x + 1 - n) as f64;
        ln_probs[x as usize + 1] = ln_probs[x as usize] + (up / down).ln();
    }
    for x in (low + 1..=peak).rev() {
        let up = x as f64 * (big_n - big_k + x - n) as f64;
        let down = (big_k - x + 1) as f64 * (n - x + 1) as f64;
        ln_probs[x as usize - 1] = ln_probs[x as usize] + (up / down).ln();
    }

    ln_probs.into_iter().map(f64::exp).collect()
}

fn validate_x(params: &HypergeometricParameters, x: u64) -> DistResult<()> {
    if x > params.successes {
        return Err(DistError::invalid_input(
            "x",
            x.to_string(),
            format!("x ({}) no puede ser mayor que K ({}).", x, params.successes),
        ));
    }
    if x > params.sample {
        return Err(DistError::invalid_input(
            "x",
            x.to_string(),
            format!("x ({}) no puede ser mayor que n ({}).", x, params.sample),
        ));
    }
    Ok(())
}

/// P(X = x) under the given model; the binomial model uses p = K/N
pub fn probability(params: &HypergeometricParameters, x: u64, model: Model) -> DistResult<f64> {
    params.validate()?;
    validate_x(params, x)?;
    Ok(match model {
        Model::Hypergeometric => pmf(params.population, params.successes, params.sample, x),
        Model::Binomial => binomial_pmf(x, params.sample, params.p()),
    })
}

fn model_limit(params: &HypergeometricParameters, model: Model) -> u64 {
    match model {
        Model::Hypergeometric => params.max_x(),
        Model::Binomial => params.sample,
    }
}

/// P(X = x) for x in 0..=n under the model
fn model_distribution(params: &HypergeometricParameters, model: Model) -> Vec<f64> {
    match model {
        Model::Hypergeometric => distribution(params),
        Model::Binomial => binomial::distribution(params.sample, params.p()),
    }
}

/// (x, P(X = x)) for x from 0 to min(x_max, limit of the model)
pub fn range_probabilities(params: &HypergeometricParameters, x_max: u64, model: Model) -> DistResult<Vec<(u64, f64)>> {
    params.validate()?;
    let limit = x_max.min(model_limit(params, model));
    Ok(model_distribution(params, model)
        .into_iter()
        .take(limit as usize + 1)
        .enumerate()
        .map(|(x, prob)| (x as u64, prob))
        .collect())
}

/// (x, P(X = x)) for every x in 0..=n; impossible values get 0
pub fn all_probabilities(params: &HypergeometricParameters, model: Model) -> DistResult<Vec<(u64, f64)>> {
    params.validate()?;
    let limit = model_limit(params, model);
    Ok(model_distribution(params, model)
        .into_iter()
        .enumerate()
        .map(|(x, prob)| {
            let x = x as u64;
            (x, if x <= limit { prob } else { 0.0 })
        })
        .collect())
}

/// μ = n · K / N (same for both models)
pub fn mean(params: &HypergeometricParameters) -> DistResult<f64> {
    params.validate()?;
    Ok(params.sample as f64 * params.p())
}

/// σ; the hypergeometric model applies (N - n) / (N - 1) to the variance
pub fn std_dev(params: &HypergeometricParameters, model: Model) -> DistResult<f64> {
    params.validate()?;
    let big_n = params.population as f64;
    let n = params.sample as f64;
    let p = params.p();
    let q = (big_n - params.successes as f64) / big_n;
    let variance = match model {
        Model::Hypergeometric => {
            if params.population <= 1 {
                return Ok(0.0);
            }
            n * p * q * (big_n - n) / (big_n - 1.0)
        }
        Model::Binomial => n * p * q,
    };
    Ok(variance.sqrt())
}

/// First x whose cumulative probability reaches 0.5
pub fn median(probs: &[(u64, f64)]) -> DistResult<f64> {
    let mut sorted = probs.to_vec();
    sorted.sort_by_key(|(x, _)| *x);
    let last = match sorted.last() {
        Some((x, _)) => *x,
        None => {
            return Err(DistError::invalid_input(
                "probabilidades",
                "[]",
                "El conjunto de probabilidades no puede estar vacío.",
            ))
        }
    };
    let mut cumulative = 0.0;
    for (x, prob) in &sorted {
        cumulative += prob;
        if cumulative >= 0.5 {
            return Ok(*x as f64);
        }
    }
    Ok(last as f64)
}

/// Excess kurtosis of the hypergeometric distribution.
///
/// Requires N > 3 and K > 0; degenerate configurations report 0.
pub fn kurtosis(params: &HypergeometricParameters) -> DistResult<Kurtosis> {
    params.validate()?;
    if params.population <= 3 {
        return Err(DistError::invalid_input(
            "N",
            params.population.to_string(),
            "N debe ser mayor a 3 para calcular curtosis.",
        ));
    }
    if params.successes == 0 {
        return Err(DistError::invalid_input(
            "K",
            params.successes.to_string(),
            "K debe ser mayor a 0.",
        ));
    }

    let mesokurtic = Kurtosis {
        value: 0.0,
        kind: KurtosisKind::Mesokurtic,
    };
    if params.sample == params.population || params.successes == params.population {
        return Ok(mesokurtic);
    }

    let big_n = params.population as f64;
    let n = params.sample as f64;
    let p = params.p();
    let q = 1.0 - p;
    let variance = n * p * q * (big_n - n) / (big_n - 1.0);
    if variance == 0.0 {
        return Ok(mesokurtic);
    }

    let numerator = (big_n - 1.0)
        * (big_n * (big_n + 1.0) - 6.0 * big_n * (big_n - n) * p * q
            + 6.0 * n * (big_n - n) * (big_n - 2.0) * (big_n - 3.0) * p * p * q * q);
    let denominator = n * (big_n - n) * (big_n - 2.0) * (big_n - 3.0) * p * q * variance;
    if denominator == 0.0 || !numerator.is_finite() || !denominator.is_finite() {
        return Ok(mesokurtic);
    }
    Ok(Kurtosis::new(numerator / denominator - 3.0))
}

/// Model selection plus every statistic for `x` successes in the sample.
pub fn summarize(population: u64, successes: u64, sample: u64, x: u64) -> DistResult<HypergeometricSummary> {
    let params = HypergeometricParameters::new(population, successes, sample);
    params.validate()?;
    validate_x(&params, x)?;

    let model = select_model(sample, population)?;
    let range = range_probabilities(&params, x, model)?;
    let all = all_probabilities(&params, model)?;
    let mean = mean(&params)?;
    let std_dev = std_dev(&params, model)?;
    let median = median(&all)?;
    let kurtosis = kurtosis(&params).map_err(|e| DistError::calculation_failed("la curtosis", e.to_string()))?;

    let probability_x = range
        .iter()
        .find(|(value, _)| *value == x)
        .map(|(_, prob)| *prob)
        .unwrap_or(0.0);

    debug!(
        "hypergeometric N={} K={} n={} x={}: model={} P={}",
        population, successes, sample, x, model, probability_x
    );

    Ok(HypergeometricSummary {
        params,
        model,
        x,
        probability_x,
        range_probabilities: range,
        all_probabilities: all,
        mean,
        std_dev,
        median,
        skew: MedianSkew::compare(mean, median),
        kurtosis,
    })
}
