//! # Input Validation
//!
//! Turns the raw text typed into the input fields into validated parameters.
//! Every failure is a [`DistError::InvalidInput`] whose message is the Spanish
//! text shown to the user; nothing reaches the calculation module unless it
//! passed through here.
//!
//! ## Example
//!
//! ```rust
//! use dist_core::validation::validate_parameters;
//!
//! let params = validate_parameters("10", "0.5").unwrap();
//! assert_eq!(params.n, 10);
//!
//! let err = validate_parameters("0", "0.5").unwrap_err();
//! assert_eq!(err.to_string(), "El número de ensayos (n) debe ser mayor a 0");
//! ```

use std::num::IntErrorKind;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::calculations::binomial::{BinomialParameters, MAX_POPULATION, MAX_TRIALS};
use crate::calculations::hypergeometric::HypergeometricParameters;
use crate::errors::{DistError, DistResult};

/// Keyword that selects every X value
pub const ALL_KEYWORD: &str = "todos";

fn reject<T>(field: &str, raw: &str, reason: impl Into<String>) -> DistResult<T> {
    let err = DistError::invalid_input(field, raw, reason);
    warn!("rejected input {}='{}': {}", field, raw, err);
    Err(err)
}

/// Parse a strictly positive integer count no larger than `max`
fn parse_positive(raw: &str, field: &str, description: &str, max: u64) -> DistResult<u64> {
    let trimmed = raw.trim();
    let too_large = || format!("{} no puede ser mayor a {}", description, max);
    match trimmed.parse::<i64>() {
        Ok(value) if value > 0 && value as u64 <= max => Ok(value as u64),
        Ok(value) if value > 0 => reject(field, trimmed, too_large()),
        Ok(_) => reject(field, trimmed, format!("{} debe ser mayor a 0", description)),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => reject(field, trimmed, too_large()),
        Err(_) => reject(field, trimmed, format!("{} debe ser un número entero", description)),
    }
}

/// Parse a non-negative integer count
fn parse_non_negative(raw: &str, field: &str, description: &str) -> DistResult<u64> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if value >= 0 => Ok(value as u64),
        Ok(_) => reject(field, trimmed, format!("{} no puede ser negativo", description)),
        Err(_) => reject(field, trimmed, format!("{} debe ser un número entero", description)),
    }
}

/// Parse the trial count n, at most [`MAX_TRIALS`]
pub fn parse_trials(raw: &str) -> DistResult<u64> {
    parse_positive(raw, "n", "El número de ensayos (n)", MAX_TRIALS)
}

/// Parse p, accepting a decimal comma
pub fn parse_probability(raw: &str) -> DistResult<f64> {
    let trimmed = raw.trim();
    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(p) if p.is_finite() && (0.0..=1.0).contains(&p) => Ok(p),
        Ok(_) => reject("p", trimmed, "La probabilidad (p) debe estar entre 0 y 1"),
        Err(_) => reject("p", trimmed, "La probabilidad (p) debe ser un número entre 0 y 1"),
    }
}

/// Parse the optional population size; empty or any spelling of zero
/// (`0`, `00`, `0.0`, `0,0`) means infinite
pub fn parse_population(raw: &str) -> DistResult<Option<u64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let is_zero = trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_or(false, |value| value == 0.0);
    if is_zero {
        return Ok(None);
    }
    parse_positive(
        trimmed,
        "N",
        "El tamaño de población (N)",
        MAX_POPULATION,
    )
    .map_err(|err| match err {
        DistError::InvalidInput { field, value, reason } if reason.ends_with("debe ser mayor a 0") => {
            DistError::InvalidInput {
                field,
                value,
                reason: format!("{} (deje vacío para población infinita)", reason),
            }
        }
        other => other,
    })
    .map(Some)
}

/// Validate n and p as typed by the user.
pub fn validate_parameters(n_raw: &str, p_raw: &str) -> DistResult<BinomialParameters> {
    let n = parse_trials(n_raw)?;
    let p = parse_probability(p_raw)?;
    Ok(BinomialParameters::new(n, p))
}

/// Validate n, p and the optional population size N.
pub fn validate_with_population(n_raw: &str, p_raw: &str, population_raw: &str) -> DistResult<BinomialParameters> {
    let mut params = validate_parameters(n_raw, p_raw)?;
    if let Some(population) = parse_population(population_raw)? {
        if params.n >= population {
            return reject(
                "N",
                population_raw.trim(),
                "El tamaño de muestra (n) debe ser menor que el tamaño de población (N)",
            );
        }
        params.population = Some(population);
    }
    Ok(params)
}

/// What the X field asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum XSelection {
    /// Empty field or `todos`
    All,
    /// A single number k: every value from 0 to k
    UpTo(i64),
    /// Comma-separated values, evaluated as given
    List(Vec<i64>),
}

impl XSelection {
    /// Expand to concrete values for a maximum attainable X.
    ///
    /// `UpTo` clamps into `0..=max` (negative gives `[0]`); `List` is
    /// returned as typed and must go through [`validate_x_values`].
    pub fn resolve(&self, max: u64) -> Vec<i64> {
        match self {
            XSelection::All => (0..=max as i64).collect(),
            XSelection::UpTo(k) if *k < 0 => vec![0],
            XSelection::UpTo(k) => (0..=(*k).min(max as i64)).collect(),
            XSelection::List(values) => values.clone(),
        }
    }
}

/// Parse the X field: `""`, `todos`, a single integer, or `a, b, c`.
pub fn parse_x_selection(text: &str) -> DistResult<XSelection> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() || normalized == ALL_KEYWORD {
        return Ok(XSelection::All);
    }

    if !normalized.contains(',') {
        return match normalized.parse::<i64>() {
            Ok(k) => Ok(XSelection::UpTo(k)),
            Err(_) => reject(
                "X",
                text.trim(),
                "Los valores de X deben ser números enteros separados por coma, o 'todos'",
            ),
        };
    }

    let mut values = Vec::new();
    for part in normalized.split(',') {
        let part = part.trim();
        match part.parse::<i64>() {
            Ok(value) => values.push(value),
            Err(_) => {
                return reject(
                    "X",
                    part,
                    format!("El valor X='{}' no es un número entero", part),
                )
            }
        }
    }
    Ok(XSelection::List(values))
}

/// Check every x lies in 0..=max
pub fn validate_x_values(values: &[i64], max: u64) -> DistResult<Vec<u64>> {
    values
        .iter()
        .map(|&x| {
            if x < 0 || x as u64 > max {
                reject("X", &x.to_string(), format!("El valor X={} debe estar entre 0 y {}", x, max))
            } else {
                Ok(x as u64)
            }
        })
        .collect()
}

/// Parse and range-check the X field for a binomial with n trials
pub fn parse_x_values(text: &str, n: u64) -> DistResult<Vec<u64>> {
    let selection = parse_x_selection(text)?;
    validate_x_values(&selection.resolve(n), n)
}

/// Validate the hypergeometric fields N, K and n.
pub fn validate_hypergeometric(
    population_raw: &str,
    successes_raw: &str,
    sample_raw: &str,
) -> DistResult<HypergeometricParameters> {
    let population = parse_positive(
        population_raw,
        "N",
        "El tamaño de población (N) es obligatorio y",
        MAX_POPULATION,
    )?;
    let successes = parse_non_negative(
        successes_raw,
        "K",
        "El número de éxitos en población (K)",
    )?;
    let sample = parse_positive(sample_raw, "n", "El tamaño de muestra (n)", MAX_TRIALS)?;

    let params = HypergeometricParameters::new(population, successes, sample);
    if let Err(err) = params.validate() {
        warn!("rejected hypergeometric parameters: {}", err);
        return Err(err);
    }
    Ok(params)
}

/// Parse and range-check X for a hypergeometric experiment (0..=min(n, K))
pub fn parse_hypergeometric_x(text: &str, params: &HypergeometricParameters) -> DistResult<Vec<u64>> {
    let max = params.max_x();
    let selection = parse_x_selection(text)?;
    let values = selection.resolve(max);
    values
        .iter()
        .map(|&x| {
            if x < 0 {
                reject("X", &x.to_string(), format!("El valor X={} no puede ser negativo", x))
            } else if x as u64 > max {
                reject(
                    "X",
                    &x.to_string(),
                    format!(
                        "El valor X={} excede el máximo posible ({} = min(n={}, K={}))",
                        x, max, params.sample, params.successes
                    ),
                )
            } else {
                Ok(x as u64)
            }
        })
        .collect()
}

/// Parse the single "x" requested in the file analysis flow
pub fn parse_desired_successes(raw: &str) -> DistResult<u64> {
    parse_non_negative(raw, "x", "El número de éxitos deseados (x)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_parameters() {
        let params = validate_parameters("10", "0.5").unwrap();
        assert_eq!(params.n, 10);
        assert_eq!(params.p, 0.5);
        assert_eq!(params.population, None);

        let params = validate_parameters("  7 ", " 0,25 ").unwrap();
        assert_eq!(params.n, 7);
        assert_eq!(params.p, 0.25);

        assert!(validate_parameters("3", "0").is_ok());
        assert!(validate_parameters("3", "1").is_ok());
    }

    #[test]
    fn test_rejects_bad_trials() {
        for raw in ["0", "-5", "abc", "", "2.5"] {
            assert!(validate_parameters(raw, "0.5").is_err(), "n={:?} accepted", raw);
        }
        assert_eq!(
            validate_parameters("-5", "0.5").unwrap_err().to_string(),
            "El número de ensayos (n) debe ser mayor a 0"
        );
        assert_eq!(
            validate_parameters("abc", "0.5").unwrap_err().to_string(),
            "El número de ensayos (n) debe ser un número entero"
        );
    }

    #[test]
    fn test_rejects_bad_probability() {
        for raw in ["1.5", "-0.1", "x", "", "NaN", "inf"] {
            assert!(validate_parameters("10", raw).is_err(), "p={:?} accepted", raw);
        }
        let err = validate_parameters("10", "1.5").unwrap_err();
        assert_eq!(err.to_string(), "La probabilidad (p) debe estar entre 0 y 1");
        match err {
            DistError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "p");
                assert_eq!(value, "1.5");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_population() {
        assert_eq!(validate_with_population("10", "0.5", "").unwrap().population, None);
        assert_eq!(validate_with_population("10", "0.5", "0").unwrap().population, None);
        assert_eq!(validate_with_population("10", "0.5", "100").unwrap().population, Some(100));
        let err = validate_with_population("10", "0.5", "10").unwrap_err();
        assert_eq!(
            err.to_string(),
            "El tamaño de muestra (n) debe ser menor que el tamaño de población (N)"
        );
        assert!(validate_with_population("10", "0.5", "-3").is_err());
        assert!(validate_with_population("10", "0.5", "mil").is_err());
    }

    #[test]
    fn test_zero_population_spellings_mean_infinite() {
        for raw in ["0", "00", " 0.0", "0,0", "  "] {
            assert_eq!(parse_population(raw).unwrap(), None, "N={:?}", raw);
        }
        assert_eq!(
            parse_population("-3").unwrap_err().to_string(),
            "El tamaño de población (N) debe ser mayor a 0 (deje vacío para población infinita)"
        );
    }

    #[test]
    fn test_rejects_sizes_above_limits() {
        let too_many = (MAX_TRIALS + 1).to_string();
        let err = validate_parameters(&too_many, "0.5").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(
            err.to_string(),
            format!("El número de ensayos (n) no puede ser mayor a {}", MAX_TRIALS)
        );
        assert_eq!(validate_parameters(&MAX_TRIALS.to_string(), "0.5").unwrap().n, MAX_TRIALS);

        // Beyond i64 is reported as too large, not as a non-integer
        let err = validate_parameters("1000000000000000000000", "0.5").unwrap_err();
        assert!(err.to_string().contains("no puede ser mayor a"));

        let err = validate_with_population("10", "0.5", &(MAX_POPULATION + 1).to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("El tamaño de población (N) no puede ser mayor a {}", MAX_POPULATION)
        );

        let err = validate_hypergeometric("2000000", "10", &too_many).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("El tamaño de muestra (n) no puede ser mayor a {}", MAX_TRIALS)
        );
        let err = validate_hypergeometric(&(MAX_POPULATION + 1).to_string(), "10", "5").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(validate_hypergeometric("1000000000000", "6", "4").is_err());
    }

    #[test]
    fn test_x_selection() {
        assert_eq!(parse_x_values("", 3).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(parse_x_values(" Todos ", 2).unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_x_values("2", 5).unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_x_values("9", 3).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(parse_x_values("-4", 3).unwrap(), vec![0]);
        assert_eq!(parse_x_values("3, 1,0", 5).unwrap(), vec![3, 1, 0]);
    }

    #[test]
    fn test_x_selection_errors() {
        let err = parse_x_values("1, 7", 5).unwrap_err();
        assert_eq!(err.to_string(), "El valor X=7 debe estar entre 0 y 5");
        assert!(parse_x_values("1, -1", 5).is_err());
        assert!(parse_x_values("1, dos", 5).is_err());
        assert!(parse_x_values("tres", 5).is_err());
    }

    #[test]
    fn test_hypergeometric_validation() {
        let params = validate_hypergeometric("25", "6", "4").unwrap();
        assert_eq!(params.max_x(), 4);

        let err = validate_hypergeometric("10", "12", "3").unwrap_err();
        assert_eq!(err.to_string(), "El número de éxitos (K=12) no puede ser mayor que la población (N=10)");
        let err = validate_hypergeometric("10", "2", "11").unwrap_err();
        assert_eq!(err.to_string(), "El tamaño de muestra (n=11) no puede ser mayor que la población (N=10)");
        assert!(validate_hypergeometric("0", "0", "1").is_err());
        assert!(validate_hypergeometric("10", "-1", "1").is_err());
    }

    #[test]
    fn test_hypergeometric_x() {
        let params = HypergeometricParameters::new(20, 2, 5);
        assert_eq!(parse_hypergeometric_x("todos", &params).unwrap(), vec![0, 1, 2]);
        let err = parse_hypergeometric_x("0,3", &params).unwrap_err();
        assert_eq!(err.to_string(), "El valor X=3 excede el máximo posible (2 = min(n=5, K=2))");
    }
}
