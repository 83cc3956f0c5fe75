//! # Distribution Calculations
//!
//! Each distribution follows the pattern:
//!
//! - `*Parameters` / `*Input` - Input parameters (JSON-serializable)
//! - `*Result` / `*Summary` - Calculation results (JSON-serializable)
//! - `calculate` / `summarize` - Pure calculation function returning `DistResult`
//!
//! ## Available Calculations
//!
//! - [`binomial`] - Binomial distribution with optional finite population
//! - [`hypergeometric`] - Sampling without replacement, with model selection
//! - [`shape`] - Skewness / kurtosis classification shared by both

pub mod binomial;
pub mod hypergeometric;
pub mod shape;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use binomial::{BinomialInput, BinomialParameters, BinomialResult, Mode};
pub use hypergeometric::{HypergeometricParameters, HypergeometricSummary, Model};

/// Enum wrapper for every distribution the application computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distribution {
    Binomial,
    Hypergeometric,
}

impl Distribution {
    pub fn display_name(&self) -> &'static str {
        match self {
            Distribution::Binomial => "Binomial",
            Distribution::Hypergeometric => "Hipergeométrica",
        }
    }

    /// Heading shown above the input form
    pub fn title(&self) -> &'static str {
        match self {
            Distribution::Binomial => "DISTRIBUCIÓN BINOMIAL",
            Distribution::Hypergeometric => "DISTRIBUCIÓN HIPERGEOMÉTRICA",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Distribution::Binomial => "Número de éxitos en n ensayos independientes con probabilidad p",
            Distribution::Hypergeometric => "Modela muestreo sin reemplazo de una población finita",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_labels() {
        assert_eq!(Distribution::Binomial.display_name(), "Binomial");
        assert_eq!(Distribution::Hypergeometric.title(), "DISTRIBUCIÓN HIPERGEOMÉTRICA");
        assert!(Distribution::Hypergeometric.description().contains("sin reemplazo"));
    }
}
