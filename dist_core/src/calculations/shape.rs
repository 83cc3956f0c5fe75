//! # Distribution Shape
//!
//! Classification of skewness and excess kurtosis values into the labels
//! shown in reports. Thresholds: skewness beyond ±0.01, kurtosis beyond ±0.1.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Skewness values inside this band count as symmetric
pub const SKEWNESS_BAND: f64 = 0.01;

/// Excess kurtosis values inside this band count as mesokurtic
pub const KURTOSIS_BAND: f64 = 0.1;

/// Tolerance when comparing mean and median
pub const MEDIAN_TOLERANCE: f64 = 0.001;

/// Direction of the distribution's asymmetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkewnessKind {
    Positive,
    Negative,
    Symmetric,
}

impl SkewnessKind {
    pub fn classify(value: f64) -> Self {
        if value > SKEWNESS_BAND {
            SkewnessKind::Positive
        } else if value < -SKEWNESS_BAND {
            SkewnessKind::Negative
        } else {
            SkewnessKind::Symmetric
        }
    }

    /// Full label, e.g. "Positivo (Asimetría a la derecha)"
    pub fn label(&self) -> &'static str {
        match self {
            SkewnessKind::Positive => "Positivo (Asimetría a la derecha)",
            SkewnessKind::Negative => "Negativo (Asimetría a la izquierda)",
            SkewnessKind::Symmetric => "Neutro (Simétrica)",
        }
    }
}

impl fmt::Display for SkewnessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Peakedness relative to the normal distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KurtosisKind {
    Leptokurtic,
    Platykurtic,
    Mesokurtic,
}

impl KurtosisKind {
    pub fn classify(value: f64) -> Self {
        if value > KURTOSIS_BAND {
            KurtosisKind::Leptokurtic
        } else if value < -KURTOSIS_BAND {
            KurtosisKind::Platykurtic
        } else {
            KurtosisKind::Mesokurtic
        }
    }

    /// Bare name, e.g. "Leptocúrtica"
    pub fn name(&self) -> &'static str {
        match self {
            KurtosisKind::Leptokurtic => "Leptocúrtica",
            KurtosisKind::Platykurtic => "Platicúrtica",
            KurtosisKind::Mesokurtic => "Mesocúrtica",
        }
    }

    /// Name with a short description of the curve
    pub fn label(&self) -> &'static str {
        match self {
            KurtosisKind::Leptokurtic => "Leptocúrtica (Curva elevada)",
            KurtosisKind::Platykurtic => "Platicúrtica (Curva aplanada)",
            KurtosisKind::Mesokurtic => "Mesocúrtica (Campana de Gauss)",
        }
    }
}

impl fmt::Display for KurtosisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A skewness value together with its classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skewness {
    pub value: f64,
    pub kind: SkewnessKind,
}

impl Skewness {
    pub fn new(value: f64) -> Self {
        Skewness {
            value,
            kind: SkewnessKind::classify(value),
        }
    }
}

/// An excess kurtosis value together with its classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kurtosis {
    pub value: f64,
    pub kind: KurtosisKind,
}

impl Kurtosis {
    pub fn new(value: f64) -> Self {
        Kurtosis {
            value,
            kind: KurtosisKind::classify(value),
        }
    }
}

/// Skew verdict from comparing mean and median
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedianSkew {
    Null,
    Negative,
    Positive,
}

impl MedianSkew {
    pub fn compare(mean: f64, median: f64) -> Self {
        let difference = mean - median;
        if difference.abs() < MEDIAN_TOLERANCE {
            MedianSkew::Null
        } else if difference < 0.0 {
            MedianSkew::Negative
        } else {
            MedianSkew::Positive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MedianSkew::Null => "Nulo (media = mediana)",
            MedianSkew::Negative => "Negativo (media < mediana)",
            MedianSkew::Positive => "Positivo (media > mediana)",
        }
    }
}

impl fmt::Display for MedianSkew {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skewness_bands() {
        assert_eq!(SkewnessKind::classify(0.2), SkewnessKind::Positive);
        assert_eq!(SkewnessKind::classify(-0.2), SkewnessKind::Negative);
        assert_eq!(SkewnessKind::classify(0.005), SkewnessKind::Symmetric);
        assert_eq!(SkewnessKind::classify(0.01), SkewnessKind::Symmetric);
    }

    #[test]
    fn test_kurtosis_bands() {
        assert_eq!(KurtosisKind::classify(0.5), KurtosisKind::Leptokurtic);
        assert_eq!(KurtosisKind::classify(-0.2), KurtosisKind::Platykurtic);
        assert_eq!(KurtosisKind::classify(0.1), KurtosisKind::Mesokurtic);
        assert_eq!(Kurtosis::new(-0.2).kind.name(), "Platicúrtica");
    }

    #[test]
    fn test_median_skew() {
        assert_eq!(MedianSkew::compare(0.96, 1.0), MedianSkew::Negative);
        assert_eq!(MedianSkew::compare(1.0005, 1.0), MedianSkew::Null);
        assert_eq!(MedianSkew::compare(2.5, 2.0).label(), "Positivo (media > mediana)");
    }
}
