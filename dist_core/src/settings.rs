//! # Display Settings
//!
//! Knobs for the text report: decimal places and the size of the `█` bars.
//! JSON-serializable so front ends can load them alongside their own config.

use serde::{Deserialize, Serialize};

/// Formatting options for reports and result panels.
///
/// ## JSON Example
///
/// ```json
/// { "decimals": 6, "percent_decimals": 3, "bar_scale": 1.5, "max_bar_cells": 67 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimal places for statistics (mean, variance, ...)
    pub decimals: usize,

    /// Decimal places for percentages
    pub percent_decimals: usize,

    /// Percentage points per bar cell in the probability table
    pub bar_scale: f64,

    /// Upper bound on bar cells per row
    pub max_bar_cells: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            decimals: 6,
            percent_decimals: 3,
            bar_scale: 1.5,
            max_bar_cells: 67,
        }
    }
}

impl DisplaySettings {
    /// Replace the statistic precision, clamped to 0..=12
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals.min(12);
        self
    }

    /// Number of `█` cells for a percentage
    pub fn bar_cells(&self, percent: f64) -> usize {
        if !percent.is_finite() || percent <= 0.0 || self.bar_scale <= 0.0 {
            return 0;
        }
        ((percent / self.bar_scale) as usize).min(self.max_bar_cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let settings: DisplaySettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, DisplaySettings::default());

        let settings: DisplaySettings = serde_json::from_str(r#"{"decimals": 4}"#).unwrap();
        assert_eq!(settings.decimals, 4);
        assert_eq!(settings.percent_decimals, 3);
    }

    #[test]
    fn test_bar_cells() {
        let settings = DisplaySettings::default();
        assert_eq!(settings.bar_cells(24.6), 16);
        assert_eq!(settings.bar_cells(100.0), 66);
        assert_eq!(settings.bar_cells(0.0), 0);
        assert_eq!(settings.with_decimals(40).decimals, 12);
    }
}
