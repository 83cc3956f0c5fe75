//! Application configuration
//!
//! Read once at startup from environment variables:
//! - `DISTRIBUCIONES_THEME` - `dark` or `light`
//! - `DISTRIBUCIONES_WIDTH` / `DISTRIBUCIONES_HEIGHT` - initial window size
//! - `DISTRIBUCIONES_DECIMALS` - decimal places in results and reports
//!
//! Invalid values are logged and replaced by the defaults.

use log::warn;

use dist_core::settings::DisplaySettings;

pub const THEME_VAR: &str = "DISTRIBUCIONES_THEME";
pub const WIDTH_VAR: &str = "DISTRIBUCIONES_WIDTH";
pub const HEIGHT_VAR: &str = "DISTRIBUCIONES_HEIGHT";
pub const DECIMALS_VAR: &str = "DISTRIBUCIONES_DECIMALS";

const MIN_WIDTH: f32 = 800.0;
const MIN_HEIGHT: f32 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub dark_mode: bool,
    pub window_width: f32,
    pub window_height: f32,
    pub display: DisplaySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            dark_mode: true,
            window_width: 1280.0,
            window_height: 820.0,
            display: DisplaySettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();

        if let Some(raw) = lookup(THEME_VAR) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "dark" | "oscuro" => config.dark_mode = true,
                "light" | "claro" => config.dark_mode = false,
                other => warn!("{}={:?} not recognized, using dark theme", THEME_VAR, other),
            }
        }

        if let Some(width) = parse_dimension(&lookup, WIDTH_VAR, MIN_WIDTH) {
            config.window_width = width;
        }
        if let Some(height) = parse_dimension(&lookup, HEIGHT_VAR, MIN_HEIGHT) {
            config.window_height = height;
        }

        if let Some(raw) = lookup(DECIMALS_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(decimals) => config.display = config.display.with_decimals(decimals),
                Err(_) => warn!("{}={:?} is not a whole number, ignoring", DECIMALS_VAR, raw),
            }
        }

        config
    }
}

fn parse_dimension(lookup: &impl Fn(&str) -> Option<String>, key: &str, min: f32) -> Option<f32> {
    let raw = lookup(key)?;
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() && value >= min => Some(value),
        _ => {
            warn!("{}={:?} must be a number >= {}, ignoring", key, raw, min);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, AppConfig::default());
        assert!(config.dark_mode);
        assert_eq!(config.window_width, 1280.0);
    }

    #[test]
    fn test_reads_values() {
        let config = config_from(&[
            (THEME_VAR, " Light "),
            (WIDTH_VAR, "1024"),
            (HEIGHT_VAR, "700"),
            (DECIMALS_VAR, "4"),
        ]);
        assert!(!config.dark_mode);
        assert_eq!(config.window_width, 1024.0);
        assert_eq!(config.window_height, 700.0);
        assert_eq!(config.display.decimals, 4);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            (THEME_VAR, "purple"),
            (WIDTH_VAR, "wide"),
            (HEIGHT_VAR, "100"),
            (DECIMALS_VAR, "-2"),
        ]);
        assert_eq!(config, AppConfig::default());
    }
}
