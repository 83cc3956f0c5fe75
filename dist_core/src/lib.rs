//! # dist_core - Probability Distribution Engine
//!
//! `dist_core` is the computational heart of Distribuciones: binomial and
//! hypergeometric statistics, input validation, report formatting, and the
//! chart series drawn by the GUI. All inputs and outputs are
//! JSON-serializable, so the same engine backs the desktop app and the CLI.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types with user-facing Spanish messages
//! - **No UI**: Nothing here draws; front ends render what this crate computes
//!
//! ## Quick Start
//!
//! ```rust
//! use dist_core::validation::{parse_x_values, validate_parameters};
//! use dist_core::calculations::binomial::{calculate, BinomialInput};
//!
//! let params = validate_parameters("10", "0.5").unwrap();
//! let x_values = parse_x_values("todos", params.n).unwrap();
//! let result = calculate(&BinomialInput::new(params, x_values)).unwrap();
//!
//! assert_eq!(result.mean, 5.0);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"variance\": 2.5"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Binomial and hypergeometric statistics
//! - [`validation`] - Parsing and checking raw text inputs
//! - [`chart`] - Bar chart series, curves and annotations
//! - [`chart_image`] - PNG rendering of a chart
//! - [`format`] - Result text and full reports
//! - [`dataset`] - Excel and CSV loading, value frequencies
//! - [`settings`] - Display precision
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic report export

pub mod calculations;
pub mod chart;
pub mod chart_image;
pub mod dataset;
pub mod errors;
pub mod file_io;
pub mod format;
pub mod settings;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{BinomialInput, BinomialParameters, BinomialResult, Distribution, HypergeometricSummary};
pub use chart::ChartData;
pub use dataset::Dataset;
pub use errors::{DistError, DistResult};
pub use settings::DisplaySettings;
