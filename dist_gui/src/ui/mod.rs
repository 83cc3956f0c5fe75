//! UI module for the Distribuciones GUI
//!
//! # Panel Structure
//! - `toolbar` - Header, theme toggle and report export
//! - `sidebar` - Left sidebar: calculator selection
//! - `input_panel` - Center panel: dispatches to input_* child modules
//! - `results_panel` - Right panel: dispatches to result_* child modules
//! - `status_bar` - Bottom summary line
//! - `modal` - Error dialog overlay
//!
//! # Input Panel Children
//! - `input_binomial` - n, p, N and X fields
//! - `input_hypergeometric` - N, K, n and x fields
//! - `input_dataset` - Data file, column, category, n and x
//!
//! # Results Panel Children
//! - `result_binomial` - Statistics, shape, probability table, chart
//! - `result_hypergeometric` - Model, statistics, probabilities, chart
//! - `result_dataset` - Frequencies and table preview of the loaded file
//!
//! # Shared Components
//! - `shared/chart` - Canvas drawing for the probability chart
//! - `shared/fields` - Labeled inputs and stat rows

// Top-level panels
pub mod toolbar;
pub mod sidebar;
pub mod input_panel;
pub mod results_panel;
pub mod status_bar;
pub mod modal;

// Input panel children
pub mod input_binomial;
pub mod input_hypergeometric;
pub mod input_dataset;

// Results panel children
pub mod result_binomial;
pub mod result_hypergeometric;
pub mod result_dataset;

// Shared components
pub mod shared;
