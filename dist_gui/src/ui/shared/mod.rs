//! Shared UI components reusable across input/result modules
//!
//! Contains:
//! - `chart` - Canvas drawing for the probability bar chart
//! - `fields` - Labeled text inputs and stat rows

pub mod chart;
pub mod fields;
