//! # Error Types
//!
//! Structured error types for dist_core. Validation errors carry the Spanish
//! message shown to the user; every variant also keeps enough context to be
//! handled programmatically (e.g. by the CLI's `--json` output).
//!
//! ## Example
//!
//! ```rust
//! use dist_core::errors::{DistError, DistResult};
//!
//! fn validate_trials(n: i64) -> DistResult<u64> {
//!     if n <= 0 {
//!         return Err(DistError::invalid_input(
//!             "n",
//!             n.to_string(),
//!             "El número de ensayos (n) debe ser mayor a 0",
//!         ));
//!     }
//!     Ok(n as u64)
//! }
//!
//! let err = validate_trials(0).unwrap_err();
//! assert_eq!(err.to_string(), "El número de ensayos (n) debe ser mayor a 0");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dist_core operations
pub type DistResult<T> = Result<T, DistError>;

/// Structured error type for distribution operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DistError {
    /// An input value is invalid (non-numeric, out of range, ...)
    ///
    /// Displays only `reason`, which is the user-facing message.
    #[error("{reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("El campo '{field}' es obligatorio")]
    MissingField { field: String },

    /// Calculation could not be completed
    #[error("Error al calcular {calculation}: {reason}")]
    CalculationFailed { calculation: String, reason: String },

    /// File I/O error
    #[error("Error de archivo ({operation}) en '{path}': {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File extension is not one we can read
    #[error("El formato de archivo no es soportado. Formatos aceptados: {accepted}. Archivo seleccionado: {path}")]
    UnsupportedFormat { path: String, accepted: String },

    /// File has headers but no data rows, or nothing at all
    #[error("El archivo '{source_name}' no contiene filas de datos")]
    EmptyDataset { source_name: String },

    /// File has no usable header row
    #[error("El archivo '{source_name}' no tiene encabezados válidos; la primera fila debe contener los nombres de las columnas")]
    MissingHeaders { source_name: String },

    /// Requested column does not exist
    #[error("La columna '{column}' no existe en el archivo. Columnas disponibles: {available}")]
    ColumnNotFound { column: String, available: String },

    /// Generic internal error (should be rare)
    #[error("Error interno: {message}")]
    Internal { message: String },
}

impl DistError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DistError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        DistError::MissingField {
            field: field.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation: impl Into<String>, reason: impl Into<String>) -> Self {
        DistError::CalculationFailed {
            calculation: calculation.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        DistError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ColumnNotFound error from the list of available headers
    pub fn column_not_found(column: impl Into<String>, available: &[String]) -> Self {
        DistError::ColumnNotFound {
            column: column.into(),
            available: available.join(", "),
        }
    }

    /// True for errors caused by what the user typed or picked
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DistError::InvalidInput { .. }
                | DistError::MissingField { .. }
                | DistError::UnsupportedFormat { .. }
                | DistError::EmptyDataset { .. }
                | DistError::MissingHeaders { .. }
                | DistError::ColumnNotFound { .. }
        )
    }

    /// Dialog title used when surfacing this error
    pub fn title(&self) -> &'static str {
        match self {
            DistError::InvalidInput { .. } => "Error de Validación",
            DistError::MissingField { .. } => "Error de Entrada",
            DistError::FileError { .. }
            | DistError::UnsupportedFormat { .. }
            | DistError::EmptyDataset { .. }
            | DistError::MissingHeaders { .. }
            | DistError::ColumnNotFound { .. } => "Error de Archivo",
            DistError::CalculationFailed { .. } | DistError::Internal { .. } => "Error Inesperado",
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DistError::InvalidInput { .. } => "INVALID_INPUT",
            DistError::MissingField { .. } => "MISSING_FIELD",
            DistError::CalculationFailed { .. } => "CALCULATION_FAILED",
            DistError::FileError { .. } => "FILE_ERROR",
            DistError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            DistError::EmptyDataset { .. } => "EMPTY_DATASET",
            DistError::MissingHeaders { .. } => "MISSING_HEADERS",
            DistError::ColumnNotFound { .. } => "COLUMN_NOT_FOUND",
            DistError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = DistError::invalid_input("p", "1.5", "La probabilidad (p) debe estar entre 0 y 1");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: DistError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_invalid_input_displays_reason_only() {
        let error = DistError::invalid_input("n", "abc", "El número de ensayos (n) debe ser un número entero");
        assert_eq!(error.to_string(), "El número de ensayos (n) debe ser un número entero");
    }

    #[test]
    fn test_error_codes_and_titles() {
        assert_eq!(DistError::missing_field("n").error_code(), "MISSING_FIELD");
        let missing = DistError::column_not_found("edad", &["sexo".to_string(), "zona".to_string()]);
        assert_eq!(missing.error_code(), "COLUMN_NOT_FOUND");
        assert_eq!(missing.title(), "Error de Archivo");
        assert!(missing.to_string().contains("sexo, zona"));
        assert_eq!(DistError::calculation_failed("media", "x").title(), "Error Inesperado");
    }

    #[test]
    fn test_user_errors() {
        assert!(DistError::invalid_input("p", "x", "bad").is_user_error());
        assert!(!DistError::Internal { message: "boom".into() }.is_user_error());
    }
}
