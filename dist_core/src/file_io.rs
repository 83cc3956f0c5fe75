//! # File I/O Module
//!
//! Exports text reports with an atomic save: write to a `.tmp` sibling,
//! sync, then rename over the target so a crash never leaves a half-written
//! report behind.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dist_core::file_io::{save_report, report_path};
//! use std::path::Path;
//!
//! let path = report_path(Path::new("resultados"));
//! save_report("RESULTADOS", &path).unwrap();
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::{DistError, DistResult};

/// Extension given to exported reports
pub const REPORT_EXTENSION: &str = "txt";

/// Default file name offered by save dialogs
pub const DEFAULT_REPORT_NAME: &str = "resultados_distribucion.txt";

/// `path` with the report extension when it has none
pub fn report_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(REPORT_EXTENSION)
    }
}

/// Save a report as UTF-8 text, replacing any existing file atomically.
pub fn save_report(contents: &str, path: &Path) -> DistResult<()> {
    let tmp_path = path.with_extension("tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| DistError::file_error("crear archivo temporal", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(contents.as_bytes())
        .map_err(|e| DistError::file_error("escribir archivo temporal", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| DistError::file_error("sincronizar archivo temporal", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DistError::file_error("renombrar", path.display().to_string(), e.to_string())
    })?;

    info!("report saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path() {
        assert_eq!(report_path(Path::new("/tmp/resultados")), Path::new("/tmp/resultados.txt"));
        assert_eq!(report_path(Path::new("informe.log")), Path::new("informe.log"));
    }

    #[test]
    fn test_save_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reporte.txt");

        save_report("primero", &path).unwrap();
        save_report("μ = 5.000000", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "μ = 5.000000");
        assert!(!dir.path().join("reporte.tmp").exists());
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_existe").join("reporte.txt");
        let err = save_report("x", &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
