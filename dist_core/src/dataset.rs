//! # Tabular Datasets
//!
//! Loads a spreadsheet or CSV file with a header row and answers the
//! questions the file analysis flow asks of it: column names, row count, and
//! how often each value occurs in a column. The row count becomes the population `N` and the count
//! of the chosen category becomes `K` of a hypergeometric experiment.
//!
//! Excel workbooks are read with `calamine`; CSV files that are not valid
//! UTF-8 are re-read as Latin-1.
//!
//! ## Example
//!
//! ```rust
//! use dist_core::dataset::Dataset;
//!
//! let data = "estado,turno\nok,día\nfalla,noche\nok,noche\n";
//! let dataset = Dataset::from_reader("piezas.csv", data.as_bytes()).unwrap();
//!
//! assert_eq!(dataset.headers(), ["estado", "turno"]);
//! assert_eq!(dataset.row_count(), 3);
//! assert_eq!(
//!     dataset.frequencies("estado").unwrap(),
//!     vec![("ok".to_string(), 2), ("falla".to_string(), 1)]
//! );
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::{DistError, DistResult};

/// Extensions accepted by [`Dataset::from_path`]
pub const ACCEPTED_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];

/// Rows shown in table previews
pub const PREVIEW_ROWS: usize = 500;

/// A loaded table: trimmed headers and rows padded to the header width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Overview shown after loading a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub empty_cells: usize,
}

impl Dataset {
    /// Load a spreadsheet (`.xlsx`, `.xls`) or `.csv` file from disk.
    ///
    /// Spreadsheets are read from their first sheet.
    pub fn from_path(path: &Path) -> DistResult<Self> {
        let display = path.display().to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| display.clone());

        let dataset = match extension.as_deref() {
            Some("csv") => Self::from_csv_file(name, path)?,
            Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext) => Self::from_workbook(name, path)?,
            _ => {
                return Err(DistError::UnsupportedFormat {
                    path: display,
                    accepted: ACCEPTED_EXTENSIONS
                        .iter()
                        .map(|e| format!(".{}", e))
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
        };

        info!(
            "loaded {} ({} rows, {} columns)",
            dataset.name,
            dataset.row_count(),
            dataset.headers.len()
        );
        Ok(dataset)
    }

    fn from_csv_file(name: String, path: &Path) -> DistResult<Self> {
        let bytes = fs::read(path).map_err(|e| DistError::file_error("leer", &name, e.to_string()))?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                debug!("{} is not UTF-8, decoding as Latin-1", name);
                err.into_bytes().into_iter().map(char::from).collect()
            }
        };
        Self::from_reader(name, text.as_bytes())
    }

    fn from_workbook(name: String, path: &Path) -> DistResult<Self> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| DistError::file_error("abrir", &name, e.to_string()))?;

        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(|e| DistError::file_error("leer hoja", &name, e.to_string()))?,
            None => return Err(DistError::EmptyDataset { source_name: name }),
        };
        debug!("{}: first sheet spans {:?}", name, range.get_size());

        let mut cells = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect::<Vec<_>>());
        let headers = cells.next().unwrap_or_default();
        // Blank lines are skipped, as in CSV files
        let rows = cells.filter(|row| row.iter().any(|cell| !cell.is_empty())).collect();

        Self::from_records(name, headers, rows)
    }

    /// Parse CSV data with a header row from any reader.
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> DistResult<Self> {
        let name = name.into();
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| DistError::file_error("leer encabezados", &name, e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| DistError::file_error("leer filas", &name, e.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::from_records(name, headers, rows)
    }

    /// Build a dataset from a header row and data rows, whatever the source.
    ///
    /// Rows are cut or padded to the header width.
    fn from_records(name: String, headers: Vec<String>, rows: Vec<Vec<String>>) -> DistResult<Self> {
        if headers.is_empty() {
            return Err(DistError::EmptyDataset { source_name: name });
        }
        if headers.iter().all(|h| h.is_empty()) {
            return Err(DistError::MissingHeaders { source_name: name });
        }
        if rows.is_empty() {
            return Err(DistError::EmptyDataset { source_name: name });
        }

        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Ok(Dataset { name, headers, rows })
    }

    /// File name the dataset was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First `limit` rows, for table previews
    pub fn preview(&self, limit: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(limit)]
    }

    fn column_index(&self, column: &str) -> DistResult<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DistError::column_not_found(column, &self.headers))
    }

    /// Occurrences of each value in `column`, most frequent first.
    ///
    /// Ties keep the order in which values first appear. Empty cells are
    /// not a category and are left out, so the counts may sum to less than
    /// [`Dataset::row_count`].
    pub fn frequencies(&self, column: &str) -> DistResult<Vec<(String, usize)>> {
        let index = self.column_index(column)?;

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();
        for row in &self.rows {
            let value = row[index].as_str();
            if value.is_empty() {
                continue;
            }
            match positions.get(value) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    positions.insert(value, counts.len());
                    counts.push((value.to_string(), 1));
                }
            }
        }

        // Stable sort keeps first-appearance order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(counts)
    }

    /// Occurrences of one value in `column`; zero when it never appears
    pub fn count_of(&self, column: &str, value: &str) -> DistResult<usize> {
        Ok(self
            .frequencies(column)?
            .into_iter()
            .find(|(v, _)| v == value)
            .map(|(_, count)| count)
            .unwrap_or(0))
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            name: self.name.clone(),
            rows: self.rows.len(),
            columns: self.headers.len(),
            empty_cells: self.rows.iter().flatten().filter(|cell| cell.is_empty()).count(),
        }
    }
}

impl DatasetSummary {
    /// e.g. "Archivo: piezas.csv (3 filas, 2 columnas)"
    pub fn label(&self) -> String {
        format!("Archivo: {} ({} filas, {} columnas)", self.name, self.rows, self.columns)
    }
}

/// Share of `count` in `total` as a percentage with one decimal, e.g. "66.7%"
pub fn frequency_percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", count as f64 / total as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn csv_file(contents: &[u8]) -> NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_from_path() {
        let file = csv_file(b"pieza, estado\n1, ok\n2, falla\n3, ok\n4,\n");
        let dataset = Dataset::from_path(file.path()).unwrap();

        assert_eq!(dataset.headers(), ["pieza", "estado"]);
        assert_eq!(dataset.row_count(), 4);
        assert!(dataset.name().ends_with(".csv"));

        let summary = dataset.summary();
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.columns, 2);
        assert_eq!(summary.empty_cells, 1);
        assert!(summary.label().contains("(4 filas, 2 columnas)"));
    }

    #[test]
    fn test_frequencies_skip_empty_cells() {
        let data = "color\nrojo\nazul\n\"\"\nazul\nverde\nrojo\n";
        let dataset = Dataset::from_reader("colores.csv", data.as_bytes()).unwrap();
        let freq = dataset.frequencies("color").unwrap();
        assert_eq!(
            freq,
            vec![
                ("rojo".to_string(), 2),
                ("azul".to_string(), 2),
                ("verde".to_string(), 1),
            ]
        );
        // The empty cell still counts toward N
        assert_eq!(dataset.row_count(), 6);
        assert_eq!(freq.iter().map(|(_, c)| c).sum::<usize>(), 5);
        assert_eq!(dataset.count_of("color", "").unwrap(), 0);
        assert_eq!(dataset.count_of("color", "azul").unwrap(), 2);
        assert_eq!(dataset.count_of("color", "negro").unwrap(), 0);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let data = "a,b,c\n1,2\n4,5,6,7\n";
        let dataset = Dataset::from_reader("irregular.csv", data.as_bytes()).unwrap();
        assert_eq!(dataset.preview(10)[0], vec!["1", "2", ""]);
        assert_eq!(dataset.preview(10)[1], vec!["4", "5", "6"]);
        assert_eq!(dataset.preview(1).len(), 1);
    }

    #[test]
    fn test_unknown_column() {
        let dataset = Dataset::from_reader("x.csv", "a,b\n1,2\n".as_bytes()).unwrap();
        let err = dataset.frequencies("c").unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
        assert!(err.to_string().contains("Columnas disponibles: a, b"));
    }

    #[test]
    fn test_rejects_bad_files() {
        let err = Dataset::from_reader("vacio.csv", "".as_bytes()).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");

        let err = Dataset::from_reader("solo.csv", "a,b\n".as_bytes()).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");

        let err = Dataset::from_reader("sin.csv", " , \n1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_HEADERS");

        let err = Dataset::from_path(Path::new("datos.txt")).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
        assert!(err.to_string().contains("Formatos aceptados: .xlsx, .xls, .csv"));

        let err = Dataset::from_path(Path::new("/no/existe/datos.csv")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_xlsx() {
        let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "pieza").unwrap();
        sheet.write_string(0, 1, " estado ").unwrap();
        for (row, (id, estado)) in [(1.0, "ok"), (2.0, "falla"), (3.0, "ok")].into_iter().enumerate() {
            sheet.write_number(row as u32 + 1, 0, id).unwrap();
            sheet.write_string(row as u32 + 1, 1, estado).unwrap();
        }
        sheet.write_number(4, 0, 4.5).unwrap();
        workbook.save(file.path()).unwrap();

        let dataset = Dataset::from_path(file.path()).unwrap();
        assert_eq!(dataset.headers(), ["pieza", "estado"]);
        assert_eq!(dataset.row_count(), 4);
        assert_eq!(dataset.preview(10)[3], vec!["4.5", ""]);
        assert_eq!(
            dataset.frequencies("estado").unwrap(),
            vec![("ok".to_string(), 2), ("falla".to_string(), 1)]
        );
        assert_eq!(dataset.summary().empty_cells, 1);
    }

    #[test]
    fn test_xlsx_without_rows_or_headers() {
        let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = Workbook::new();
        workbook.add_worksheet().write_string(0, 0, "estado").unwrap();
        workbook.save(file.path()).unwrap();
        let err = Dataset::from_path(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");

        let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 1, " ").unwrap();
        sheet.write_string(1, 0, "ok").unwrap();
        workbook.save(file.path()).unwrap();
        let err = Dataset::from_path(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_HEADERS");
    }

    #[test]
    fn test_corrupt_workbook() {
        let mut file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"estado\nok\n").unwrap();
        file.flush().unwrap();
        let err = Dataset::from_path(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_latin1_fallback() {
        // "ciudad\nLeón\n" encoded as Latin-1
        let file = csv_file(b"ciudad\nLe\xf3n\n");
        let dataset = Dataset::from_path(file.path()).unwrap();
        assert_eq!(dataset.frequencies("ciudad").unwrap()[0].0, "León");
    }

    #[test]
    fn test_frequency_percent() {
        assert_eq!(frequency_percent(2, 3), "66.7%");
        assert_eq!(frequency_percent(0, 0), "0.0%");
    }
}
