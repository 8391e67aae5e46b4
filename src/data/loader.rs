//! Workbook loading.
//!
//! Reads one worksheet of an Excel export into a [`RawTable`]: the first
//! non-empty row becomes the header row, every following row that holds at
//! least one value becomes a data row. Cell values are kept as
//! [`calamine::Data`] so typing happens later, after header normalization.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};

use crate::config::schema::SourceConfig;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Raw table
// ---------------------------------------------------------------------------

/// Untyped sheet contents: header names plus rows of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

impl RawTable {
    /// Build a table from sheet rows. Blank rows are dropped, the first
    /// remaining row is the header. Returns `None` when no row holds a value.
    pub fn from_rows<I>(rows: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec<Data>>,
    {
        let mut rows = rows.into_iter().filter(|row| !is_blank(row));
        let headers = rows.next()?.iter().map(header_text).collect();
        Some(Self {
            headers,
            rows: rows.collect(),
        })
    }

    /// Index of the first column whose header equals `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| matches!(cell, Data::Empty))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Something a render can pull a raw table from.
pub trait TableSource {
    /// Short human-readable description for logs and status output.
    fn describe(&self) -> String;

    fn load(&self) -> Result<RawTable, LoadError>;
}

/// An in-memory table is its own source. Used by tests and by callers that
/// already hold the sheet contents.
impl TableSource for RawTable {
    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.rows.len())
    }

    fn load(&self) -> Result<RawTable, LoadError> {
        Ok(self.clone())
    }
}

/// An Excel workbook on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookSource {
    path: Option<PathBuf>,
    sheet: Option<String>,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            sheet: None,
        }
    }

    /// Read a named sheet instead of the first one.
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Build a source from the resolved `[source]` section. An empty path
    /// yields a source that fails with [`LoadError::NotConfigured`].
    pub fn from_config(config: &SourceConfig) -> Self {
        let path = config.path.trim();
        Self {
            path: (!path.is_empty()).then(|| PathBuf::from(path)),
            sheet: config.sheet_name().map(str::to_string),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }
}

impl TableSource for WorkbookSource {
    fn describe(&self) -> String {
        match (&self.path, &self.sheet) {
            (Some(path), Some(sheet)) => format!("{} [{sheet}]", path.display()),
            (Some(path), None) => path.display().to_string(),
            (None, _) => "<not configured>".to_string(),
        }
    }

    fn load(&self) -> Result<RawTable, LoadError> {
        let path = self.path.as_deref().ok_or(LoadError::NotConfigured)?;
        read_workbook(path, self.sheet.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Workbook reading
// ---------------------------------------------------------------------------

/// Read `sheet` (or the first sheet) of the workbook at `path`.
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<RawTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;

    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(LoadError::SheetNotFound {
                    path: path.to_path_buf(),
                    sheet: name.to_string(),
                });
            }
            workbook
                .worksheet_range(name)
                .map_err(|e| workbook_error(path, e))?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::EmptySheet {
                path: path.to_path_buf(),
            })?
            .map_err(|e| workbook_error(path, e))?,
    };

    let table = RawTable::from_rows(range.rows().map(|row| row.to_vec())).ok_or_else(|| {
        LoadError::EmptySheet {
            path: path.to_path_buf(),
        }
    })?;

    tracing::debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "workbook read"
    );

    Ok(table)
}

/// Map a calamine error. I/O failures that mean "cannot get at the file"
/// are reported as not found; everything else keeps the parser's message.
fn workbook_error(path: &Path, err: calamine::Error) -> LoadError {
    match err {
        calamine::Error::Io(io)
            if matches!(
                io.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ) =>
        {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        }
        other => LoadError::Workbook {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn from_rows_uses_first_row_as_headers() {
        let table = RawTable::from_rows(vec![
            vec![s("nome_campanha"), s("cliques")],
            vec![s("X"), Data::Float(3.0)],
        ])
        .unwrap();
        assert_eq!(table.headers, vec!["nome_campanha", "cliques"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.column_index("cliques"), Some(1));
        assert_eq!(table.column_index("salvaram"), None);
    }

    #[test]
    fn from_rows_skips_blank_rows() {
        let table = RawTable::from_rows(vec![
            vec![s("a"), s("b")],
            vec![Data::Empty, Data::Empty],
            vec![s("x"), Data::Empty],
        ])
        .unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn from_rows_without_rows_is_none() {
        assert!(RawTable::from_rows(Vec::<Vec<Data>>::new()).is_none());
        assert!(RawTable::from_rows(vec![vec![Data::Empty, Data::Empty]]).is_none());
    }

    #[test]
    fn leading_blank_rows_are_skipped_before_the_header() {
        let table = RawTable::from_rows(vec![
            vec![Data::Empty, Data::Empty],
            vec![s("nome_campanha"), s("cliques")],
            vec![s("X"), Data::Float(3.0)],
        ])
        .unwrap();
        assert_eq!(table.headers, vec!["nome_campanha", "cliques"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn non_string_headers_are_stringified() {
        let table = RawTable::from_rows(vec![vec![Data::Int(2024), Data::Empty]]).unwrap();
        assert_eq!(table.headers, vec!["2024", ""]);
    }

    #[test]
    fn unconfigured_source_fails() {
        let source = WorkbookSource::from_config(&SourceConfig::default());
        assert!(source.path().is_none());
        assert!(matches!(source.load(), Err(LoadError::NotConfigured)));
        assert_eq!(source.describe(), "<not configured>");
    }

    #[test]
    fn missing_file_is_not_found() {
        let source = WorkbookSource::new("/definitely/not/here/campanhas.xlsx");
        match source.load() {
            Err(LoadError::NotFound { path }) => {
                assert!(path.ends_with("campanhas.xlsx"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn from_config_keeps_sheet() {
        let source = WorkbookSource::from_config(&SourceConfig {
            path: " /data/meta.xlsx ".to_string(),
            sheet: "Planilha1".to_string(),
        });
        assert_eq!(source.path(), Some(Path::new("/data/meta.xlsx")));
        assert_eq!(source.sheet(), Some("Planilha1"));
        assert_eq!(source.describe(), "/data/meta.xlsx [Planilha1]");
    }
}
