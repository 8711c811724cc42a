//! A tracking sheet loaded from CSV, exposed as a row source.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use cta_model::{RowSource, SourceRow};
use tracing::{debug, info};

use crate::csv::{SheetLayout, detect_layout, read_grid};
use crate::error::{IngestError, Result};

/// The raw cells of a sheet plus the rows found in its data block.
#[derive(Debug, Clone)]
pub struct CsvSheet {
    path: PathBuf,
    grid: Vec<Vec<String>>,
    layout: SheetLayout,
    rows: Vec<SourceRow>,
}

impl CsvSheet {
    /// Load and analyze a CSV file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Load from any reader; `origin` is used for errors and reporting.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let grid = read_grid(reader, origin)?;
        if grid.is_empty() {
            return Err(IngestError::EmptySheet {
                path: origin.to_path_buf(),
            });
        }
        let layout = detect_layout(&grid);
        debug!(
            header_row = layout.header_row,
            name_column = layout.name_column,
            group_column = ?layout.group_column,
            detected = layout.detected,
            reused_audit_columns = layout.audit.reused,
            "sheet layout"
        );

        let rows: Vec<SourceRow> = layout
            .data_rows()
            .map(|index| SourceRow {
                index,
                name: cell_text(&grid, index, Some(layout.name_column)).to_string(),
                group: cell_text(&grid, index, layout.group_column).trim().to_string(),
            })
            .collect();
        info!(
            path = %origin.display(),
            records = grid.len(),
            rows = rows.len(),
            "sheet loaded"
        );

        Ok(Self {
            path: origin.to_path_buf(),
            grid,
            layout,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn grid(&self) -> &[Vec<String>] {
        &self.grid
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Default location of the analyzed copy: `<stem>_ANALYZED.csv` beside the input.
    pub fn analyzed_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sheet".to_string());
        self.path.with_file_name(format!("{stem}_ANALYZED.csv"))
    }
}

impl RowSource for CsvSheet {
    fn rows(&self) -> &[SourceRow] {
        &self.rows
    }
}

fn cell_text(grid: &[Vec<String>], row: usize, column: Option<usize>) -> &str {
    column
        .and_then(|column| grid.get(row)?.get(column))
        .map_or("", String::as_str)
}
