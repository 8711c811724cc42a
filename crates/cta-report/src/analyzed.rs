//! The analyzed copy of a tracking sheet: original cells plus audit columns.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use cta_ingest::{AuditColumns, CsvSheet};
use cta_model::RowResult;
use tracing::info;

use crate::cells::render_cells;
use crate::error::{ReportError, Result};

/// Sheet grid with the audit columns filled in as results arrive.
#[derive(Debug, Clone)]
pub struct AnalyzedSheet {
    grid: Vec<Vec<String>>,
    columns: AuditColumns,
    written: usize,
}

impl AnalyzedSheet {
    /// Start from the sheet's cells and write the audit headers.
    pub fn new(sheet: &CsvSheet) -> Self {
        let layout = sheet.layout();
        let mut analyzed = Self {
            grid: sheet.grid().to_vec(),
            columns: layout.audit,
            written: 0,
        };
        for (column, header) in layout.audit.headers() {
            analyzed.set(layout.header_row, column, header.to_string());
        }
        analyzed
    }

    fn set(&mut self, row: usize, column: usize, value: String) {
        if self.grid.len() <= row {
            self.grid.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.grid[row];
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = value;
    }

    /// Fill the audit cells of one row. Skipped rows keep their cells.
    pub fn apply(&mut self, result: &RowResult) {
        let Some(cells) = render_cells(&result.row.name, &result.outcome) else {
            return;
        };
        let row = result.row.index;
        let columns = self.columns;
        self.set(row, columns.ok, cells.ok.to_string());
        self.set(row, columns.status, cells.status.to_string());
        self.set(row, columns.new_name, cells.new_name);
        self.set(row, columns.notes, cells.notes);
        self.written += 1;
    }

    pub fn grid(&self) -> &[Vec<String>] {
        &self.grid
    }

    /// Serialize as CSV. Rows are padded to a common width.
    pub fn write_to<W: Write>(&self, writer: W, origin: &Path) -> Result<()> {
        let width = self.grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut writer = WriterBuilder::new().flexible(false).from_writer(writer);
        let csv_error = |source| ReportError::Csv {
            path: origin.to_path_buf(),
            source,
        };
        for cells in &self.grid {
            let padding = std::iter::repeat_n("", width - cells.len());
            writer
                .write_record(cells.iter().map(String::as_str).chain(padding))
                .map_err(csv_error)?;
        }
        writer.flush().map_err(|source| ReportError::Write {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Write the sheet to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_to(file, path)?;
        info!(path = %path.display(), rows = self.written, "analyzed sheet written");
        Ok(())
    }
}
