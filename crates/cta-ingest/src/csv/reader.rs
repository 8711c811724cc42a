//! Raw CSV loading into a grid of cells.

use std::io::Read;
use std::path::Path;

use ::csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// Read every record without treating any row as a header.
///
/// Records may have different lengths; a leading byte-order mark is dropped
/// from the first cell.
pub fn read_grid<R: Read>(reader: R, origin: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: origin.to_path_buf(),
            source,
        })?;
        grid.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    if let Some(first) = grid.first_mut().and_then(|row| row.first_mut()) {
        *first = first.trim_start_matches('\u{feff}').to_string();
    }
    Ok(grid)
}
