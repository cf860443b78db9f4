use std::path::{Path, PathBuf};

use carsheet_core::{column_names, ListingEntry};
use scrape_logging::scrape_info;
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

/// How the session table is written out.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Cell separator; comma gives a plain CSV any spreadsheet app opens.
    pub separator: char,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing scraped yet. Surfaced to the user as a message, not a crash.
    #[error("no rows to export")]
    NoRows,
    #[error("export path has no file name: {0}")]
    BadPath(PathBuf),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub columns: usize,
    pub path: PathBuf,
}

/// Write entries as a spreadsheet (delimiter-separated) file at `path`.
///
/// The header row is the union of every column observed across the entries;
/// data rows keep the entries' order and leave missing cells blank.
pub fn export_sheet(
    entries: &[ListingEntry],
    path: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    if entries.is_empty() {
        return Err(ExportError::NoRows);
    }

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ExportError::BadPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let columns = column_names(entries);
    let mut buffer = String::new();
    write_row(&mut buffer, &columns, options.separator);
    for entry in entries {
        let row: Vec<String> = columns
            .iter()
            .map(|column| entry.field(column).unwrap_or_default())
            .collect();
        write_row(&mut buffer, &row, options.separator);
    }

    let written = AtomicFileWriter::new(dir).write(filename, &buffer)?;
    scrape_info!(
        "exported {} rows x {} columns to {}",
        entries.len(),
        columns.len(),
        written.display()
    );
    Ok(ExportSummary {
        rows: entries.len(),
        columns: columns.len(),
        path: written,
    })
}

fn write_row(buffer: &mut String, cells: &[String], separator: char) {
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            buffer.push(separator);
        }
        if needs_quotes(cell, separator) {
            buffer.push('"');
            buffer.push_str(&cell.replace('"', "\"\""));
            buffer.push('"');
        } else {
            buffer.push_str(cell);
        }
    }
    buffer.push('\n');
}

fn needs_quotes(cell: &str, separator: char) -> bool {
    cell.contains(separator) || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}
