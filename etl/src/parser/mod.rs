//! CSV loading and writing.
//!
//! Tables are read fully into memory. Short rows are accepted (a missing
//! cell reads as `None`), blank lines are skipped and a leading UTF-8 BOM
//! is stripped from the first header.

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{CsvError, CsvResult};

/// An in-memory CSV table.
#[derive(Debug, Clone)]
pub struct Table {
    /// Where the table was read from (used in error messages)
    pub source: PathBuf,
    /// Column headers
    pub headers: Vec<String>,
    /// Data rows, possibly shorter or longer than the header
    pub rows: Vec<StringRecord>,
}

impl Table {
    /// Position of a column, by exact header text.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a column the caller cannot work without.
    pub fn require_column(&self, name: &str) -> CsvResult<usize> {
        self.column_index(name).ok_or_else(|| CsvError::MissingColumn {
            column: name.to_string(),
            path: self.source.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a CSV file into a [`Table`].
pub fn read_table<P: AsRef<Path>>(path: P) -> CsvResult<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CsvError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_table_from_reader(file, path)
}

/// Read CSV from any reader. `source` only labels errors.
pub fn read_table_from_reader<R: Read>(reader: R, source: &Path) -> CsvResult<Table> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        rows.push(record);
    }

    Ok(Table {
        source: source.to_path_buf(),
        headers,
        rows,
    })
}

fn is_blank(record: &StringRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record[0].is_empty())
}

fn writer_for<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(inner)
}

fn create(path: &Path) -> CsvResult<File> {
    File::create(path).map_err(|e| CsvError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn finish<W: Write>(mut wtr: csv::Writer<W>, path: &Path) -> CsvResult<()> {
    wtr.flush().map_err(|e| CsvError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize records to a writer; the header comes from the record type.
pub fn write_records_to<W: Write, T: Serialize>(inner: W, records: &[T], path: &Path) -> CsvResult<()> {
    let mut wtr = writer_for(inner);
    for record in records {
        wtr.serialize(record)?;
    }
    finish(wtr, path)
}

/// Serialize records to a file, replacing it.
///
/// With no records only `headers` is written, since serde cannot derive a
/// header from an empty slice.
pub fn write_records<T: Serialize>(path: &Path, headers: &[&str], records: &[T]) -> CsvResult<()> {
    let file = create(path)?;
    if records.is_empty() {
        let mut wtr = writer_for(file);
        wtr.write_record(headers)?;
        return finish(wtr, path);
    }
    write_records_to(file, records, path)
}

/// Write raw rows under `headers`, padding or truncating each row to the
/// header width.
pub fn write_table(path: &Path, headers: &[String], rows: &[&StringRecord]) -> CsvResult<()> {
    let file = create(path)?;
    let mut wtr = writer_for(file);
    wtr.write_record(headers)?;
    for row in rows {
        let cells = (0..headers.len()).map(|i| row.get(i).unwrap_or(""));
        wtr.write_record(cells)?;
    }
    finish(wtr, path)
}
