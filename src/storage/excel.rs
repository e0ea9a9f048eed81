//! Spreadsheet (xlsx/xls) reading and writing

use super::normalize_headers;
use crate::error::Error;
use crate::table::{NA_TOKENS, Table, Value};
use calamine::{Data, DataType, Reader, open_workbook_auto_from_rs};
use eyre::{Context, Result};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Integral floats beyond this magnitude stay floats
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Largest integer magnitude a worksheet number cell holds exactly
const MAX_EXACT_CELL_INT: u64 = 1 << 53;

/// Read the first worksheet of a workbook into a [`Table`]
///
/// The first row is the header. Integral numbers become `Int`, dates and
/// times become text, and empty or error cells become null.
pub struct ExcelReader {
    path: PathBuf,
}

impl ExcelReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn read(&self) -> Result<Table> {
        let decode_error = |reason: String| Error::Decode {
            path: self.path.clone(),
            reason,
        };

        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read workbook: {}", self.path.display()))?;

        // The container (xls or xlsx) is detected from content, so an `.xls`
        // path holding an xlsx workbook still opens
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| decode_error(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| decode_error("workbook has no worksheets".to_string()))?
            .map_err(|e| decode_error(e.to_string()))?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Table::new());
        };

        let headers = normalize_headers(header.iter().map(header_text).collect());
        let body = rows
            .map(|row| row.iter().map(cell_value).collect())
            .collect();

        Table::from_rows(headers, body)
            .with_context(|| format!("Failed to build table from {}", self.path.display()))
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT => {
            format!("{}", *f as i64)
        }
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT => Value::Int(*f as i64),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if NA_TOKENS.contains(&s.as_str()) => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(datetime) => Value::Text(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Value::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

/// Write a [`Table`] to a single-sheet workbook with a bold header row and
/// no index column
///
/// Worksheet numbers are doubles, so integers beyond 2^53 are written as text
/// to keep every digit.
pub struct ExcelWriter {
    path: PathBuf,
}

impl ExcelWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn write(&self, table: &Table) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();

        for (index, column) in table.columns().iter().enumerate() {
            let col = ColNum::try_from(index)
                .wrap_err("Too many columns for a worksheet")?;
            worksheet.write_string_with_format(0, col, column.name(), &header_format)?;

            for (offset, value) in column.values().iter().enumerate() {
                let row = RowNum::try_from(offset + 1)
                    .wrap_err("Too many rows for a worksheet")?;
                match value {
                    Value::Null => {}
                    Value::Bool(b) => {
                        worksheet.write_boolean(row, col, *b)?;
                    }
                    Value::Int(i) if i.unsigned_abs() > MAX_EXACT_CELL_INT => {
                        worksheet.write_string(row, col, i.to_string())?;
                    }
                    Value::Int(i) => {
                        worksheet.write_number(row, col, *i as f64)?;
                    }
                    Value::Float(f) if f.is_finite() => {
                        worksheet.write_number(row, col, *f)?;
                    }
                    Value::Float(_) => {}
                    Value::Text(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                }
            }
        }

        workbook
            .save(&self.path)
            .with_context(|| format!("Failed to write workbook: {}", self.path.display()))?;

        Ok(())
    }
}
