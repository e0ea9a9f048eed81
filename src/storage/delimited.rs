//! Delimited text (CSV) reading and writing

use super::normalize_headers;
use crate::error::Error;
use crate::table::{Column, Table, infer_column};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use eyre::{Context, Result};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding a CSV file was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// Single-byte fallback that accepts every byte value
    Latin1,
}

impl TextEncoding {
    fn encoding(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            // WHATWG resolves the "latin1" label to windows-1252
            TextEncoding::Latin1 => WINDOWS_1252,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin1",
        }
    }
}

/// Decode raw bytes as UTF-8, falling back once to latin1 on invalid sequences
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, TextEncoding) {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    match TextEncoding::Utf8
        .encoding()
        .decode_without_bom_handling_and_without_replacement(bytes)
    {
        Some(text) => (text, TextEncoding::Utf8),
        None => {
            let (text, _) = TextEncoding::Latin1
                .encoding()
                .decode_without_bom_handling(bytes);
            (text, TextEncoding::Latin1)
        }
    }
}

/// Read a CSV file into a [`Table`]
///
/// The first record is the header. Blank lines are skipped, short rows are
/// padded with nulls, and each column's type is inferred from its cells.
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the file, reporting which encoding decoded it
    pub fn read(&self) -> Result<(Table, TextEncoding)> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read CSV file: {}", self.path.display()))?;

        let (text, encoding) = decode_text(&bytes);
        let table = parse_csv(&text).map_err(|reason| Error::Decode {
            path: self.path.clone(),
            reason,
        })?;

        Ok((table, encoding))
    }
}

/// Parse CSV text into a table
fn parse_csv(text: &str) -> std::result::Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(|e| e.to_string())?,
        None => return Err("No columns to parse from file".to_string()),
    };

    let headers = normalize_headers(header.iter().map(String::from).collect());
    let width = headers.len();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];

    for record in records {
        let record = record.map_err(|e| e.to_string())?;

        if width > 1 && record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(format!(
                "Expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            ));
        }

        for (index, column) in cells.iter_mut().enumerate() {
            column.push(record.get(index).map(String::from));
        }
    }

    let columns = headers
        .into_iter()
        .zip(&cells)
        .map(|(name, column)| {
            let raw: Vec<Option<&str>> = column.iter().map(Option::as_deref).collect();
            Column::new(name, infer_column(&raw))
        })
        .collect();

    Table::from_columns(columns).map_err(|e| e.to_string())
}

/// Write a [`Table`] as UTF-8 CSV with a header row and no index column
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn write(&self, table: &Table) -> Result<()> {
        if table.width() == 0 {
            std::fs::write(&self.path, "")
                .with_context(|| format!("Failed to write CSV file: {}", self.path.display()))?;
            return Ok(());
        }

        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create CSV file: {}", self.path.display()))?;

        writer.write_record(table.column_names())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|value| value.to_string()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write CSV file: {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;
    use tempfile::TempDir;

    #[test]
    fn test_decode_utf8() {
        let (text, encoding) = decode_text("id,naïve\n".as_bytes());
        assert_eq!(text, "id,naïve\n");
        assert_eq!(encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_decode_strips_bom() {
        let (text, _) = decode_text(b"\xEF\xBB\xBFid\n1\n");
        assert_eq!(text, "id\n1\n");
    }

    #[test]
    fn test_decode_falls_back_to_latin1() {
        let (text, encoding) = decode_text(b"name\nJos\xe9\n");
        assert_eq!(encoding, TextEncoding::Latin1);
        assert_eq!(encoding.name(), "latin1");
        assert_eq!(text, "name\nJosé\n");
    }

    #[test]
    fn test_parse_types_and_padding() {
        let table = parse_csv("id,name,score\n1,ann,2.5\n2,bob\n\n3,,NA\n").unwrap();

        assert_eq!(table.column_names(), vec!["id", "name", "score"]);
        assert_eq!(table.height(), 3);
        assert_eq!(
            table.column("id").unwrap().values(),
            &[Value::Int(1), Value::Int(2), Value::Int(3)]
        );
        assert_eq!(
            table.column("name").unwrap().values(),
            &[Value::from("ann"), Value::from("bob"), Value::Null]
        );
        assert_eq!(
            table.column("score").unwrap().values(),
            &[Value::Float(2.5), Value::Null, Value::Null]
        );
    }

    #[test]
    fn test_parse_rejects_long_rows() {
        let err = parse_csv("a,b\n1,2,3\n").unwrap_err();
        assert!(err.contains("Expected 2 fields"));
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_csv("").is_err());
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_csv("id,name\n").unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 0);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let table = parse_csv("id,note\n1,\"a, b\"\n").unwrap();
        assert_eq!(table.column("note").unwrap().values(), &[Value::from("a, b")]);
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        let table = Table::from_columns(vec![
            Column::new("id", vec![Value::Int(1), Value::Int(2)]),
            Column::new("price", vec![Value::Float(2.0), Value::Null]),
            Column::new("note", vec!["x, y".into(), "z".into()]),
        ])
        .unwrap();

        CsvWriter::new(&path).write(&table).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,price,note\n1,2.0,\"x, y\"\n2,,z\n");

        let (read, encoding) = CsvReader::new(&path).read().unwrap();
        assert_eq!(encoding, TextEncoding::Utf8);
        assert_eq!(read, table);
    }

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(CsvReader::new(temp.path().join("nope.csv")).read().is_err());
    }
}
