//! File system storage operations
//!
//! This module handles all table file I/O:
//! - Format dispatch by extension
//! - CSV decoding (with a single latin1 fallback) and encoding
//! - Spreadsheet decoding and encoding
//! - Extractor/Loader adapters used by the pipeline

mod delimited;
mod excel;
mod format;
mod reader;
mod writer;

pub use delimited::{CsvReader, CsvWriter, TextEncoding, decode_text};
pub use excel::{ExcelReader, ExcelWriter};
pub use format::FileFormat;
pub use reader::{InputFiles, TableReader};
pub use writer::TableWriter;

use std::collections::HashSet;

/// Make header names usable as unique column names
///
/// Empty names become `Unnamed: <index>`; repeats get `.1`, `.2`, ... suffixes.
pub(crate) fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (index, name) in raw.into_iter().enumerate() {
        let base = match name.is_empty() {
            true => format!("Unnamed: {}", index),
            false => name,
        };

        let mut candidate = base.clone();
        let mut suffix = 0;
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", base, suffix);
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}
