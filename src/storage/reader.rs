//! Extension-dispatched table reading

use super::{CsvReader, ExcelReader, FileFormat, TextEncoding};
use crate::etl::Extractor;
use crate::report::EventSink;
use crate::table::Table;
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Read one CSV or spreadsheet file, picking the decoder by extension
pub struct TableReader {
    path: PathBuf,
}

impl TableReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the file into a table
    ///
    /// Unsupported extensions fail before the file is opened.
    pub fn read(&self, sink: &dyn EventSink) -> Result<Table> {
        let format = FileFormat::from_path(&self.path)?;
        let name = display_name(&self.path);

        let table = match format {
            FileFormat::Csv => {
                let (table, encoding) = CsvReader::new(&self.path)
                    .read()
                    .with_context(|| format!("Failed to read {}", name))?;
                if encoding == TextEncoding::Latin1 {
                    sink.warn(&format!("{} using {} encoding", name, encoding.name()));
                }
                table
            }
            FileFormat::Excel => ExcelReader::new(&self.path)
                .read()
                .with_context(|| format!("Failed to read {}", name))?,
        };

        sink.info(&format!(
            "Loaded {} → {} rows, {} cols",
            name,
            table.height(),
            table.width()
        ));

        Ok(table)
    }
}

/// Ordered set of input files, read one after another
pub struct InputFiles {
    readers: Vec<TableReader>,
}

impl InputFiles {
    pub fn new<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            readers: paths.into_iter().map(|p| TableReader::new(p)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl Extractor for InputFiles {
    type Item = Table;

    fn extract(&self, sink: &dyn EventSink) -> Result<Vec<Self::Item>> {
        self.readers.iter().map(|reader| reader.read(sink)).collect()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
