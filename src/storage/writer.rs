//! Extension-dispatched table writing

use super::{CsvWriter, ExcelWriter, FileFormat};
use crate::etl::Loader;
use crate::report::EventSink;
use crate::table::Table;
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Write the final table to a CSV or spreadsheet file
///
/// Missing parent directories are created first. The extension is checked
/// after that and before anything is written.
pub struct TableWriter {
    path: PathBuf,
}

impl TableWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn write(&self, table: &Table, sink: &dyn EventSink) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        match FileFormat::from_path(&self.path)? {
            FileFormat::Csv => CsvWriter::new(&self.path).write(table)?,
            FileFormat::Excel => ExcelWriter::new(&self.path).write(table)?,
        }

        sink.info(&format!(
            "Final: {} rows × {} columns",
            table.height(),
            table.width()
        ));
        sink.info(&format!("Columns: {:?}", table.column_names()));
        sink.info(&format!("✓ Saved: {}", self.path.display()));

        Ok(())
    }
}

impl Loader for TableWriter {
    type Item = Table;

    fn load(&self, item: Self::Item, sink: &dyn EventSink) -> Result<usize> {
        self.write(&item, sink)?;
        Ok(item.height())
    }
}
