//! tabmerge
//!
//! An ETL tool that merges CSV and Excel tables, optionally selects and
//! renames columns, validates required columns, and writes one output file.

pub mod cli;
pub mod error;
pub mod etl;
pub mod merger;
pub mod report;
pub mod storage;
pub mod table;
pub mod transform;

// Re-exports for convenience
pub use cli::RunArgs;
pub use error::{Error, ExitStatus};
pub use etl::{Extractor, Loader, Pipeline, RunSummary, Transformer};
pub use report::{EventSink, LogSink, RecordingSink};
pub use storage::{FileFormat, InputFiles, TableReader, TableWriter};
pub use table::{Column, Table, Value};
pub use transform::{
    ColumnMapping, ColumnRenamer, ColumnSelector, MissingColumnPolicy, RequiredColumns,
};
