//! Table transformers
//!
//! Each stage takes the working [`Table`](crate::table::Table) by value and
//! hands back the transformed table:
//! - [`ColumnSelector`]: keep an ordered allow-list of columns
//! - [`ColumnRenamer`]: rename columns through an `old:new` mapping
//! - [`RequiredColumns`]: fail unless every named column is present

mod rename;
mod required;
mod select;

pub use rename::{ColumnMapping, ColumnRenamer};
pub use required::RequiredColumns;
pub use select::ColumnSelector;

/// How select and rename treat references to columns that do not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MissingColumnPolicy {
    /// Select: fail validation naming every missing column.
    /// Rename: drop unknown keys with a warning.
    #[default]
    Strict,
    /// Select: fail with a plain lookup error.
    /// Rename: unknown keys are a silent no-op.
    Lenient,
}

/// Split a comma-separated list of names, trimming whitespace around each
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',').map(|s| s.trim().to_string()).collect()
}
