//! Extractor trait for reading tables from sources

use crate::report::EventSink;
use eyre::Result;

/// Extractor trait for extracting items from a source
///
/// Implementors define how to read items from sources like:
/// - A single CSV or spreadsheet file
/// - An ordered set of input files
///
/// # Example
/// ```no_run
/// use tabmerge::etl::Extractor;
/// use tabmerge::report::EventSink;
/// use tabmerge::table::Table;
/// use eyre::Result;
///
/// struct EmptySource;
///
/// impl Extractor for EmptySource {
///     type Item = Table;
///
///     fn extract(&self, _sink: &dyn EventSink) -> Result<Vec<Self::Item>> {
///         Ok(vec![Table::new()])
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source, in source order
    ///
    /// # Errors
    /// Returns an error if extraction fails (I/O, decoding, unsupported format)
    fn extract(&self, sink: &dyn EventSink) -> Result<Vec<Self::Item>>;
}
