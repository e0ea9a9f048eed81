//! Transformer trait for table transformation

use crate::report::EventSink;
use crate::table::Table;
use eyre::Result;

/// Transformer trait for transforming items
///
/// Implementors define one stage of the table pipeline:
/// - Column projection
/// - Column renaming
/// - Presence validation
///
/// # Example
/// ```
/// use tabmerge::etl::Transformer;
/// use tabmerge::report::{EventSink, RecordingSink};
/// use tabmerge::table::Table;
/// use eyre::Result;
///
/// struct RowCounter;
///
/// impl Transformer for RowCounter {
///     type Input = Table;
///     type Output = Table;
///
///     fn transform(&self, input: Self::Input, sink: &dyn EventSink) -> Result<Self::Output> {
///         sink.info(&format!("{} rows", input.height()));
///         Ok(input)
///     }
/// }
///
/// let sink = RecordingSink::new();
/// RowCounter.transform(Table::new(), &sink).unwrap();
/// assert!(sink.contains(log::Level::Info, "0 rows"));
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Short stage name used in diagnostics
    fn name(&self) -> &'static str {
        "transform"
    }

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails (missing columns, collisions, etc.)
    fn transform(&self, input: Self::Input, sink: &dyn EventSink) -> Result<Self::Output>;
}

/// A boxed table-to-table stage, as chained by [`super::Pipeline`]
pub type TableStage = Box<dyn Transformer<Input = Table, Output = Table>>;
