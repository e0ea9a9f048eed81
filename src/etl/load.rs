//! Loader trait for writing data to destinations

use crate::report::EventSink;
use eyre::Result;

/// Loader trait for loading an item to a destination
///
/// # Example
/// ```no_run
/// use tabmerge::etl::Loader;
/// use tabmerge::report::EventSink;
/// use tabmerge::table::Table;
/// use eyre::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Item = Table;
///
///     fn load(&self, item: Self::Item, _sink: &dyn EventSink) -> Result<usize> {
///         Ok(item.height())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of item to load
    type Item: Send;

    /// Load the item to the destination
    ///
    /// Returns the number of rows written
    ///
    /// # Errors
    /// Returns an error if loading fails (I/O, encoding, unsupported format)
    fn load(&self, item: Self::Item, sink: &dyn EventSink) -> Result<usize>;
}
