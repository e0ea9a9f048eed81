//! Column selection transformer
//!
//! Narrows the working table to an allow-list of columns, in the requested
//! order.

use super::{MissingColumnPolicy, split_list};
use crate::error::Error;
use crate::etl::Transformer;
use crate::report::EventSink;
use crate::table::Table;
use eyre::Result;

/// Transformer that keeps only the listed columns
///
/// Repeated names in the list collapse to their first occurrence so the
/// output keeps unique column names.
///
/// What happens when a listed column does not exist depends on the policy:
/// - [`MissingColumnPolicy::Strict`]: every missing name is reported along
///   with the available columns, and the run fails validation
/// - [`MissingColumnPolicy::Lenient`]: the lookup fails like a plain
///   indexing error
///
/// # Example
/// ```
/// use tabmerge::etl::Transformer;
/// use tabmerge::report::RecordingSink;
/// use tabmerge::table::{Column, Table, Value};
/// use tabmerge::transform::{ColumnSelector, MissingColumnPolicy};
///
/// let table = Table::from_columns(vec![
///     Column::new("id", vec![Value::Int(1)]),
///     Column::new("name", vec!["ann".into()]),
///     Column::new("amount", vec![Value::Float(9.5)]),
/// ])
/// .unwrap();
///
/// let selector = ColumnSelector::parse("amount, id", MissingColumnPolicy::Strict);
/// let output = selector.transform(table, &RecordingSink::new()).unwrap();
/// assert_eq!(output.column_names(), vec!["amount", "id"]);
/// ```
pub struct ColumnSelector {
    columns: Vec<String>,
    repeated: Vec<String>,
    policy: MissingColumnPolicy,
}

impl ColumnSelector {
    /// Create a selector from column names
    pub fn new(columns: Vec<String>, policy: MissingColumnPolicy) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(columns.len());
        let mut repeated = Vec::new();

        for column in columns {
            if unique.contains(&column) {
                repeated.push(column);
            } else {
                unique.push(column);
            }
        }

        Self {
            columns: unique,
            repeated,
            policy,
        }
    }

    /// Create a selector from a comma-separated list, trimming each name
    pub fn parse(list: &str, policy: MissingColumnPolicy) -> Self {
        Self::new(split_list(list), policy)
    }

    /// Columns kept, in output order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Transformer for ColumnSelector {
    type Input = Table;
    type Output = Table;

    fn name(&self) -> &'static str {
        "select"
    }

    fn transform(&self, input: Self::Input, sink: &dyn EventSink) -> Result<Self::Output> {
        if !self.repeated.is_empty() {
            sink.warn(&format!("Ignoring repeated columns: {:?}", self.repeated));
        }

        let missing: Vec<String> = input
            .missing_columns(&self.columns)
            .into_iter()
            .cloned()
            .collect();

        if !missing.is_empty() {
            return match self.policy {
                MissingColumnPolicy::Strict => {
                    sink.error(&format!("Columns not found: {:?}", missing));
                    sink.info(&format!("Available: {:?}", input.column_names()));
                    Err(Error::MissingSelected(missing).into())
                }
                MissingColumnPolicy::Lenient => Err(Error::ColumnNotFound(missing).into()),
            };
        }

        let output = input
            .project(&self.columns)
            .map_err(Error::ColumnNotFound)?;
        sink.info(&format!("Selected columns: {:?}", self.columns));

        Ok(output)
    }
}
