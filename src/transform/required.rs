//! Required-column validation

use super::split_list;
use crate::error::Error;
use crate::etl::Transformer;
use crate::report::EventSink;
use crate::table::Table;
use eyre::Result;

/// Transformer that checks a set of column names is present
///
/// Presence only: types and values are not inspected. The table passes
/// through unchanged when every name is present.
pub struct RequiredColumns {
    columns: Vec<String>,
}

impl RequiredColumns {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Create a check from a comma-separated list, trimming each name
    pub fn parse(list: &str) -> Self {
        Self::new(split_list(list))
    }
}

impl Transformer for RequiredColumns {
    type Input = Table;
    type Output = Table;

    fn name(&self) -> &'static str {
        "required"
    }

    fn transform(&self, input: Self::Input, sink: &dyn EventSink) -> Result<Self::Output> {
        let missing: Vec<String> = input
            .missing_columns(&self.columns)
            .into_iter()
            .cloned()
            .collect();

        if !missing.is_empty() {
            sink.error(&format!("Missing required columns: {:?}", missing));
            return Err(Error::MissingRequired(missing).into());
        }

        sink.info("✓ All required columns present");
        Ok(input)
    }
}
