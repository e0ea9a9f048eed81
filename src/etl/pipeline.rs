//! Pipeline orchestration for table runs

use super::{Extractor, Loader, TableStage, Transformer};
use crate::merger;
use crate::report::EventSink;
use crate::table::Table;
use eyre::Result;

/// Counts describing a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of tables extracted before merging
    pub inputs: usize,
    /// Rows written
    pub rows: usize,
    /// Columns written
    pub columns: usize,
}

/// Table pipeline: extract → merge → stages in order → load
///
/// # Type Parameters
/// - `E`: Extractor producing one table per source
/// - `L`: Loader consuming the final table
///
/// # Example
/// ```no_run
/// use tabmerge::etl::Pipeline;
/// use tabmerge::report::LogSink;
/// use tabmerge::storage::{InputFiles, TableWriter};
/// use tabmerge::transform::RequiredColumns;
/// # fn example() -> eyre::Result<()> {
///
/// let pipeline = Pipeline::new(
///     InputFiles::new(vec!["a.csv", "b.csv"]),
///     TableWriter::new("merged.csv"),
/// )
/// .with_stage(RequiredColumns::parse("id,email"));
///
/// let summary = pipeline.run(&LogSink)?;
/// println!("Wrote {} rows", summary.rows);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, L> {
    extractor: E,
    stages: Vec<TableStage>,
    loader: L,
}

impl<E, L> Pipeline<E, L>
where
    E: Extractor<Item = Table>,
    L: Loader<Item = Table>,
{
    /// Create a new pipeline with no transform stages
    pub fn new(extractor: E, loader: L) -> Self {
        Self {
            extractor,
            stages: Vec::new(),
            loader,
        }
    }

    /// Append a transform stage; stages run in the order they were added
    pub fn with_stage<T>(mut self, stage: T) -> Self
    where
        T: Transformer<Input = Table, Output = Table> + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    /// Number of configured transform stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Run the complete pipeline
    ///
    /// Steps:
    /// 1. Extract one table per source
    /// 2. Concatenate them into a single table
    /// 3. Run each stage on the working table
    /// 4. Load the final table to the destination
    ///
    /// Nothing is loaded unless every earlier step succeeds.
    ///
    /// # Errors
    /// Returns the first error from any stage
    pub fn run(&self, sink: &dyn EventSink) -> Result<RunSummary> {
        sink.debug("Starting table pipeline");

        let tables = self.extractor.extract(sink)?;
        let inputs = tables.len();

        let mut table = merger::concat(tables)?;
        sink.info(&format!("Merged: {} total rows", table.height()));

        for stage in &self.stages {
            sink.debug(&format!("Running {} stage", stage.name()));
            table = stage.transform(table, sink)?;
        }

        let columns = table.width();
        let rows = self.loader.load(table, sink)?;

        Ok(RunSummary {
            inputs,
            rows,
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingSink;
    use crate::table::{Column, Value};
    use std::sync::{Arc, Mutex};

    struct MockExtractor(Vec<Table>);

    impl Extractor for MockExtractor {
        type Item = Table;
        fn extract(&self, _sink: &dyn EventSink) -> Result<Vec<Self::Item>> {
            Ok(self.0.clone())
        }
    }

    struct DropFirstColumn;

    impl Transformer for DropFirstColumn {
        type Input = Table;
        type Output = Table;
        fn transform(&self, input: Self::Input, _sink: &dyn EventSink) -> Result<Self::Output> {
            let keep: Vec<String> = input
                .column_names()
                .into_iter()
                .skip(1)
                .map(String::from)
                .collect();
            input.project(&keep).map_err(|m| eyre::eyre!("missing {:?}", m))
        }
    }

    struct FailingStage;

    impl Transformer for FailingStage {
        type Input = Table;
        type Output = Table;
        fn transform(&self, _input: Self::Input, _sink: &dyn EventSink) -> Result<Self::Output> {
            eyre::bail!("stage failed")
        }
    }

    struct CaptureLoader(Arc<Mutex<Option<Table>>>);

    impl Loader for CaptureLoader {
        type Item = Table;
        fn load(&self, item: Self::Item, _sink: &dyn EventSink) -> Result<usize> {
            let rows = item.height();
            *self.0.lock().unwrap() = Some(item);
            Ok(rows)
        }
    }

    fn table(ids: &[i64]) -> Table {
        Table::from_columns(vec![
            Column::new("id", ids.iter().map(|i| Value::Int(*i)).collect()),
            Column::new("name", ids.iter().map(|i| Value::from(format!("n{}", i))).collect()),
        ])
        .unwrap()
    }

    #[test]
    fn test_pipeline() {
        let result = Arc::new(Mutex::new(None));
        let sink = RecordingSink::new();

        let pipeline = Pipeline::new(
            MockExtractor(vec![table(&[1, 2]), table(&[3, 4, 5])]),
            CaptureLoader(result.clone()),
        )
        .with_stage(DropFirstColumn);

        let summary = pipeline.run(&sink).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                inputs: 2,
                rows: 5,
                columns: 1
            }
        );

        let written = result.lock().unwrap().take().unwrap();
        assert_eq!(written.column_names(), vec!["name"]);
        assert!(sink.contains(log::Level::Info, "Merged: 5 total rows"));
    }

    #[test]
    fn test_failed_stage_skips_load() {
        let result = Arc::new(Mutex::new(None));
        let pipeline = Pipeline::new(
            MockExtractor(vec![table(&[1])]),
            CaptureLoader(result.clone()),
        )
        .with_stage(FailingStage)
        .with_stage(DropFirstColumn);

        assert_eq!(pipeline.stage_count(), 2);
        assert!(pipeline.run(&RecordingSink::new()).is_err());
        assert!(result.lock().unwrap().is_none());
    }
}
