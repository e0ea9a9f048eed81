//! CLI helper functions
//!
//! The argument model lives here (rather than in the binary) so the full
//! run, including exit-code mapping, can be driven from tests.

use crate::{
    error::ExitStatus,
    etl::{Pipeline, RunSummary},
    report::EventSink,
    storage::{InputFiles, TableWriter},
    transform::{ColumnRenamer, ColumnSelector, MissingColumnPolicy, RequiredColumns},
};
use clap::Args;
use eyre::Result;
use std::path::PathBuf;

/// Options for a single merge run
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Input CSV/XLSX files, merged in the order given
    #[arg(long, num_args = 1.., required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file (.csv or .xlsx)
    #[arg(long)]
    pub output: PathBuf,

    /// Columns to keep (comma-separated)
    #[arg(long)]
    pub select: Option<String>,

    /// Rename mapping: "old:new,old2:new2"
    #[arg(long)]
    pub rename: Option<String>,

    /// Required columns (comma-separated)
    #[arg(long)]
    pub required: Option<String>,

    /// What to do when --select names a column that does not exist
    #[arg(long, value_enum, default_value_t)]
    pub on_missing_select: MissingColumnPolicy,

    /// What to do when --rename names a column that does not exist
    #[arg(long, value_enum, default_value_t)]
    pub on_missing_rename: MissingColumnPolicy,
}

impl RunArgs {
    /// Arguments for a plain merge of `inputs` into `output`
    pub fn new(inputs: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
            select: None,
            rename: None,
            required: None,
            on_missing_select: MissingColumnPolicy::default(),
            on_missing_rename: MissingColumnPolicy::default(),
        }
    }
}

/// An empty option string means the stage was not requested
fn requested(option: &Option<String>) -> Option<&str> {
    option.as_deref().filter(|s| !s.is_empty())
}

/// Build the pipeline for `args`
///
/// Pipeline: InputFiles → merge → [ColumnSelector] → [ColumnRenamer] →
/// [RequiredColumns] → TableWriter
///
/// The rename mapping is parsed here, so a malformed mapping fails before
/// any file is read.
pub fn build_pipeline(args: &RunArgs) -> Result<Pipeline<InputFiles, TableWriter>> {
    let mut pipeline = Pipeline::new(
        InputFiles::new(&args.inputs),
        TableWriter::new(&args.output),
    );

    if let Some(list) = requested(&args.select) {
        pipeline = pipeline.with_stage(ColumnSelector::parse(list, args.on_missing_select));
    }

    if let Some(mapping) = requested(&args.rename) {
        pipeline = pipeline.with_stage(ColumnRenamer::parse(mapping, args.on_missing_rename)?);
    }

    if let Some(list) = requested(&args.required) {
        pipeline = pipeline.with_stage(RequiredColumns::parse(list));
    }

    Ok(pipeline)
}

/// Build and run the pipeline, returning its summary
pub fn execute(args: &RunArgs, sink: &dyn EventSink) -> Result<RunSummary> {
    build_pipeline(args)?.run(sink)
}

/// Run and classify the outcome
///
/// Terminal failures are reported to `sink` once, at error level. Validation
/// stages log their own error naming the columns, so only execution failures
/// are logged here.
pub fn run(args: &RunArgs, sink: &dyn EventSink) -> ExitStatus {
    match execute(args, sink) {
        Ok(summary) => {
            sink.debug(&format!(
                "Wrote {} rows from {} file(s) to {}",
                summary.rows,
                summary.inputs,
                args.output.display()
            ));
            ExitStatus::Success
        }
        Err(report) => {
            let status = ExitStatus::from_report(&report);
            match status {
                ExitStatus::ValidationFailure => {
                    sink.debug(&format!("Validation error: {}", report))
                }
                _ => sink.error(&format!("Execution failed: {:#}", report)),
            }
            status
        }
    }
}
