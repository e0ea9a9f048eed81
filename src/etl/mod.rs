//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides the trait definitions the table pipeline is built
//! from: extract tables from input files, merge them, run a chain of table
//! transformers, and load the result to the output file.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::{Pipeline, RunSummary};
pub use transform::{TableStage, Transformer};
