//! Text extraction and the classification pipeline for doclassify.

#![allow(clippy::should_implement_trait)]

pub mod extract;
pub mod services;

pub use extract::{ExtractionError, Extractor, ExtractorRegistry};
pub use services::classification::{ClassificationReport, Pipeline};
