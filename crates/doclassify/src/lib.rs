//! doclassify - document classification core.
//!
//! Holds the pieces of the classification pipeline that do not depend on
//! any file format:
//! - the closed set of document categories and pipeline outcomes
//! - the rule-based filename and keyword voters
//! - the TF-IDF vectorizer + linear classifier model and its trainer
//! - the vote aggregator
//! - configuration loading
//!
//! Text extraction and pipeline orchestration live in `doclassify-analysis`.

#![allow(clippy::should_implement_trait)]

pub mod classify;
pub mod config;
pub mod model;
pub mod models;
pub mod utils;

pub use models::{Category, ClassificationResult, UploadedDocument};
