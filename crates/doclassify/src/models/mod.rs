//! Data models for documents and classification outcomes.

mod category;
mod document;
mod outcome;

pub use category::{Category, UnknownCategory};
pub use document::UploadedDocument;
pub use outcome::ClassificationResult;
