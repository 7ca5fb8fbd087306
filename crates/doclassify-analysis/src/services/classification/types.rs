//! Types returned by the classification pipeline.

use serde::Serialize;

use doclassify::classify::Votes;
use doclassify::ClassificationResult;

/// Everything the pipeline learned about one document.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub filename: String,
    /// Lower-cased extension, if the filename has one.
    pub extension: Option<String>,
    pub result: ClassificationResult,
    /// Extractor that ran, if any.
    pub extractor: Option<&'static str>,
    /// Characters of extracted text (0 when extraction failed).
    pub text_chars: usize,
    /// Recoverable extraction failure that was replaced by empty text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
    pub votes: Votes,
    /// Filename keyword behind the filename vote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename_keyword: Option<&'static str>,
    /// Content keyword behind the keyword vote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_keyword: Option<&'static str>,
}

impl ClassificationReport {
    pub(crate) fn new(filename: &str, extension: Option<String>) -> Self {
        Self {
            filename: filename.to_string(),
            extension,
            result: ClassificationResult::UnknownFile,
            extractor: None,
            text_chars: 0,
            extraction_error: None,
            votes: Votes::default(),
            filename_keyword: None,
            content_keyword: None,
        }
    }

    pub(crate) fn with_result(mut self, result: ClassificationResult) -> Self {
        self.result = result;
        self
    }
}
