//! Plain-text extractor.

use doclassify::UploadedDocument;

use super::backend::{ExtractionError, Extractor, ExtractorKind};

/// Decodes the upload as UTF-8, silently dropping invalid byte sequences.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

fn decode_utf8_ignoring_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

impl Extractor for PlainTextExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::PlainText
    }

    fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        Ok(decode_utf8_ignoring_invalid(document.content()))
    }
}
