//! PDF text-layer extraction with pdftotext from Poppler.

use std::process::Command;

use doclassify::UploadedDocument;

use super::backend::{ExtractionError, Extractor, ExtractorKind};
use super::scratch::ScratchFile;
use super::tools::{check_binary, handle_cmd_output};

/// Extracts the embedded text of every page, in reading order.
///
/// Scanned PDFs without a text layer produce empty text.
#[derive(Debug, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PdfTextExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::PdfToText
    }

    fn is_available(&self) -> bool {
        check_binary("pdftotext")
    }

    fn availability_hint(&self) -> String {
        if !check_binary("pdftotext") {
            "pdftotext not installed. Install with: apt install poppler-utils".to_string()
        } else {
            "pdftotext is available".to_string()
        }
    }

    fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let scratch = ScratchFile::persist(document.content(), ".pdf")?;

        let output = Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8"])
            .arg(scratch.path())
            .arg("-")
            .output();

        handle_cmd_output(
            output,
            "pdftotext (install poppler-utils)",
            "pdftotext failed",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_pdf_is_recoverable() {
        let doc = UploadedDocument::new("statement.pdf", b"%PDF-1.4\n1 0 obj".to_vec());
        match PdfTextExtractor::new().extract(&doc) {
            Ok(text) => assert!(text.trim().is_empty()),
            Err(e) => assert!(e.is_recoverable(), "unexpected error: {}", e),
        }
    }
}
