//! Tesseract OCR extractor for raster images.
//!
//! Runs the `tesseract` command-line tool on a scratch copy of the upload.

use std::process::Command;

use doclassify::UploadedDocument;

use super::backend::{ExtractionError, Extractor, ExtractorKind};
use super::scratch::ScratchFile;
use super::tools::{check_binary, handle_cmd_output};

/// Image extractor backed by Tesseract OCR.
pub struct TesseractExtractor {
    language: String,
}

impl TesseractExtractor {
    /// Create an extractor that recognizes text in the given Tesseract language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl Default for TesseractExtractor {
    fn default() -> Self {
        Self::new("eng")
    }
}

impl Extractor for TesseractExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::TesseractOcr
    }

    fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    fn availability_hint(&self) -> String {
        if !check_binary("tesseract") {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        } else {
            "Tesseract is available".to_string()
        }
    }

    fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let suffix = document
            .extension()
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let scratch = ScratchFile::persist(document.content(), &suffix)?;

        let output = Command::new("tesseract")
            .arg(scratch.path())
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        handle_cmd_output(
            output,
            "tesseract (install tesseract-ocr)",
            "tesseract failed",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_default() {
        assert_eq!(TesseractExtractor::default().language, "eng");
        assert_eq!(TesseractExtractor::new("deu").language, "deu");
    }

    #[test]
    fn test_garbage_image_is_recoverable() {
        let extractor = TesseractExtractor::default();
        let doc = UploadedDocument::new("scan.png", b"not really a png".to_vec());
        // Either tesseract is missing or it rejects the bytes; both are recoverable.
        match extractor.extract(&doc) {
            Ok(text) => assert!(text.trim().is_empty()),
            Err(e) => assert!(e.is_recoverable(), "unexpected error: {}", e),
        }
    }
}
