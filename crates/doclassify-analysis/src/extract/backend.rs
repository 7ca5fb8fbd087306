//! Extractor abstraction shared by every file format.

use thiserror::Error;

use doclassify::UploadedDocument;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractionError {
    /// Whether the pipeline should continue with empty text.
    ///
    /// Malformed input and missing tools are expected and recoverable.
    /// Local I/O and internal faults are not and abort the classification.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExtractionError::ToolNotFound(_)
                | ExtractionError::ExtractionFailed(_)
                | ExtractionError::Archive(_)
                | ExtractionError::Workbook(_)
        )
    }
}

/// Which extractor produced a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractorKind {
    /// OCR using Tesseract.
    TesseractOcr,
    /// Text layer extraction with pdftotext.
    PdfToText,
    /// Paragraph text from the DOCX container.
    Docx,
    /// Cell values from an XLSX workbook.
    Spreadsheet,
    /// UTF-8 plain text.
    PlainText,
}

impl ExtractorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractorKind::TesseractOcr => "tesseract",
            ExtractorKind::PdfToText => "pdftotext",
            ExtractorKind::Docx => "docx",
            ExtractorKind::Spreadsheet => "xlsx",
            ExtractorKind::PlainText => "text",
        }
    }
}

impl std::fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Converts document bytes into plain text.
pub trait Extractor: Send + Sync {
    fn kind(&self) -> ExtractorKind;

    /// Check if this extractor can run (external tools installed).
    fn is_available(&self) -> bool {
        true
    }

    /// Describe what is needed to make this extractor available.
    fn availability_hint(&self) -> String {
        format!("{} is available", self.kind())
    }

    /// Extract text. Must not leave files behind on any path.
    fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError>;
}
