//! Text extraction from uploaded documents.
//!
//! One extractor per supported format:
//! - Tesseract OCR for `png`, `jpg` and `jpeg` images
//! - pdftotext (Poppler) for `pdf`
//! - docx-rs for `docx` paragraphs and tables
//! - calamine for `xlsx` workbooks
//! - lossy UTF-8 decoding for `txt`
//!
//! Extractors that need a file on disk write the upload to a scratch file
//! owned by the call; the file is removed when the call returns or unwinds.
//!
//! Use [`ExtractorRegistry`] to map extensions to extractors.

mod backend;
mod docx;
mod pdf;
mod plain;
mod registry;
mod scratch;
mod tesseract;
mod tools;
mod xlsx;

pub use backend::{ExtractionError, Extractor, ExtractorKind};
pub use docx::DocxExtractor;
pub use pdf::PdfTextExtractor;
pub use plain::PlainTextExtractor;
pub use registry::ExtractorRegistry;
pub use scratch::ScratchFile;
pub use tesseract::TesseractExtractor;
pub use tools::{check_binary, check_tools};
pub use xlsx::SpreadsheetExtractor;
