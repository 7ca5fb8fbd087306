//! Extension-to-extractor dispatch table.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::backend::Extractor;
use super::docx::DocxExtractor;
use super::pdf::PdfTextExtractor;
use super::plain::PlainTextExtractor;
use super::tesseract::TesseractExtractor;
use super::xlsx::SpreadsheetExtractor;

/// Registry of extractors keyed by lower-cased file extension.
pub struct ExtractorRegistry {
    extractors: BTreeMap<String, Arc<dyn Extractor>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            extractors: BTreeMap::new(),
        }
    }

    /// Create a registry with an extractor for every supported extension.
    pub fn with_defaults(ocr_language: &str) -> Self {
        let mut registry = Self::new();

        let ocr: Arc<dyn Extractor> = Arc::new(TesseractExtractor::new(ocr_language));
        for ext in ["png", "jpg", "jpeg"] {
            registry.register_shared(ext, Arc::clone(&ocr));
        }
        registry.register("pdf", PdfTextExtractor::new());
        registry.register("docx", DocxExtractor::new());
        registry.register("xlsx", SpreadsheetExtractor::new());
        registry.register("txt", PlainTextExtractor::new());
        registry
    }

    /// Register an extractor, replacing any previous one for `extension`.
    pub fn register(&mut self, extension: &str, extractor: impl Extractor + 'static) {
        self.register_shared(extension, Arc::new(extractor));
    }

    /// Register an extractor instance shared between several extensions.
    pub fn register_shared(&mut self, extension: &str, extractor: Arc<dyn Extractor>) {
        self.extractors
            .insert(extension.to_ascii_lowercase(), extractor);
    }

    /// Get the extractor for an extension.
    pub fn get(&self, extension: &str) -> Option<&dyn Extractor> {
        self.extractors
            .get(&extension.to_ascii_lowercase())
            .map(|e| e.as_ref())
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extractors.keys().map(|k| k.as_str())
    }

    /// Registered extractors with their extension.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Extractor)> {
        self.extractors
            .iter()
            .map(|(ext, extractor)| (ext.as_str(), extractor.as_ref()))
    }
}
