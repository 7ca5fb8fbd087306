//! Document classification pipeline.
//!
//! `extension check -> extract -> vote (statistical, filename, keyword) -> aggregate`.
//!
//! The pipeline is total: every call returns a category or one of the
//! sentinel results, never an error. Recoverable extraction failures are
//! logged and replaced by empty text. Anything else, including a panic
//! inside an extractor or voter, is logged and becomes
//! `classification_error`.

mod types;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info, warn};

use doclassify::classify::{aggregate, FilenameClassifier, KeywordClassifier, Votes};
use doclassify::config::Settings;
use doclassify::model::ModelHandle;
use doclassify::utils::{is_image_extension, is_supported_extension, preview};
use doclassify::{ClassificationResult, UploadedDocument};

use crate::extract::{ExtractionError, Extractor, ExtractorRegistry};

pub use types::ClassificationReport;

/// Characters of extracted text shown in debug logs.
const LOG_PREVIEW_CHARS: usize = 100;

/// Classifies uploaded documents.
///
/// Immutable after construction and safe to share between threads.
pub struct Pipeline {
    registry: ExtractorRegistry,
    model: ModelHandle,
    filename_classifier: FilenameClassifier,
    keyword_classifier: KeywordClassifier,
}

impl Pipeline {
    pub fn new(registry: ExtractorRegistry, model: ModelHandle) -> Self {
        Self {
            registry,
            model,
            filename_classifier: FilenameClassifier::new(),
            keyword_classifier: KeywordClassifier::new(),
        }
    }

    /// Build a pipeline from resolved settings: default extractors and the
    /// model at `settings.model_path` (absent if it cannot be loaded).
    pub fn from_settings(settings: &Settings) -> Self {
        let registry = ExtractorRegistry::with_defaults(&settings.tesseract_lang);
        let model = ModelHandle::load(&settings.model_path);
        Self::new(registry, model)
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Classify a document, returning only the final result.
    pub fn classify(&self, document: &UploadedDocument) -> ClassificationResult {
        self.classify_detailed(document).result
    }

    /// Classify a document and report the intermediate votes.
    pub fn classify_detailed(&self, document: &UploadedDocument) -> ClassificationReport {
        let filename = document.filename();
        let extension = document.extension();
        let report = ClassificationReport::new(filename, extension.clone());

        let (ext, extractor) = match extension
            .as_deref()
            .filter(|ext| is_supported_extension(ext))
            .and_then(|ext| self.registry.get(ext).map(|extractor| (ext, extractor)))
        {
            Some(found) => found,
            None => {
                info!("Unsupported file type for '{}'", filename);
                return report.with_result(ClassificationResult::UnsupportedFileType);
            }
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run(document, ext, extractor, report.clone())
        }));

        match outcome {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => {
                error!("Classification of '{}' failed: {:?}", filename, e);
                report.with_result(ClassificationResult::ClassificationError)
            }
            Err(payload) => {
                error!(
                    "Classification of '{}' panicked: {}",
                    filename,
                    panic_message(payload.as_ref())
                );
                report.with_result(ClassificationResult::ClassificationError)
            }
        }
    }

    fn run(
        &self,
        document: &UploadedDocument,
        ext: &str,
        extractor: &dyn Extractor,
        mut report: ClassificationReport,
    ) -> Result<ClassificationReport, ExtractionError> {
        let filename = document.filename();
        report.extractor = Some(extractor.kind().as_str());

        let text = match extractor.extract(document) {
            Ok(text) => text,
            Err(e) if e.is_recoverable() => {
                warn!(
                    "{} extraction failed for '{}', continuing with empty text: {}",
                    extractor.kind(),
                    filename,
                    e
                );
                report.extraction_error = Some(e.to_string());
                String::new()
            }
            Err(e) => return Err(e),
        };

        report.text_chars = text.chars().count();
        debug!(
            "Extracted {} chars from '{}': {}",
            report.text_chars,
            filename,
            preview(&text, LOG_PREVIEW_CHARS)
        );

        let statistical = if is_image_extension(ext) {
            None
        } else {
            self.model.predict(&text)
        };

        let filename_match = self.filename_classifier.explain(filename);
        let content_match = self.keyword_classifier.explain(&text);
        report.filename_keyword = filename_match.map(|m| m.keyword);
        report.content_keyword = content_match.map(|m| m.keyword);

        report.votes = Votes {
            statistical,
            filename: filename_match.map(|m| m.category),
            keyword: content_match.map(|m| m.category),
        };
        debug!("Votes for '{}': {:?}", filename, report.votes);

        report.result = aggregate(&report.votes);
        Ok(report)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use doclassify::model::{LinearClassifier, TfidfVectorizer, TrainedModel};
    use doclassify::Category;

    use crate::extract::{ExtractorKind, PlainTextExtractor, ScratchFile};

    /// Returns fixed text and counts calls.
    struct FixedText {
        text: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl Extractor for FixedText {
        fn kind(&self) -> ExtractorKind {
            ExtractorKind::PdfToText
        }

        fn extract(&self, _document: &UploadedDocument) -> Result<String, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.to_string())
        }
    }

    struct Failing(fn() -> ExtractionError);

    impl Extractor for Failing {
        fn kind(&self) -> ExtractorKind {
            ExtractorKind::PdfToText
        }

        fn extract(&self, _document: &UploadedDocument) -> Result<String, ExtractionError> {
            Err((self.0)())
        }
    }

    /// Writes a scratch file, records its path, then panics.
    struct PanicsWithScratch {
        seen: Arc<Mutex<Option<PathBuf>>>,
    }

    impl Extractor for PanicsWithScratch {
        fn kind(&self) -> ExtractorKind {
            ExtractorKind::PdfToText
        }

        fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
            let scratch = ScratchFile::persist(document.content(), ".pdf")?;
            *self.seen.lock().unwrap() = Some(scratch.path().to_path_buf());
            panic!("parser crashed");
        }
    }

    fn pipeline_with(ext: &str, extractor: impl Extractor + 'static) -> Pipeline {
        let mut registry = ExtractorRegistry::with_defaults("eng");
        registry.register(ext, extractor);
        Pipeline::new(registry, ModelHandle::unavailable("test"))
    }

    /// One-feature model that always answers `category`.
    fn constant_model(category: Category) -> ModelHandle {
        let vectorizer = TfidfVectorizer::fit(&["placeholder words"], 10, false);
        let dimension = vectorizer.dimension();
        let classifier = LinearClassifier {
            classes: vec![category],
            coef: vec![vec![0.0; dimension]],
            intercept: vec![1.0],
        };
        ModelHandle::from(TrainedModel::new(vectorizer, classifier))
    }

    #[test]
    fn test_unsupported_extension_skips_extraction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = pipeline_with(
            "pdf",
            FixedText {
                text: "invoice",
                calls: calls.clone(),
            },
        );

        for name in ["malware.exe", "invoice", "archive.tar.gz", "trailing."] {
            let doc = UploadedDocument::new(name, b"invoice".to_vec());
            assert_eq!(
                pipeline.classify(&doc),
                ClassificationResult::UnsupportedFileType,
                "{}",
                name
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = pipeline_with(
            "pdf",
            FixedText {
                text: "",
                calls: calls.clone(),
            },
        );
        let doc = UploadedDocument::new("SCAN.PDF", Vec::new());
        assert_eq!(pipeline.classify(&doc), ClassificationResult::UnknownFile);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_plain_text_invoice() {
        let pipeline = Pipeline::new(
            ExtractorRegistry::with_defaults("eng"),
            ModelHandle::unavailable("test"),
        );
        let doc = UploadedDocument::new("x.txt", b"Invoice #123, amount due $40".to_vec());

        let report = pipeline.classify_detailed(&doc);
        assert_eq!(report.result, ClassificationResult::Category(Category::Invoice));
        assert_eq!(report.votes.keyword, Some(Category::Invoice));
        assert_eq!(report.votes.filename, None);
        assert_eq!(report.votes.statistical, None);
        assert_eq!(report.extension.as_deref(), Some("txt"));
        assert_eq!(report.extractor, Some("text"));
        assert_eq!(report.content_keyword, Some("invoice"));
        assert_eq!(report.filename_keyword, None);
    }

    #[test]
    fn test_no_votes_is_unknown() {
        let pipeline = Pipeline::new(
            ExtractorRegistry::with_defaults("eng"),
            ModelHandle::unavailable("test"),
        );
        let doc = UploadedDocument::new("notes.txt", b"lorem ipsum".to_vec());
        assert_eq!(pipeline.classify(&doc), ClassificationResult::UnknownFile);
    }

    #[test]
    fn test_filename_and_statistical_agree() {
        let mut registry = ExtractorRegistry::new();
        registry.register("txt", PlainTextExtractor::new());
        let pipeline = Pipeline::new(registry, constant_model(Category::BankStatement));

        let doc = UploadedDocument::new("bank_statement_march.txt", b"random words".to_vec());
        let report = pipeline.classify_detailed(&doc);
        assert_eq!(report.votes.statistical, Some(Category::BankStatement));
        assert_eq!(report.votes.filename, Some(Category::BankStatement));
        assert_eq!(
            report.result,
            ClassificationResult::Category(Category::BankStatement)
        );
    }

    #[test]
    fn test_image_skips_statistical_vote() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ExtractorRegistry::new();
        registry.register(
            "png",
            FixedText {
                text: "lorem ipsum",
                calls,
            },
        );
        let pipeline = Pipeline::new(registry, constant_model(Category::Resume));

        let doc = UploadedDocument::new("scan.png", b"\x89PNG".to_vec());
        let report = pipeline.classify_detailed(&doc);
        assert_eq!(report.votes.statistical, None);
        assert_eq!(report.result, ClassificationResult::UnknownFile);
    }

    #[test]
    fn test_blank_license_scan_uses_filename() {
        let mut registry = ExtractorRegistry::new();
        registry.register(
            "png",
            FixedText {
                text: "",
                calls: Arc::new(AtomicUsize::new(0)),
            },
        );
        let pipeline = Pipeline::new(registry, ModelHandle::unavailable("not trained"));

        let doc = UploadedDocument::new("drivers_license_john.png", b"\x89PNG".to_vec());
        let report = pipeline.classify_detailed(&doc);
        assert_eq!(report.votes.keyword, None);
        assert_eq!(report.filename_keyword, Some("drivers_license"));
        assert_eq!(
            report.result,
            ClassificationResult::Category(Category::DriversLicense)
        );
    }

    #[test]
    fn test_empty_text_skips_statistical_vote() {
        let mut registry = ExtractorRegistry::new();
        registry.register("txt", PlainTextExtractor::new());
        let pipeline = Pipeline::new(registry, constant_model(Category::Resume));

        let doc = UploadedDocument::new("blank.txt", Vec::new());
        let report = pipeline.classify_detailed(&doc);
        assert_eq!(report.votes.statistical, None);
        assert_eq!(report.result, ClassificationResult::UnknownFile);
    }

    #[test]
    fn test_recoverable_failure_uses_filename_vote() {
        let pipeline = pipeline_with(
            "pdf",
            Failing(|| ExtractionError::ToolNotFound("pdftotext".into())),
        );
        let doc = UploadedDocument::new("dl_scan.pdf", b"%PDF".to_vec());

        let report = pipeline.classify_detailed(&doc);
        assert_eq!(
            report.result,
            ClassificationResult::Category(Category::DriversLicense)
        );
        assert_eq!(report.text_chars, 0);
        assert!(report.extraction_error.is_some());
    }

    #[test]
    fn test_internal_failure_is_classification_error() {
        let pipeline = pipeline_with("pdf", Failing(|| ExtractionError::Internal("bug".into())));
        let doc = UploadedDocument::new("invoice.pdf", b"%PDF".to_vec());
        assert_eq!(
            pipeline.classify(&doc),
            ClassificationResult::ClassificationError
        );
    }

    #[test]
    fn test_panic_is_caught_and_scratch_removed() {
        let seen = Arc::new(Mutex::new(None));
        let pipeline = pipeline_with("pdf", PanicsWithScratch { seen: seen.clone() });
        let doc = UploadedDocument::new("invoice.pdf", b"%PDF-1.7".to_vec());

        assert_eq!(
            pipeline.classify(&doc),
            ClassificationResult::ClassificationError
        );

        let path = seen.lock().unwrap_or_else(|e| e.into_inner()).clone().unwrap();
        assert!(!path.exists(), "scratch file left at {}", path.display());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let pipeline = Pipeline::new(
            ExtractorRegistry::with_defaults("eng"),
            ModelHandle::unavailable("test"),
        );
        let doc = UploadedDocument::new(
            "patient_report.txt",
            b"Diagnosis and treatment plan".to_vec(),
        );
        let first = pipeline.classify(&doc);
        for _ in 0..3 {
            assert_eq!(pipeline.classify(&doc), first);
        }
        assert_eq!(first, ClassificationResult::Category(Category::MedicalReport));
    }

    #[test]
    fn test_report_serializes_result_as_string() {
        let pipeline = Pipeline::new(
            ExtractorRegistry::with_defaults("eng"),
            ModelHandle::unavailable("test"),
        );
        let doc = UploadedDocument::new("resume.txt", b"work experience".to_vec());
        let json = serde_json::to_value(pipeline.classify_detailed(&doc)).unwrap();
        assert_eq!(json["result"], "resume");
        assert_eq!(json["votes"]["filename"], "resume");
        assert!(json.get("extraction_error").is_none());
    }

    #[test]
    fn test_pipeline_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();
    }
}
