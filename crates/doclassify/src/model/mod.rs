//! Statistical text classifier: a TF-IDF vectorizer paired with a linear
//! classifier.
//!
//! The model is trained offline (see [`train`]) and persisted as a JSON
//! artifact. At startup the artifact is loaded once into a [`ModelHandle`];
//! if loading fails the handle records why and every prediction is absent.

mod linear;
mod tokenize;
pub mod train;
mod vectorizer;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Category;

pub use linear::LinearClassifier;
pub use tokenize::tokenize;
pub use train::{TrainError, TrainOptions, Trainer};
pub use vectorizer::{SparseVector, TfidfVectorizer};

/// Artifact format written by this version.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Errors loading or saving a model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// A fitted (vectorizer, classifier) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    pub format_version: u32,
    pub vectorizer: TfidfVectorizer,
    pub classifier: LinearClassifier,
}

impl TrainedModel {
    pub fn new(vectorizer: TfidfVectorizer, classifier: LinearClassifier) -> Self {
        Self {
            format_version: MODEL_FORMAT_VERSION,
            vectorizer,
            classifier,
        }
    }

    /// Read and validate an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = fs::read(path)?;
        let model: TrainedModel = serde_json::from_slice(&contents)?;
        model.validate()?;
        Ok(model)
    }

    /// Write the artifact, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(ModelError::Invalid(format!(
                "unsupported format version {} (expected {})",
                self.format_version, MODEL_FORMAT_VERSION
            )));
        }
        self.vectorizer.validate().map_err(ModelError::Invalid)?;
        self.classifier
            .validate(self.vectorizer.dimension())
            .map_err(ModelError::Invalid)
    }

    /// Predict a category for non-empty text.
    pub fn predict(&self, text: &str) -> Option<Category> {
        let features = self.vectorizer.transform(text);
        self.classifier.predict(&features)
    }
}

/// Shared read-only access to the model, or the reason it is missing.
#[derive(Debug, Clone)]
pub enum ModelHandle {
    Loaded(Arc<TrainedModel>),
    Unavailable { reason: String },
}

impl ModelHandle {
    /// Load the artifact at `path`. Failure is logged here, once, and
    /// produces an `Unavailable` handle.
    pub fn load(path: &Path) -> Self {
        match TrainedModel::load(path) {
            Ok(model) => {
                tracing::info!(
                    "Classifier model and vectorizer loaded from '{}' ({} features, {} classes)",
                    path.display(),
                    model.vectorizer.dimension(),
                    model.classifier.classes.len()
                );
                ModelHandle::Loaded(Arc::new(model))
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load classifier model from '{}': {}",
                    path.display(),
                    e
                );
                ModelHandle::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        ModelHandle::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelHandle::Loaded(_))
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        match self {
            ModelHandle::Loaded(model) => Some(model.as_ref()),
            ModelHandle::Unavailable { .. } => None,
        }
    }

    /// Statistical vote. Absent when the model is unavailable or text is empty.
    pub fn predict(&self, text: &str) -> Option<Category> {
        if text.is_empty() {
            return None;
        }
        self.model().and_then(|model| model.predict(text))
    }
}

impl From<TrainedModel> for ModelHandle {
    fn from(model: TrainedModel) -> Self {
        ModelHandle::Loaded(Arc::new(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tiny_model() -> TrainedModel {
        let vectorizer = TfidfVectorizer::fit(&["invoice total", "patient diagnosis"], 10, false);
        let dim = vectorizer.dimension();
        let mut invoice = vec![0.0; dim];
        let mut medical = vec![0.0; dim];
        invoice[vectorizer.vocabulary["invoice"]] = 1.0;
        medical[vectorizer.vocabulary["patient"]] = 1.0;
        TrainedModel::new(
            vectorizer,
            LinearClassifier {
                classes: vec![Category::Invoice, Category::MedicalReport],
                coef: vec![invoice, medical],
                intercept: vec![0.0, 0.0],
            },
        )
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models").join("classifier_model.json");
        tiny_model().save(&path).unwrap();

        let handle = ModelHandle::load(&path);
        assert!(handle.is_loaded());
        assert_eq!(handle.predict("the patient"), Some(Category::MedicalReport));
        assert_eq!(handle.predict("an invoice"), Some(Category::Invoice));
    }

    #[test]
    fn test_missing_artifact_is_unavailable() {
        let dir = tempdir().unwrap();
        let handle = ModelHandle::load(&dir.path().join("nope.json"));
        assert!(!handle.is_loaded());
        assert_eq!(handle.predict("invoice"), None);
    }

    #[test]
    fn test_unknown_class_fails_to_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        let json = serde_json::to_string(&tiny_model())
            .unwrap()
            .replace("\"invoice\"", "\"passport\"");
        fs::write(&path, json).unwrap();

        assert!(matches!(TrainedModel::load(&path), Err(ModelError::Parse(_))));
        assert!(!ModelHandle::load(&path).is_loaded());
    }

    #[test]
    fn test_corrupt_artifact_fails_to_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, b"\x00\x01not json").unwrap();
        assert!(!ModelHandle::load(&path).is_loaded());
    }

    #[test]
    fn test_mismatched_dimensions_rejected() {
        let mut model = tiny_model();
        model.classifier.coef[0].push(1.0);
        assert!(matches!(model.validate(), Err(ModelError::Invalid(_))));
    }

    #[test]
    fn test_empty_text_is_absent() {
        let handle = ModelHandle::from(tiny_model());
        assert_eq!(handle.predict(""), None);
    }
}
