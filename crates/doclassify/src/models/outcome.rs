//! The single externally visible pipeline outcome.

use serde::{Serialize, Serializer};

use super::Category;

/// What the pipeline reports for a document: a category or a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationResult {
    Category(Category),
    /// Extension outside the allow-list.
    UnsupportedFileType,
    /// No voter proposed a category.
    UnknownFile,
    /// An unexpected fault occurred during extraction or voting.
    ClassificationError,
}

impl ClassificationResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationResult::Category(c) => c.as_str(),
            ClassificationResult::UnsupportedFileType => "unsupported_file_type",
            ClassificationResult::UnknownFile => "unknown_file",
            ClassificationResult::ClassificationError => "classification_error",
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            ClassificationResult::Category(c) => Some(*c),
            _ => None,
        }
    }

    /// True for the three non-category outcomes.
    pub fn is_sentinel(&self) -> bool {
        self.category().is_none()
    }
}

impl From<Category> for ClassificationResult {
    fn from(category: Category) -> Self {
        ClassificationResult::Category(category)
    }
}

impl std::fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ClassificationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
