//! Uploaded document model.

use crate::utils::ext::file_extension;

/// A document handed to the pipeline: a filename and its raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    filename: String,
    content: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Lower-cased extension of the filename, without the dot.
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.filename)
    }
}
