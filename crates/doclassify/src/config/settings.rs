//! Application settings.

use std::path::PathBuf;

use super::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MODEL_PATH, DEFAULT_RATE_LIMIT_PER_MINUTE};

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Trained model artifact.
    pub model_path: PathBuf,
    /// Tesseract language setting.
    pub tesseract_lang: String,
    /// HTTP bind address (host:port, host, or port).
    pub bind: String,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: usize,
    /// Requests allowed per client address per minute (0 disables the limit).
    pub rate_limit_per_minute: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            tesseract_lang: "eng".to_string(),
            bind: "127.0.0.1:5000".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
        }
    }
}
