//! Scratch files for extractors that need a path on disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Upload bytes persisted to a temporary file.
///
/// The file is deleted when the value is dropped, including during a panic
/// unwind.
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Write `content` to a new temporary file whose name ends in `suffix`
    /// (e.g. ".pdf"). Some tools sniff the format from the extension.
    pub fn persist(content: &[u8], suffix: &str) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("doclassify-")
            .suffix(suffix)
            .tempfile()?;
        file.write_all(content)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_removed_on_drop() {
        let scratch = ScratchFile::persist(b"%PDF-1.4", ".pdf").unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");

        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_removed_on_unwind() {
        let mut seen = None;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let scratch = ScratchFile::persist(b"data", ".docx").unwrap();
            seen = Some(scratch.path().to_path_buf());
            panic!("extractor blew up");
        }));
        assert!(result.is_err());
        assert!(!seen.unwrap().exists());
    }
}
