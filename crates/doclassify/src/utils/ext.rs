//! File extension handling and the supported-format allow-list.

/// Extensions the pipeline can extract text from.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "docx", "xlsx", "txt"];

/// Extensions routed to OCR. The statistical voter skips these.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Lower-cased extension of a filename (text after the last dot).
///
/// Returns `None` when the name has no dot or ends with one. A leading dot
/// alone (".txt") is treated as a hidden file with no extension.
pub fn file_extension(filename: &str) -> Option<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Check an already lower-cased extension against the allow-list.
pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&ext)
}

pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}
