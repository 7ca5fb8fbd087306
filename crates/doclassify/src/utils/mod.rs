//! Utility functions shared across the classification crates.

pub mod ext;
pub mod text;

pub use ext::{file_extension, is_image_extension, is_supported_extension, SUPPORTED_EXTENSIONS};
pub use text::preview;
