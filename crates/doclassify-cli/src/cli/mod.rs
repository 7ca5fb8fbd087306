//! Command-line interface for doclassify.

mod commands;
pub mod icons;

pub use commands::{is_verbose, run};
