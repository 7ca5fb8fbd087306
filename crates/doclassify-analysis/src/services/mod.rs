//! Services built on top of the extractors and voters.

pub mod classification;
