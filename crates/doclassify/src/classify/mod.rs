//! Label voters and the vote aggregator.
//!
//! Three independent voters each propose at most one
//! [`Category`](crate::models::Category):
//! - the statistical model (see [`crate::model`])
//! - [`FilenameClassifier`], substring rules over the filename
//! - [`KeywordClassifier`], substring rules over extracted text
//!
//! [`aggregate`] merges their votes into a single result.

mod aggregate;
mod filename;
mod keyword;
mod rules;

pub use aggregate::{aggregate, Votes};
pub use filename::FilenameClassifier;
pub use keyword::KeywordClassifier;
pub use rules::{KeywordRules, RuleMatch};
