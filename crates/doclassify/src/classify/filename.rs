//! Filename-based voter.

use super::rules::{KeywordRules, RuleMatch};
use crate::models::Category;

const FILENAME_RULES: &[(Category, &[&str])] = &[
    (
        Category::DriversLicense,
        &[
            "driver_license",
            "drivers_license",
            "driver_licence",
            "drivers_licence",
            "dl",
            "license",
            "licence",
        ],
    ),
    (Category::BankStatement, &["bank_statement", "statement", "bank"]),
    (Category::Invoice, &["invoice", "bill", "receipt"]),
    (Category::Resume, &["resume", "cv"]),
    (Category::MedicalReport, &["medical", "report"]),
];

/// Votes from keywords found in the file's name.
#[derive(Debug, Clone)]
pub struct FilenameClassifier {
    rules: KeywordRules,
}

impl Default for FilenameClassifier {
    fn default() -> Self {
        Self {
            rules: KeywordRules::new(FILENAME_RULES),
        }
    }
}

impl FilenameClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&self, filename: &str) -> Option<Category> {
        self.explain(filename).map(|m| m.category)
    }

    /// Like [`classify`](Self::classify), but also reports the keyword that matched.
    pub fn explain(&self, filename: &str) -> Option<RuleMatch> {
        let found = self.rules.find(&filename.to_lowercase());
        match found {
            Some(m) => tracing::debug!(
                "Filename keyword '{}' matched for class '{}'",
                m.keyword,
                m.category
            ),
            None => tracing::debug!("No filename keywords matched"),
        }
        found
    }
}
