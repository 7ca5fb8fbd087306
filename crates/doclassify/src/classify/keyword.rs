//! Content keyword voter.

use super::rules::{KeywordRules, RuleMatch};
use crate::models::Category;

const CONTENT_RULES: &[(Category, &[&str])] = &[
    (
        Category::DriversLicense,
        &[
            "driver's license",
            "drivers license",
            "driver licence",
            "driver's licence",
        ],
    ),
    (
        Category::BankStatement,
        &["bank statement", "account summary", "account balance"],
    ),
    (
        Category::Invoice,
        &["invoice", "bill", "statement of account", "amount due"],
    ),
    (
        Category::Resume,
        &["resume", "curriculum vitae", "cv", "education", "experience"],
    ),
    (
        Category::MedicalReport,
        &["medical", "diagnosis", "treatment", "patient", "physician", "health"],
    ),
];

/// Votes from keywords found in the extracted text.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: KeywordRules,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            rules: KeywordRules::new(CONTENT_RULES),
        }
    }
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&self, text: &str) -> Option<Category> {
        self.explain(text).map(|m| m.category)
    }

    pub fn explain(&self, text: &str) -> Option<RuleMatch> {
        if text.is_empty() {
            return None;
        }
        let found = self.rules.find(&text.to_lowercase());
        match found {
            Some(m) => tracing::debug!(
                "Text keyword '{}' matched for class '{}'",
                m.keyword,
                m.category
            ),
            None => tracing::debug!("No text keywords matched"),
        }
        found
    }
}
