//! The closed set of document categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A document class every voter and the aggregator agree on.
///
/// Declaration order matters: rule tables are walked in this order and the
/// first matching category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DriversLicense,
    BankStatement,
    Invoice,
    Resume,
    MedicalReport,
}

/// Returned when a tag does not name a known category.
#[derive(Debug, Clone, Error)]
#[error("Unknown category tag: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 5] = [
        Category::DriversLicense,
        Category::BankStatement,
        Category::Invoice,
        Category::Resume,
        Category::MedicalReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DriversLicense => "drivers_license",
            Category::BankStatement => "bank_statement",
            Category::Invoice => "invoice",
            Category::Resume => "resume",
            Category::MedicalReport => "medical_report",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "drivers_license" => Some(Category::DriversLicense),
            "bank_statement" => Some(Category::BankStatement),
            "invoice" => Some(Category::Invoice),
            "resume" => Some(Category::Resume),
            "medical_report" => Some(Category::MedicalReport),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_str(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
