//! Ordered substring rules shared by the filename and keyword voters.

use crate::models::Category;

/// The rule that produced a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub category: Category,
    pub keyword: &'static str,
}

/// Ordered mapping of category to substring keywords.
///
/// Categories are tried in table order, and keywords within a category in
/// their listed order. The first keyword found as a substring wins.
#[derive(Debug, Clone)]
pub struct KeywordRules {
    table: &'static [(Category, &'static [&'static str])],
}

impl KeywordRules {
    pub const fn new(table: &'static [(Category, &'static [&'static str])]) -> Self {
        Self { table }
    }

    /// Find the first matching rule. `haystack` must already be lower-cased.
    pub fn find(&self, haystack: &str) -> Option<RuleMatch> {
        self.table.iter().find_map(|(category, keywords)| {
            keywords
                .iter()
                .find(|keyword| haystack.contains(*keyword))
                .map(|keyword| RuleMatch {
                    category: *category,
                    keyword: *keyword,
                })
        })
    }
}
