//! Majority-vote aggregation with first-occurrence tie-break.

use serde::Serialize;

use crate::models::{Category, ClassificationResult};

/// The three votes produced for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Votes {
    pub statistical: Option<Category>,
    pub filename: Option<Category>,
    pub keyword: Option<Category>,
}

impl Votes {
    /// Present votes in encounter order: statistical, filename, keyword.
    pub fn collected(&self) -> Vec<Category> {
        [self.statistical, self.filename, self.keyword]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Merge votes into a final result.
///
/// The most frequent label wins. On a tie the label seen first in
/// encounter order wins. No votes at all yields `unknown_file`.
pub fn aggregate(votes: &Votes) -> ClassificationResult {
    let collected = votes.collected();

    // (label, count) in first-seen order
    let mut tally: Vec<(Category, usize)> = Vec::with_capacity(collected.len());
    for label in collected {
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best: Option<(Category, usize)> = None;
    for (label, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }

    match best {
        Some((label, _)) => ClassificationResult::Category(label),
        None => ClassificationResult::UnknownFile,
    }
}
