//! TF-IDF vectorizer with a vocabulary fixed at training time.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::tokenize::tokenize;

/// Sparse feature vector: (feature index, weight), sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Fitted text-to-vector transformation.
///
/// Inference never grows the vocabulary; terms not seen during fitting are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term to feature index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    pub idf: Vec<f64>,
    /// Whether English stop words were removed during fitting.
    #[serde(default)]
    pub stop_words: bool,
}

impl TfidfVectorizer {
    /// Fit a vocabulary and IDF weights on a corpus.
    ///
    /// Keeps at most `max_features` terms ranked by total term frequency
    /// (ties broken alphabetically). IDF is smoothed:
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize, stop_words: bool) -> Self {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref(), stop_words))
            .collect();

        let mut term_freq: BTreeMap<&str, usize> = BTreeMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = Vec::new();
            for token in tokens {
                *term_freq.entry(token.as_str()).or_default() += 1;
                if !seen.contains(&token.as_str()) {
                    seen.push(token.as_str());
                }
            }
            for term in seen {
                *doc_freq.entry(term).or_default() += 1;
            }
        }

        // BTreeMap iteration is alphabetical, and the sort is stable.
        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(max_features);

        let mut terms: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let n_docs = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term.to_string(), index);
        }

        Self {
            vocabulary,
            idf,
            stop_words,
        }
    }

    /// Number of features (vocabulary size).
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Transform text into an L2-normalized TF-IDF vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text, self.stop_words) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_default() += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in vector.iter_mut() {
                *weight /= norm;
            }
        }
        vector
    }

    /// Check that the vocabulary and IDF table agree.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        if let Some((term, index)) = self
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= self.idf.len())
        {
            return Err(format!("term '{}' has out-of-range index {}", term, index));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_builds_sorted_vocabulary() {
        let vectorizer = TfidfVectorizer::fit(&["zebra apple", "apple mango"], 10, false);
        assert_eq!(vectorizer.dimension(), 3);
        assert_eq!(vectorizer.vocabulary["apple"], 0);
        assert_eq!(vectorizer.vocabulary["mango"], 1);
        assert_eq!(vectorizer.vocabulary["zebra"], 2);
        // "apple" appears in every document so it gets the minimum idf.
        assert!(vectorizer.idf[0] < vectorizer.idf[1]);
        assert!((vectorizer.idf[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let vectorizer =
            TfidfVectorizer::fit(&["invoice invoice total", "invoice receipt"], 1, false);
        assert_eq!(vectorizer.dimension(), 1);
        assert!(vectorizer.vocabulary.contains_key("invoice"));
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let vectorizer = TfidfVectorizer::fit(&["patient diagnosis"], 10, false);
        let vector = vectorizer.transform("patient spaceship spaceship");
        assert_eq!(vector.len(), 1);
        assert_eq!(vector[0].0, vectorizer.vocabulary["patient"]);
        assert!((vector[0].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_is_unit_length() {
        let vectorizer = TfidfVectorizer::fit(&["alpha beta", "beta gamma"], 10, false);
        let vector = vectorizer.transform("alpha beta gamma gamma");
        let norm: f64 = vector.iter().map(|(_, w)| w * w).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_of_unseen_text_is_empty() {
        let vectorizer = TfidfVectorizer::fit(&["alpha beta"], 10, false);
        assert!(vectorizer.transform("nothing known").is_empty());
    }
}
