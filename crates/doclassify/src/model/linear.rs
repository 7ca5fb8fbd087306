//! Linear multi-class decision function.

use serde::{Deserialize, Serialize};

use super::vectorizer::SparseVector;
use crate::models::Category;

/// One weight row and intercept per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// Class labels in score order.
    pub classes: Vec<Category>,
    /// Weight matrix, `classes.len()` rows of `dimension` columns.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LinearClassifier {
    /// Score every class for a feature vector.
    pub fn decision_function(&self, features: &SparseVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| {
                features
                    .iter()
                    .map(|&(index, weight)| row[index] * weight)
                    .sum::<f64>()
                    + bias
            })
            .collect()
    }

    /// Highest-scoring class. Ties go to the earliest class.
    pub fn predict(&self, features: &SparseVector) -> Option<Category> {
        let scores = self.decision_function(features);
        let mut best: Option<(usize, f64)> = None;
        for (index, score) in scores.into_iter().enumerate() {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }
        best.map(|(index, _)| self.classes[index])
    }

    pub(crate) fn validate(&self, dimension: usize) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        if self.coef.len() != self.classes.len() || self.intercept.len() != self.classes.len() {
            return Err(format!(
                "{} classes but {} weight rows and {} intercepts",
                self.classes.len(),
                self.coef.len(),
                self.intercept.len()
            ));
        }
        if let Some(row) = self.coef.iter().position(|row| row.len() != dimension) {
            return Err(format!(
                "weight row {} has {} columns, expected {}",
                row,
                self.coef[row].len(),
                dimension
            ));
        }
        let mut seen = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            if seen.contains(class) {
                return Err(format!("duplicate class '{}'", class));
            }
            seen.push(*class);
        }
        Ok(())
    }
}
