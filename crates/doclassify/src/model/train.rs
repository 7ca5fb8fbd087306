//! Offline training of the statistical classifier.
//!
//! Reads a labeled corpus, fits the TF-IDF vectorizer and a multinomial
//! logistic regression by full-batch gradient descent, and evaluates the
//! result on a held-out split. Training is deterministic: the same corpus
//! and options always produce the same artifact.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::{LinearClassifier, SparseVector, TfidfVectorizer, TrainedModel};
use crate::models::Category;

/// Prefix marking the label in fastText-style corpus lines.
const LABEL_PREFIX: &str = "__label__";

/// Errors that can occur while training.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Line {line}: unknown label '{label}'")]
    UnknownLabel { line: usize, label: String },

    #[error("Corpus contains no usable samples")]
    EmptyCorpus,
}

/// One training example.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledText {
    pub text: String,
    pub label: Category,
}

#[derive(Deserialize)]
struct JsonRecord {
    text: String,
    label: String,
}

/// Parse a corpus.
///
/// Each non-blank line is either `__label__<tag> <text>` or a JSON object
/// with `text` and `label` fields. Both forms may be mixed.
pub fn parse_corpus(contents: &str) -> Result<Vec<LabeledText>, TrainError> {
    let mut samples = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (label, text) = if trimmed.starts_with('{') {
            let record: JsonRecord =
                serde_json::from_str(trimmed).map_err(|e| TrainError::Parse {
                    line,
                    message: e.to_string(),
                })?;
            (record.label, record.text)
        } else if let Some(rest) = trimmed.strip_prefix(LABEL_PREFIX) {
            let (label, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            (label.to_string(), text.trim().to_string())
        } else {
            return Err(TrainError::Parse {
                line,
                message: format!("expected a JSON object or a '{}' prefix", LABEL_PREFIX),
            });
        };

        let category = Category::from_str(&label).ok_or(TrainError::UnknownLabel {
            line,
            label: label.clone(),
        })?;

        if text.is_empty() {
            tracing::warn!("Skipping corpus line {}: empty text", line);
            continue;
        }
        samples.push(LabeledText {
            text,
            label: category,
        });
    }
    Ok(samples)
}

/// Read and parse a corpus file.
pub fn load_corpus(path: &Path) -> Result<Vec<LabeledText>, TrainError> {
    let contents = fs::read_to_string(path)?;
    parse_corpus(&contents)
}

/// Split samples into (train, test), per class, keeping the original order.
///
/// Within each class the samples at evenly spaced positions go to the test
/// set, so the split is stratified and reproducible.
pub fn split_samples(
    samples: &[LabeledText],
    test_ratio: f64,
) -> (Vec<LabeledText>, Vec<LabeledText>) {
    let ratio = test_ratio.clamp(0.0, 0.9);
    let mut seen_per_class = vec![0usize; Category::ALL.len()];
    let mut train = Vec::new();
    let mut test = Vec::new();

    for sample in samples {
        let slot = Category::ALL
            .iter()
            .position(|c| *c == sample.label)
            .unwrap_or(0);
        let i = seen_per_class[slot];
        seen_per_class[slot] += 1;

        let held_out = ((i + 1) as f64 * ratio).floor() > (i as f64 * ratio).floor();
        if held_out {
            test.push(sample.clone());
        } else {
            train.push(sample.clone());
        }
    }
    (train, test)
}

/// Training hyperparameters.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Vocabulary size limit.
    pub max_features: usize,
    /// Remove English stop words before counting terms.
    pub stop_words: bool,
    /// Fraction of each class held out for evaluation.
    pub test_ratio: f64,
    /// Gradient descent iterations over the full training set.
    pub epochs: usize,
    pub learning_rate: f64,
    /// L2 penalty on the weights.
    pub l2: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            max_features: 5000,
            stop_words: true,
            test_ratio: 0.2,
            epochs: 300,
            learning_rate: 2.0,
            l2: 1e-4,
        }
    }
}

/// Fits models from labeled text.
pub struct Trainer {
    options: TrainOptions,
}

impl Trainer {
    pub fn new(options: TrainOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TrainOptions {
        &self.options
    }

    /// Fit a model. `on_epoch` is called after each epoch with its 1-based number.
    pub fn fit(
        &self,
        samples: &[LabeledText],
        mut on_epoch: impl FnMut(usize),
    ) -> Result<TrainedModel, TrainError> {
        if samples.is_empty() {
            return Err(TrainError::EmptyCorpus);
        }

        let texts: Vec<&str> = samples.iter().map(|s| s.text.as_str()).collect();
        let vectorizer =
            TfidfVectorizer::fit(&texts, self.options.max_features, self.options.stop_words);
        if vectorizer.dimension() == 0 {
            return Err(TrainError::EmptyCorpus);
        }

        let classes: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| samples.iter().any(|s| s.label == *c))
            .collect();

        let features: Vec<SparseVector> = texts.iter().map(|t| vectorizer.transform(t)).collect();
        let targets: Vec<usize> = samples
            .iter()
            .map(|s| classes.iter().position(|c| *c == s.label).unwrap_or(0))
            .collect();

        let dim = vectorizer.dimension();
        let mut coef = vec![vec![0.0; dim]; classes.len()];
        let mut intercept = vec![0.0; classes.len()];
        let n = samples.len() as f64;

        for epoch in 1..=self.options.epochs {
            let mut grad_coef = vec![vec![0.0; dim]; classes.len()];
            let mut grad_intercept = vec![0.0; classes.len()];

            for (x, &target) in features.iter().zip(&targets) {
                let probs = softmax(&scores(&coef, &intercept, x));
                for (k, p) in probs.iter().enumerate() {
                    let err = p - if k == target { 1.0 } else { 0.0 };
                    grad_intercept[k] += err;
                    for &(j, v) in x {
                        grad_coef[k][j] += err * v;
                    }
                }
            }

            let lr = self.options.learning_rate;
            for k in 0..classes.len() {
                for j in 0..dim {
                    let g = grad_coef[k][j] / n + self.options.l2 * coef[k][j];
                    coef[k][j] -= lr * g;
                }
                intercept[k] -= lr * grad_intercept[k] / n;
            }

            on_epoch(epoch);
        }

        tracing::info!(
            "Trained classifier on {} samples ({} features, {} classes)",
            samples.len(),
            dim,
            classes.len()
        );

        Ok(TrainedModel::new(
            vectorizer,
            LinearClassifier {
                classes,
                coef,
                intercept,
            },
        ))
    }
}

fn scores(coef: &[Vec<f64>], intercept: &[f64], x: &SparseVector) -> Vec<f64> {
    coef.iter()
        .zip(intercept)
        .map(|(row, b)| x.iter().map(|&(j, v)| row[j] * v).sum::<f64>() + b)
        .collect()
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Precision/recall/F1 for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub category: Category,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Evaluation of a model on labeled samples.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total: usize,
}

/// Score `model` against `samples`.
pub fn evaluate(model: &TrainedModel, samples: &[LabeledText]) -> EvaluationReport {
    let predictions: Vec<Option<Category>> =
        samples.iter().map(|s| model.predict(&s.text)).collect();

    let correct = samples
        .iter()
        .zip(&predictions)
        .filter(|(s, p)| **p == Some(s.label))
        .count();

    let per_class = Category::ALL
        .into_iter()
        .filter(|c| samples.iter().any(|s| s.label == *c) || predictions.contains(&Some(*c)))
        .map(|category| {
            let mut tp = 0usize;
            let mut fp = 0usize;
            let mut fn_ = 0usize;
            for (sample, predicted) in samples.iter().zip(&predictions) {
                let actual_match = sample.label == category;
                let predicted_match = *predicted == Some(category);
                match (actual_match, predicted_match) {
                    (true, true) => tp += 1,
                    (false, true) => fp += 1,
                    (true, false) => fn_ += 1,
                    (false, false) => {}
                }
            }
            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics {
                category,
                precision,
                recall,
                f1,
                support: tp + fn_,
            }
        })
        .collect();

    EvaluationReport {
        per_class,
        accuracy: ratio(correct, samples.len()),
        total: samples.len(),
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
