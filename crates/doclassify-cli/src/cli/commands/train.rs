//! Model training command.

use std::path::Path;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use doclassify::model::train::{evaluate, load_corpus, split_samples, EvaluationReport};
use doclassify::model::{TrainOptions, Trainer};

use crate::cli::icons::{info, success, warn};

/// Fit the vectorizer and classifier on a corpus, report held-out metrics
/// and write the model artifact.
pub async fn cmd_train(
    corpus: &Path,
    output: &Path,
    max_features: usize,
    test_ratio: f64,
    epochs: usize,
) -> anyhow::Result<()> {
    println!("{} Reading corpus {}", info(), corpus.display());
    let samples = load_corpus(corpus)?;
    let (train, test) = split_samples(&samples, test_ratio);
    println!(
        "  {} samples ({} train, {} held out)",
        samples.len(),
        train.len(),
        test.len()
    );

    let options = TrainOptions {
        max_features,
        test_ratio,
        epochs,
        ..TrainOptions::default()
    };
    let trainer = Trainer::new(options);

    let pb = ProgressBar::new(epochs as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb.set_message("Training");

    let model = tokio::task::block_in_place(|| trainer.fit(&train, |_| pb.inc(1)))?;
    pb.finish_and_clear();

    println!(
        "{} Trained on {} features, {} classes",
        success(),
        model.vectorizer.dimension(),
        model.classifier.classes.len()
    );

    if test.is_empty() {
        println!(
            "{} No held-out samples; skipping evaluation",
            warn()
        );
    } else {
        print_evaluation(&evaluate(&model, &test));
    }

    model.save(output)?;
    println!("{} Model written to {}", success(), output.display());
    Ok(())
}

fn print_evaluation(report: &EvaluationReport) {
    println!("\n{}", style("Held-out evaluation").bold());
    println!(
        "  {:<16} {:>9} {:>9} {:>9} {:>9}",
        "class", "precision", "recall", "f1", "support"
    );
    for m in &report.per_class {
        println!(
            "  {:<16} {:>9.2} {:>9.2} {:>9.2} {:>9}",
            m.category.as_str(),
            m.precision,
            m.recall,
            m.f1,
            m.support
        );
    }
    println!(
        "\n  accuracy {:.2} on {} samples",
        report.accuracy, report.total
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclassify::model::TrainedModel;

    const CORPUS: &str = "\
__label__invoice Invoice number 1001 amount due net thirty payment terms
__label__invoice Billing invoice total amount due upon receipt payment
__label__invoice Invoice for consulting services payment due total amount
__label__resume Resume professional experience education skills references
__label__resume Curriculum vitae education work experience software engineer
__label__resume Resume summary experience education certifications skills
";

    #[tokio::test(flavor = "multi_thread")]
    async fn test_train_writes_model() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus.txt");
        std::fs::write(&corpus, CORPUS).unwrap();
        let output = dir.path().join("models").join("model.json");

        cmd_train(&corpus, &output, 100, 0.0, 50).await.unwrap();

        let model = TrainedModel::load(&output).unwrap();
        assert_eq!(model.classifier.classes.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_train_empty_corpus_fails() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus.txt");
        std::fs::write(&corpus, "\n\n").unwrap();
        let output = dir.path().join("model.json");

        assert!(cmd_train(&corpus, &output, 100, 0.2, 10).await.is_err());
        assert!(!output.exists());
    }
}
