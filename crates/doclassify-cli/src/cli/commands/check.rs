//! Extraction tool and model availability check command.

use console::style;

use doclassify::config::Settings;
use doclassify::model::ModelHandle;
use doclassify_analysis::extract::check_tools;
use doclassify_analysis::Pipeline;

use crate::cli::icons::{error, success};

/// Check extraction tools and the model artifact.
pub async fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    println!("\n{}", style("Extraction Tools").bold());
    println!("{}", "-".repeat(50));

    let mut all_found = true;
    for (tool, available) in check_tools() {
        let status = if available {
            style("✓ found").green()
        } else {
            all_found = false;
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
    }

    let pipeline = Pipeline::from_settings(settings);

    println!("\n{}", style("Extractors:").cyan());
    for (ext, extractor) in pipeline.registry().iter() {
        let status = if extractor.is_available() {
            style(format!("✓ {}", extractor.kind())).green()
        } else {
            style(format!("✗ {}", extractor.kind())).red()
        };
        println!("  {:<15} {}", ext, status);
        if !extractor.is_available() {
            println!("                  {}", style(extractor.availability_hint()).dim());
        }
    }

    println!("\n{}", style("Model:").cyan());
    let model_ok = match pipeline.model() {
        ModelHandle::Loaded(model) => {
            println!(
                "  {} {} ({} features, {} classes)",
                success(),
                settings.model_path.display(),
                model.vectorizer.dimension(),
                model.classifier.classes.len()
            );
            true
        }
        ModelHandle::Unavailable { reason } => {
            println!("  {} {}: {}", error(), settings.model_path.display(), reason);
            println!(
                "    {}",
                style("Train one with: doclassify train <CORPUS>").dim()
            );
            false
        }
    };

    println!();
    if all_found && model_ok {
        println!("{} Ready to classify all supported file types", success());
    } else {
        println!(
            "{}",
            style("Missing pieces degrade to filename and keyword votes").yellow()
        );
    }

    Ok(())
}
