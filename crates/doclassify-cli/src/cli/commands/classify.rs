//! Local file classification command.

use std::path::{Path, PathBuf};

use console::style;

use doclassify::config::Settings;
use doclassify::UploadedDocument;
use doclassify_analysis::{ClassificationReport, Pipeline};

use crate::cli::icons::{dim_arrow, error};

/// Classify files from disk and print one result per file.
pub async fn cmd_classify(
    settings: &Settings,
    files: &[PathBuf],
    explain: bool,
    json: bool,
) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_settings(settings);

    let mut reports = Vec::with_capacity(files.len());
    let mut failed = 0usize;

    for path in files {
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) => {
                eprintln!("{} {}: {}", error(), path.display(), e);
                failed += 1;
                continue;
            }
        };

        let document = UploadedDocument::new(upload_name(path), content);
        let report = tokio::task::block_in_place(|| pipeline.classify_detailed(&document));

        if !json {
            print_report(path, &report, explain);
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if failed > 0 {
        anyhow::bail!("{} file(s) could not be read", failed);
    }
    Ok(())
}

/// The name the pipeline sees, as if the file had been uploaded.
fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_report(path: &Path, report: &ClassificationReport, explain: bool) {
    let result = report.result.to_string();
    let styled = if report.result.is_sentinel() {
        style(result).yellow()
    } else {
        style(result).green().bold()
    };
    println!("{}: {}", path.display(), styled);

    if !explain {
        return;
    }

    let vote = |v: Option<doclassify::Category>| {
        v.map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    println!(
        "  {} extension: {}",
        dim_arrow(),
        report.extension.as_deref().unwrap_or("-")
    );
    println!(
        "  {} extractor: {} ({} chars)",
        dim_arrow(),
        report.extractor.unwrap_or("-"),
        report.text_chars
    );
    if let Some(ref reason) = report.extraction_error {
        println!("  {} extraction failed: {}", dim_arrow(), style(reason).dim());
    }
    println!("  {} statistical: {}", dim_arrow(), vote(report.votes.statistical));
    let matched = |k: Option<&str>| {
        k.map(|k| format!(" (matched '{}')", k))
            .unwrap_or_default()
    };
    println!(
        "  {} filename:    {}{}",
        dim_arrow(),
        vote(report.votes.filename),
        matched(report.filename_keyword)
    );
    println!(
        "  {} keyword:     {}{}",
        dim_arrow(),
        vote(report.votes.keyword),
        matched(report.content_keyword)
    );
}
