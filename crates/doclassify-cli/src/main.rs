//! doclassify - document type classification.
//!
//! Classifies uploaded documents (images, PDFs, Word files, spreadsheets and
//! plain text) into a fixed set of document types.

mod cli;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let default_filter = if cli::is_verbose() {
        "doclassify=info,doclassify_analysis=info,doclassify_server=info"
    } else {
        "doclassify=warn,doclassify_analysis=warn,doclassify_server=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    cli::run().await
}
