//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod classify;
mod config_cmd;
mod serve;
mod train;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use doclassify::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "doclassify")]
#[command(about = "Classify documents by type (license, statement, invoice, resume, medical)")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Classify local files
    Classify {
        /// Files to classify
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Show the individual votes behind each result
        #[arg(long)]
        explain: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Train the statistical classifier from a labeled corpus
    Train {
        /// Corpus file: `__label__<tag> <text>` or JSON lines with `text` and `label`
        corpus: PathBuf,
        /// Where to write the model (default: configured model path)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Vocabulary size limit
        #[arg(long, default_value = "5000")]
        max_features: usize,
        /// Fraction of each class held out for evaluation
        #[arg(long, default_value = "0.2")]
        test_ratio: f64,
        /// Gradient descent epochs
        #[arg(long, default_value = "300")]
        epochs: usize,
    },

    /// Start the HTTP classification service
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: from config, 127.0.0.1:5000)
        #[arg(long, short)]
        bind: Option<String>,
    },

    /// Check if extraction tools are installed and the model loads
    Check,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
    };
    let (settings, config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Classify {
            files,
            explain,
            json,
        } => classify::cmd_classify(&settings, &files, explain, json).await,
        Commands::Train {
            corpus,
            output,
            max_features,
            test_ratio,
            epochs,
        } => {
            let output = output.unwrap_or_else(|| settings.model_path.clone());
            train::cmd_train(&corpus, &output, max_features, test_ratio, epochs).await
        }
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Check => check::cmd_check(&settings).await,
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&settings, &config).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify() {
        let cli = Cli::parse_from(["doclassify", "classify", "a.pdf", "b.txt", "--explain"]);
        match cli.command {
            Commands::Classify {
                files,
                explain,
                json,
            } => {
                assert_eq!(files.len(), 2);
                assert!(explain);
                assert!(!json);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_parse_train_defaults() {
        let cli = Cli::parse_from(["doclassify", "train", "corpus.txt"]);
        match cli.command {
            Commands::Train {
                output,
                max_features,
                test_ratio,
                epochs,
                ..
            } => {
                assert!(output.is_none());
                assert_eq!(max_features, 5000);
                assert!((test_ratio - 0.2).abs() < f64::EPSILON);
                assert_eq!(epochs, 300);
            }
            _ => panic!("expected train"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["doclassify", "check", "-v", "--config", "x.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
