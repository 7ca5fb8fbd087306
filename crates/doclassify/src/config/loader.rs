//! Configuration loading and environment overrides.

use std::path::PathBuf;

use super::{Config, Settings};

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
}

/// Load config from file sources.
async fn load_file_config(options: &LoadOptions) -> Config {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        return match Config::load_from_path(config_path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Config::default()
            }
        };
    }

    // Priority 2: Auto-discover via prefer
    Config::load().await
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = load_file_config(&options).await;

    let mut settings = Settings::default();

    let base_dir = if options.use_cwd {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    } else {
        config
            .base_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    };

    config.apply_to_settings(&mut settings, &base_dir);
    apply_env_overrides(&mut settings, &config, &base_dir);

    (settings, config)
}

/// Environment variables take precedence over file configuration.
fn apply_env_overrides(settings: &mut Settings, config: &Config, base_dir: &std::path::Path) {
    if let Some(model_path) = std::env::var("DOCLASSIFY_MODEL_PATH")
        .ok()
        .filter(|s| !s.is_empty())
    {
        tracing::debug!("Using DOCLASSIFY_MODEL_PATH from environment: {}", model_path);
        settings.model_path = config.resolve_path(&model_path, base_dir);
    }

    if let Some(bind) = std::env::var("DOCLASSIFY_BIND").ok().filter(|s| !s.is_empty()) {
        tracing::debug!("Using DOCLASSIFY_BIND from environment: {}", bind);
        settings.bind = bind;
    }
}
