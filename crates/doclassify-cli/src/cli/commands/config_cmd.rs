//! Configuration management commands.

use console::style;

use doclassify::config::{Config, Settings};

use crate::cli::icons::dim_arrow;

/// Print the config file in effect and the resolved settings.
pub async fn cmd_config_show(settings: &Settings, config: &Config) -> anyhow::Result<()> {
    match config.source_path {
        Some(ref path) => {
            println!("{} {}", style("Config file:").bold(), path.display());
            let contents = config.to_display_string();
            if !contents.trim().is_empty() {
                println!("{}", contents.trim_end());
            }
        }
        None => println!(
            "{} {}",
            style("Config file:").bold(),
            style("none found, using defaults").dim()
        ),
    }

    println!("\n{}", style("Effective settings:").bold());
    println!("  {} model_path:            {}", dim_arrow(), settings.model_path.display());
    println!("  {} tesseract_lang:        {}", dim_arrow(), settings.tesseract_lang);
    println!("  {} bind:                  {}", dim_arrow(), settings.bind);
    println!("  {} max_upload_bytes:      {}", dim_arrow(), settings.max_upload_bytes);
    println!(
        "  {} rate_limit_per_minute: {}",
        dim_arrow(),
        settings.rate_limit_per_minute
    );
    Ok(())
}
