#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// A tabbed code editor with a line-number gutter and rule-based highlighting.
#[derive(Parser, Debug)]
#[command(name = "codepad", version, about)]
struct Cli {
    /// Files to open on startup.
    files: Vec<PathBuf>,

    /// Language registry (themes.json) to use instead of the configured one.
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Configuration file to use instead of codepad.json next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting codepad");

    let startup_args = codepad_ui::StartupArgs {
        files: cli.files,
        registry: cli.registry,
        config: cli.config,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("codepad")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "codepad",
        native_options,
        Box::new(move |cc| Ok(Box::new(codepad_ui::App::new(cc, startup_args)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_files_and_overrides() {
        let cli = Cli::parse_from([
            "codepad",
            "a.py",
            "b.txt",
            "--registry",
            "lib/themes.json",
        ]);
        assert_eq!(cli.files, vec![PathBuf::from("a.py"), PathBuf::from("b.txt")]);
        assert_eq!(cli.registry, Some(PathBuf::from("lib/themes.json")));
        assert!(cli.config.is_none());
    }
}
