//! mdraft - A terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! mdraft
//! mdraft notes.md
//! mdraft --theme dracula --view preview notes.md
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use mdraft::ai::{Generator, gemini::GeminiClient};
use mdraft::app::{App, ViewMode};
use mdraft::ui::style::Theme;

/// A terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "mdraft", version, about, long_about = None)]
struct Cli {
    /// Markdown file to open (starts with a welcome document when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum, default_value = "light")]
    theme: Theme,

    /// Initial view mode
    #[arg(long, value_enum, default_value = "split")]
    view: ViewMode,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Some(file) = cli.file.as_ref()
        && !file.exists()
    {
        anyhow::bail!("File not found: {}", file.display());
    }

    // Without a key the app still runs; AI requests surface the error.
    let generator = GeminiClient::from_env()
        .ok()
        .map(|client| Arc::new(client) as Arc<dyn Generator>);

    // Run the application
    let mut app = App::new()
        .with_file(cli.file)
        .with_theme(cli.theme)
        .with_view_mode(cli.view)
        .with_generator(generator);

    app.run().context("Application error")
}
