use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use resx_translator::config::Config;
use resx_translator::provider::HttpTranslator;
use resx_translator::resource::ResourceFormat;
use resx_translator::run::{run, RunOptions};

/// Translate a string resource file into one or more languages.
///
/// Each target language gets its own `<input-stem>.<code>.resx` file next to
/// the input. Translations already present in those files are kept as-is;
/// only new keys are sent to the translation API.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Source resource file (resx or JSON string table)
    input: PathBuf,

    /// Comma-separated target language codes, e.g. "fr,de,pt-BR"
    languages: String,

    /// Input format: "resx" (default) or "json"
    format: Option<String>,

    /// Keep entries with blank values instead of dropping them
    #[arg(long)]
    include_blank: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("resx_translator=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let options = RunOptions {
        input: cli.input,
        languages: cli
            .languages
            .split(',')
            .map(|s| s.trim().to_string())
            .collect(),
        format: cli
            .format
            .as_deref()
            .map(ResourceFormat::parse_or_default)
            .unwrap_or_default(),
        include_blank: cli.include_blank,
    };

    info!(
        input = %options.input.display(),
        languages = %cli.languages,
        "Starting translation run"
    );

    let translator = HttpTranslator::new(&config);
    let summary = run(&options, &translator).await?;

    if summary.languages_failed > 0 {
        warn!(
            failed = summary.languages_failed,
            succeeded = summary.languages_succeeded,
            "Run finished with failures"
        );
    }

    info!(
        languages = summary.languages_succeeded,
        translated = summary.entries_translated,
        reused = summary.entries_reused,
        "Run complete"
    );
    Ok(())
}
