//! Batch orchestration: one source file, many target languages.
//!
//! The source is loaded and filtered once, then each requested language is
//! processed independently. A failure in one language (provider outage,
//! unreadable prior output) is logged and skipped; the remaining languages
//! still run.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};

use crate::i18n::Language;
use crate::merge;
use crate::provider::Translator;
use crate::resource::{ResourceError, ResourceFormat, ResourceTable};

/// What to translate and into which languages.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Source resource file (the native-language strings)
    pub input: PathBuf,

    /// Requested target language codes, as given on the command line
    pub languages: Vec<String>,

    /// Format of the input file. Outputs are always resx.
    pub format: ResourceFormat,

    /// Keep entries whose value is blank instead of dropping them
    pub include_blank: bool,
}

/// Per-run accounting, for the final log line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub languages_succeeded: usize,
    pub languages_failed: usize,
    pub entries_translated: usize,
    pub entries_reused: usize,
}

/// Translate the configured source file into every requested language.
///
/// Fails fast only when the input file is missing. An unparsable source is
/// reported and yields an empty summary; per-language problems are logged
/// and counted in the returned [`RunSummary`].
pub async fn run<T: Translator>(options: &RunOptions, translator: &T) -> Result<RunSummary> {
    if !options.input.is_file() {
        bail!("input file not found: {}", options.input.display());
    }

    // A present-but-unparsable source is reported and skipped; only a
    // missing input aborts the run.
    let source = match ResourceTable::load(&options.input, options.format) {
        Ok(source) => source,
        Err(e @ ResourceError::Parse { .. }) => {
            error!(input = %options.input.display(), error = %e, "unreadable source file, nothing translated");
            return Ok(RunSummary::default());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to load {}", options.input.display()));
        }
    };
    let working_set = source.filter_translatable(options.include_blank);

    if working_set.is_empty() {
        warn!(
            input = %options.input.display(),
            "source contains no translatable entries, nothing to do"
        );
    }

    let targets = resolve_targets(&options.languages);
    let mut summary = RunSummary::default();

    for target in &targets {
        match process_language(options, &working_set, target, translator).await {
            Ok((reused, added)) => {
                summary.languages_succeeded += 1;
                summary.entries_reused += reused;
                summary.entries_translated += added;
            }
            Err(e) => {
                error!(language = %target, error = %e, "language failed, skipping");
                summary.languages_failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Map requested codes to languages, dropping what can't be translated.
/// Duplicates are collapsed so a language is never processed twice.
fn resolve_targets(codes: &[String]) -> Vec<Language> {
    let mut targets: Vec<Language> = Vec::new();

    for raw in codes {
        let code = raw.trim();
        if code.is_empty() {
            continue;
        }
        let language = Language::resolve(code);
        if !language.is_translatable() && !language.is_native() {
            warn!(code, "unknown or untranslatable language code, skipping");
            continue;
        }
        if targets.contains(&language) {
            continue;
        }
        targets.push(language);
    }

    targets
}

async fn process_language<T: Translator>(
    options: &RunOptions,
    working_set: &ResourceTable,
    target: &Language,
    translator: &T,
) -> Result<(usize, usize)> {
    let output = output_path(&options.input, target.code());

    // A malformed prior output fails this language; it is never treated as
    // absent and overwritten.
    let existing = ResourceTable::load_if_exists(&output, ResourceFormat::Resx)
        .with_context(|| format!("failed to read prior output {}", output.display()))?;

    let outcome = merge::merge(working_set, existing.as_ref(), target, translator)
        .await
        .with_context(|| format!("translation into {target} failed"))?;

    if outcome.table.is_empty() {
        warn!(language = %target, "nothing to write");
        return Ok((0, 0));
    }

    outcome
        .table
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        language = %target,
        output = %output.display(),
        reused = outcome.reused,
        translated = outcome.added,
        "language done"
    );

    Ok((outcome.reused, outcome.added))
}

/// Output file for one language: `strings.resx` + `fr` -> `strings.fr.resx`,
/// next to the input file. Outputs are resx regardless of the input format.
fn output_path(input: &Path, code: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}.{code}.resx"))
}
