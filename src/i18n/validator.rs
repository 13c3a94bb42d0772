//! Translation quality validation.
//!
//! Checks that machine-translated resource strings preserve the elements the
//! runtime will substitute or interpret: .NET composite-format placeholders
//! (`{0}`, `{1:D}`), keyboard accelerator markers (`&File`), and line breaks.
//! Validation only produces diagnostics; it never fails a merge.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Lost placeholders: the translated string will fail or garble at format time
    pub errors: Vec<String>,

    /// Non-critical issues worth a look
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translated resource strings.
pub struct TranslationValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static ACCELERATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{\d+(?::[^{}]*)?\}").expect("placeholder regex is valid")
    })
}

fn accelerator_regex() -> &'static Regex {
    ACCELERATOR_REGEX
        .get_or_init(|| Regex::new(r"&[A-Za-z0-9]").expect("accelerator regex is valid"))
}

impl TranslationValidator {
    /// Validate that `translated` preserves the substitutable elements of
    /// `original`.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        for placeholder in placeholder_regex().find_iter(original) {
            if !translated.contains(placeholder.as_str()) {
                report.errors.push(format!(
                    "placeholder {} missing from translation",
                    placeholder.as_str()
                ));
            }
        }

        if accelerator_regex().is_match(original) && !accelerator_regex().is_match(translated) {
            report
                .warnings
                .push("accelerator marker (&) lost in translation".to_string());
        }

        let original_lines = original.matches('\n').count();
        let translated_lines = translated.matches('\n').count();
        if original_lines != translated_lines {
            report.warnings.push(format!(
                "line break count changed ({} -> {})",
                original_lines, translated_lines
            ));
        }

        report
    }
}
