//! Language type: immutable value type identified by its code.
//!
//! Replaces an enumeration-style hierarchy with a plain struct. Equality and
//! hashing use the code alone; two `Language` values with the same code are
//! the same language regardless of display name.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::i18n::{LanguageCatalog, NATIVE_CODE};

/// A target (or source) language for a translation run.
///
/// Resolution never fails: a code missing from the catalog yields an ad hoc
/// value that reports `is_translatable() == false` but is otherwise usable.
#[derive(Debug, Clone)]
pub struct Language {
    code: String,
    name: String,
    translatable: bool,
}

impl Language {
    /// Resolve `code` against the catalog.
    ///
    /// Returns the canonical entry (with the catalog's casing and display
    /// name) when the code is known, otherwise an ad hoc language whose
    /// display name is the code itself.
    pub fn resolve(code: &str) -> Language {
        match LanguageCatalog::get().get_by_code(code) {
            Some(spec) => Language {
                code: spec.code.to_string(),
                name: spec.name.to_string(),
                translatable: spec.translatable,
            },
            None => Language {
                code: code.to_string(),
                name: code.to_string(),
                translatable: false,
            },
        }
    }

    /// The sentinel "unknown" language with an empty code.
    pub fn unknown() -> Language {
        Language {
            code: String::new(),
            name: "Unknown".to_string(),
            translatable: false,
        }
    }

    /// The native/pass-through language (English).
    pub fn native() -> Language {
        Language::resolve(NATIVE_CODE)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this language is in the supported-target set.
    pub fn is_translatable(&self) -> bool {
        self.translatable
    }

    /// Whether this is the sentinel value with an empty code.
    pub fn is_unknown(&self) -> bool {
        self.code.is_empty()
    }

    /// Whether this is the pass-through language, for which no translation
    /// calls are made.
    pub fn is_native(&self) -> bool {
        self.code.eq_ignore_ascii_case(NATIVE_CODE)
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Language {}

impl Hash for Language {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
