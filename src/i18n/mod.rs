//! Internationalization module: language identity and translation quality.
//!
//! - `registry`: fixed catalog of known language codes and the curated
//!   translatable subset
//! - `language`: immutable `Language` value type, compared by code
//! - `validator`: checks that translations preserve placeholders and markers

mod language;
mod registry;
mod validator;

pub use language::Language;
pub use registry::{LanguageCatalog, LanguageSpec, NATIVE_CODE};
pub use validator::{TranslationValidator, ValidationReport};
