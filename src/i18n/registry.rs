//! Language catalog: single source of truth for all known language codes.
//!
//! The catalog is a fixed table initialized once behind a `OnceLock`. Every
//! known code carries a display name and a `translatable` flag; only the
//! translatable subset is eligible as a machine-translation target (bare
//! container codes such as "zh" are not targets).

use std::sync::OnceLock;

/// Language code of the native/pass-through language. Source strings are
/// assumed to be written in it and are copied to its output verbatim.
pub const NATIVE_CODE: &str = "en";

/// Metadata for one known language.
#[derive(Debug, Clone)]
pub struct LanguageSpec {
    /// Short machine identifier (e.g. "fr", "zh-CN")
    pub code: &'static str,

    /// English display name (e.g. "French")
    pub name: &'static str,

    /// Whether this code is in the supported-target set
    pub translatable: bool,
}

/// Fixed catalog of known languages.
pub struct LanguageCatalog {
    languages: Vec<LanguageSpec>,
}

static CATALOG: OnceLock<LanguageCatalog> = OnceLock::new();

impl LanguageCatalog {
    /// Get the global catalog instance, initializing it on first access.
    pub fn get() -> &'static LanguageCatalog {
        CATALOG.get_or_init(|| LanguageCatalog {
            languages: known_languages(),
        })
    }

    /// Look up a language by code (case-insensitive).
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageSpec> {
        self.languages
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }

    /// The fixed, ordered set of languages eligible as translation targets.
    pub fn translatable(&self) -> Vec<&LanguageSpec> {
        self.languages
            .iter()
            .filter(|lang| lang.translatable)
            .collect()
    }

    /// All known languages, in catalog order.
    pub fn list_all(&self) -> Vec<&LanguageSpec> {
        self.languages.iter().collect()
    }

    /// Whether `code` names a supported translation target.
    pub fn is_translatable(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.translatable)
            .unwrap_or(false)
    }
}

/// The full known-language table.
///
/// Codes follow the translation provider's historical identifiers, which do
/// not always match current BCP 47 (Hebrew is "iw", Portuguese "pt-PT").
/// Tagalog is omitted because it shares the "tl" code with Filipino and keys
/// must be unique.
fn known_languages() -> Vec<LanguageSpec> {
    fn lang(code: &'static str, name: &'static str, translatable: bool) -> LanguageSpec {
        LanguageSpec {
            code,
            name,
            translatable,
        }
    }

    vec![
        lang("af", "Afrikaans", true),
        lang("sq", "Albanian", true),
        lang("am", "Amharic", false),
        lang("ar", "Arabic", true),
        lang("hy", "Armenian", false),
        lang("az", "Azerbaijani", false),
        lang("eu", "Basque", false),
        lang("be", "Belarusian", true),
        lang("bn", "Bengali", false),
        lang("bh", "Bihari", false),
        lang("bg", "Bulgarian", true),
        lang("my", "Burmese", false),
        lang("ca", "Catalan", true),
        lang("chr", "Cherokee", false),
        lang("zh", "Chinese", false),
        lang("zh-CN", "Simplified Chinese", true),
        lang("zh-TW", "Traditional Chinese", true),
        lang("hr", "Croatian", true),
        lang("cs", "Czech", true),
        lang("da", "Danish", true),
        lang("dv", "Dhivehi", false),
        lang("nl", "Dutch", true),
        lang("en", "English", true),
        lang("eo", "Esperanto", false),
        lang("et", "Estonian", true),
        lang("tl", "Filipino", true),
        lang("fi", "Finnish", true),
        lang("fr", "French", true),
        lang("gl", "Galician", true),
        lang("ka", "Georgian", false),
        lang("de", "German", true),
        lang("el", "Greek", true),
        lang("gn", "Guarani", false),
        lang("gu", "Gujarati", false),
        lang("iw", "Hebrew", true),
        lang("hi", "Hindi", true),
        lang("hu", "Hungarian", true),
        lang("is", "Icelandic", true),
        lang("id", "Indonesian", true),
        lang("iu", "Inuktitut", false),
        lang("ga", "Irish", true),
        lang("it", "Italian", true),
        lang("ja", "Japanese", true),
        lang("kn", "Kannada", false),
        lang("kk", "Kazakh", false),
        lang("km", "Khmer", false),
        lang("ko", "Korean", true),
        lang("ku", "Kurdish", false),
        lang("ky", "Kyrgyz", false),
        lang("lo", "Laothian", false),
        lang("lv", "Latvian", true),
        lang("lt", "Lithuanian", true),
        lang("mk", "Macedonian", true),
        lang("ms", "Malay", true),
        lang("ml", "Malayalam", false),
        lang("mt", "Maltese", true),
        lang("mr", "Marathi", false),
        lang("mn", "Mongolian", false),
        lang("ne", "Nepali", false),
        lang("no", "Norwegian", true),
        lang("or", "Oriya", false),
        lang("ps", "Pashto", false),
        lang("fa", "Persian", true),
        lang("pl", "Polish", true),
        lang("pt-PT", "Portuguese", true),
        lang("pa", "Punjabi", false),
        lang("ro", "Romanian", true),
        lang("ru", "Russian", true),
        lang("sa", "Sanskrit", false),
        lang("sr", "Serbian", true),
        lang("sd", "Sindhi", false),
        lang("si", "Sinhalese", false),
        lang("sk", "Slovak", true),
        lang("sl", "Slovenian", true),
        lang("es", "Spanish", true),
        lang("es-US", "Spanish (US)", true),
        lang("sw", "Swahili", true),
        lang("sv", "Swedish", true),
        lang("tg", "Tajik", false),
        lang("ta", "Tamil", false),
        lang("te", "Telugu", false),
        lang("th", "Thai", true),
        lang("bo", "Tibetan", false),
        lang("tr", "Turkish", true),
        lang("uk", "Ukrainian", true),
        lang("ur", "Urdu", false),
        lang("uz", "Uzbek", false),
        lang("ug", "Uighur", false),
        lang("vi", "Vietnamese", true),
        lang("cy", "Welsh", true),
        lang("yi", "Yiddish", true),
    ]
}
