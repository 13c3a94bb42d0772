use anyhow::{Context, Result};

/// Default LibreTranslate-compatible endpoint used when none is configured.
const DEFAULT_API_URL: &str = "https://libretranslate.com/translate";

#[derive(Debug, Clone)]
pub struct Config {
    // Translation service
    pub translate_api_url: String,
    pub translate_api_key: Option<String>,

    // Language the source strings are written in
    pub source_language: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let translate_api_url =
            std::env::var("TRANSLATE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        reqwest::Url::parse(&translate_api_url)
            .context("TRANSLATE_API_URL is not a valid URL")?;

        Ok(Self {
            translate_api_url,
            translate_api_key: std::env::var("TRANSLATE_API_KEY").ok(),
            source_language: std::env::var("SOURCE_LANGUAGE")
                .unwrap_or_else(|_| crate::i18n::NATIVE_CODE.to_string()),
        })
    }
}
