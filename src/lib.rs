//! Incremental batch translator for string resource files.
//!
//! Reads a native-language resource file (resx or a flat JSON string table),
//! merges it against any previously produced per-language outputs, and fills
//! the gaps through a remote translation API. Existing translations are never
//! re-fetched, so re-runs only pay for what changed.

pub mod config;
pub mod i18n;
pub mod merge;
pub mod provider;
pub mod resource;
pub mod retry;
pub mod run;
