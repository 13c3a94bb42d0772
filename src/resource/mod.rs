//! Resource tables: the ordered, key-unique string mapping this tool
//! translates.
//!
//! A table can be loaded from a resx (XML) or JSON file and is always saved
//! as resx. Absence of a file is a first-class recoverable state
//! (`load_if_exists` returns `Ok(None)`), distinct from a parse failure.

mod json;
mod resx;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from loading, parsing, or saving a resource file.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// On-disk format of an input resource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceFormat {
    #[default]
    Resx,
    Json,
}

impl ResourceFormat {
    /// Parse a format name, falling back to resx when the name is
    /// unrecognized (mirrors the lenient historical CLI behavior).
    pub fn parse_or_default(name: &str) -> ResourceFormat {
        if name.eq_ignore_ascii_case("json") {
            ResourceFormat::Json
        } else {
            ResourceFormat::Resx
        }
    }
}

/// Kind of payload a resource entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A plain string, eligible for translation
    Text,

    /// A typed or binary payload (resx `type=`/`mimetype=` entries, non-string
    /// JSON values); never translated
    Typed,
}

/// One key/value pair of a resource table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub key: String,
    pub value: String,
    pub kind: ValueKind,
}

/// An ordered collection of resource entries with unique keys.
///
/// Freshly parsed tables keep the file's entry order; the working set built
/// by [`filter_translatable`](ResourceTable::filter_translatable) is sorted
/// by key. Either way iteration order is deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTable {
    entries: Vec<ResourceEntry>,
}

impl ResourceTable {
    pub fn new() -> ResourceTable {
        ResourceTable::default()
    }

    /// Insert a text entry, replacing any entry with the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert_entry(ResourceEntry {
            key: key.into(),
            value: value.into(),
            kind: ValueKind::Text,
        });
    }

    /// Insert an entry, replacing any entry with the same key.
    pub fn insert_entry(&mut self, entry: ResourceEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.entries.iter()
    }

    /// Load and parse a resource file.
    ///
    /// A missing file is an [`ResourceError::Io`]; a present but malformed
    /// file is a [`ResourceError::Parse`].
    pub fn load(path: &Path, format: ResourceFormat) -> Result<ResourceTable, ResourceError> {
        let text = fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, format, path)
    }

    /// Load a resource file that may not exist yet.
    ///
    /// Returns `Ok(None)` when the file is absent, modeling "no prior
    /// translation" as a recoverable state rather than an error.
    pub fn load_if_exists(
        path: &Path,
        format: ResourceFormat,
    ) -> Result<Option<ResourceTable>, ResourceError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ResourceError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text, format, path).map(Some)
    }

    fn parse(
        text: &str,
        format: ResourceFormat,
        path: &Path,
    ) -> Result<ResourceTable, ResourceError> {
        let result = match format {
            ResourceFormat::Resx => resx::parse(text),
            ResourceFormat::Json => json::parse(text),
        };
        result.map_err(|reason| ResourceError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Build the translatable working set: text entries whose key does not
    /// start with the reserved `$` or `>>` metadata prefixes, with the
    /// `$this.Text` form title always retained. Blank values are dropped
    /// unless `include_blank` is set (the title exception applies there too).
    /// The result is sorted by key.
    pub fn filter_translatable(&self, include_blank: bool) -> ResourceTable {
        let mut filtered = ResourceTable::new();
        for entry in &self.entries {
            if entry.kind != ValueKind::Text {
                continue;
            }
            let title_exception = entry.key == "$this.Text";
            let reserved = entry.key.starts_with(">>") || entry.key.starts_with('$');
            let blank = entry.value.is_empty() && !include_blank;
            if title_exception || (!reserved && !blank) {
                filtered.insert_entry(entry.clone());
            }
        }
        filtered.entries.sort_by(|a, b| a.key.cmp(&b.key));
        filtered
    }

    /// Serialize the table as resx and write it to `path` in one operation.
    ///
    /// The document is built fully in memory first, so an I/O failure never
    /// leaves a truncated file behind.
    pub fn save(&self, path: &Path) -> Result<(), ResourceError> {
        let bytes = resx::write(self).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, bytes).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromIterator<(String, String)> for ResourceTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = ResourceTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}
