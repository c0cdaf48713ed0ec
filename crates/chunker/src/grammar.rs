use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_GRAMMARS: &str = include_str!("../grammars.toml");

/// Immutable mapping from file extension to grammar identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarTable {
    #[serde(default)]
    grammars: BTreeMap<String, String>,
}

impl GrammarTable {
    /// Table bundled with the crate, covering the common ecosystems
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_GRAMMARS)
    }

    /// Parse a `[grammars]` TOML table of `extension = "grammar"` pairs
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a table from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Grammar registered for an extension (case-sensitive)
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&str> {
        self.grammars.get(extension).map(String::as_str)
    }

    /// Grammar for a file path, see [`extension_of`]
    #[must_use]
    pub fn resolve(&self, file_path: &str) -> Option<&str> {
        self.get(extension_of(file_path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for GrammarTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            grammars: iter
                .into_iter()
                .map(|(ext, grammar)| (ext.into(), grammar.into()))
                .collect(),
        }
    }
}

/// Text after the last `.` of the file name, or the whole file name when it
/// has no dot. Case is preserved.
#[must_use]
pub fn extension_of(file_path: &str) -> &str {
    let name = file_path
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_path);
    name.rsplit_once('.').map_or(name, |(_, ext)| ext)
}
