//! Script registry - the name → description table behind `mbapy-cli`
//!
//! The persisted form is a JSON object whose keys are script names and whose
//! values carry a `brief` and a `detailed` description:
//!
//! ```json
//! {
//!   "cnipa": { "brief": "get patents info from CNIPA.", "detailed": "..." },
//!   "scihub": { "brief": "download papers and it's refs(optional) from scihub.", "detailed": "..." }
//! }
//! ```
//!
//! Key order is significant: [`Registry::list`] returns entries in the order
//! they appear in the document. The registry is built once and has no
//! mutating methods.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::{RegistryError, Result};

/// Registry document compiled into the binary.
pub const BUILTIN_REGISTRY: &str = include_str!("../data/scripts-list.json");

/// A single script description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEntry {
    /// Script keyword typed on the command line
    pub name: String,
    /// One-line summary for listings
    pub brief: String,
    /// Full help text, may span several lines
    pub detailed: String,
}

/// Entry body as it appears in the persisted document.
///
/// Fields are optional here so a missing field surfaces as a registry error
/// naming the script instead of a bare serde message.
#[derive(Default)]
struct RawEntry {
    brief: Option<String>,
    detailed: Option<String>,
}

impl<'de> Deserialize<'de> for RawEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawEntryVisitor)
    }
}

/// Accepts only an object body; arrays and scalars are rejected.
struct RawEntryVisitor;

impl<'de> Visitor<'de> for RawEntryVisitor {
    type Value = RawEntry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with `brief` and `detailed` strings")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<RawEntry, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut raw = RawEntry::default();

        while let Some(key) = map.next_key::<String>()? {
            let slot = match key.as_str() {
                "brief" => &mut raw.brief,
                "detailed" => &mut raw.detailed,
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                    continue;
                }
            };
            if slot.is_some() {
                return Err(de::Error::custom(format!("duplicate field `{}`", key)));
            }
            *slot = Some(map.next_value()?);
        }

        Ok(raw)
    }
}

impl RawEntry {
    fn into_entry(self, name: String) -> std::result::Result<CommandEntry, String> {
        let brief = require_field(&name, "brief", self.brief)?;
        let detailed = require_field(&name, "detailed", self.detailed)?;
        Ok(CommandEntry {
            name,
            brief,
            detailed,
        })
    }
}

fn require_field(
    name: &str,
    field: &str,
    value: Option<String>,
) -> std::result::Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(format!("script `{}` has an empty `{}`", name, field)),
        None => Err(format!("script `{}` is missing `{}`", name, field)),
    }
}

#[derive(Serialize)]
struct PersistedEntry<'a> {
    brief: &'a str,
    detailed: &'a str,
}

/// Ordered, immutable mapping from script name to [`CommandEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<CommandEntry>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Parse a registry from its persisted JSON text.
    ///
    /// Fails with [`RegistryError::Malformed`] when the text is not a JSON
    /// object, when an entry lacks a non-empty `brief` or `detailed`, or when
    /// a script name appears twice.
    pub fn load(source: &str) -> Result<Self> {
        let registry: Registry = serde_json::from_str(source)?;
        debug!(scripts = registry.len(), "loaded script registry");
        Ok(registry)
    }

    /// Parse a registry from raw bytes (UTF-8 JSON).
    pub fn load_slice(source: &[u8]) -> Result<Self> {
        let registry: Registry = serde_json::from_slice(source)?;
        debug!(scripts = registry.len(), "loaded script registry");
        Ok(registry)
    }

    /// Read and parse a registry file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading script registry");
        let content = std::fs::read(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_slice(&content)
    }

    /// The registry shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::load(BUILTIN_REGISTRY)
    }

    /// Look up a script by exact, case-sensitive name.
    pub fn lookup(&self, name: &str) -> Result<&CommandEntry> {
        self.index
            .get(name)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// All entries in persisted order.
    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Script names in persisted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize back to the persisted form, preserving entry order.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RegistryError::Serialization(e.to_string()))
    }
}

impl Serialize for Registry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(
                &entry.name,
                &PersistedEntry {
                    brief: &entry.brief,
                    detailed: &entry.detailed,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RegistryVisitor)
    }
}

struct RegistryVisitor;

impl<'de> Visitor<'de> for RegistryVisitor {
    type Value = Registry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping script names to {brief, detailed}")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Registry, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut index = HashMap::new();

        while let Some(name) = map.next_key::<String>()? {
            let raw: RawEntry = map.next_value()?;
            if index.contains_key(&name) {
                return Err(de::Error::custom(format!(
                    "duplicate script name `{}`",
                    name
                )));
            }
            let entry = raw.into_entry(name.clone()).map_err(de::Error::custom)?;
            index.insert(name, entries.len());
            entries.push(entry);
        }

        Ok(Registry { entries, index })
    }
}
