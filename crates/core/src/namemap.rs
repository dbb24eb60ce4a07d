//! Name maps linking PostScript file names to Berry names and full font names.
//!
//! A map file is line oriented. Lines starting with `@c` are comments. Every
//! other line is split on whitespace; the first field is the Berry name, the
//! second the full font name and the fifth the PostScript file base name used
//! as the lookup key. Lines with fewer than five fields are ignored.

use std::{fs::read_to_string, path::Path};

use indexmap::IndexMap;
use log::debug;

use crate::error::{Error, Result};

const COMMENT_MARKER: &str = "@c";
const MIN_FIELDS: usize = 5;

/// Berry name and full font name for one PostScript file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMapEntry {
    pub berry: String,
    pub full_name: String,
}

impl NameMapEntry {
    pub fn new(berry: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self { berry: berry.into(), full_name: full_name.into() }
    }

    /// The three character family prefix of the Berry name.
    pub fn family(&self) -> &str {
        match self.berry.char_indices().nth(3) {
            Some((end, _)) => &self.berry[..end],
            None => &self.berry,
        }
    }
}

/// PostScript base name to [`NameMapEntry`], in the order keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    entries: IndexMap<String, NameMapEntry>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Self {
        let mut map = Self::new();
        for line in text.lines() {
            if line.starts_with(COMMENT_MARKER) {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < MIN_FIELDS {
                continue;
            }
            map.insert(fields[4], NameMapEntry::new(fields[0], fields[1]));
        }
        map
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path).map_err(Error::io("Failed to read name map", path))?;
        let map = Self::parse(&text);
        debug!("Loaded {} entries from {}", map.len(), path.display());
        Ok(map)
    }

    /// Load every map in order; later maps override earlier ones.
    pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut merged = Self::new();
        for path in paths {
            merged.merge(Self::load(path.as_ref())?);
        }
        Ok(merged)
    }

    pub fn insert(&mut self, ps_name: impl Into<String>, entry: NameMapEntry) {
        self.entries.insert(ps_name.into(), entry);
    }

    pub fn merge(&mut self, other: NameMap) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, ps_name: &str) -> Option<&NameMapEntry> {
        self.entries.get(ps_name)
    }

    /// Like [`get`](Self::get), but a missing entry is an error.
    pub fn lookup(&self, ps_name: &str) -> Result<&NameMapEntry> {
        self.get(ps_name)
            .ok_or_else(|| Error::MissingNameMapEntry(ps_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NameMapEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
