//! Grouping discovered PFB files into font families.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::{
    error::{Error, Result},
    namemap::NameMap,
};

/// Fonts sharing the same three character Berry prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    pub key: String,
    pub pfb_files: Vec<PathBuf>,
}

impl FontFamily {
    /// File names of the members, for progress output.
    pub fn file_names(&self) -> Vec<String> {
        self.pfb_files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }
}

/// The PostScript base name of a font file, i.e. its stem.
pub fn ps_name(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::MissingNameMapEntry(path.display().to_string()))
}

/// Group files by family key. Families come out in first-seen order and
/// files keep their discovery order within a family.
pub fn group_families(files: &[PathBuf], name_map: &NameMap) -> Result<Vec<FontFamily>> {
    let mut groups: IndexMap<String, Vec<PathBuf>> = IndexMap::new();
    for file in files {
        let entry = name_map.lookup(ps_name(file)?)?;
        groups.entry(entry.family().to_string()).or_default().push(file.clone());
    }
    Ok(groups
        .into_iter()
        .map(|(key, pfb_files)| FontFamily { key, pfb_files })
        .collect())
}
