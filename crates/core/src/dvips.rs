//! dvips map output.

use std::{
    fs::{read, remove_file, write},
    path::PathBuf,
};

use log::info;

use crate::{
    config::{IMPORTED_PSFONTS_MAP, PSFONTS_MAP, RECODE_DIRECTIVE, TexmfLayout},
    error::{Error, Result},
    namemap::{NameMap, NameMapEntry},
    tools::Toolchain,
};

/// One map line. `8a` in the TeX name becomes `8r`, the raw encoding the
/// font is re-encoded from.
pub fn dvips_map_line(entry: &NameMapEntry) -> String {
    format!(
        "{} \t\t {} {RECODE_DIRECTIVE} <8r.enc <{}.pfb\n",
        entry.berry.replace("8a", "8r"),
        entry.full_name,
        entry.berry
    )
}

/// Map lines for every entry, in name map order.
pub fn dvips_map_string(name_map: &NameMap) -> String {
    name_map.iter().map(|(_, entry)| dvips_map_line(entry)).collect()
}

/// Paths written by [`write_psfonts_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DvipsMapFiles {
    pub imported: PathBuf,
    pub combined: PathBuf,
}

/// Write `imported-psfonts.map` and a `psfonts.map` that appends it to the
/// global one found through the toolchain.
pub fn write_psfonts_map(
    layout: &TexmfLayout,
    name_map: &NameMap,
    tools: &dyn Toolchain,
) -> Result<DvipsMapFiles> {
    let fragment = dvips_map_string(name_map);
    let imported = layout.dvips_dir.join(IMPORTED_PSFONTS_MAP);
    write(&imported, &fragment).map_err(Error::io("Failed to write", &imported))?;

    // The lookup below must not see our previous output.
    let combined = layout.dvips_dir.join(PSFONTS_MAP);
    if combined.exists() {
        remove_file(&combined).map_err(Error::io("Failed to remove", &combined))?;
    }

    let global = tools.locate(PSFONTS_MAP)?;
    // Site maps may carry Latin-1 comments; copy them through byte for byte.
    let mut contents = read(&global).map_err(Error::io("Failed to read", &global))?;
    contents.extend_from_slice(fragment.as_bytes());
    write(&combined, contents).map_err(Error::io("Failed to write", &combined))?;

    info!("Wrote {} and {}", imported.display(), combined.display());
    Ok(DvipsMapFiles { imported, combined })
}
