//! Converting one font family: stage, run fontinst, compile, relocate.

use std::{
    env,
    fs::{self, copy, create_dir_all, read_dir, remove_file, write},
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use log::{debug, info};
use tempfile::TempDir;

use crate::{
    config::{DEBUG_WORK_DIR, DRIVER_JOB, OutputKind, TEMP_PREFIX, TexmfLayout},
    error::{Error, Result},
    family::{FontFamily, ps_name},
    namemap::NameMap,
    tools::{Invocation, Tool, Toolchain},
};

/// Inputs shared by every family of a run.
#[derive(Debug, Clone, Copy)]
pub struct ConvertContext<'a> {
    pub layout: &'a TexmfLayout,
    pub base_pfb_dir: &'a Path,
    pub fontinst_sty: &'a Path,
    pub name_map: &'a NameMap,
    pub debug: bool,
}

/// Files one family put into the texmf tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyReport {
    pub key: String,
    pub installed: Vec<PathBuf>,
}

impl FamilyReport {
    pub fn installed_of(&self, kind: OutputKind) -> impl Iterator<Item = &PathBuf> {
        self.installed
            .iter()
            .filter(move |p| p.extension().is_some_and(|e| e == kind.extension()))
    }
}

/// Scratch directory of a conversion.
#[derive(Debug)]
pub enum WorkDir {
    /// Removed when the conversion returns, also when it fails part way.
    /// Files already moved into the texmf tree are left in place.
    Temp(TempDir),
    /// Fixed location kept for inspection.
    Retained(PathBuf),
}

impl WorkDir {
    pub fn create(debug: bool) -> Result<Self> {
        if debug {
            let dir = env::temp_dir().join(DEBUG_WORK_DIR);
            info!("Temp dir is {}", dir.display());
            create_dir_all(&dir).map_err(Error::io("Failed to create directory", &dir))?;
            clear_files(&dir)?;
            Ok(Self::Retained(dir))
        } else {
            tempfile::Builder::new()
                .prefix(TEMP_PREFIX)
                .tempdir()
                .map(Self::Temp)
                .map_err(Error::io("Failed to create directory", env::temp_dir()))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Temp(dir) => dir.path(),
            Self::Retained(dir) => dir,
        }
    }

    /// Remove the directory unless it is retained.
    pub fn finish(self) -> Result<()> {
        match self {
            Self::Temp(dir) => {
                let path = dir.path().to_path_buf();
                dir.close().map_err(Error::io("Failed to remove directory", path))
            }
            Self::Retained(_) => Ok(()),
        }
    }
}

/// Delete the regular files directly inside `dir`.
fn clear_files(dir: &Path) -> Result<()> {
    for entry in read_dir(dir).map_err(Error::io("Failed to read directory", dir))? {
        let path = entry.map_err(Error::io("Failed to read directory", dir))?.path();
        if path.is_file() {
            remove_file(&path).map_err(Error::io("Failed to remove", &path))?;
        }
    }
    Ok(())
}

/// Files in `dir` with the given extension, sorted by name.
fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.{ext}", Pattern::escape(&dir.to_string_lossy()));
    let paths = glob(&pattern).map_err(|e| Error::Io {
        action: "Invalid search pattern",
        path: PathBuf::from(&pattern),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.msg),
    })?;
    Ok(paths.filter_map(|p| p.ok()).filter(|p| p.is_file()).collect())
}

/// The source directory of `pfb` relative to the PFB base directory,
/// e.g. `AvantGarde` for `<base>/AvantGarde/agw_____.pfb`.
pub fn font_name_dir(base_pfb_dir: &Path, pfb: &Path) -> PathBuf {
    let dir = pfb.parent().unwrap_or(Path::new(""));
    dir.strip_prefix(base_pfb_dir).unwrap_or(dir).to_path_buf()
}

/// Body of the LaTeX driver file.
pub fn driver_source(fontinst_sty: &Path, family: &str) -> String {
    format!(r"\input {} \latinfamily{{{family}}}{{}}\bye", fontinst_sty.display())
}

/// Copy `src` into `dest_dir`, creating it if needed, then delete `src`.
pub fn move_to_dir(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    create_dir_all(dest_dir).map_err(Error::io("Failed to create directory", dest_dir))?;
    let name = src.file_name().ok_or_else(|| Error::Io {
        action: "Not a file",
        path: src.to_path_buf(),
        source: std::io::ErrorKind::InvalidInput.into(),
    })?;
    let dest = dest_dir.join(name);
    copy(src, &dest).map_err(Error::io("Failed to copy", src))?;
    remove_file(src).map_err(Error::io("Failed to remove", src))?;
    Ok(dest)
}

/// Give the owner write permission on every file in `dir`.
fn make_writable(dir: &Path) -> Result<()> {
    for entry in read_dir(dir).map_err(Error::io("Failed to read directory", dir))? {
        let path = entry.map_err(Error::io("Failed to read directory", dir))?.path();
        let mut perms = fs::metadata(&path)
            .map_err(Error::io("Failed to stat", &path))?
            .permissions();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            perms.set_mode(perms.mode() | 0o200);
        }
        #[cfg(not(unix))]
        perms.set_readonly(false);
        fs::set_permissions(&path, perms).map_err(Error::io("Failed to chmod", &path))?;
    }
    Ok(())
}

/// Copy each PFB and its AFM into `work` under the Berry name.
fn stage(family: &FontFamily, name_map: &NameMap, work: &Path) -> Result<()> {
    for pfb in &family.pfb_files {
        let berry = &name_map.lookup(ps_name(pfb)?)?.berry;
        let afm = pfb.with_extension("afm");
        debug!("Staging {} as {berry}", pfb.display());
        for (src, ext) in [(pfb.as_path(), "pfb"), (afm.as_path(), "afm")] {
            let dest = work.join(format!("{berry}.{ext}"));
            copy(src, &dest).map_err(Error::io("Failed to copy", src))?;
        }
    }
    Ok(())
}

fn compile(tools: &dyn Toolchain, work: &Path) -> Result<()> {
    for (ext, tool) in [("pl", Tool::Pltotf), ("vpl", Tool::Vptovf)] {
        for file in files_with_extension(work, ext)? {
            let name = file.file_name().unwrap_or_default();
            tools.run(&Invocation::new(tool, work).arg(name))?;
        }
    }
    Ok(())
}

fn relocate(layout: &TexmfLayout, font_name_dir: &Path, work: &Path) -> Result<Vec<PathBuf>> {
    let mut installed = Vec::new();
    for kind in OutputKind::ALL {
        let dest_dir = layout.destination(kind, font_name_dir);
        for file in files_with_extension(work, kind.extension())? {
            installed.push(move_to_dir(&file, &dest_dir)?);
        }
    }
    Ok(installed)
}

/// Produce and install all TeX support files of one family.
pub fn convert_family(
    ctx: &ConvertContext<'_>,
    tools: &dyn Toolchain,
    family: &FontFamily,
) -> Result<FamilyReport> {
    let Some(first) = family.pfb_files.first() else {
        return Ok(FamilyReport { key: family.key.clone(), installed: Vec::new() });
    };
    let font_name_dir = font_name_dir(ctx.base_pfb_dir, first);

    let work_dir = WorkDir::create(ctx.debug)?;
    let work = work_dir.path();

    stage(family, ctx.name_map, work)?;

    let driver = work.join(DRIVER_JOB).with_extension("tex");
    write(&driver, driver_source(ctx.fontinst_sty, &family.key))
        .map_err(Error::io("Failed to write", &driver))?;
    tools.run(&Invocation::new(Tool::Latex, work).arg(DRIVER_JOB))?;

    compile(tools, work)?;
    make_writable(work)?;
    let installed = relocate(ctx.layout, &font_name_dir, work)?;

    work_dir.finish()?;
    info!("Installed {} files for family {}", installed.len(), family.key);
    Ok(FamilyReport { key: family.key.clone(), installed })
}
