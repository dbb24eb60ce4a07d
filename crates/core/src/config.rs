//! Install configuration and the fixed names used throughout the pipeline.

use std::path::{Path, PathBuf};

/// Name map that is always loaded before any user supplied map.
pub const DEFAULT_NAMEMAP: &str = "adobe.map";

/// The fontinst macro package driving `\latinfamily`.
pub const FONTINST_STY: &str = "fontinst.sty";

/// Global dvips map looked up through kpsewhich.
pub const PSFONTS_MAP: &str = "psfonts.map";

/// dvips map fragment holding only the fonts installed by this tool.
pub const IMPORTED_PSFONTS_MAP: &str = "imported-psfonts.map";

/// Re-encoding directive emitted for every dvips map line.
pub const RECODE_DIRECTIVE: &str = "\"TeXBase1Encoding ReEncodeFont\"";

/// Prefix of per-family temporary directories.
pub const TEMP_PREFIX: &str = "install-type1";

/// Work directory name used (and kept) in debug mode.
pub const DEBUG_WORK_DIR: &str = "install-type1.dir";

/// Name of the generated LaTeX driver file (without extension).
pub const DRIVER_JOB: &str = "foo";

/// Names of the external programs the pipeline shells out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Programs {
    pub kpsewhich: String,
    pub latex: String,
    pub pltotf: String,
    pub vptovf: String,
}

impl Default for Programs {
    fn default() -> Self {
        Self {
            kpsewhich: "kpsewhich".into(),
            latex: "latex".into(),
            pltotf: "pltotf".into(),
            vptovf: "vptovf".into(),
        }
    }
}

/// Everything a run needs, passed explicitly instead of living in globals.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Root of the texmf tree receiving the fonts.
    pub texmf_dir: PathBuf,
    /// Name map files, in load order. Later maps win on duplicate keys.
    pub namemaps: Vec<String>,
    /// Directory searched for PFB files.
    pub base_pfb_dir: PathBuf,
    /// File name prefixes to install.
    pub patterns: Vec<String>,
    /// Write `imported-psfonts.map` and a combined `psfonts.map`.
    pub write_dvips_map: bool,
    /// Keep the work directory around for inspection.
    pub debug: bool,
}

impl InstallConfig {
    pub fn new(texmf_dir: impl Into<PathBuf>, patterns: Vec<String>) -> Self {
        Self {
            texmf_dir: texmf_dir.into(),
            namemaps: vec![DEFAULT_NAMEMAP.to_string()],
            base_pfb_dir: PathBuf::from("./"),
            patterns,
            write_dvips_map: false,
            debug: false,
        }
    }

    pub fn with_namemap(mut self, name: impl Into<String>) -> Self {
        self.namemaps.push(name.into());
        self
    }

    pub fn with_base_pfb_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_pfb_dir = dir.into();
        self
    }

    pub fn with_dvips_map_if(mut self, enabled: bool) -> Self {
        self.write_dvips_map = enabled;
        self
    }

    pub fn with_debug_if(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }
}

/// Directories inside a texmf tree that receive generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexmfLayout {
    pub root: PathBuf,
    pub fonts_dir: PathBuf,
    pub psnfss_dir: PathBuf,
    pub dvips_dir: PathBuf,
}

impl TexmfLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            fonts_dir: root.join("fonts"),
            psnfss_dir: root.join("tex").join("latex").join("psnfss"),
            dvips_dir: root.join("dvips").join("config"),
        }
    }

    /// Directories created up front, before any family is converted.
    pub fn base_dirs(&self) -> [&Path; 4] {
        [&self.root, &self.fonts_dir, &self.psnfss_dir, &self.dvips_dir]
    }

    pub fn destination(&self, kind: OutputKind, font_name_dir: &Path) -> PathBuf {
        match kind {
            OutputKind::Fd => self.psnfss_dir.clone(),
            _ => self.fonts_dir.join(kind.subdir()).join(font_name_dir),
        }
    }
}

/// File categories that are moved out of the work directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Vf,
    Afm,
    Tfm,
    Fd,
    Pfb,
}

impl OutputKind {
    /// Relocation order.
    pub const ALL: [OutputKind; 5] = [Self::Vf, Self::Afm, Self::Tfm, Self::Fd, Self::Pfb];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Vf => "vf",
            Self::Afm => "afm",
            Self::Tfm => "tfm",
            Self::Fd => "fd",
            Self::Pfb => "pfb",
        }
    }

    /// Subdirectory below `fonts/`. PFB files live under `type1`.
    pub fn subdir(self) -> &'static str {
        match self {
            Self::Pfb => "type1",
            other => other.extension(),
        }
    }
}
