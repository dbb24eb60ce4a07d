//! CLI definitions and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use texmf_type1::{InstallConfig, Installer, Programs, SystemToolchain};

#[derive(Debug, Parser)]
#[command(name = "install-type1", version)]
#[command(about = "Install Type1 fonts into a LaTeX texmf tree")]
#[command(long_about = "Run the standard procedure for incorporating Type1 fonts into a \
    texmf tree.\n\nEvery PATTERN*.pfb below --basepfb-dir is installed. The font files are \
    expected in a directory describing their name, e.g. AvantGarde/ag*.pfb, and that \
    directory name is reused inside the texmf tree.")]
#[command(after_help = "Example:\n  \
    install-type1 --dvipsmap --texmf-dir /tmp/texmf --basepfb-dir /tmp/adobe/ ag\n\n\
    installs all Adobe AvantGarde fonts (ag*.pfb) into the tree at /tmp/texmf and writes\n\
    imported-psfonts.map under texmf/dvips/config.\n\n\
    With TEXMF set as follows, all tools keep working:\n  \
    {/tmp/texmf//,{!!/usr/share/texmf,!!/usr/local/share/texmf}}")]
pub struct Cli {
    /// Base directory of the texmf tree to install into
    #[arg(long, value_name = "DIR", default_value = "texmf")]
    pub texmf_dir: PathBuf,
    /// Additional map file linking PFB and TeX file names and full font names
    #[arg(long, value_name = "MAP")]
    pub namemap: Vec<String>,
    /// Where to find the PFB and AFM files
    #[arg(long = "basepfb-dir", value_name = "DIR", default_value = "./")]
    pub basepfb_dir: PathBuf,
    /// Write map files for dvips
    #[arg(long)]
    pub dvipsmap: bool,
    /// Do not remove the temporary directory
    #[arg(long)]
    pub debug: bool,
    /// kpsewhich program used to find TeX files
    #[arg(long, value_name = "PROGRAM", default_value = "kpsewhich")]
    pub kpsewhich: String,
    /// LaTeX program running fontinst
    #[arg(long, value_name = "PROGRAM", default_value = "latex")]
    pub latex: String,
    /// Property list to TFM compiler
    #[arg(long, value_name = "PROGRAM", default_value = "pltotf")]
    pub pltotf: String,
    /// Virtual property list to VF compiler
    #[arg(long, value_name = "PROGRAM", default_value = "vptovf")]
    pub vptovf: String,
    /// Font file name prefixes; PATTERN selects PATTERN*.pfb
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,
}

impl Cli {
    pub fn install_config(&self) -> InstallConfig {
        let config = InstallConfig::new(&self.texmf_dir, self.patterns.clone())
            .with_base_pfb_dir(&self.basepfb_dir)
            .with_dvips_map_if(self.dvipsmap)
            .with_debug_if(self.debug);
        self.namemap.iter().fold(config, |c, m| c.with_namemap(m))
    }

    pub fn programs(&self) -> Programs {
        Programs {
            kpsewhich: self.kpsewhich.clone(),
            latex: self.latex.clone(),
            pltotf: self.pltotf.clone(),
            vptovf: self.vptovf.clone(),
        }
    }

    pub fn run(self) -> Result<()> {
        let config = self.install_config();
        debug!("{config:?}");
        let tools = SystemToolchain::new(self.programs());

        let report = Installer::new(config, &tools)
            .run()
            .with_context(|| format!("Failed to install fonts into {}", self.texmf_dir.display()))?;

        if let Some(files) = &report.dvips_map {
            println!("Wrote {}", files.imported.display());
            println!("Wrote {}", files.combined.display());
        }
        println!(
            "Installed {} files in {} families",
            report.installed_count(),
            report.families.len()
        );
        Ok(())
    }
}
