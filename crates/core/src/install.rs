//! The install pipeline: maps, discovery, grouping and per-family conversion.

use std::{
    fs::create_dir_all,
    path::{PathBuf, absolute},
    time::Instant,
};

use log::info;

use crate::{
    config::{FONTINST_STY, InstallConfig, TexmfLayout},
    convert::{ConvertContext, FamilyReport, convert_family},
    discover::discover,
    dvips::{DvipsMapFiles, write_psfonts_map},
    error::{Error, Result},
    family::{FontFamily, group_families},
    namemap::NameMap,
    tools::Toolchain,
};

/// Outcome of a complete run.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub families: Vec<FamilyReport>,
    pub dvips_map: Option<DvipsMapFiles>,
}

impl InstallReport {
    pub fn installed_count(&self) -> usize {
        self.families.iter().map(|f| f.installed.len()).sum()
    }
}

pub struct Installer<'a> {
    config: InstallConfig,
    tools: &'a dyn Toolchain,
}

impl<'a> Installer<'a> {
    pub fn new(config: InstallConfig, tools: &'a dyn Toolchain) -> Self {
        Self { config, tools }
    }

    /// Run the whole batch. The first error aborts every remaining family.
    pub fn run(&self) -> Result<InstallReport> {
        let start = Instant::now();
        let texmf_dir = absolute(&self.config.texmf_dir)
            .map_err(Error::io("Failed to resolve", &self.config.texmf_dir))?;
        let base_pfb_dir = absolute(&self.config.base_pfb_dir)
            .map_err(Error::io("Failed to resolve", &self.config.base_pfb_dir))?;
        let layout = TexmfLayout::new(&texmf_dir);

        let map_paths = self
            .config
            .namemaps
            .iter()
            .map(|name| self.tools.resolve(name))
            .collect::<Result<Vec<PathBuf>>>()?;
        let fontinst_sty = self.tools.locate(FONTINST_STY)?;

        for dir in layout.base_dirs() {
            create_dir_all(dir).map_err(Error::io("Failed to create directory", dir))?;
        }

        let name_map = NameMap::load_all(&map_paths)?;
        info!("Loaded {} name map entries", name_map.len());

        let dvips_map = if self.config.write_dvips_map {
            Some(write_psfonts_map(&layout, &name_map, self.tools)?)
        } else {
            None
        };

        let files = discover(&base_pfb_dir, &self.config.patterns);
        println!("Installing:");
        let families = group_families(&files, &name_map)?;

        let ctx = ConvertContext {
            layout: &layout,
            base_pfb_dir: &base_pfb_dir,
            fontinst_sty: &fontinst_sty,
            name_map: &name_map,
            debug: self.config.debug,
        };
        let reports = self.convert_all(&ctx, &families)?;

        info!(
            "Installed {} families in {:.2}s",
            reports.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(InstallReport { families: reports, dvips_map })
    }

    fn convert_all(
        &self,
        ctx: &ConvertContext<'_>,
        families: &[FontFamily],
    ) -> Result<Vec<FamilyReport>> {
        let mut reports = Vec::with_capacity(families.len());
        for family in families {
            println!("Family {} ({})", family.key, family.file_names().join(" "));
            reports.push(convert_family(ctx, self.tools, family)?);
        }
        Ok(reports)
    }
}
