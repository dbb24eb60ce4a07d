//! External programs: kpsewhich, latex, pltotf and vptovf.
//!
//! Everything goes through [`Toolchain`] so the pipeline can be driven by a
//! test double. Arguments are handed to the process spawner as a list; no
//! shell is involved, so file names with spaces are fine.

use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use log::{error, info};

use crate::{
    config::Programs,
    error::{Error, Result},
};

/// Programs that run inside a work directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Latex,
    Pltotf,
    Vptovf,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Latex => "latex",
            Self::Pltotf => "pltotf",
            Self::Vptovf => "vptovf",
        })
    }
}

/// One call of a [`Tool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(tool: Tool, cwd: impl Into<PathBuf>) -> Self {
        Self { tool, args: Vec::new(), cwd: cwd.into() }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

pub trait Toolchain {
    /// Resolve a file through the TeX search path.
    fn locate(&self, name: &str) -> Result<PathBuf>;

    /// Run a tool to completion. A non-zero exit is an error.
    fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Use `name` as is when it names an existing file, otherwise look it up.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path = Path::new(name);
        if path.is_file() { Ok(path.to_path_buf()) } else { self.locate(name) }
    }
}

/// Runs the real programs.
#[derive(Debug, Clone, Default)]
pub struct SystemToolchain {
    programs: Programs,
}

impl SystemToolchain {
    pub fn new(programs: Programs) -> Self {
        Self { programs }
    }

    fn program(&self, tool: Tool) -> &str {
        match tool {
            Tool::Latex => &self.programs.latex,
            Tool::Pltotf => &self.programs.pltotf,
            Tool::Vptovf => &self.programs.vptovf,
        }
    }
}

impl Toolchain for SystemToolchain {
    fn locate(&self, name: &str) -> Result<PathBuf> {
        let mut cmd = Command::new(&self.programs.kpsewhich);
        cmd.arg(name).stderr(Stdio::inherit());
        info!("Invoking {cmd:?}");

        let output = cmd.output().map_err(|source| Error::Spawn {
            program: self.programs.kpsewhich.clone(),
            source,
        })?;
        let found = String::from_utf8_lossy(&output.stdout);
        let found = found.lines().next().unwrap_or_default().trim_end();
        if found.is_empty() {
            return Err(Error::NotFound(name.to_string()));
        }
        Ok(PathBuf::from(found))
    }

    fn run(&self, invocation: &Invocation) -> Result<()> {
        let program = self.program(invocation.tool);
        let mut cmd = Command::new(program);
        cmd.args(&invocation.args).current_dir(&invocation.cwd);
        info!("Invoking {cmd:?} in {}", invocation.cwd.display());

        let status = cmd.status().map_err(|source| Error::Spawn {
            program: program.to_string(),
            source,
        })?;
        if !status.success() {
            error!("Command failed: {program}");
            return Err(Error::CommandFailed {
                program: program.to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }
}
