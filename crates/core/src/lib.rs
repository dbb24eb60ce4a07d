//! texmf-type1 core - install Type1 fonts into a texmf tree.

pub mod config;
pub mod convert;
pub mod discover;
pub mod dvips;
pub mod error;
pub mod family;
pub mod install;
pub mod namemap;
pub mod tools;

pub use config::{InstallConfig, OutputKind, Programs, TexmfLayout};
pub use convert::{FamilyReport, convert_family};
pub use error::{Error, Result};
pub use family::{FontFamily, group_families};
pub use install::{InstallReport, Installer};
pub use namemap::{NameMap, NameMapEntry};
pub use tools::{Invocation, SystemToolchain, Tool, Toolchain};
