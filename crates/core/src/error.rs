//! Error types for the install pipeline.

use std::{io, path::PathBuf, result};

/// Errors that abort an install run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem operation failed.
    #[error("{action} '{path}': {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// A discovered PFB has no entry in any loaded name map.
    #[error("No name map entry for '{0}'")]
    MissingNameMapEntry(String),

    /// kpsewhich could not find the requested file.
    #[error("File '{0}' not found")]
    NotFound(String),

    /// An external program could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    /// An external program exited unsuccessfully.
    #[error("Command '{program}' failed{}", .code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    CommandFailed { program: String, code: Option<i32> },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { action, path, source }
    }
}

pub type Result<T> = result::Result<T, Error>;
