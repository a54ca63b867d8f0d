//! A loaded source plus the dispatch entrypoint bound to it.

use std::path::{Path, PathBuf};

use crate::dispatch::{dispatch, Outcome};
use crate::error::{LoadResult, TaskResult};
use crate::loader::{load_from_path, LoadOptions};
use crate::types::Source;

/// Owns the single value loaded for the lifetime of an interactive run.
///
/// Every [`Session::dispatch`] call sees the same immutable source; nothing is cached between
/// calls.
#[derive(Debug, Clone)]
pub struct Session {
    path: Option<PathBuf>,
    source: Source,
}

impl Session {
    /// Load `path` and start a session on it.
    pub fn open(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Self> {
        let path = path.as_ref();
        let source = load_from_path(path, options)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Start a session on an already-built source.
    pub fn from_source(source: Source) -> Self {
        Self { path: None, source }
    }

    /// Path the source was loaded from, if it came from a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Run one instruction against the loaded source.
    pub fn dispatch(&self, instruction: &str) -> TaskResult<Outcome> {
        dispatch(&self.source, instruction)
    }
}
