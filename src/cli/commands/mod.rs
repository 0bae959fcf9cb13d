//! CLI command implementations

pub mod completions;
pub mod config;
pub mod create;
pub mod delete;
pub mod edit;
pub mod list;

pub use completions::execute as completions;
pub use config::execute as config;
pub use create::execute as create;
pub use delete::execute as delete;
pub use edit::execute as edit;
pub use list::execute as list;

use crate::cache::{self, CacheEntry};
use crate::error::{EnvsError, EnvsResult};
use crate::project;
use crate::toolchain::Toolchain;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a command operates: the project directory and its cache slot
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Directory holding `.envrc`, absolute
    pub dir: PathBuf,
    /// Cache namespace for the project
    pub name: String,
    /// Root of all cached environments
    pub cache_root: PathBuf,
    /// Home directory used to abbreviate `.envrc` paths
    pub home: Option<PathBuf>,
}

impl ProjectContext {
    /// Resolve from `--project` (or the current directory) and the environment
    pub async fn resolve(project: Option<&Path>) -> EnvsResult<Self> {
        let dir = match project {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()
                .map_err(|e| EnvsError::io("getting current directory", e))?,
        };
        let dir = dir
            .canonicalize()
            .map_err(|e| EnvsError::io(format!("resolving project directory {}", dir.display()), e))?;

        let name = project::project_name(&dir).await;
        let cache_root = cache::cache_root()?;
        debug!(
            "Project {} at {} (cache root {})",
            name,
            dir.display(),
            cache_root.display()
        );

        Ok(Self {
            dir,
            name,
            cache_root,
            home: cache::home_dir(),
        })
    }

    /// Cache entry for `toolchain` in this project
    pub fn entry(&self, toolchain: Toolchain) -> CacheEntry {
        CacheEntry::new(&self.cache_root, &self.name, toolchain)
    }
}
