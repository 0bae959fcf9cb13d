//! Cache entries: one directory per (project, toolchain)

use crate::error::{EnvsError, EnvsResult};
use crate::toolchain::Toolchain;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File name of the flake inside an entry
pub const DESCRIPTOR_FILE: &str = "flake.nix";

/// A project's cached environment for one toolchain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    root: PathBuf,
    project: String,
    toolchain: Toolchain,
}

impl CacheEntry {
    pub fn new(root: impl Into<PathBuf>, project: impl Into<String>, toolchain: Toolchain) -> Self {
        Self {
            root: root.into(),
            project: project.into(),
            toolchain,
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn toolchain(&self) -> Toolchain {
        self.toolchain
    }

    /// `<root>/<project>/<toolchain>`
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.project).join(self.toolchain.name())
    }

    /// `<dir>/flake.nix`
    pub fn descriptor_path(&self) -> PathBuf {
        self.dir().join(DESCRIPTOR_FILE)
    }

    /// Whether the entry directory exists
    pub async fn exists(&self) -> bool {
        is_dir(&self.dir()).await
    }

    /// Whether a flake has been written
    pub async fn has_descriptor(&self) -> bool {
        fs::metadata(self.descriptor_path())
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Create the entry directory and its parents
    pub async fn ensure(&self) -> EnvsResult<PathBuf> {
        let dir = self.dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| EnvsError::io(format!("creating cache directory {}", dir.display()), e))?;
        Ok(dir)
    }

    /// Write `text` as the entry's flake, creating the directory if needed
    pub async fn write_descriptor(&self, text: &str) -> EnvsResult<PathBuf> {
        self.ensure().await?;
        let path = self.descriptor_path();
        fs::write(&path, text)
            .await
            .map_err(|e| EnvsError::io(format!("writing {}", path.display()), e))?;
        debug!("Wrote {} ({} bytes)", path.display(), text.len());
        Ok(path)
    }

    /// Remove the entry directory recursively.
    ///
    /// Fails with `EnvironmentNotFound` if it does not exist.
    pub async fn remove(&self) -> EnvsResult<()> {
        if !self.exists().await {
            return Err(self.not_found());
        }

        let dir = self.dir();
        fs::remove_dir_all(&dir)
            .await
            .map_err(|e| EnvsError::io(format!("removing {}", dir.display()), e))?;
        debug!("Removed {}", dir.display());
        Ok(())
    }

    /// Error for operations on an entry that was never created
    pub fn not_found(&self) -> EnvsError {
        EnvsError::EnvironmentNotFound {
            project: self.project.clone(),
            toolchain: self.toolchain.to_string(),
        }
    }
}

/// A cached environment found on disk
#[derive(Debug, Clone, Serialize)]
pub struct CachedEnv {
    pub toolchain: Toolchain,
    pub dir: PathBuf,
    /// Last write of the flake, if one exists
    pub updated: Option<DateTime<Local>>,
}

/// List the environments cached for `project`, sorted by toolchain.
///
/// Directories that are not a known toolchain are skipped.
pub async fn list_entries(root: &Path, project: &str) -> EnvsResult<Vec<CachedEnv>> {
    let project_dir = root.join(project);
    if !is_dir(&project_dir).await {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(&project_dir)
        .await
        .map_err(|e| EnvsError::io(format!("reading {}", project_dir.display()), e))?;

    while let Some(item) = read_dir
        .next_entry()
        .await
        .map_err(|e| EnvsError::io(format!("reading {}", project_dir.display()), e))?
    {
        let name = item.file_name();
        let Some(toolchain) = name.to_str().and_then(|n| n.parse::<Toolchain>().ok()) else {
            debug!("Skipping unknown cache dir {:?}", name);
            continue;
        };

        let dir = item.path();
        if !is_dir(&dir).await {
            continue;
        }

        let updated = fs::metadata(dir.join(DESCRIPTOR_FILE))
            .await
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);

        entries.push(CachedEnv {
            toolchain,
            dir,
            updated,
        });
    }

    entries.sort_by_key(|e| e.toolchain);
    Ok(entries)
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false)
}
