//! Project-side files: `.envrc` and `.git/info/exclude`
//!
//! The cache holds the flakes; the project only gets a `use flake` line in
//! its `.envrc` and, for untracked environments, local git excludes so the
//! direnv files never show up in `git status`.

pub mod envrc;
pub mod exclude;
pub mod notify;

pub use envrc::{Envrc, EnvrcChange};
pub use exclude::{ensure_excluded, ExcludeOutcome, EXCLUDE_PATTERNS};
pub use notify::notify_activation;

use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Name used when a directory has no usable base name (e.g. `/`)
const FALLBACK_PROJECT: &str = "default";

/// Project name for `dir`.
///
/// Prefers the base name of the enclosing git work tree so every
/// subdirectory of a repository shares one cache. Outside git, the base
/// name of `dir` itself. Never fails.
pub async fn project_name(dir: &Path) -> String {
    if let Some(toplevel) = git_toplevel(dir).await {
        if let Some(name) = base_name(Path::new(&toplevel)) {
            return name;
        }
    }

    base_name(dir).unwrap_or_else(|| FALLBACK_PROJECT.to_string())
}

async fn git_toplevel(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        debug!("Not inside a git work tree: {}", dir.display());
        return None;
    }

    let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!toplevel.is_empty()).then_some(toplevel)
}

fn base_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .map(str::to_string)
}
