//! Local git excludes for direnv files

use crate::error::{EnvsError, EnvsResult};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Entries kept out of `git status` for untracked environments
pub const EXCLUDE_PATTERNS: &[&str] = &[".envrc", ".direnv"];

/// Result of [`ensure_excluded`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeOutcome {
    /// `<project>/.git` is not a directory; nothing touched
    NoRepository,
    /// These patterns were appended
    Added(Vec<&'static str>),
    /// Every pattern was already present
    Unchanged,
}

impl std::fmt::Display for ExcludeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRepository => write!(f, "not a git repository"),
            Self::Added(patterns) => write!(f, "added {}", patterns.join(", ")),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Append any of [`EXCLUDE_PATTERNS`] missing from `.git/info/exclude`.
///
/// A pattern counts as present if it occurs anywhere in the file, so a
/// line like `.envrc.local` also satisfies `.envrc`.
pub async fn ensure_excluded(project_dir: &Path) -> EnvsResult<ExcludeOutcome> {
    let git_dir = project_dir.join(".git");
    let is_repo = fs::metadata(&git_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_repo {
        debug!("No .git directory in {}", project_dir.display());
        return Ok(ExcludeOutcome::NoRepository);
    }

    let info_dir = git_dir.join("info");
    fs::create_dir_all(&info_dir)
        .await
        .map_err(|e| EnvsError::io(format!("creating {}", info_dir.display()), e))?;

    let path = info_dir.join("exclude");
    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(EnvsError::io(format!("reading {}", path.display()), e)),
    };

    let (updated, added) = append_missing(&content, EXCLUDE_PATTERNS);
    if added.is_empty() {
        return Ok(ExcludeOutcome::Unchanged);
    }

    fs::write(&path, updated)
        .await
        .map_err(|e| EnvsError::io(format!("writing {}", path.display()), e))?;
    debug!("Excluded {:?} in {}", added, path.display());
    Ok(ExcludeOutcome::Added(added))
}

fn append_missing(content: &str, patterns: &[&'static str]) -> (String, Vec<&'static str>) {
    let added: Vec<&'static str> = patterns
        .iter()
        .copied()
        .filter(|p| !content.contains(p))
        .collect();

    let mut out = content.to_string();
    if added.is_empty() {
        return (out, added);
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    for pattern in &added {
        out.push_str(pattern);
        out.push('\n');
    }
    (out, added)
}
