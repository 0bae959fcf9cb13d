//! `.envrc` reconciliation
//!
//! Each cached environment contributes exactly one line:
//!
//! ```text
//! use flake "$HOME/.cache/envs/my-app/nodejs"
//! ```
//!
//! Adding is idempotent and removing touches only lines that equal the
//! directive after trimming. Everything else in the file, blank lines
//! included, is left where it was.

use crate::error::{EnvsError, EnvsResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// What a reconcile call did to the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvrcChange {
    Added,
    Removed,
    Unchanged,
}

/// The `use flake` line for a cache directory.
///
/// A leading `home` is shortened to `$HOME` when it matches whole path
/// components, so `/home/al` never abbreviates `/home/alice/...`.
pub fn directive_for(dir: &Path, home: Option<&Path>) -> String {
    format!("use flake \"{}\"", display_path(dir, home))
}

/// Every spelling of the directive that should count as a match on removal
pub fn directive_variants(dir: &Path, home: Option<&Path>) -> Vec<String> {
    let mut variants = vec![directive_for(dir, home)];
    let absolute = directive_for(dir, None);
    if !variants.contains(&absolute) {
        variants.push(absolute);
    }
    variants
}

fn display_path(dir: &Path, home: Option<&Path>) -> String {
    let home = home.filter(|h| !h.as_os_str().is_empty() && *h != Path::new("/"));
    if let Some(rest) = home.and_then(|h| dir.strip_prefix(h).ok()) {
        if rest.as_os_str().is_empty() {
            return "$HOME".to_string();
        }
        return format!("$HOME/{}", rest.display());
    }
    dir.display().to_string()
}

/// Append `directive` unless a line already equals it.
///
/// Returns the new content, or `None` when nothing changes. A missing final
/// newline is added first so the directive always starts its own line.
/// Files using CRLF get CRLF terminators.
pub fn add_line(content: &str, directive: &str) -> Option<String> {
    let wanted = directive.trim();
    if content.lines().any(|line| line.trim() == wanted) {
        return None;
    }

    let eol = line_ending(content);
    let mut out = String::with_capacity(content.len() + directive.len() + 2);
    out.push_str(content);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str(eol);
    }
    out.push_str(wanted);
    out.push_str(eol);
    Some(out)
}

/// Drop every line equal (after trimming) to one of `directives`.
///
/// Returns the new content, or `None` when no line matched. Kept lines
/// keep their own terminators; the output ends with a line terminator
/// unless it is empty.
pub fn remove_lines(content: &str, directives: &[String]) -> Option<String> {
    let targets: Vec<&str> = directives.iter().map(|d| d.trim()).collect();
    let mut removed = false;
    let mut out = String::with_capacity(content.len());

    for segment in content.split_inclusive('\n') {
        if targets.contains(&segment.trim()) {
            removed = true;
        } else {
            out.push_str(segment);
        }
    }

    if !removed {
        return None;
    }

    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str(line_ending(content));
    }
    Some(out)
}

/// `\r\n` if the file already uses it, else `\n`
fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// A project's `.envrc`
#[derive(Debug, Clone)]
pub struct Envrc {
    path: PathBuf,
}

impl Envrc {
    pub const FILE_NAME: &'static str = ".envrc";

    /// The `.envrc` in `project_dir`
    pub fn in_dir(project_dir: &Path) -> Self {
        Self {
            path: project_dir.join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure `directive` is present, creating the file if needed
    pub async fn add(&self, directive: &str) -> EnvsResult<EnvrcChange> {
        let content = self.read().await?;
        match add_line(&content, directive) {
            Some(updated) => {
                self.write(&updated).await?;
                debug!("Added `{}` to {}", directive, self.path.display());
                Ok(EnvrcChange::Added)
            }
            None => Ok(EnvrcChange::Unchanged),
        }
    }

    /// Remove any line matching one of `directives`.
    ///
    /// A missing file is left missing.
    pub async fn remove(&self, directives: &[String]) -> EnvsResult<EnvrcChange> {
        let content = self.read().await?;
        match remove_lines(&content, directives) {
            Some(updated) => {
                self.write(&updated).await?;
                debug!("Removed {:?} from {}", directives, self.path.display());
                Ok(EnvrcChange::Removed)
            }
            None => Ok(EnvrcChange::Unchanged),
        }
    }

    async fn read(&self) -> EnvsResult<String> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(EnvsError::io(format!("reading {}", self.path.display()), e)),
        }
    }

    async fn write(&self, content: &str) -> EnvsResult<()> {
        fs::write(&self.path, content)
            .await
            .map_err(|e| EnvsError::io(format!("writing {}", self.path.display()), e))
    }
}
