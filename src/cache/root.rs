//! Cache root and home directory discovery

use crate::error::{EnvsError, EnvsResult};
use std::path::PathBuf;

/// Cache root from the process environment
pub fn cache_root() -> EnvsResult<PathBuf> {
    cache_root_from(|key| std::env::var(key).ok())
}

/// Cache root using `lookup` for environment variables.
///
/// Empty values count as unset.
pub fn cache_root_from(lookup: impl Fn(&str) -> Option<String>) -> EnvsResult<PathBuf> {
    if let Some(xdg) = lookup("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join("envs"));
    }

    let home = home_dir_from(&lookup).ok_or(EnvsError::HomeNotFound)?;
    Ok(home.join(".cache").join("envs"))
}

/// Home directory from the process environment
pub fn home_dir() -> Option<PathBuf> {
    home_dir_from(|key| std::env::var(key).ok())
}

/// `$HOME` via `lookup`, then the platform's notion of home
pub fn home_dir_from(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    lookup("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
