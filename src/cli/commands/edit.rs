//! Edit command - open a cached flake

use super::ProjectContext;
use crate::cli::args::ToolchainArgs;
use crate::config::schema::EditConfig;
use crate::config::Config;
use crate::error::{EnvsError, EnvsResult};
use crate::toolchain::Toolchain;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Execute the edit command
pub async fn execute(args: ToolchainArgs, config: &Config, project: &ProjectContext) -> EnvsResult<()> {
    let toolchain: Toolchain = args.toolchain.parse()?;
    let flake = flake_path(project, toolchain).await?;
    open(&config.edit, &flake).await
}

/// The cached flake for `toolchain`, or `EnvironmentNotFound`
pub(crate) async fn flake_path(project: &ProjectContext, toolchain: Toolchain) -> EnvsResult<PathBuf> {
    let entry = project.entry(toolchain);
    if !entry.has_descriptor().await {
        return Err(entry.not_found());
    }
    Ok(entry.descriptor_path())
}

async fn open(config: &EditConfig, path: &Path) -> EnvsResult<()> {
    debug!("Opening {} with {}", path.display(), config.opener);
    let status = Command::new(&config.opener)
        .arg(path)
        .status()
        .await
        .map_err(|e| EnvsError::command_failed(&config.opener, e))?;

    if !status.success() {
        return Err(EnvsError::OpenerFailed {
            opener: config.opener.clone(),
            path: path.to_path_buf(),
            code: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}
