//! Best-effort direnv reload

use crate::config::schema::ActivationConfig;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Run `<command> allow` in `project_dir` so direnv picks up `.envrc`.
///
/// Returns whether the command ran and succeeded. Nothing here is ever
/// surfaced as an error: a missing or failing direnv is logged and ignored.
pub async fn notify_activation(project_dir: &Path, config: &ActivationConfig) -> bool {
    if !config.notify || config.command.trim().is_empty() {
        debug!("Activation notify disabled");
        return false;
    }

    let result = Command::new(&config.command)
        .arg("allow")
        .current_dir(project_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match result {
        Ok(status) if status.success() => {
            debug!("{} allow succeeded in {}", config.command, project_dir.display());
            true
        }
        Ok(status) => {
            debug!("{} allow exited with {}", config.command, status);
            false
        }
        Err(e) => {
            debug!("Could not run {}: {}", config.command, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn disabled_does_nothing() {
        let temp = TempDir::new().unwrap();
        let config = ActivationConfig {
            notify: false,
            command: "direnv".to_string(),
        };
        assert!(!notify_activation(temp.path(), &config).await);
    }

    #[tokio::test]
    async fn missing_binary_is_ignored() {
        let temp = TempDir::new().unwrap();
        let config = ActivationConfig {
            notify: true,
            command: "nix-envs-no-such-activation-tool".to_string(),
        };
        assert!(!notify_activation(temp.path(), &config).await);
    }

    #[tokio::test]
    async fn failing_command_is_ignored() {
        let temp = TempDir::new().unwrap();
        let config = ActivationConfig {
            notify: true,
            command: "false".to_string(),
        };
        assert!(!notify_activation(temp.path(), &config).await);
    }
}
