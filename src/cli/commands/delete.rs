//! Delete command - remove a cached environment

use super::ProjectContext;
use crate::cli::args::ToolchainArgs;
use crate::config::Config;
use crate::error::EnvsResult;
use crate::project::{self, envrc, Envrc, EnvrcChange};
use crate::toolchain::Toolchain;
use crate::ui::{self, UiContext};

/// Execute the delete command
pub async fn execute(args: ToolchainArgs, config: &Config, project: &ProjectContext) -> EnvsResult<()> {
    let ctx = UiContext::detect();
    delete(&args, config, project, &ctx).await
}

pub(crate) async fn delete(
    args: &ToolchainArgs,
    config: &Config,
    project: &ProjectContext,
    ctx: &UiContext,
) -> EnvsResult<()> {
    let toolchain: Toolchain = args.toolchain.parse()?;
    let entry = project.entry(toolchain);

    entry.remove().await?;
    ui::step_ok_detail(ctx, "Removed environment", &entry.dir().display().to_string());

    // .git/info/exclude is never rewritten here
    let directives = envrc::directive_variants(&entry.dir(), project.home.as_deref());
    match Envrc::in_dir(&project.dir).remove(&directives).await? {
        EnvrcChange::Removed => {
            ui::step_ok(ctx, "Removed entry from .envrc");
            project::notify_activation(&project.dir, &config.activation).await;
        }
        _ => ui::step_info(ctx, ".envrc had no entry for this environment"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnvsError;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ProjectContext, Config) {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        std::fs::create_dir_all(&dir).unwrap();
        let project = ProjectContext {
            dir,
            name: "app".to_string(),
            cache_root: temp.path().join(".cache").join("envs"),
            home: Some(temp.path().to_path_buf()),
        };
        let mut config = Config::default();
        config.activation.notify = false;
        (temp, project, config)
    }

    fn args(toolchain: &str) -> ToolchainArgs {
        ToolchainArgs {
            toolchain: toolchain.to_string(),
        }
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (_temp, project, config) = setup();
        let ctx = UiContext::non_interactive();
        let err = delete(&args("go"), &config, &project, &ctx).await.unwrap_err();
        assert!(matches!(err, EnvsError::EnvironmentNotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_dir_and_both_directive_forms() {
        let (_temp, project, config) = setup();
        let ctx = UiContext::non_interactive();
        let entry = project.entry(Toolchain::NodeJs);
        entry.write_descriptor("{ }").await.unwrap();

        let abbreviated = envrc::directive_for(&entry.dir(), project.home.as_deref());
        let absolute = envrc::directive_for(&entry.dir(), None);
        std::fs::write(
            project.dir.join(".envrc"),
            format!("dotenv\n{}\n\n{}\nexport X=1\n", abbreviated, absolute),
        )
        .unwrap();

        delete(&args("nodejs"), &config, &project, &ctx).await.unwrap();

        assert!(!entry.dir().exists());
        let envrc = std::fs::read_to_string(project.dir.join(".envrc")).unwrap();
        assert_eq!(envrc, "dotenv\n\nexport X=1\n");
    }

    #[tokio::test]
    async fn delete_leaves_other_toolchains() {
        let (_temp, project, config) = setup();
        let ctx = UiContext::non_interactive();
        let go = project.entry(Toolchain::Go);
        let rust = project.entry(Toolchain::Rust);
        go.write_descriptor("{ }").await.unwrap();
        rust.write_descriptor("{ }").await.unwrap();

        let rust_line = envrc::directive_for(&rust.dir(), project.home.as_deref());
        let go_line = envrc::directive_for(&go.dir(), project.home.as_deref());
        std::fs::write(project.dir.join(".envrc"), format!("{}\n{}\n", go_line, rust_line)).unwrap();

        delete(&args("go"), &config, &project, &ctx).await.unwrap();

        assert!(rust.dir().exists());
        let envrc = std::fs::read_to_string(project.dir.join(".envrc")).unwrap();
        assert_eq!(envrc, format!("{}\n", rust_line));
    }
}
