//! Create command - generate a pinned flake and hook it into direnv

use super::ProjectContext;
use crate::cli::args::CreateArgs;
use crate::config::Config;
use crate::error::EnvsResult;
use crate::project::{self, envrc, Envrc, EnvrcChange, ExcludeOutcome};
use crate::resolve::HttpClient;
use crate::toolchain::{self, HostArch, Toolchain, Version};
use crate::ui::{self, UiContext};
use std::path::PathBuf;
use tracing::debug;

/// Execute the create command
pub async fn execute(args: CreateArgs, config: &Config, project: &ProjectContext) -> EnvsResult<()> {
    let ctx = UiContext::detect();
    create(&args, config, project, &HostArch::detect(), &ctx).await?;
    Ok(())
}

/// Generate, cache and activate an environment. Returns the flake path.
pub(crate) async fn create(
    args: &CreateArgs,
    config: &Config,
    project: &ProjectContext,
    arch: &HostArch,
    ctx: &UiContext,
) -> EnvsResult<PathBuf> {
    let toolchain: Toolchain = args.toolchain.parse()?;
    let version = Version::parse(&args.version)?;

    ui::intro(ctx, &format!("Creating {} {} for {}", toolchain, version, project.name));

    let http = HttpClient::new(&config.network);
    let descriptor =
        toolchain::generate(toolchain, &version, arch, &config.upstream, &http, ctx).await?;

    // Only touch the cache once the flake is fully rendered
    let entry = project.entry(toolchain);
    let flake = entry.write_descriptor(&descriptor.text).await?;
    ui::step_ok_detail(ctx, "Wrote flake", &flake.display().to_string());

    let directive = envrc::directive_for(&entry.dir(), project.home.as_deref());
    match Envrc::in_dir(&project.dir).add(&directive).await? {
        EnvrcChange::Added => {
            ui::step_ok(ctx, &format!("Added `{}` to .envrc", directive));
            project::notify_activation(&project.dir, &config.activation).await;
        }
        _ => ui::step_info(ctx, ".envrc already loads this environment"),
    }

    if args.track {
        debug!("--track set, leaving git excludes alone");
    } else {
        match project::ensure_excluded(&project.dir).await {
            Ok(ExcludeOutcome::Added(patterns)) => ui::step_ok(
                ctx,
                &format!("Excluded {} in .git/info/exclude", patterns.join(", ")),
            ),
            Ok(outcome) => debug!("Git excludes: {}", outcome),
            Err(e) => ui::step_warn_hint(ctx, "Could not update .git/info/exclude", &e.to_string()),
        }
    }

    ui::outro_success(ctx, &format!("{} {} ready", toolchain, version));
    Ok(flake)
}
