//! nix-envs CLI entry point
//!
//! Parses arguments, loads configuration and dispatches to subcommands.

use clap::Parser;
use console::style;
use nix_envs::cli::commands::{self, ProjectContext};
use nix_envs::cli::{Cli, Commands};
use nix_envs::config::ConfigManager;
use nix_envs::error::EnvsResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> EnvsResult<()> {
    let cli = Cli::parse();

    // 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("nix_envs=warn"),
        1 => EnvFilter::new("nix_envs=info"),
        _ => EnvFilter::new("nix_envs=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    nix_envs::ui::init_theme();

    // Completions need neither config nor a project
    if let Commands::Completions(args) = cli.command {
        commands::completions(args);
        return Ok(());
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    if let Commands::Config(args) = cli.command {
        return commands::config(args, &config, &config_manager).await;
    }

    let project = ProjectContext::resolve(cli.project.as_deref()).await?;

    match cli.command {
        Commands::Create(args) => commands::create(args, &config, &project).await,
        Commands::Edit(args) => commands::edit(args, &config, &project).await,
        Commands::Delete(args) => commands::delete(args, &config, &project).await,
        Commands::List(args) => commands::list(args, &config, &project).await,
        Commands::Config(_) | Commands::Completions(_) => unreachable!("handled above"),
    }
}
