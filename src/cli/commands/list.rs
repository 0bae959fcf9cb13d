//! List command - show cached environments for the project

use super::ProjectContext;
use crate::cache::{self, CachedEnv};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::EnvsResult;
use crate::ui::{self, UiContext};
use console::style;

/// Execute the list command
pub async fn execute(args: ListArgs, _config: &Config, project: &ProjectContext) -> EnvsResult<()> {
    let envs = cache::list_entries(&project.cache_root, &project.name).await?;

    if envs.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, &format!("No environments for {}", project.name));
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&project.name, &envs),
        OutputFormat::Json => print_json(&envs)?,
        OutputFormat::Plain => print_plain(&envs),
    }

    Ok(())
}

fn print_table(name: &str, envs: &[CachedEnv]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, &format!("Environments for {}", name));

    println!(
        "{:<10} {:<17} {}",
        style("TOOLCHAIN").bold(),
        style("UPDATED").bold(),
        style("PATH").bold()
    );
    println!("{}", "-".repeat(60));

    for env in envs {
        let updated = env
            .updated
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<17} {}",
            style(env.toolchain).cyan(),
            updated,
            env.dir.display()
        );
    }

    println!();
    println!("{} environment(s)", envs.len());
}

fn print_json(envs: &[CachedEnv]) -> EnvsResult<()> {
    let json = serde_json::to_string_pretty(envs)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(envs: &[CachedEnv]) {
    for env in envs {
        println!("{}", env.toolchain);
    }
}
