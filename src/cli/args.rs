//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// nix-envs - pinned Nix flake environments for direnv
///
/// Generates a flake for a toolchain at an exact version, caches it per
/// project and wires it into the project's .envrc.
#[derive(Parser, Debug)]
#[command(name = "nix-envs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "NIX_ENVS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project directory holding .envrc (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a pinned flake and add it to .envrc
    Create(CreateArgs),

    /// Open a cached flake in the configured editor
    Edit(ToolchainArgs),

    /// Remove a cached flake and its .envrc entry
    Delete(ToolchainArgs),

    /// List cached environments for the project
    List(ListArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

/// Arguments for the create command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Toolchain: nodejs, go, rust, python or bun
    pub toolchain: String,

    /// Exact release (e.g. 20.11.0), or `latest` for rust
    #[arg(id = "release", value_name = "VERSION")]
    pub version: String,

    /// Leave .envrc and .direnv visible to git
    #[arg(long)]
    pub track: bool,
}

/// Arguments naming an existing environment
#[derive(Parser, Debug)]
pub struct ToolchainArgs {
    /// Toolchain of the environment
    pub toolchain: String,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

/// Output format for list command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Toolchain names, one per line
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_create() {
        let cli = Cli::parse_from(["nix-envs", "create", "nodejs", "20.11.0"]);
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.toolchain, "nodejs");
                assert_eq!(args.version, "20.11.0");
                assert!(!args.track);
            }
            _ => panic!("expected Create command"),
        }
    }

    #[test]
    fn cli_parses_create_track() {
        let cli = Cli::parse_from(["nix-envs", "create", "rust", "latest", "--track"]);
        match cli.command {
            Commands::Create(args) => assert!(args.track),
            _ => panic!("expected Create command"),
        }
    }

    #[test]
    fn create_release_coexists_with_version_flag() {
        let cmd = Cli::command();
        let create = cmd.find_subcommand("create").unwrap();
        assert!(create.get_arguments().any(|a| a.get_id() == "release"));

        let cli = Cli::parse_from(["nix-envs", "create", "go", "1.22.0"]);
        assert!(matches!(cli.command, Commands::Create(ref a) if a.version == "1.22.0"));

        let err = Cli::try_parse_from(["nix-envs", "create", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn cli_create_requires_version() {
        assert!(Cli::try_parse_from(["nix-envs", "create", "go"]).is_err());
    }

    #[test]
    fn cli_parses_edit_and_delete() {
        let cli = Cli::parse_from(["nix-envs", "edit", "go"]);
        assert!(matches!(cli.command, Commands::Edit(ref a) if a.toolchain == "go"));

        let cli = Cli::parse_from(["nix-envs", "delete", "bun"]);
        assert!(matches!(cli.command, Commands::Delete(ref a) if a.toolchain == "bun"));
    }

    #[test]
    fn cli_parses_list_format() {
        let cli = Cli::parse_from(["nix-envs", "list"]);
        assert!(matches!(cli.command, Commands::List(ref a) if a.format == OutputFormat::Table));

        let cli = Cli::parse_from(["nix-envs", "list", "--format", "json"]);
        assert!(matches!(cli.command, Commands::List(ref a) if a.format == OutputFormat::Json));
    }

    #[test]
    fn cli_parses_config_init_force() {
        let cli = Cli::parse_from(["nix-envs", "config", "init", "--force"]);
        match cli.command {
            Commands::Config(ConfigArgs {
                action: Some(ConfigAction::Init { force }),
            }) => assert!(force),
            _ => panic!("expected Config Init command"),
        }
    }

    #[test]
    fn cli_parses_completions() {
        let cli = Cli::parse_from(["nix-envs", "completions", "zsh"]);
        assert!(matches!(cli.command, Commands::Completions(ref a) if a.shell == Shell::Zsh));
    }

    #[test]
    fn cli_global_project_flag() {
        let cli = Cli::parse_from(["nix-envs", "list", "--project", "/tmp/app"]);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/app")));
    }

    #[test]
    fn cli_no_command_is_error() {
        assert!(Cli::try_parse_from(["nix-envs"]).is_err());
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["nix-envs", "list"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["nix-envs", "-v", "list"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["nix-envs", "-vv", "list"]);
        assert_eq!(cli.verbose, 2);
    }
}
