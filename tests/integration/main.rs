//! Integration tests for nix-envs

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn envs() -> Command {
        cargo_bin_cmd!("nix-envs")
    }

    /// Isolated home, cache and config with direnv notify switched off
    struct Sandbox {
        temp: TempDir,
        project: PathBuf,
    }

    impl Sandbox {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let project = temp.path().join("demo-app");
            std::fs::create_dir_all(project.join(".git")).unwrap();
            std::fs::write(
                temp.path().join("config.toml"),
                "[activation]\nnotify = false\n",
            )
            .unwrap();
            Self { temp, project }
        }

        fn root(&self) -> &Path {
            self.temp.path()
        }

        fn cmd(&self) -> Command {
            let mut cmd = envs();
            cmd.env("HOME", self.root())
                .env("XDG_CACHE_HOME", self.root().join("cache"))
                .env("NIX_ENVS_CONFIG", self.root().join("config.toml"))
                .env("GIT_CEILING_DIRECTORIES", self.root())
                .env("CI", "1")
                .arg("--project")
                .arg(&self.project);
            cmd
        }

        fn envrc(&self) -> String {
            std::fs::read_to_string(self.project.join(".envrc")).unwrap_or_default()
        }
    }

    #[test]
    fn help_displays() {
        envs()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("pinned Nix flake"));
    }

    #[test]
    fn version_displays() {
        envs()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("nix-envs"));
    }

    #[test]
    fn no_command_fails_with_usage() {
        envs()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage"));
    }

    #[test]
    fn unknown_command_fails() {
        envs().arg("frobnicate").assert().failure();
    }

    #[test]
    fn completions_bash() {
        envs()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("nix-envs"));
    }

    #[test]
    fn config_show_defaults() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[upstream]"))
            .stdout(predicate::str::contains("nodejs.org"));
    }

    #[test]
    fn config_path_honors_env() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let sandbox = Sandbox::new();
        std::fs::write(sandbox.root().join("config.toml"), "[network\n").unwrap();
        sandbox
            .cmd()
            .arg("list")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn create_unknown_toolchain() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["create", "ruby", "3.3.0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown toolchain: ruby"))
            .stderr(predicate::str::contains("nodejs"));
        assert!(!sandbox.project.join(".envrc").exists());
    }

    #[test]
    fn create_latest_requires_rust() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["create", "python", "latest"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("latest"));
    }

    #[test]
    fn edit_missing_environment() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["edit", "go"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Environment does not exist"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn delete_missing_environment() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["delete", "nodejs"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Environment does not exist"));
    }

    #[test]
    fn list_empty() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::diff("[]\n"));
    }

    #[test]
    fn rust_lifecycle() {
        let sandbox = Sandbox::new();
        let flake = sandbox
            .root()
            .join("cache/envs/demo-app/rust/flake.nix");

        sandbox
            .cmd()
            .args(["create", "rust", "latest"])
            .assert()
            .success();

        let text = std::fs::read_to_string(&flake).unwrap();
        assert!(text.contains("rust-overlay"));
        assert_eq!(
            sandbox.envrc(),
            "use flake \"$HOME/cache/envs/demo-app/rust\"\n"
        );
        let exclude =
            std::fs::read_to_string(sandbox.project.join(".git/info/exclude")).unwrap();
        assert!(exclude.contains(".envrc") && exclude.contains(".direnv"));

        // Recreating is idempotent for .envrc
        sandbox
            .cmd()
            .args(["create", "rust", "1.75.0"])
            .assert()
            .success();
        assert_eq!(sandbox.envrc().matches("use flake").count(), 1);
        assert!(std::fs::read_to_string(&flake).unwrap().contains("1.75.0"));

        sandbox
            .cmd()
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff("rust\n"));

        sandbox
            .cmd()
            .args(["delete", "rust"])
            .assert()
            .success();
        assert!(!flake.exists());
        assert_eq!(sandbox.envrc(), "");
    }

    #[test]
    fn create_track_leaves_excludes_alone() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["create", "rust", "latest", "--track"])
            .assert()
            .success();
        assert!(!sandbox.project.join(".git/info/exclude").exists());
    }

    #[test]
    fn delete_preserves_user_lines() {
        let sandbox = Sandbox::new();
        std::fs::write(sandbox.project.join(".envrc"), "dotenv\n\nexport A=1").unwrap();

        sandbox
            .cmd()
            .args(["create", "rust", "latest"])
            .assert()
            .success();
        assert_eq!(
            sandbox.envrc(),
            "dotenv\n\nexport A=1\nuse flake \"$HOME/cache/envs/demo-app/rust\"\n"
        );

        sandbox
            .cmd()
            .args(["delete", "rust"])
            .assert()
            .success();
        assert_eq!(sandbox.envrc(), "dotenv\n\nexport A=1\n");
    }
}
