//! Configuration schema for nix-envs
//!
//! Configuration is stored at `~/.config/nix-envs/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP settings for hash resolution
    pub network: NetworkConfig,

    /// Upstream release locations
    pub upstream: UpstreamConfig,

    /// direnv integration
    pub activation: ActivationConfig,

    /// `edit` command settings
    pub edit: EditConfig,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Seconds allowed to establish a connection
    pub connect_timeout_secs: u64,

    /// Seconds allowed for a whole request, body included
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs: 300,
        }
    }
}

/// Base URLs for upstream release artifacts.
///
/// Overriding these points resolution at a mirror. Trailing slashes are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub nodejs: String,
    pub go: String,
    pub python: String,
    pub bun: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            nodejs: "https://nodejs.org/dist".to_string(),
            go: "https://dl.google.com/go".to_string(),
            python: "https://www.python.org/ftp/python".to_string(),
            bun: "https://github.com/oven-sh/bun/releases/download".to_string(),
        }
    }
}

/// Activation tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Run `<command> allow` after `.envrc` changes
    pub notify: bool,

    /// Activation tool binary
    pub command: String,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            notify: true,
            command: "direnv".to_string(),
        }
    }
}

/// Edit command settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Program used to open the flake
    pub opener: String,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            opener: "xdg-open".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[network]"));
        assert!(toml.contains("[upstream]"));
        assert!(toml.contains("[activation]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.network.timeout_secs, 300);
        assert_eq!(config.edit.opener, "xdg-open");
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [upstream]
            nodejs = "https://mirror.example/node"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.upstream.nodejs, "https://mirror.example/node");
        assert_eq!(config.upstream.go, "https://dl.google.com/go"); // default preserved
        assert!(config.activation.notify);
    }
}
