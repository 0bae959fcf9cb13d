//! Error types for nix-envs
//!
//! All modules use `EnvsResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nix-envs operations
pub type EnvsResult<T> = Result<T, EnvsError>;

/// All errors that can occur in nix-envs
#[derive(Error, Debug)]
pub enum EnvsError {
    // Request errors
    #[error("{0}")]
    Usage(String),

    #[error("Unknown toolchain: {name}. Supported: {supported}")]
    UnknownToolchain { name: String, supported: String },

    // Resolution errors
    #[error("Could not find {what} upstream (HTTP {status}): {url}")]
    RemoteNotFound {
        what: String,
        url: String,
        status: u16,
    },

    #[error("Hash not found for {version}: no entry for {artifact}. Does this version support this architecture?")]
    HashNotFound { version: String, artifact: String },

    #[error("Network request failed: {url}")]
    Network {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    // Cache errors
    #[error("Environment does not exist: {toolchain} for project {project}")]
    EnvironmentNotFound { project: String, toolchain: String },

    #[error("Could not determine home directory (HOME is unset)")]
    HomeNotFound,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {path} with {opener} (exit code {code})")]
    OpenerFailed {
        opener: String,
        path: PathBuf,
        code: i32,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EnvsError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a network transport error
    pub fn network(url: impl Into<String>, source: ureq::Error) -> Self {
        Self::Network {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::EnvironmentNotFound { .. } => {
                Some("Create it first: nix-envs create <toolchain> <version>")
            }
            Self::UnknownToolchain { .. } => Some("Run: nix-envs --help"),
            Self::HashNotFound { .. } => {
                Some("Check the version exists upstream and ships a build for this architecture")
            }
            Self::Network { .. } => {
                Some("Check connectivity, or raise network.timeout_secs in the config")
            }
            Self::HomeNotFound => Some("Set HOME or XDG_CACHE_HOME"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EnvsError::RemoteNotFound {
            what: "Node.js v99.0.0".to_string(),
            url: "https://nodejs.org/dist/v99.0.0/SHASUMS256.txt".to_string(),
            status: 404,
        };
        let msg = err.to_string();
        assert!(msg.contains("Node.js v99.0.0"));
        assert!(msg.contains("HTTP 404"));
    }

    #[test]
    fn error_hint() {
        let err = EnvsError::EnvironmentNotFound {
            project: "demo".to_string(),
            toolchain: "go".to_string(),
        };
        assert!(err.hint().unwrap().contains("nix-envs create"));
        assert_eq!(EnvsError::Internal("x".to_string()).hint(), None);
    }

    #[test]
    fn hash_not_found_names_artifact() {
        let err = EnvsError::HashNotFound {
            version: "20.11.0".to_string(),
            artifact: "node-v20.11.0-linux-arm64.tar.gz".to_string(),
        };
        assert!(err.to_string().contains("node-v20.11.0-linux-arm64.tar.gz"));
    }
}
