//! Host architecture detection
//!
//! Every upstream names CPU architectures its own way, so each generator
//! carries an [`ArchTable`]. Detection never fails: anything that is not
//! 64-bit ARM degrades to the x86_64 token.

use std::fmt;

/// Host CPU architecture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostArch {
    X86_64,
    Aarch64,
    /// Architecture without a dedicated mapping (treated as x86_64)
    Other(String),
}

impl HostArch {
    /// Detect the architecture this binary runs on
    pub fn detect() -> Self {
        Self::from_target(std::env::consts::ARCH)
    }

    /// Map a Rust target architecture name
    pub fn from_target(arch: &str) -> Self {
        match arch {
            "x86_64" => Self::X86_64,
            "aarch64" => Self::Aarch64,
            other => Self::Other(other.to_string()),
        }
    }

    /// Nix system double for the host
    pub fn nix_system(&self) -> &'static str {
        match self {
            Self::Aarch64 => "aarch64-linux",
            Self::X86_64 | Self::Other(_) => "x86_64-linux",
        }
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86_64 => write!(f, "x86_64"),
            Self::Aarch64 => write!(f, "aarch64"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Upstream-specific architecture tokens
#[derive(Debug, Clone, Copy)]
pub struct ArchTable {
    pub x86_64: &'static str,
    pub aarch64: &'static str,
}

impl ArchTable {
    pub const fn new(x86_64: &'static str, aarch64: &'static str) -> Self {
        Self { x86_64, aarch64 }
    }

    /// Token for `arch` in this upstream's naming
    pub fn token(&self, arch: &HostArch) -> &'static str {
        match arch {
            HostArch::Aarch64 => self.aarch64,
            HostArch::X86_64 | HostArch::Other(_) => self.x86_64,
        }
    }
}
