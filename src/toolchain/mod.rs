//! Toolchains and their flake generators
//!
//! Each supported toolchain has a [`Generator`] that turns a version string
//! into a pinned `flake.nix`. Generators own their architecture naming,
//! upstream URL layout, hash strategy and auxiliary package list.

pub mod arch;
pub mod bun;
pub mod go;
pub mod nodejs;
pub mod python;
pub mod rust;
pub mod template;

pub use arch::{ArchTable, HostArch};

use crate::config::schema::UpstreamConfig;
use crate::error::{EnvsError, EnvsResult};
use crate::resolve::{resolve_pin, HttpClient, PinSource};
use crate::ui::UiContext;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Supported toolchains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toolchain {
    NodeJs,
    Go,
    Rust,
    Python,
    Bun,
}

impl Toolchain {
    /// All toolchains in display order
    pub fn all() -> &'static [Self] {
        &[Self::NodeJs, Self::Go, Self::Rust, Self::Python, Self::Bun]
    }

    /// Name used on the command line and as the cache directory
    pub fn name(&self) -> &'static str {
        match self {
            Self::NodeJs => "nodejs",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::Bun => "bun",
        }
    }

    fn supported_list() -> String {
        Self::all()
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Toolchain {
    type Err = EnvsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| EnvsError::UnknownToolchain {
                name: s.to_string(),
                supported: Self::supported_list(),
            })
    }
}

/// Requested toolchain version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// Let the downstream build tool pick the newest release
    Latest,
    /// An exact upstream release, without any leading `v`
    Pinned(String),
}

impl Version {
    /// Parse a user-supplied version.
    ///
    /// Accepts `latest`, or a release string of ASCII alphanumerics and
    /// `.`, `-`, `+`, `_`. A single leading `v` is dropped (`v20.11.0`).
    pub fn parse(raw: &str) -> EnvsResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(EnvsError::Usage("Version cannot be empty".to_string()));
        }
        if raw.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }

        let version = raw.strip_prefix('v').unwrap_or(raw);
        let valid = !version.is_empty()
            && version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '_'));
        if !valid {
            return Err(EnvsError::Usage(format!(
                "Invalid version '{}': expected something like 20.11.0",
                raw
            )));
        }

        Ok(Self::Pinned(version.to_string()))
    }

    /// The exact version, or a usage error for toolchains that must pin a hash
    pub fn require_pinned(&self, toolchain: Toolchain) -> EnvsResult<&str> {
        match self {
            Self::Pinned(v) => Ok(v),
            Self::Latest => Err(EnvsError::Usage(format!(
                "{} needs an exact version to pin its hash; 'latest' is only supported for rust",
                toolchain
            ))),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Pinned(v) => write!(f, "{}", v),
        }
    }
}

/// A rendered flake ready to be written to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub toolchain: Toolchain,
    pub version: Version,
    /// Pinned artifact hash, `None` when pinning is delegated
    pub sha256: Option<String>,
    /// Full `flake.nix` text
    pub text: String,
}

/// Produces a pinned flake for one toolchain.
///
/// Generators are pure: [`Generator::pin_source`] says where the hash comes
/// from and [`Generator::render`] turns the resolved hash into flake text.
/// Network access happens in [`generate`] between the two.
pub trait Generator: Send + Sync {
    /// Toolchain this generator serves
    fn toolchain(&self) -> Toolchain;

    /// Where the artifact hash for `version` is published
    fn pin_source(
        &self,
        version: &Version,
        arch: &HostArch,
        upstream: &UpstreamConfig,
    ) -> EnvsResult<PinSource>;

    /// Render the flake. `sha256` is `None` only for delegated pins.
    fn render(
        &self,
        version: &Version,
        arch: &HostArch,
        upstream: &UpstreamConfig,
        sha256: Option<&str>,
    ) -> EnvsResult<String>;
}

/// Get the generator for `toolchain`
pub fn generator_for(toolchain: Toolchain) -> Box<dyn Generator> {
    match toolchain {
        Toolchain::NodeJs => Box::new(nodejs::NodeJsGenerator),
        Toolchain::Go => Box::new(go::GoGenerator),
        Toolchain::Rust => Box::new(rust::RustGenerator),
        Toolchain::Python => Box::new(python::PythonGenerator),
        Toolchain::Bun => Box::new(bun::BunGenerator),
    }
}

/// Resolve and render the flake for `toolchain` at `version`.
///
/// A resolution failure aborts immediately; there is no retry.
pub async fn generate(
    toolchain: Toolchain,
    version: &Version,
    arch: &HostArch,
    upstream: &UpstreamConfig,
    http: &HttpClient,
    ui: &UiContext,
) -> EnvsResult<Descriptor> {
    let generator = generator_for(toolchain);
    let source = generator.pin_source(version, arch, upstream)?;
    debug!("Pin source for {} {}: {:?}", toolchain, version, source);

    let sha256 = resolve_pin(http, &source, ui).await?;
    let text = generator.render(version, arch, upstream, sha256.as_deref())?;

    Ok(Descriptor {
        toolchain,
        version: version.clone(),
        sha256,
        text,
    })
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
