//! Rust generator
//!
//! Pinning is delegated to `oxalica/rust-overlay`: the flake names a stable
//! release and the overlay supplies the hashes, so nothing is fetched here.

use super::template::{package_lines, Template};
use super::{Generator, HostArch, Toolchain, Version};
use crate::config::schema::UpstreamConfig;
use crate::error::EnvsResult;
use crate::resolve::PinSource;

const TEMPLATE: Template = Template::new("rust", include_str!("templates/rust.nix"));

/// Flake input providing `pkgs.rust-bin`
pub const OVERLAY: &str = "github:oxalica/rust-overlay";

const PACKAGES: &[&str] = &[
    "pkg-config",
    "openssl",
    "rust-analyzer",
    "vscode-langservers-extracted",
    "codespell",
];

/// Nix expression selecting the toolchain from the overlay
pub fn toolchain_expr(version: &Version) -> String {
    match version {
        Version::Latest => "pkgs.rust-bin.stable.latest.default".to_string(),
        Version::Pinned(v) => format!("pkgs.rust-bin.stable.\"{}\".default", v),
    }
}

/// Generator for `rust`
pub struct RustGenerator;

impl Generator for RustGenerator {
    fn toolchain(&self) -> Toolchain {
        Toolchain::Rust
    }

    fn pin_source(
        &self,
        _version: &Version,
        _arch: &HostArch,
        _upstream: &UpstreamConfig,
    ) -> EnvsResult<PinSource> {
        Ok(PinSource::Delegated {
            overlay: OVERLAY.to_string(),
        })
    }

    // Systems come from flake-utils, so the host arch does not appear
    fn render(
        &self,
        version: &Version,
        _arch: &HostArch,
        _upstream: &UpstreamConfig,
        _sha256: Option<&str>,
    ) -> EnvsResult<String> {
        TEMPLATE.render(&[
            ("version", &version.to_string()),
            ("overlay", OVERLAY),
            ("toolchain", &toolchain_expr(version)),
            ("packages", &package_lines(PACKAGES, 10)),
        ])
    }
}
