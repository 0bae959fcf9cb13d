//! Go generator
//!
//! Google publishes a `<file>.sha256` beside every release archive, so the
//! hash comes from that single-line file rather than a combined list.

use super::template::{package_lines, Template};
use super::{join_url, ArchTable, Generator, HostArch, Toolchain, Version};
use crate::config::schema::UpstreamConfig;
use crate::error::{EnvsError, EnvsResult};
use crate::resolve::PinSource;

const TEMPLATE: Template = Template::new("go", include_str!("templates/go.nix"));

const ARCH: ArchTable = ArchTable::new("amd64", "arm64");

const PACKAGES: &[&str] = &["gopls", "delve", "go-tools", "vscode-langservers-extracted"];

/// Release archive name, e.g. `go1.22.0.linux-amd64.tar.gz`
pub fn artifact_name(version: &str, arch: &HostArch) -> String {
    format!("go{}.linux-{}.tar.gz", version, ARCH.token(arch))
}

/// Generator for `go`
pub struct GoGenerator;

impl Generator for GoGenerator {
    fn toolchain(&self) -> Toolchain {
        Toolchain::Go
    }

    fn pin_source(
        &self,
        version: &Version,
        arch: &HostArch,
        upstream: &UpstreamConfig,
    ) -> EnvsResult<PinSource> {
        let version = version.require_pinned(self.toolchain())?;
        let artifact = artifact_name(version, arch);
        Ok(PinSource::DigestFile {
            url: join_url(&upstream.go, &format!("{}.sha256", artifact)),
            version: version.to_string(),
            artifact,
            label: format!("Go v{}", version),
        })
    }

    fn render(
        &self,
        version: &Version,
        arch: &HostArch,
        upstream: &UpstreamConfig,
        sha256: Option<&str>,
    ) -> EnvsResult<String> {
        let version = version.require_pinned(self.toolchain())?;
        let sha256 = sha256.ok_or_else(|| EnvsError::Internal("go flake needs a hash".to_string()))?;
        let url = join_url(&upstream.go, &artifact_name(version, arch));

        TEMPLATE.render(&[
            ("version", version),
            ("system", arch.nix_system()),
            ("url", &url),
            ("sha256", sha256),
            ("packages", &package_lines(PACKAGES, 8)),
        ])
    }
}
