//! Python generator
//!
//! python.org ships signed source tarballs but no checksum list we can
//! parse, so the tarball is downloaded and hashed locally. The flake builds
//! CPython from source, hence no architecture token in the URL.

use super::template::{package_lines, Template};
use super::{join_url, Generator, HostArch, Toolchain, Version};
use crate::config::schema::UpstreamConfig;
use crate::error::{EnvsError, EnvsResult};
use crate::resolve::PinSource;

const TEMPLATE: Template = Template::new("python", include_str!("templates/python.nix"));

const PACKAGES: &[&str] = &[
    "python3Packages.pip",
    "python3Packages.virtualenv",
    "vscode-langservers-extracted",
    "codespell",
];

/// Source tarball URL, e.g. `.../3.12.1/Python-3.12.1.tar.xz`
pub fn source_url(base: &str, version: &str) -> String {
    join_url(base, &format!("{}/Python-{}.tar.xz", version, version))
}

/// Generator for `python`
pub struct PythonGenerator;

impl Generator for PythonGenerator {
    fn toolchain(&self) -> Toolchain {
        Toolchain::Python
    }

    fn pin_source(
        &self,
        version: &Version,
        _arch: &HostArch,
        upstream: &UpstreamConfig,
    ) -> EnvsResult<PinSource> {
        let version = version.require_pinned(self.toolchain())?;
        Ok(PinSource::Download {
            url: source_url(&upstream.python, version),
            label: format!("Python v{}", version),
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
        let sha256 =
            sha256.ok_or_else(|| EnvsError::Internal("python flake needs a hash".to_string()))?;

        TEMPLATE.render(&[
            ("version", version),
            ("system", arch.nix_system()),
            ("url", &source_url(&upstream.python, version)),
            ("sha256", sha256),
            ("packages", &package_lines(PACKAGES, 8)),
        ])
    }
}
