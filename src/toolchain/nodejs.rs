//! Node.js generator
//!
//! Pins the official prebuilt tarball via `SHASUMS256.txt` from the
//! release directory.

use super::template::{package_lines, Template};
use super::{join_url, ArchTable, Generator, HostArch, Toolchain, Version};
use crate::config::schema::UpstreamConfig;
use crate::error::{EnvsError, EnvsResult};
use crate::resolve::PinSource;

const TEMPLATE: Template = Template::new("nodejs", include_str!("templates/nodejs.nix"));

const ARCH: ArchTable = ArchTable::new("linux-x64", "linux-arm64");

const PACKAGES: &[&str] = &[
    "nodePackages.typescript-language-server",
    "nodePackages.prettier",
    "nodePackages.yarn",
    "nodePackages.pnpm",
    "biome",
    "vscode-langservers-extracted",
];

/// Release tarball name, e.g. `node-v20.11.0-linux-x64.tar.gz`
pub fn artifact_name(version: &str, arch: &HostArch) -> String {
    format!("node-v{}-{}.tar.gz", version, ARCH.token(arch))
}

fn release_url(base: &str, version: &str, file: &str) -> String {
    join_url(base, &format!("v{}/{}", version, file))
}

/// Generator for `nodejs`
pub struct NodeJsGenerator;

impl Generator for NodeJsGenerator {
    fn toolchain(&self) -> Toolchain {
        Toolchain::NodeJs
    }

    fn pin_source(
        &self,
        version: &Version,
        arch: &HostArch,
        upstream: &UpstreamConfig,
    ) -> EnvsResult<PinSource> {
        let version = version.require_pinned(self.toolchain())?;
        Ok(PinSource::Manifest {
            url: release_url(&upstream.nodejs, version, "SHASUMS256.txt"),
            version: version.to_string(),
            artifact: artifact_name(version, arch),
            label: format!("Node.js v{}", version),
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
        let sha256 = sha256.ok_or_else(|| EnvsError::Internal("nodejs flake needs a hash".to_string()))?;
        let url = release_url(&upstream.nodejs, version, &artifact_name(version, arch));

        TEMPLATE.render(&[
            ("version", version),
            ("system", arch.nix_system()),
            ("url", &url),
            ("sha256", sha256),
            ("packages", &package_lines(PACKAGES, 8)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "abc123def4567890abc123def4567890abc123def4567890abc123def4567890";

    fn pinned(v: &str) -> Version {
        Version::Pinned(v.to_string())
    }

    #[test]
    fn artifact_name_per_arch() {
        assert_eq!(
            artifact_name("20.11.0", &HostArch::X86_64),
            "node-v20.11.0-linux-x64.tar.gz"
        );
        assert_eq!(
            artifact_name("20.11.0", &HostArch::Aarch64),
            "node-v20.11.0-linux-arm64.tar.gz"
        );
    }

    #[test]
    fn pin_source_is_shasums_manifest() {
        let source = NodeJsGenerator
            .pin_source(&pinned("20.11.0"), &HostArch::X86_64, &UpstreamConfig::default())
            .unwrap();
        assert_eq!(
            source,
            PinSource::Manifest {
                url: "https://nodejs.org/dist/v20.11.0/SHASUMS256.txt".to_string(),
                version: "20.11.0".to_string(),
                artifact: "node-v20.11.0-linux-x64.tar.gz".to_string(),
                label: "Node.js v20.11.0".to_string(),
            }
        );
    }

    #[test]
    fn latest_is_rejected() {
        let err = NodeJsGenerator
            .pin_source(&Version::Latest, &HostArch::X86_64, &UpstreamConfig::default())
            .unwrap_err();
        assert!(matches!(err, EnvsError::Usage(_)));
    }

    #[test]
    fn render_embeds_pin() {
        let text = NodeJsGenerator
            .render(&pinned("20.11.0"), &HostArch::X86_64, &UpstreamConfig::default(), Some(HASH))
            .unwrap();

        assert!(text.contains("description = \"NodeJS 20.11.0 Custom Environment\";"));
        assert!(text.contains(
            "url = \"https://nodejs.org/dist/v20.11.0/node-v20.11.0-linux-x64.tar.gz\";"
        ));
        assert!(text.contains(&format!("sha256 = \"{}\";", HASH)));
        assert!(text.contains("system = \"x86_64-linux\";"));
        assert!(text.contains("        pkgs.nodePackages.pnpm\n"));
        assert!(!text.contains('@'));
    }

    #[test]
    fn render_arm64_uses_node_naming() {
        let text = NodeJsGenerator
            .render(&pinned("20.11.0"), &HostArch::Aarch64, &UpstreamConfig::default(), Some(HASH))
            .unwrap();
        assert!(text.contains("node-v20.11.0-linux-arm64.tar.gz"));
        assert!(text.contains("system = \"aarch64-linux\";"));
    }

    #[test]
    fn render_without_hash_is_internal_error() {
        let err = NodeJsGenerator
            .render(&pinned("20.11.0"), &HostArch::X86_64, &UpstreamConfig::default(), None)
            .unwrap_err();
        assert!(matches!(err, EnvsError::Internal(_)));
    }

    #[test]
    fn template_slots() {
        let slots: Vec<_> = TEMPLATE.slots().into_iter().collect();
        assert_eq!(slots, vec!["packages", "sha256", "system", "url", "version"]);
    }
}
