//! Bun generator
//!
//! Release assets live on GitHub under the `bun-v<version>` tag alongside a
//! `SHASUMS256.txt`. Bun calls 64-bit ARM `aarch64`, unlike Node's `arm64`.

use super::template::{package_lines, Template};
use super::{join_url, ArchTable, Generator, HostArch, Toolchain, Version};
use crate::config::schema::UpstreamConfig;
use crate::error::{EnvsError, EnvsResult};
use crate::resolve::PinSource;

const TEMPLATE: Template = Template::new("bun", include_str!("templates/bun.nix"));

const ARCH: ArchTable = ArchTable::new("x64", "aarch64");

const PACKAGES: &[&str] = &[
    "nodePackages.typescript-language-server",
    "nodePackages.prettier",
    "biome",
    "vscode-langservers-extracted",
];

/// Release asset name, e.g. `bun-linux-aarch64.zip`.
///
/// Bun asset names carry no version; the tag directory does.
pub fn artifact_name(arch: &HostArch) -> String {
    format!("bun-linux-{}.zip", ARCH.token(arch))
}

fn release_url(base: &str, version: &str, file: &str) -> String {
    join_url(base, &format!("bun-v{}/{}", version, file))
}

/// Generator for `bun`
pub struct BunGenerator;

impl Generator for BunGenerator {
    fn toolchain(&self) -> Toolchain {
        Toolchain::Bun
    }

    fn pin_source(
        &self,
        version: &Version,
        arch: &HostArch,
        upstream: &UpstreamConfig,
    ) -> EnvsResult<PinSource> {
        let version = version.require_pinned(self.toolchain())?;
        Ok(PinSource::Manifest {
            url: release_url(&upstream.bun, version, "SHASUMS256.txt"),
            version: version.to_string(),
            artifact: artifact_name(arch),
            label: format!("Bun v{}", version),
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
        let sha256 = sha256.ok_or_else(|| EnvsError::Internal("bun flake needs a hash".to_string()))?;
        let url = release_url(&upstream.bun, version, &artifact_name(arch));

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

    fn pinned(v: &str) -> Version {
        Version::Pinned(v.to_string())
    }

    #[test]
    fn artifact_name_uses_bun_arch_tokens() {
        assert_eq!(artifact_name(&HostArch::X86_64), "bun-linux-x64.zip");
        assert_eq!(artifact_name(&HostArch::Aarch64), "bun-linux-aarch64.zip");
    }

    #[test]
    fn pin_source_is_release_manifest() {
        let source = BunGenerator
            .pin_source(&pinned("1.1.8"), &HostArch::Aarch64, &UpstreamConfig::default())
            .unwrap();
        match source {
            PinSource::Manifest { url, artifact, .. } => {
                assert_eq!(
                    url,
                    "https://github.com/oven-sh/bun/releases/download/bun-v1.1.8/SHASUMS256.txt"
                );
                assert_eq!(artifact, "bun-linux-aarch64.zip");
            }
            other => panic!("expected Manifest, got {:?}", other),
        }
    }

    #[test]
    fn render_embeds_pin() {
        let text = BunGenerator
            .render(&pinned("1.1.8"), &HostArch::X86_64, &UpstreamConfig::default(), Some("beef"))
            .unwrap();
        assert!(text.contains(
            "url = \"https://github.com/oven-sh/bun/releases/download/bun-v1.1.8/bun-linux-x64.zip\";"
        ));
        assert!(text.contains("sha256 = \"beef\";"));
        assert!(text.contains("nativeBuildInputs = [ pkgs.unzip pkgs.autoPatchelfHook ];"));
    }

    #[test]
    fn template_slots() {
        let slots: Vec<_> = TEMPLATE.slots().into_iter().collect();
        assert_eq!(slots, vec!["packages", "sha256", "system", "url", "version"]);
    }
}
