//! Upstream hash resolution
//!
//! Three strategies pin a release artifact:
//!
//! | Strategy | Used by | Network |
//! |----------|---------|---------|
//! | Checksum manifest (`SHASUMS256.txt`) | nodejs, bun | one small GET |
//! | Per-artifact digest file (`<file>.sha256`) | go | one small GET |
//! | Download and hash locally | python | full artifact, streamed |
//!
//! Rust delegates pinning to `rust-overlay` and never reaches this module.
//!
//! All requests are blocking `ureq` calls moved onto tokio's blocking pool,
//! one at a time. Timeouts come from `[network]` in the config.

pub mod download;
pub mod manifest;

pub use download::{resolve_download, DownloadDigest};
pub use manifest::{find_hash, resolve_digest_file, resolve_manifest};

use crate::config::schema::NetworkConfig;
use crate::error::{EnvsError, EnvsResult};
use crate::ui::{self, DownloadProgress, TaskSpinner, UiContext};
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

/// Where a toolchain's artifact hash comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinSource {
    /// Checksum list covering many artifacts
    Manifest {
        url: String,
        version: String,
        artifact: String,
        /// Human label, e.g. `Node.js v20.11.0`
        label: String,
    },
    /// One digest file per artifact
    DigestFile {
        url: String,
        version: String,
        artifact: String,
        label: String,
    },
    /// No published hash; download the artifact and hash it
    Download { url: String, label: String },
    /// Pinning happens inside the flake through an overlay input
    Delegated { overlay: String },
}

/// Resolve a pin to a hex SHA-256, or `None` for delegated pins
pub async fn resolve_pin(
    http: &HttpClient,
    source: &PinSource,
    ctx: &UiContext,
) -> EnvsResult<Option<String>> {
    match source {
        PinSource::Manifest {
            url,
            version,
            artifact,
            label,
        } => {
            let mut spinner = TaskSpinner::new(ctx);
            spinner.start(&format!("Fetching hash for {}...", label));
            match resolve_manifest(http, url, version, artifact, label).await {
                Ok(hash) => {
                    spinner.stop(&format!("Found hash: {}", hash));
                    Ok(Some(hash))
                }
                Err(e) => {
                    spinner.stop_error(&format!("No hash for {}", artifact));
                    Err(e)
                }
            }
        }
        PinSource::DigestFile {
            url,
            version,
            artifact,
            label,
        } => {
            let mut spinner = TaskSpinner::new(ctx);
            spinner.start(&format!("Fetching hash for {}...", label));
            match resolve_digest_file(http, url, version, artifact, label).await {
                Ok(hash) => {
                    spinner.stop(&format!("Found hash: {}", hash));
                    Ok(Some(hash))
                }
                Err(e) => {
                    spinner.stop_error(&format!("No hash at {}", url));
                    Err(e)
                }
            }
        }
        PinSource::Download { url, label } => {
            ui::step_info(
                ctx,
                &format!("Fetching {} to calculate hash (this may take a moment)", label),
            );
            let progress = DownloadProgress::new(ctx, label);
            let result = resolve_download(http, url, label, progress.bar()).await;
            progress.finish();

            let digest = result?;
            ui::step_ok(
                ctx,
                &format!(
                    "Downloaded {}. Hash: {}",
                    ui::format_mib(digest.size),
                    digest.sha256
                ),
            );
            Ok(Some(digest.sha256))
        }
        PinSource::Delegated { overlay } => {
            debug!("Pinning delegated to {}", overlay);
            Ok(None)
        }
    }
}

/// Blocking HTTP client with configured timeouts
#[derive(Clone)]
pub struct HttpClient {
    agent: Agent,
}

impl HttpClient {
    /// Build a client from network settings
    pub fn new(config: &NetworkConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_connect(Some(Duration::from_secs(config.connect_timeout_secs)))
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }

    /// GET `url` and return the body as text.
    ///
    /// `what` names the thing being looked up for error messages.
    pub async fn get_text(&self, url: &str, what: &str) -> EnvsResult<String> {
        let agent = self.agent.clone();
        let url = url.to_string();
        let what = what.to_string();

        tokio::task::spawn_blocking(move || -> EnvsResult<String> {
            debug!("GET {}", url);
            let mut response = agent
                .get(url.as_str())
                .call()
                .map_err(|e| EnvsError::network(&url, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(EnvsError::RemoteNotFound {
                    what,
                    url,
                    status: status.as_u16(),
                });
            }

            response
                .body_mut()
                .read_to_string()
                .map_err(|e| EnvsError::network(&url, e))
        })
        .await
        .map_err(|e| EnvsError::Internal(format!("HTTP worker failed: {}", e)))?
    }

    pub(crate) fn agent(&self) -> Agent {
        self.agent.clone()
    }
}
