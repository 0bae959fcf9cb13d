//! Checksum manifest lookup
//!
//! Upstream checksum manifests list one artifact per line, hash first:
//!
//! ```text
//! 2b1d0fb1a3a4...  node-v20.11.0-linux-x64.tar.gz
//! ```
//!
//! A line matches when it contains the artifact filename anywhere in its
//! text. Matching is substring containment, not field equality, so a
//! filename that is a prefix of another (`bun-linux-x64.zip` vs
//! `bun-linux-x64-baseline.zip`) is disambiguated only by the extension
//! being part of the needle. The first matching line wins.

use super::HttpClient;
use crate::error::{EnvsError, EnvsResult};
use tracing::debug;

/// Find the hash for `artifact` in a manifest body
pub fn find_hash(manifest: &str, artifact: &str) -> Option<String> {
    manifest
        .lines()
        .filter(|line| line.contains(artifact))
        .find_map(|line| line.split_whitespace().next())
        .map(str::to_string)
}

/// Fetch a checksum manifest and pick the hash for `artifact`
pub async fn resolve_manifest(
    http: &HttpClient,
    url: &str,
    version: &str,
    artifact: &str,
    what: &str,
) -> EnvsResult<String> {
    let body = http.get_text(url, what).await?;
    debug!("Manifest {} has {} lines", url, body.lines().count());

    find_hash(&body, artifact).ok_or_else(|| EnvsError::HashNotFound {
        version: version.to_string(),
        artifact: artifact.to_string(),
    })
}

/// Fetch a single-artifact digest file (`<artifact>.sha256`).
///
/// These files carry just the hex digest, optionally followed by the
/// filename, so the first token of the body is the hash.
pub async fn resolve_digest_file(
    http: &HttpClient,
    url: &str,
    version: &str,
    artifact: &str,
    what: &str,
) -> EnvsResult<String> {
    let body = http.get_text(url, what).await?;

    body.split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| EnvsError::HashNotFound {
            version: version.to_string(),
            artifact: artifact.to_string(),
        })
}
