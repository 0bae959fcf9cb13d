//! Download-and-hash resolution
//!
//! For upstreams that publish no checksum list, the artifact itself is
//! fetched and hashed as it streams in. Bytes are fed to SHA-256 and then
//! dropped, so memory use stays at one read buffer regardless of size.

use super::HttpClient;
use crate::error::{EnvsError, EnvsResult};
use indicatif::ProgressBar;
use sha2::{Digest, Sha256};
use std::io::{self, Write};
use tracing::debug;

/// Digest of a fully downloaded artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDigest {
    /// Lowercase hex SHA-256
    pub sha256: String,
    /// Bytes received
    pub size: u64,
}

/// Write sink that hashes everything and keeps nothing
struct HashingSink {
    hasher: Sha256,
    written: u64,
}

impl HashingSink {
    fn new() -> Self {
        Self {
            hasher: Sha256::new(),
            written: 0,
        }
    }

    fn finish(self) -> DownloadDigest {
        DownloadDigest {
            sha256: hex::encode(self.hasher.finalize()),
            size: self.written,
        }
    }
}

impl Write for HashingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.hasher.update(buf);
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Download `url` and compute its SHA-256.
///
/// `progress` receives the content length (when the server sends one) and
/// is advanced as bytes arrive.
pub async fn resolve_download(
    http: &HttpClient,
    url: &str,
    what: &str,
    progress: ProgressBar,
) -> EnvsResult<DownloadDigest> {
    let agent = http.agent();
    let url = url.to_string();
    let what = what.to_string();

    tokio::task::spawn_blocking(move || -> EnvsResult<DownloadDigest> {
        debug!("GET {} (streaming)", url);
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

        let length = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        if let Some(length) = length {
            progress.set_length(length);
        }

        let mut reader = progress.wrap_read(response.body_mut().as_reader());
        let mut sink = HashingSink::new();
        io::copy(&mut reader, &mut sink)
            .map_err(|e| EnvsError::io(format!("downloading {}", url), e))?;

        let digest = sink.finish();
        debug!("Downloaded {} bytes from {}", digest.size, url);
        Ok(digest)
    })
    .await
    .map_err(|e| EnvsError::Internal(format!("HTTP worker failed: {}", e)))?
}
