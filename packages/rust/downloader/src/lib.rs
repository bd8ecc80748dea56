//! Idempotent PDF download management.
//!
//! Materializes the `download_dir/season_year/gp_with_underscores/filename`
//! layout and fetches each document at most once: an existing local file is
//! skipped unless the caller forces a re-fetch. Bytes are buffered fully in
//! memory and written through a `.part` temp file plus rename, so a crash
//! mid-download never leaves a corrupt destination file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use paddockdocs_shared::{DocumentRef, PaddockError, Result, sanitize_component};

/// User-Agent string for download requests.
const USER_AGENT: &str = concat!("paddockdocs/", env!("CARGO_PKG_VERSION"));

/// Timeout for a single document fetch.
const FETCH_TIMEOUT_SECS: u64 = 60;

/// Sequential, idempotent document downloader.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    /// Create a downloader with its own HTTP client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| PaddockError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Download every document into the effective directory, sequentially.
    ///
    /// The effective directory is `download_dir/season_year/gp` (GP spaces
    /// replaced by underscores) when both are given, else `download_dir`
    /// itself. Existing files are skipped unless `force` is set. A single
    /// document's fetch failure aborts the batch and propagates. Returns
    /// the input refs for chaining.
    #[instrument(skip_all, fields(count = refs.len(), force))]
    pub async fn download_all(
        &self,
        refs: &[DocumentRef],
        download_dir: &Path,
        season_year: Option<&str>,
        gp: Option<&str>,
        force: bool,
    ) -> Result<Vec<DocumentRef>> {
        let dir = download_dir_for(download_dir, season_year, gp)?;
        std::fs::create_dir_all(&dir).map_err(|e| PaddockError::io(&dir, e))?;

        for doc in refs {
            if !is_safe_filename(&doc.filename) {
                warn!(filename = %doc.filename, "unsafe filename, skipping");
                continue;
            }

            let path = dir.join(&doc.filename);
            if path.exists() && !force {
                info!(filename = %doc.filename, "skipping already downloaded");
                continue;
            }

            let bytes = self.fetch_bytes(&doc.url).await?;
            write_atomically(&path, &bytes)?;
            info!(filename = %doc.filename, size = bytes.len(), "downloaded");
        }

        Ok(refs.to_vec())
    }

    /// Fetch one document's bytes, fully buffered in memory.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(%url, "fetching document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PaddockError::Fetch(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaddockError::Fetch(format!("{url}: HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PaddockError::Fetch(format!("{url}: failed to read body: {e}")))?;

        Ok(bytes.to_vec())
    }
}

/// Resolve the effective download directory for a (season, gp) pair.
///
/// Deterministic: same inputs always produce the same path, which is what
/// makes skip-if-exists idempotence work across runs. Callers listing
/// already-downloaded documents use the same resolution.
pub fn download_dir_for(
    download_dir: &Path,
    season_year: Option<&str>,
    gp: Option<&str>,
) -> Result<PathBuf> {
    match (season_year, gp) {
        (Some(year), Some(gp)) => Ok(download_dir
            .join(sanitize_component(year)?)
            .join(sanitize_component(gp)?)),
        _ => Ok(download_dir.to_path_buf()),
    }
}

/// Reject filenames that could escape the download directory.
fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0'])
}

/// Write bytes via a `.part` sibling and rename into place.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("part");
    std::fs::write(&tmp, bytes).map_err(|e| PaddockError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| PaddockError::io(path, e))?;
    Ok(())
}
