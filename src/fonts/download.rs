use std::path::{Path, PathBuf};

use super::{
    cache::{sha256_hex, AssetCache, CacheError},
    http::{FetchError, Fetcher},
};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("download: {0}")]
    Fetch(#[from] FetchError),

    #[error("store: {0}")]
    Store(#[from] CacheError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub final_path: PathBuf,
    pub size_bytes: u64,
    pub checksum: String,
}

/// Fetches `url` and stores the body at `destination`. The body is accepted
/// as-is; no font-format checks.
pub fn download_asset<F: Fetcher>(
    fetcher: &F,
    cache: &AssetCache,
    url: &str,
    destination: &Path,
) -> Result<DownloadOutcome, DownloadError> {
    let bytes = fetcher.get(url)?;
    let checksum = sha256_hex(&bytes);
    let size_bytes = cache.store(destination, &bytes)?;
    Ok(DownloadOutcome {
        final_path: destination.to_path_buf(),
        size_bytes,
        checksum,
    })
}
