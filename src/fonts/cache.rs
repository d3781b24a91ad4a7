use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};

use super::variant::{asset_filename, Weight};

/// Files at or below this size are leftovers of an interrupted download.
pub const DEFAULT_MIN_VALID_BYTES: u64 = 1000;

#[derive(Debug, thiserror::Error)]
#[error("{action} {}: {source}", path.display())]
pub struct CacheError {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl CacheError {
    fn new(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Directory of downloaded font files, one per (font, weight).
///
/// Presence plus size is the only state; there is no manifest. A file that
/// is large enough is trusted even if the remote asset has since changed.
#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
    min_valid_bytes: u64,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>, min_valid_bytes: u64) -> Self {
        Self {
            root: root.into(),
            min_valid_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    pub fn ensure_directory(&self) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root)
            .map_err(|err| CacheError::new("create cache directory", &self.root, err))
    }

    #[must_use]
    pub fn path_for(&self, font: &str, weight: Weight) -> PathBuf {
        self.root.join(asset_filename(font, weight))
    }

    /// Size of a valid cached file, or `None` if it must be downloaded.
    #[must_use]
    pub fn valid_size(&self, path: &Path) -> Option<u64> {
        let metadata = fs::metadata(path).ok()?;
        (metadata.is_file() && metadata.len() > self.min_valid_bytes).then(|| metadata.len())
    }

    #[must_use]
    pub fn needs_fetch(&self, path: &Path) -> bool {
        self.valid_size(path).is_none()
    }

    /// Writes `bytes` to a sibling staging file and renames it into place,
    /// so `path` either keeps its old content or holds all of `bytes`.
    pub fn store(&self, path: &Path, bytes: &[u8]) -> Result<u64, CacheError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| CacheError::new("create asset directory", parent, err))?;
        }
        let staging = staging_path(path);
        if let Err(error) = write_synced(&staging, bytes) {
            let _ = fs::remove_file(&staging);
            return Err(error);
        }
        if let Err(err) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(CacheError::new("move staged asset to", path, err));
        }
        Ok(bytes.len() as u64)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let mut file =
        File::create(path).map_err(|err| CacheError::new("create staging file", path, err))?;
    file.write_all(bytes)
        .map_err(|err| CacheError::new("write staging file", path, err))?;
    file.sync_all()
        .map_err(|err| CacheError::new("flush staging file", path, err))
}

#[must_use]
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("asset"));
    name.push(".part");
    path.with_file_name(name)
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
