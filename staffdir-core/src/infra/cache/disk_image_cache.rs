use std::{
    io::Write,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;

use super::{
    key::{ImageCacheKey, derive_key},
    stats::{DiskImageCacheStats, DiskImageCacheStatsSnapshot},
};
use crate::error::{DirectoryError, Result};

/// Root directory for cached image blobs.
///
/// Every file directly under the root is a blob named by its cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageCacheRoot(PathBuf);

impl ImageCacheRoot {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    /// The platform cache directory for this application, e.g.
    /// `~/.cache/staffdir/images` on Linux.
    pub fn platform_default() -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "staffdir", "staffdir").ok_or_else(|| {
                DirectoryError::CacheRootUnavailable(
                    "no home directory for this user".to_string(),
                )
            })?;
        Ok(Self(proj_dirs.cache_dir().join("images")))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

/// File-backed image cache keyed by the digest of each image's locator.
///
/// The cache is the only reader and writer of its root. Entries never
/// expire; concurrent writers of the same key overwrite each other, which
/// is harmless because the content behind a locator is assumed immutable.
#[derive(Debug)]
pub struct DiskImageCache {
    root: ImageCacheRoot,
    stats: DiskImageCacheStats,
}

impl DiskImageCache {
    pub fn new(root: ImageCacheRoot) -> Self {
        Self {
            root,
            stats: DiskImageCacheStats::default(),
        }
    }

    pub fn root(&self) -> &ImageCacheRoot {
        &self.root
    }

    pub fn path_for_key(&self, key: &ImageCacheKey) -> PathBuf {
        self.root.as_path().join(key.as_str())
    }

    pub fn path_for(&self, locator: &str) -> PathBuf {
        self.path_for_key(&derive_key(locator))
    }

    pub fn stats_snapshot(&self) -> DiskImageCacheStatsSnapshot {
        self.stats.snapshot()
    }

    /// Cached bytes for `locator`, or `None` when nothing usable is stored.
    ///
    /// A missing file is a normal miss. Unreadable files are logged and also
    /// reported as a miss so the caller falls back to the network.
    pub async fn lookup(&self, locator: &str) -> Option<Vec<u8>> {
        let key = derive_key(locator);
        let path = self.path_for_key(&key);

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                self.stats.on_hit();
                log::debug!(
                    "disk image cache hit; key={}, bytes={}",
                    key,
                    bytes.len()
                );
                Some(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.stats.on_miss();
                log::debug!("disk image cache miss; key={}", key);
                None
            }
            Err(e) => {
                self.stats.on_read_error();
                log::warn!(
                    "disk image cache read failed; key={}, path={}, err={}",
                    key,
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Persist `bytes` for `locator`, replacing any previous entry.
    ///
    /// Bytes go to a temp file in the root first and are renamed into
    /// place, so a failed write never leaves a truncated entry behind.
    pub async fn store(&self, locator: &str, bytes: &[u8]) -> Result<PathBuf> {
        let key = derive_key(locator);
        match self.write_atomic(&key, bytes).await {
            Ok(path) => {
                self.stats.on_write_ok();
                log::debug!(
                    "disk image cache write; key={}, bytes={}",
                    key,
                    bytes.len()
                );
                Ok(path)
            }
            Err(e) => {
                self.stats.on_write_err();
                log::warn!(
                    "disk image cache write failed; key={}, err={}",
                    key,
                    e
                );
                Err(e)
            }
        }
    }

    async fn write_atomic(
        &self,
        key: &ImageCacheKey,
        bytes: &[u8],
    ) -> Result<PathBuf> {
        let root = self.root.as_path().to_path_buf();
        let path = self.path_for_key(key);
        let prefix = format!("{key}.tmp-");
        let bytes = bytes.to_vec();

        // Runs to completion even if the caller's future is dropped.
        let task_path = path.clone();
        tokio::task::spawn_blocking(move || {
            write_blocking(&root, &prefix, &task_path, &bytes)
        })
        .await
        .map_err(|join_err| DirectoryError::Filesystem {
            path,
            source: std::io::Error::other(join_err),
        })?
    }
}

/// Write `bytes` to a temp file in `root` and rename it onto `path`.
///
/// The temp file is removed on every failure path.
fn write_blocking(
    root: &Path,
    prefix: &str,
    path: &Path,
    bytes: &[u8],
) -> Result<PathBuf> {
    std::fs::create_dir_all(root).map_err(fs_error(root))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(prefix)
        .tempfile_in(root)
        .map_err(fs_error(root))?;
    tmp.write_all(bytes).map_err(fs_error(tmp.path()))?;
    tmp.as_file().sync_all().map_err(fs_error(tmp.path()))?;

    tmp.persist(path)
        .map_err(|persist_err| fs_error(path)(persist_err.error))?;
    Ok(path.to_path_buf())
}

fn fs_error(at: &Path) -> impl FnOnce(std::io::Error) -> DirectoryError {
    let at = at.to_path_buf();
    move |source| DirectoryError::Filesystem { path: at, source }
}
