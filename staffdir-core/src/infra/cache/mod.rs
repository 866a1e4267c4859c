//! On-disk image cache infra.
//!
//! Blobs are stored as flat files named by the SHA-256 digest of the
//! locator they were fetched from. There is no index and no sidecar
//! metadata; a file's presence is the only existence signal.

pub mod disk_image_cache;
pub mod key;
pub(crate) mod stats;

pub use disk_image_cache::*;
pub use key::*;
pub use stats::DiskImageCacheStatsSnapshot;
