mod cache;
mod download;
pub(crate) mod http;
mod metadata;
mod report;
mod sync;
mod variant;

pub use cache::{sha256_hex, staging_path, AssetCache, CacheError, DEFAULT_MIN_VALID_BYTES};
pub use download::{download_asset, DownloadError, DownloadOutcome};
pub use http::{FetchError, Fetcher, HttpFetcher};
pub use metadata::{MetadataResolver, ResolveError};
pub use report::{ReportEntry, SyncOutcome, SyncReport};
pub use sync::FontSync;
pub use variant::{asset_filename, variant_filter, VariantDescriptor, Weight, ASSET_EXTENSION};
