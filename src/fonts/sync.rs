use std::collections::HashSet;

use super::{
    cache::AssetCache,
    download::download_asset,
    http::Fetcher,
    metadata::MetadataResolver,
    report::{SyncOutcome, SyncReport},
    variant::{variant_filter, Weight},
};
use crate::core::settings::SyncConfig;

/// Drives one sync pass: resolve each font, then fetch every missing weight.
///
/// Fonts and weights are independent work items. Every failure is folded into
/// the report at the smallest scope it affects and the pass carries on.
pub struct FontSync<F> {
    resolver: MetadataResolver<F>,
    cache: AssetCache,
    fonts: Vec<String>,
    weights: Vec<Weight>,
    subset: String,
}

impl<F: Fetcher> FontSync<F> {
    pub fn new(config: &SyncConfig, fetcher: F) -> Self {
        Self {
            resolver: MetadataResolver::new(fetcher, config.api_base.clone()),
            cache: AssetCache::new(config.output_dir.clone(), config.min_valid_bytes),
            fonts: config.fonts.clone(),
            weights: config.weights.clone(),
            subset: config.subset.clone(),
        }
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    pub fn run(&self) -> SyncReport {
        self.run_fonts(&self.fonts)
    }

    pub fn run_fonts(&self, fonts: &[String]) -> SyncReport {
        let mut report = SyncReport::new();
        if let Err(error) = self.cache.ensure_directory() {
            tracing::warn!("{error}");
        }
        let filter = variant_filter(&self.weights);
        for font in fonts {
            self.sync_font(font, &filter, &mut report);
        }
        report.finish();
        tracing::info!("Font sync finished: {}", report.summary());
        report
    }

    fn sync_font(&self, font: &str, filter: &str, report: &mut SyncReport) {
        tracing::info!("{font}:");
        let variants = match self.resolver.resolve(font, &self.subset, filter) {
            Ok(variants) => variants,
            Err(error) => {
                tracing::warn!("  {font}: failed to fetch metadata: {error}");
                report.record(
                    font,
                    None,
                    SyncOutcome::Failed {
                        reason: error.to_string(),
                    },
                );
                return;
            }
        };

        let mut seen = HashSet::new();
        for variant in &variants {
            let Some((weight, url)) = variant.usable() else {
                continue;
            };
            if !self.weights.contains(&weight) || !seen.insert(weight) {
                continue;
            }
            let outcome = self.sync_weight(font, weight, url);
            report.record(font, Some(weight), outcome);
        }
    }

    fn sync_weight(&self, font: &str, weight: Weight, url: &str) -> SyncOutcome {
        let path = self.cache.path_for(font, weight);
        let filename = path.file_name().map(|name| name.to_string_lossy().into_owned());
        let filename = filename.unwrap_or_default();

        if let Some(size_bytes) = self.cache.valid_size(&path) {
            tracing::info!("  exists: {filename}");
            return SyncOutcome::AlreadyPresent { size_bytes };
        }

        match download_asset(self.resolver.fetcher(), &self.cache, url, &path) {
            Ok(outcome) => {
                tracing::info!(
                    "  downloaded: {filename} {}KB",
                    outcome.size_bytes / 1024
                );
                SyncOutcome::Downloaded {
                    size_bytes: outcome.size_bytes,
                    checksum: outcome.checksum,
                }
            }
            Err(error) => {
                tracing::warn!("  failed: {filename}: {error}");
                SyncOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }
}
