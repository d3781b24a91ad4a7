use serde::Deserialize;
use serde_json::Value;

use super::{
    http::{FetchError, Fetcher},
    variant::VariantDescriptor,
};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid font identifier {0:?}")]
    InvalidFont(String),

    #[error("fetch metadata: {0}")]
    Fetch(#[from] FetchError),

    #[error("malformed metadata: {0}")]
    Malformed(#[from] serde_json::Error),
}

// Entries stay untyped so one odd entry only loses itself.
#[derive(Debug, Deserialize)]
struct FontMetadata {
    #[serde(default)]
    variants: Vec<Value>,
}

pub struct MetadataResolver<F> {
    fetcher: F,
    api_base: String,
}

impl<F: Fetcher> MetadataResolver<F> {
    pub fn new(fetcher: F, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { fetcher, api_base }
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[must_use]
    pub fn metadata_url(&self, font: &str, subset: &str, variant_filter: &str) -> String {
        format!(
            "{}/{}?subsets={}&variants={}",
            self.api_base, font, subset, variant_filter
        )
    }

    /// Lists the variants the service reports for `font`. The service may
    /// return more variants than `variant_filter` asked for.
    pub fn resolve(
        &self,
        font: &str,
        subset: &str,
        variant_filter: &str,
    ) -> Result<Vec<VariantDescriptor>, ResolveError> {
        if !is_valid_font_id(font) {
            return Err(ResolveError::InvalidFont(font.to_string()));
        }
        let body = self
            .fetcher
            .get(&self.metadata_url(font, subset, variant_filter))?;
        parse_variants(&body)
    }
}

fn parse_variants(body: &[u8]) -> Result<Vec<VariantDescriptor>, ResolveError> {
    let metadata: FontMetadata = serde_json::from_slice(body)?;
    Ok(metadata
        .variants
        .iter()
        .filter_map(|raw| {
            let variant_id = non_empty_str(raw, "id")?;
            let asset_url = non_empty_str(raw, "woff2")?;
            Some(VariantDescriptor {
                variant_id: variant_id.to_string(),
                asset_url: Some(asset_url.to_string()),
            })
        })
        .collect())
}

fn non_empty_str<'a>(entry: &'a Value, field: &str) -> Option<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Font ids name files in the cache directory, so they must be a single
/// plain path segment.
fn is_valid_font_id(font: &str) -> bool {
    !font.trim().is_empty()
        && font != "."
        && !font.contains("..")
        && !font.contains(['/', '\\'])
}
