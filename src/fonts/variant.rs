use std::fmt;

use serde::{Deserialize, Serialize};

/// Weights this tool syncs. The metadata service calls 400 "regular"; every
/// local name uses the numeric form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weight {
    #[serde(rename = "400", alias = "regular")]
    Regular,
    #[serde(rename = "600")]
    SemiBold,
    #[serde(rename = "700")]
    Bold,
}

impl Weight {
    pub const ALL: [Weight; 3] = [Weight::Regular, Weight::SemiBold, Weight::Bold];

    /// Maps a remote variant id onto a supported weight. Styles and weights
    /// outside the set (`"300"`, `"italic"`, `"700italic"`) yield `None`.
    #[must_use]
    pub fn from_variant_id(id: &str) -> Option<Self> {
        match id {
            "regular" => Some(Weight::Regular),
            "600" => Some(Weight::SemiBold),
            "700" => Some(Weight::Bold),
            _ => None,
        }
    }

    #[must_use]
    pub fn variant_id(self) -> &'static str {
        match self {
            Weight::Regular => "regular",
            Weight::SemiBold => "600",
            Weight::Bold => "700",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Weight::Regular => "400",
            Weight::SemiBold => "600",
            Weight::Bold => "700",
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the metadata response's `variants` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDescriptor {
    pub variant_id: String,
    pub asset_url: Option<String>,
}

impl VariantDescriptor {
    /// Supported weight plus a non-empty URL, or `None` if the driver should
    /// ignore this variant.
    #[must_use]
    pub fn usable(&self) -> Option<(Weight, &str)> {
        let weight = Weight::from_variant_id(&self.variant_id)?;
        let url = self.asset_url.as_deref().filter(|url| !url.is_empty())?;
        Some((weight, url))
    }
}

pub const ASSET_EXTENSION: &str = "woff2";

#[must_use]
pub fn asset_filename(font: &str, weight: Weight) -> String {
    format!("{font}-{weight}.{ASSET_EXTENSION}")
}

#[must_use]
pub fn variant_filter(weights: &[Weight]) -> String {
    weights
        .iter()
        .map(|weight| weight.variant_id())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_ids_normalize_to_numeric_weights() {
        let names: Vec<_> = ["regular", "600", "700"]
            .iter()
            .map(|id| Weight::from_variant_id(id).map(Weight::as_str))
            .collect();
        assert_eq!(names, vec![Some("400"), Some("600"), Some("700")]);
    }

    #[test]
    fn unsupported_ids_are_rejected() {
        for id in ["300", "italic", "700italic", "400", ""] {
            assert_eq!(Weight::from_variant_id(id), None, "{id}");
        }
    }

    #[test]
    fn filename_uses_canonical_weight() {
        assert_eq!(asset_filename("open-sans", Weight::Regular), "open-sans-400.woff2");
        assert_eq!(asset_filename("lato", Weight::Bold), "lato-700.woff2");
    }

    #[test]
    fn filter_joins_remote_ids() {
        assert_eq!(variant_filter(&Weight::ALL), "regular,600,700");
    }

    #[test]
    fn descriptor_without_url_is_unusable() {
        let missing = VariantDescriptor {
            variant_id: "600".into(),
            asset_url: None,
        };
        let empty = VariantDescriptor {
            variant_id: "600".into(),
            asset_url: Some(String::new()),
        };
        assert!(missing.usable().is_none());
        assert!(empty.usable().is_none());
    }

    #[test]
    fn weights_serialize_numerically() {
        let json = serde_json::to_string(&Weight::ALL).unwrap();
        assert_eq!(json, r#"["400","600","700"]"#);
        let parsed: Vec<Weight> = serde_json::from_str(r#"["regular","700"]"#).unwrap();
        assert_eq!(parsed, vec![Weight::Regular, Weight::Bold]);
    }
}
