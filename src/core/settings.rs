use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::fonts::{Weight, DEFAULT_MIN_VALID_BYTES};

const CONFIG_FILE: &str = "config.json";
pub const ENV_CONFIG: &str = "FONT_SYNC_CONFIG";
pub const ENV_OUTPUT_DIR: &str = "FONT_SYNC_OUTPUT_DIR";

const DEFAULT_API_BASE: &str = "https://gwfh.mranftl.com/api/fonts";
const DEFAULT_OUTPUT_DIR: &str = "astro-theme/public/fonts";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_FONTS: [&str; 12] = [
    "montserrat",
    "comfortaa",
    "roboto",
    "quicksand",
    "oswald",
    "inter",
    "frank-ruhl-libre",
    "raleway",
    "lato",
    "open-sans",
    "nunito",
    "poppins",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    pub api_base: String,
    pub fonts: Vec<String>,
    pub weights: Vec<Weight>,
    pub subset: String,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub min_valid_bytes: u64,
    pub user_agent: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            fonts: DEFAULT_FONTS.iter().map(|font| font.to_string()).collect(),
            weights: Weight::ALL.to_vec(),
            subset: "latin".into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_timeout_secs: 15,
            min_valid_bytes: DEFAULT_MIN_VALID_BYTES,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl SyncConfig {
    /// Reads the config file named by `FONT_SYNC_CONFIG`, or `config.json` in
    /// the platform config directory. A missing or broken file means defaults.
    pub fn load() -> Self {
        let mut config = match resolve_config_path() {
            Some(path) if path.exists() => Self::from_path(&path).unwrap_or_else(|error| {
                tracing::warn!("Ignoring config {}: {error:?}", path.display());
                Self::default()
            }),
            _ => Self::default(),
        };
        if let Some(dir) = std::env::var_os(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("failed reading {path:?}"))?;
        let mut parsed: SyncConfig =
            serde_json::from_slice(&bytes).context("config json could not be parsed")?;
        parsed.weights.sort();
        parsed.weights.dedup();
        Ok(parsed)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(ENV_CONFIG) {
        return Some(PathBuf::from(path));
    }
    let project_dirs = ProjectDirs::from("com", "FontSync", "FontSync")?;
    Some(project_dirs.config_dir().join(CONFIG_FILE))
}
