use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::variant::Weight;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SyncOutcome {
    #[serde(rename_all = "camelCase")]
    AlreadyPresent { size_bytes: u64 },
    #[serde(rename_all = "camelCase")]
    Downloaded { size_bytes: u64, checksum: String },
    Failed { reason: String },
}

impl SyncOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, SyncOutcome::Failed { .. })
    }
}

/// Outcome for one (font, weight). `weight` is `None` when the font's
/// metadata could not be resolved at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub font: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    #[serde(flatten)]
    pub outcome: SyncOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub finished_at: Option<OffsetDateTime>,
    pub entries: Vec<ReportEntry>,
}

impl Default for SyncReport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncReport {
    pub fn new() -> Self {
        Self {
            started_at: OffsetDateTime::now_utc(),
            finished_at: None,
            entries: vec![],
        }
    }

    pub fn record(&mut self, font: &str, weight: Option<Weight>, outcome: SyncOutcome) {
        self.entries.push(ReportEntry {
            font: font.to_string(),
            weight,
            outcome,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(OffsetDateTime::now_utc());
    }

    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.count(|outcome| matches!(outcome, SyncOutcome::Downloaded { .. }))
    }

    #[must_use]
    pub fn already_present(&self) -> usize {
        self.count(|outcome| matches!(outcome, SyncOutcome::AlreadyPresent { .. }))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(SyncOutcome::is_failure)
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|entry| entry.outcome.is_failure())
    }

    pub fn entry(&self, font: &str, weight: Option<Weight>) -> Option<&ReportEntry> {
        self.entries
            .iter()
            .find(|entry| entry.font == font && entry.weight == weight)
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "downloaded {}, already present {}, failed {}",
            self.downloaded(),
            self.already_present(),
            self.failed()
        )
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create dir {parent:?}"))?;
        }
        let serialized = serde_json::to_vec_pretty(self).context("serialize sync report")?;
        fs::write(path, serialized).with_context(|| format!("write sync report to {path:?}"))?;
        Ok(())
    }

    fn count(&self, predicate: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}
