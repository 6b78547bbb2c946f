use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::repository::SettingsRepository;
use crate::error::CatalogError;

// ── GetSettings ──────────────────────────────────────────────────────────────

pub struct GetSettingsUseCase<S: SettingsRepository> {
    pub settings: S,
}

impl<S: SettingsRepository> GetSettingsUseCase<S> {
    pub async fn execute(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        self.settings.all().await
    }
}

// ── UpdateSettings ───────────────────────────────────────────────────────────

pub struct UpdateSettingsUseCase<S: SettingsRepository> {
    pub settings: S,
}

impl<S: SettingsRepository> UpdateSettingsUseCase<S> {
    /// Batch upsert. Null values are silently skipped; everything else is
    /// stringified. Returns the number of keys written.
    pub async fn execute(
        &self,
        entries: serde_json::Map<String, Value>,
    ) -> Result<usize, CatalogError> {
        let entries: Vec<(String, String)> = entries
            .into_iter()
            .filter_map(|(key, value)| stringify(value).map(|v| (key, v)))
            .collect();
        let written = entries.len();
        self.settings.upsert_batch(&entries).await?;
        Ok(written)
    }
}

/// Settings values are always stored as strings; null means "skip".
fn stringify(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
