use crate::errors::AppError;
use crate::models::Report;
use std::{collections::BTreeMap, path::Path};
use tokio::fs;
use tracing::{error, warn};

pub const THEME_KEY: &str = "theme";
pub const REFERENCE_KEY: &str = "lastRelapse";
pub const REPORTS_KEY: &str = "reports";

/// String key-value persistence, read and written as whole values.
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StoreData {
    entries: BTreeMap<String, String>,
}

impl Store for StoreData {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

pub fn load_theme(store: &impl Store) -> String {
    store.get(THEME_KEY).unwrap_or_else(|| "light".to_string())
}

pub fn save_theme(store: &mut impl Store, theme: &str) {
    store.set(THEME_KEY, theme.to_string());
}

pub fn load_reference(store: &impl Store) -> Option<String> {
    store.get(REFERENCE_KEY)
}

pub fn save_reference(store: &mut impl Store, value: &str) {
    store.set(REFERENCE_KEY, value.to_string());
}

pub fn load_reports(store: &impl Store) -> Vec<Report> {
    let Some(raw) = store.get(REPORTS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(reports) => reports,
        Err(err) => {
            warn!("stored report log is malformed, starting empty: {err}");
            Vec::new()
        }
    }
}

pub fn append_report(store: &mut impl Store, report: Report) -> Result<(), AppError> {
    let mut reports = load_reports(store);
    reports.push(report);
    let payload = serde_json::to_string(&reports).map_err(AppError::internal)?;
    store.set(REPORTS_KEY, payload);
    Ok(())
}

pub async fn load_data(path: &Path) -> StoreData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                StoreData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            StoreData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &StoreData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
