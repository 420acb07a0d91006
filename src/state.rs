use crate::config::AppConfig;
use crate::status::StatusSource;
use crate::storage::StoreData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub status_source: StatusSource,
    pub store: Arc<Mutex<StoreData>>,
}

impl AppState {
    pub fn new(config: &AppConfig, store: StoreData) -> Self {
        Self {
            data_path: config.data_path.clone(),
            status_source: config.status_source.clone(),
            store: Arc::new(Mutex::new(store)),
        }
    }
}
