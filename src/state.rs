use crate::config::AppConfig;
use crate::models::AppData;
use chrono::Weekday;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub week_start: Weekday,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(config: &AppConfig, data: AppData) -> Self {
        Self {
            data_path: config.data_path.clone(),
            week_start: config.week_start,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
