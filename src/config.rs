use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::domain::pipeline::paginate::PAGE_SIZE;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const RECENT_QUERY_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub log_level: String,
    pub page_size: usize,
    pub recent_query_count: usize,
}

pub fn default_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "screener")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().to_path_buf())
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let data_dir = default_data_dir()?;
        Ok(Self::resolve(data_dir, |key| std::env::var(key).ok()))
    }

    /// Defaults under `data_dir`, overridden by `SCREENER_*` variables from `lookup`.
    pub fn resolve(data_dir: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = non_empty("SCREENER_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("screener.sqlite"));
        let api_base_url =
            non_empty("SCREENER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_secs = non_empty("SCREENER_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let log_level =
            non_empty("SCREENER_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            data_dir,
            db_path,
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level,
            page_size: PAGE_SIZE,
            recent_query_count: RECENT_QUERY_COUNT,
        }
    }

    pub fn webview_data_dir(&self) -> Result<PathBuf> {
        ensure_webview_data_dir(&self.data_dir)
    }
}
