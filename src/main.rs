mod app;
mod config;
mod domain;
mod infra;
mod logging;
mod ui;
mod usecase;


use tracing::{info, warn};

use crate::app::App;
use crate::config::AppConfig;
use crate::logging::init_logging;

/// Without a platform data directory everything lands under the temp dir.
fn fallback_config() -> AppConfig {
    AppConfig::resolve(std::env::temp_dir().join("screener"), |key| {
        std::env::var(key).ok()
    })
}

fn main() {
    let (config, config_error) = match AppConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => (fallback_config(), Some(err)),
    };
    init_logging(&config.log_level);
    if let Some(err) = config_error {
        warn!(error = %err, data_dir = %config.data_dir.display(), "using fallback data directory");
    }
    info!(
        db_path = %config.db_path.display(),
        api = %config.api_base_url,
        "starting screener"
    );

    let mut desktop_cfg = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Screener"));
    match config.webview_data_dir() {
        Ok(dir) => desktop_cfg = desktop_cfg.with_data_directory(dir),
        Err(err) => warn!(error = %err, "webview data directory unavailable"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(config)
        .launch(App);
}
