use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/walletsync.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            level: "info".to_string(),
        }
    }
}

/// Layered load: TOML file, then `WALLETSYNC_*` environment, then CLI flags.
pub fn load(
    path: Option<&str>,
    base_url: Option<String>,
    level: Option<String>,
) -> Result<AppConfig> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("WALLETSYNC"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = base_url {
        settings.base_url = base_url;
    }
    if let Some(level) = level {
        settings.level = level;
    }

    Ok(settings)
}
