use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub detector: DetectorConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Fixed seed for fallback picks and nutrition variation; entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    pub nutrition_variation: bool,
    /// Longest side of the thumbnail the color clustering runs on.
    pub color_sample_side: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub pbkdf2_rounds: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "workoutvibes.db".to_string(),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_upload_bytes: 10 * 1024 * 1024,
            },
            detector: DetectorConfig {
                seed: None,
                nutrition_variation: true,
                color_sample_side: 128,
            },
            auth: AuthConfig {
                pbkdf2_rounds: crate::auth::DEFAULT_ROUNDS,
            },
        }
    }
}

/// Layers built-in defaults, an optional TOML file and `WORKOUTVIBES__*`
/// environment variables, in that order.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();
    let mut settings = config::Config::builder()
        .set_default("database.path", defaults.database.path)?
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("server.max_upload_bytes", defaults.server.max_upload_bytes as i64)?
        .set_default("detector.nutrition_variation", defaults.detector.nutrition_variation)?
        .set_default("detector.color_sample_side", i64::from(defaults.detector.color_sample_side))?
        .set_default("auth.pbkdf2_rounds", i64::from(defaults.auth.pbkdf2_rounds))?;
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("WORKOUTVIBES")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
