use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen: String,
    pub static_dir: String,
    pub database: DatabaseConfig,
}

/// Which storage backend to open. Picked once at startup from config.toml;
/// handlers never probe the environment themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum DatabaseConfig {
    /// File-backed database for standalone deployments.
    File { path: String },
    /// In-memory database; nothing outlives the process.
    Memory,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:3000".to_string(),
            static_dir: "./static".to_string(),
            database: DatabaseConfig::File {
                path: "./userboard.sqlite3".to_string(),
            },
        }
    }
}

impl Config {
    /// Reads `config.toml` from the working directory. A missing file is
    /// replaced with the defaults, written back out so the first run leaves
    /// an editable config behind.
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if !path.exists() {
            let cfg = Config::default();
            let rendered =
                toml::to_string_pretty(&cfg).expect("default config must serialize");
            std::fs::write(path, rendered).expect("cannot write default config.toml");
            return cfg;
        }
        let raw = std::fs::read_to_string(path).expect("cannot read config.toml");
        toml::from_str(&raw).expect("config.toml is not valid")
    }
}
