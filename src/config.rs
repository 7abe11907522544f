use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub database: Database,
    #[serde(default)]
    pub extractor: Extractor,
    pub http: HttpConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "failed to parse config TOML")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Database {
    pub in_memory: bool,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Extractor {
    /// Command used to invoke the external metadata extractor.
    #[serde(default = "default_extractor_command")]
    pub command: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            command: default_extractor_command(),
        }
    }
}

fn default_extractor_command() -> String {
    "exiftool".to_string()
}
