use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Settings {
    /// Defaults, then `trivia.toml` from the working directory if present, then
    /// `TRIVIA_*` environment variables (a `.env` file is honoured).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::build(File::with_name("trivia").required(false))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db?mode=rwc")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("max_connections", 5)?
            .add_source(file)
            .add_source(Environment::with_prefix("TRIVIA").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
