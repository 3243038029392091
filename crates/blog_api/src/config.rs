use serde::Deserialize;
use std::path::PathBuf;

/// Sentinel database path that selects a private in-memory store.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:`.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Log directory; relative paths resolve against the working directory.
    pub dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Loads `.env` (if present) and then `SECTION__KEY` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env(config::Environment::default().separator("__"))
    }

    fn from_env(env: config::Environment) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(env.try_parsing(true))
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("database.path", "blog.sqlite3")?
            .set_default("logging.level", blog_core::default_log_level())?
            .set_default("logging.dir", "logs")?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl LoggingConfig {
    /// Returns the log directory as an absolute path.
    pub fn absolute_dir(&self) -> std::io::Result<PathBuf> {
        let dir = PathBuf::from(self.dir.trim());
        if dir.is_absolute() {
            return Ok(dir);
        }
        Ok(std::env::current_dir()?.join(dir))
    }
}
