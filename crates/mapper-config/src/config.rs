use std::{
    fs,
    path::{Path, PathBuf},
    sync::{LazyLock, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

pub const DEFAULT_DRIVER: &str = "sqlite";
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Statement builder configuration, read from `mapper.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// PDO style driver name used when a statement is built without a
    /// connection: mysql, pgsql, sqlite or sqlsrv
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Rows per page for page based pagination
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_driver() -> String {
    DEFAULT_DRIVER.to_string()
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            per_page: default_per_page(),
        }
    }
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

/// Location of the config file: `MAPPER_CONFIG` if set, else `mapper.toml`
/// in the working directory.
pub fn config_path() -> PathBuf {
    match std::env::var("MAPPER_CONFIG") {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from("mapper.toml"),
    }
}

/// Loads the configuration and installs it as the process-wide one.
pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global = CONFIG.write().unwrap_or_else(|e| e.into_inner());
    *global = Some(config);
    Ok(())
}

/// The process-wide configuration, defaults if `init` was never called.
pub fn get_config() -> Config {
    let guard = CONFIG.read().unwrap_or_else(|e| e.into_inner());
    guard.clone().unwrap_or_default()
}

impl Config {
    /// Loads the config file, falling back to defaults when it does not
    /// exist, then applies environment overrides.
    pub fn new() -> Result<Self> {
        Self::load(&config_path())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut config = match fs::read_to_string(path) {
            Ok(content) => {
                info!("Loaded configuration from {}", path.display());
                toml::from_str(&content)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Config::default()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;
        Ok(config)
    }

    /// Applies `MAPPER_DRIVER` and validates the values.
    pub fn resolve(&mut self) -> Result<()> {
        if let Ok(driver) = std::env::var("MAPPER_DRIVER") {
            debug!(driver = %driver, "driver overridden from environment");
            self.driver = driver;
        }

        self.driver = self.driver.trim().to_string();
        if self.driver.is_empty() {
            return Err(ConfigError::EmptyDriver);
        }
        if self.per_page == 0 {
            return Err(ConfigError::InvalidPerPage(self.per_page));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml()?)?;
        info!("Wrote configuration to {}", path.display());
        Ok(())
    }
}
