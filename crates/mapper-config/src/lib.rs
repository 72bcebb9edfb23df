pub mod config;
pub mod error;

#[cfg(test)]
pub mod test_utils;

pub use config::{get_config, init, Config};
pub use error::{ConfigError, Result};
