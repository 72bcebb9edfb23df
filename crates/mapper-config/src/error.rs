use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(mapper_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(mapper_config::toml_deserialize),
        help("Check your mapper.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Invalid per_page value: {0}")]
    #[diagnostic(
        code(mapper_config::invalid_per_page),
        help("per_page must be greater than zero")
    )]
    InvalidPerPage(u64),

    #[error("Database driver must not be empty")]
    #[diagnostic(
        code(mapper_config::empty_driver),
        help("Set driver to one of mysql, pgsql, sqlite or sqlsrv")
    )]
    EmptyDriver,

    #[error("IO error: {0}")]
    #[diagnostic(
        code(mapper_config::io),
        help("Check file permissions and that the config path exists")
    )]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
