//! Error types for mapper-query.

use mapper_config::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum QueryError {
    #[error("Unknown method: [{0}]")]
    #[diagnostic(
        code(mapper_query::unknown_operation),
        help("Use one of the fetch* or yield* operations, e.g. fetchAll or yieldPairs")
    )]
    UnknownOperation(String),

    #[error("Connection error: {0}")]
    #[diagnostic(
        code(mapper_query::connection),
        help("Check that the database is reachable and the statement is valid for the driver")
    )]
    Connection(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for mapper-query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
