//! Error types for mapper-statement.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum StatementError {
    #[error("Unknown parameter type: {0}")]
    #[diagnostic(
        code(mapper_statement::param_type),
        help("Use one of null, int, str or bool (PDO codes 0, 1, 2, 5)")
    )]
    UnknownParamType(String),
}

/// Result type alias for mapper-statement operations.
pub type Result<T> = std::result::Result<T, StatementError>;
