//! Statement builders bound to a database connection.
//!
//! [`StatementFactory`] picks the dialect and pagination defaults; the query
//! facades wrap a statement together with a [`Connection`] and forward
//! execution and fetch operations to it.

pub mod connection;
pub mod error;
pub mod factory;
pub mod fetch;
pub mod query;

pub use connection::Connection;
pub use error::{QueryError, Result};
pub use factory::StatementFactory;
pub use fetch::Fetch;
pub use mapper_statement as statement;
pub use query::{DeleteQuery, InsertQuery, SelectQuery, UpdateQuery};
