//! The database connection boundary.

use mapper_statement::BindMap;

use crate::{error::Result, fetch::Fetch};

/// A live connection the query facades execute through.
///
/// Implementors own execution and result hydration; the facades only hand
/// over rendered SQL and the values to bind.
pub trait Connection {
    /// What `perform` returns, typically a prepared and executed statement.
    type Handle;
    /// What the fetch operations return.
    type Output;

    /// PDO style driver name: mysql, pgsql, sqlite, sqlsrv, ...
    fn driver_name(&self) -> &str;

    fn perform(&self, statement: &str, values: &BindMap) -> Result<Self::Handle>;

    fn fetch(&self, op: Fetch, statement: &str, values: &BindMap) -> Result<Self::Output>;

    fn last_insert_id(&self, name: Option<&str>) -> Result<String>;
}
