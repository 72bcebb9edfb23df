//! Driver specific SQL syntax: identifier quoting and pagination.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// SQL dialect selected from a PDO style driver name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "pgsql")]
    Postgres,
    Sqlite,
    #[serde(rename = "sqlsrv")]
    SqlServer,
    /// Any other driver; double quotes and `LIMIT`/`OFFSET`.
    #[default]
    Ansi,
}

impl Dialect {
    /// Resolves a driver name. Unknown drivers fall back to [`Dialect::Ansi`].
    pub fn from_driver(driver: &str) -> Self {
        match driver.trim().to_ascii_lowercase().as_str() {
            "mysql" => Dialect::MySql,
            "pgsql" | "postgres" | "postgresql" => Dialect::Postgres,
            "sqlite" => Dialect::Sqlite,
            "sqlsrv" | "mssql" => Dialect::SqlServer,
            other => {
                debug!(driver = other, "unknown driver, using ANSI quoting");
                Dialect::Ansi
            }
        }
    }

    pub fn driver_name(self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "pgsql",
            Dialect::Sqlite => "sqlite",
            Dialect::SqlServer => "sqlsrv",
            Dialect::Ansi => "ansi",
        }
    }

    fn quotes(self) -> (char, char) {
        match self {
            Dialect::MySql => ('`', '`'),
            Dialect::SqlServer => ('[', ']'),
            _ => ('"', '"'),
        }
    }

    /// Wraps `name` in the driver's identifier quotes, doubling any
    /// embedded closing quote.
    pub fn quote_identifier(self, name: &str) -> String {
        let (open, close) = self.quotes();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for c in name.chars() {
            if c == close {
                quoted.push(close);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }

    /// Fragment emitted right after `SELECT`. Only SQL Server uses it, and
    /// only for a plain row limit.
    pub fn limit_early(self, limit: u64, offset: u64) -> String {
        if self == Dialect::SqlServer && limit > 0 && offset == 0 {
            format!(" TOP {limit}")
        } else {
            String::new()
        }
    }

    /// Fragment emitted at the end of the statement.
    ///
    /// SQL Server renders `OFFSET .. FETCH NEXT` only when both values are
    /// set; an offset without a limit renders nothing there.
    pub fn limit(self, limit: u64, offset: u64) -> String {
        if self == Dialect::SqlServer {
            if limit > 0 && offset > 0 {
                return format!(" OFFSET {offset} ROWS FETCH NEXT {limit} ROWS ONLY");
            }
            return String::new();
        }

        let mut sql = String::new();
        if limit != 0 {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if offset != 0 {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        sql
    }
}

impl FromStr for Dialect {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Dialect::from_driver(s))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.driver_name())
    }
}
