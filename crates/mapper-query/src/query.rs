//! Statements bound to a connection.
//!
//! Each facade derefs to its statement builder, so the whole builder API is
//! available, and adds the execution entry points.

use std::ops::{Deref, DerefMut};

use mapper_statement::{Delete, Insert, Select, Update};
use tracing::debug;

use crate::{connection::Connection, error::Result, factory::StatementFactory, fetch::Fetch};

macro_rules! query_facade {
    ($(#[$meta:meta])* $name:ident, $statement:ident, $build:ident) => {
        $(#[$meta])*
        pub struct $name<'c, C: Connection> {
            statement: $statement,
            connection: &'c C,
        }

        impl<'c, C: Connection> $name<'c, C> {
            /// Builds the statement for the connection's driver.
            pub fn new(connection: &'c C) -> Self {
                Self::with_factory(&StatementFactory::from_connection(connection), connection)
            }

            pub fn with_factory(factory: &StatementFactory, connection: &'c C) -> Self {
                Self {
                    statement: factory.$build(),
                    connection,
                }
            }

            pub fn connection(&self) -> &'c C {
                self.connection
            }

            pub fn into_statement(self) -> $statement {
                self.statement
            }

            /// Executes the statement with its bound values.
            pub fn perform(&self) -> Result<C::Handle> {
                let sql = self.statement.statement();
                debug!(sql = %sql, values = self.statement.bind_values().len(), "performing statement");
                self.connection.perform(&sql, self.statement.bind_values())
            }
        }

        impl<C: Connection> Deref for $name<'_, C> {
            type Target = $statement;

            fn deref(&self) -> &Self::Target {
                &self.statement
            }
        }

        impl<C: Connection> DerefMut for $name<'_, C> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.statement
            }
        }
    };
}

query_facade!(
    /// A SELECT with fetch operations forwarded to the connection.
    SelectQuery,
    Select,
    select
);
query_facade!(
    /// An INSERT that can report the generated id.
    InsertQuery,
    Insert,
    insert
);
query_facade!(UpdateQuery, Update, update);
query_facade!(DeleteQuery, Delete, delete);

macro_rules! fetch_methods {
    ($($method:ident => $op:ident),* $(,)?) => {
        $(
            pub fn $method(&self) -> Result<C::Output> {
                self.fetch(Fetch::$op)
            }
        )*
    };
}

impl<C: Connection> SelectQuery<'_, C> {
    /// Runs `op` on the connection with the rendered statement and values.
    pub fn fetch(&self, op: Fetch) -> Result<C::Output> {
        let sql = self.statement.statement();
        debug!(op = %op, sql = %sql, "fetching");
        self.connection.fetch(op, &sql, self.statement.bind_values())
    }

    /// Dispatches a fetch operation by its method name, e.g. `"fetchAll"`.
    pub fn call(&self, name: &str) -> Result<C::Output> {
        self.fetch(name.parse()?)
    }

    fetch_methods!(
        fetch_affected => Affected,
        fetch_all => All,
        fetch_assoc => Assoc,
        fetch_column => Column,
        fetch_group => Group,
        fetch_object => Object,
        fetch_objects => Objects,
        fetch_one => One,
        fetch_pairs => Pairs,
        fetch_unique => Unique,
        fetch_value => Value,
        yield_affected => YieldAffected,
        yield_all => YieldAll,
        yield_assoc => YieldAssoc,
        yield_column => YieldColumn,
        yield_objects => YieldObjects,
        yield_pairs => YieldPairs,
        yield_unique => YieldUnique,
    );
}

impl<C: Connection> InsertQuery<'_, C> {
    /// The id generated by the last insert, for sequence `name` if given.
    pub fn last_insert_id(&self, name: Option<&str>) -> Result<String> {
        self.connection.last_insert_id(name)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use mapper_statement::{BindCounter, BindMap, ParamType, Value};

    use super::*;
    use crate::error::QueryError;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        op: String,
        sql: String,
        values: Vec<(String, (Value, ParamType))>,
    }

    struct FakeConnection {
        driver: &'static str,
        calls: RefCell<Vec<Call>>,
    }

    impl FakeConnection {
        fn new(driver: &'static str) -> Self {
            Self {
                driver,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn record(&self, op: &str, sql: &str, values: &BindMap) {
            self.calls.borrow_mut().push(Call {
                op: op.to_string(),
                sql: sql.to_string(),
                values: values.to_pairs(),
            });
        }
    }

    impl Connection for FakeConnection {
        type Handle = usize;
        type Output = String;

        fn driver_name(&self) -> &str {
            self.driver
        }

        fn perform(&self, statement: &str, values: &BindMap) -> Result<usize> {
            self.record("perform", statement, values);
            Ok(values.len())
        }

        fn fetch(&self, op: Fetch, statement: &str, values: &BindMap) -> Result<String> {
            self.record(op.name(), statement, values);
            Ok(op.name().to_string())
        }

        fn last_insert_id(&self, name: Option<&str>) -> Result<String> {
            match name {
                Some("missing_seq") => Err(QueryError::Connection("no such sequence".into())),
                _ => Ok("42".to_string()),
            }
        }
    }

    fn factory(driver: &str) -> StatementFactory {
        StatementFactory::new(driver).with_counter(BindCounter::new())
    }

    #[test]
    fn test_select_uses_connection_driver() {
        let conn = FakeConnection::new("mysql");
        let query = SelectQuery::new(&conn);
        assert_eq!(query.quote_identifier("inv_id"), "`inv_id`");
        assert_eq!(query.connection().driver_name(), "mysql");
    }

    #[test]
    fn test_select_perform_passes_statement_and_values() {
        let conn = FakeConnection::new("sqlite");
        let mut query = SelectQuery::with_factory(&factory("sqlite"), &conn);
        query.from("co_invoices").where_with("inv_id > ", 1);

        assert_eq!(query.perform().unwrap(), 1);

        let calls = conn.calls.borrow();
        assert_eq!(
            calls[0],
            Call {
                op: "perform".into(),
                sql: "SELECT * FROM co_invoices WHERE inv_id > :_1_1_".into(),
                values: vec![("_1_1_".into(), (Value::Int(1), ParamType::Int))],
            }
        );
    }

    #[test]
    fn test_fetch_operations_are_forwarded() {
        let conn = FakeConnection::new("sqlite");
        let mut query = SelectQuery::with_factory(&factory("sqlite"), &conn);
        query.from("co_invoices");

        assert_eq!(query.fetch_all().unwrap(), "fetchAll");
        assert_eq!(query.yield_pairs().unwrap(), "yieldPairs");
        assert_eq!(query.call("fetchValue").unwrap(), "fetchValue");

        let ops: Vec<String> = conn.calls.borrow().iter().map(|c| c.op.clone()).collect();
        assert_eq!(ops, vec!["fetchAll", "yieldPairs", "fetchValue"]);
        assert!(conn
            .calls
            .borrow()
            .iter()
            .all(|c| c.sql == "SELECT * FROM co_invoices"));
    }

    #[test]
    fn test_unknown_operation() {
        let conn = FakeConnection::new("sqlite");
        let query = SelectQuery::with_factory(&factory("sqlite"), &conn);

        let err = query.call("fetchEverything").unwrap_err();
        assert_eq!(err.to_string(), "Unknown method: [fetchEverything]");
        assert!(conn.calls.borrow().is_empty());
    }

    #[test]
    fn test_insert_perform_and_last_insert_id() {
        let conn = FakeConnection::new("pgsql");
        let mut query = InsertQuery::with_factory(&factory("pgsql"), &conn);
        query
            .table("co_invoices")
            .column_with("inv_cst_id", 1)
            .column_with("inv_total", 100)
            .returning(["inv_id"]);

        assert_eq!(query.perform().unwrap(), 2);
        assert_eq!(
            conn.calls.borrow()[0].sql,
            "INSERT INTO \"co_invoices\" (\"inv_cst_id\", \"inv_total\") \
             VALUES (:inv_cst_id, :inv_total) RETURNING inv_id"
        );
        assert_eq!(query.last_insert_id(None).unwrap(), "42");
        assert!(matches!(
            query.last_insert_id(Some("missing_seq")),
            Err(QueryError::Connection(_))
        ));
    }

    #[test]
    fn test_update_and_delete_perform() {
        let conn = FakeConnection::new("sqlite");
        let factory = factory("sqlite");

        let mut update = UpdateQuery::with_factory(&factory, &conn);
        update
            .table("co_invoices")
            .column_with("inv_total", 5)
            .where_with("inv_id = ", 3);
        update.perform().unwrap();

        let mut delete = DeleteQuery::with_factory(&factory, &conn);
        delete.table("co_invoices").where_with("inv_id = ", 4);
        delete.perform().unwrap();

        let calls = conn.calls.borrow();
        assert_eq!(
            calls[0].sql,
            "UPDATE co_invoices SET \"inv_total\" = :inv_total WHERE inv_id = :_1_1_"
        );
        assert_eq!(calls[1].sql, "DELETE FROM co_invoices WHERE inv_id = :_2_1_");
    }

    #[test]
    fn test_into_statement() {
        let conn = FakeConnection::new("sqlite");
        let mut query = SelectQuery::with_factory(&factory("sqlite"), &conn);
        query.from("co_invoices");
        let select = query.into_statement();
        assert_eq!(select.statement(), "SELECT * FROM co_invoices");
    }
}
