//! Builds statements that share a driver, a per-page default and a bind
//! counter.

use mapper_config::Config;
use mapper_statement::{BindCounter, Delete, Dialect, Insert, Select, Update, DEFAULT_PER_PAGE};
use tracing::debug;

use crate::connection::Connection;

#[derive(Clone, Debug)]
pub struct StatementFactory {
    dialect: Dialect,
    per_page: u64,
    counter: BindCounter,
}

impl StatementFactory {
    pub fn new(driver: &str) -> Self {
        Self {
            dialect: Dialect::from_driver(driver),
            per_page: DEFAULT_PER_PAGE,
            counter: BindCounter::global(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        debug!(driver = %config.driver, per_page = config.per_page, "statement factory from config");
        Self::new(&config.driver).with_per_page(config.per_page)
    }

    /// Uses the connection's driver and the process-wide configuration's
    /// per-page default.
    pub fn from_connection<C: Connection>(connection: &C) -> Self {
        Self::new(connection.driver_name()).with_per_page(mapper_config::get_config().per_page)
    }

    /// Uses a dedicated counter, e.g. for deterministic placeholder names.
    pub fn with_counter(mut self, counter: BindCounter) -> Self {
        self.counter = counter;
        self
    }

    pub fn with_per_page(mut self, per_page: u64) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn counter(&self) -> &BindCounter {
        &self.counter
    }

    pub fn select(&self) -> Select {
        let mut select = Select::with_counter(self.dialect, &self.counter);
        select.default_per_page(self.per_page);
        select
    }

    pub fn insert(&self) -> Insert {
        Insert::with_counter(self.dialect, &self.counter)
    }

    pub fn update(&self) -> Update {
        let mut update = Update::with_counter(self.dialect, &self.counter);
        update.default_per_page(self.per_page);
        update
    }

    pub fn delete(&self) -> Delete {
        let mut delete = Delete::with_counter(self.dialect, &self.counter);
        delete.default_per_page(self.per_page);
        delete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = Config {
            driver: "mysql".to_string(),
            per_page: 25,
        };
        let factory = StatementFactory::from_config(&config).with_counter(BindCounter::new());

        let mut select = factory.select();
        select.from("co_invoices").page(3);
        assert_eq!(select.statement(), "SELECT * FROM co_invoices LIMIT 25 OFFSET 50");
        assert_eq!(select.quote_identifier("inv_id"), "`inv_id`");

        select.reset_limit();
        assert_eq!(select.per_page_value(), 25);
    }

    #[test]
    fn test_statements_share_counter() {
        let factory = StatementFactory::new("sqlite").with_counter(BindCounter::new());

        let mut first = factory.select();
        let mut second = factory.delete();
        first.from("a").where_with("x = ", 1);
        second.table("b").where_with("y = ", 2);

        assert_eq!(first.statement(), "SELECT * FROM a WHERE x = :_1_1_");
        assert_eq!(second.statement(), "DELETE FROM b WHERE y = :_2_1_");
        assert_eq!(factory.counter().current(), 2);
    }

    #[test]
    fn test_insert_and_update_use_dialect() {
        let factory = StatementFactory::new("sqlsrv").with_counter(BindCounter::new());

        let mut insert = factory.insert();
        insert.table("co_invoices").column_with("inv_id", 1);
        assert_eq!(
            insert.statement(),
            "INSERT INTO [co_invoices] ([inv_id]) VALUES (:inv_id)"
        );

        let mut update = factory.update();
        update.table("co_invoices").column_with("inv_total", 2);
        assert_eq!(update.statement(), "UPDATE co_invoices SET [inv_total] = :inv_total");
    }
}
