//! DELETE statements.

use tracing::trace;

use crate::{
    bind::{Bind, BindCounter},
    clause::ClauseStore,
    dialect::Dialect,
    paging::DEFAULT_PER_PAGE,
};

#[derive(Clone, Debug)]
pub struct Delete {
    dialect: Dialect,
    bind: Bind,
    store: ClauseStore,
    table: String,
}

impl Delete {
    pub fn new(driver: &str) -> Self {
        Self::with_counter(Dialect::from_driver(driver), &BindCounter::global())
    }

    pub fn with_counter(dialect: Dialect, counter: &BindCounter) -> Self {
        Self {
            dialect,
            bind: Bind::new(counter),
            store: ClauseStore::new(DEFAULT_PER_PAGE),
            table: String::new(),
        }
    }

    bind_methods!();
    paging_methods!();
    where_methods!();
    with_methods!();
    returning_methods!();

    pub fn table(&mut self, table: &str) -> &mut Self {
        self.table = table.to_string();
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn reset(&mut self) -> &mut Self {
        self.store.reset();
        self.bind.reset();
        self.table.clear();
        self
    }

    /// Renders the statement. On SQL Server a limit without an offset is not
    /// rendered.
    pub fn statement(&self) -> String {
        let paging = &self.store.paging;
        let sql = format!(
            "{}DELETE{} FROM {}{}{}{}",
            self.store.with.render(self.dialect),
            self.store.flags.render(),
            self.table,
            self.store.where_.render("WHERE"),
            self.dialect.limit(paging.limit(), paging.offset()),
            self.store.render_returning()
        );
        trace!(sql = %sql, "rendered delete");
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        select::Select,
        value::{Param, ParamType},
    };

    fn delete(driver: &str) -> Delete {
        Delete::with_counter(Dialect::from_driver(driver), &BindCounter::new())
    }

    #[test]
    fn test_statement() {
        let mut delete = delete("sqlite");
        delete
            .table("co_invoices")
            .where_with("inv_total > ", 100)
            .or_where("inv_status_flag = :flag")
            .bind_value("flag", 0)
            .returning(["inv_id"]);

        assert_eq!(
            delete.statement(),
            "DELETE FROM co_invoices WHERE inv_total > :_1_1_ \
             OR inv_status_flag = :flag RETURNING inv_id"
        );
        assert_eq!(
            delete.bind_values().keys().collect::<Vec<_>>(),
            vec!["_1_1_", "flag"]
        );
    }

    #[test]
    fn test_bind_values() {
        let mut delete = delete("sqlite");
        delete.bind_many([("one", "two"), ("three", "four")]);
        delete.bind_value_typed("seven", 8, ParamType::Int);

        assert_eq!(delete.bind_values().len(), 3);
        assert_eq!(
            delete.bind_values().get("seven"),
            Some(&Param::new(8, Some(ParamType::Int)))
        );
    }

    #[test]
    fn test_flags_limit_and_where_equals() {
        let mut delete = delete("mysql");
        delete
            .set_flag("LOW_PRIORITY", true)
            .table("co_invoices")
            .where_equals([("inv_cst_id", vec![1, 2])])
            .limit(5);

        assert_eq!(
            delete.statement(),
            "DELETE LOW_PRIORITY FROM co_invoices WHERE inv_cst_id IN (:_1_1_, :_1_2_) LIMIT 5"
        );
    }

    #[test]
    fn test_sqlsrv_limit_without_offset_is_dropped() {
        let mut delete = delete("sqlsrv");
        delete.table("co_invoices").limit(5);
        assert_eq!(delete.statement(), "DELETE FROM co_invoices");
    }

    #[test]
    fn test_with_sub_select() {
        let mut delete = delete("sqlite");
        let mut stale = Select::with_counter(delete.dialect(), delete.bind_counter());
        stale
            .columns(["inv_id"])
            .from("co_invoices")
            .where_with("inv_status_flag = ", 0);

        delete
            .with("stale", stale)
            .table("co_invoices")
            .where_("inv_id IN (SELECT inv_id FROM stale)");

        assert_eq!(
            delete.statement(),
            "WITH \"stale\" AS (SELECT inv_id FROM co_invoices WHERE inv_status_flag = :_2_1_) \
             DELETE FROM co_invoices WHERE inv_id IN (SELECT inv_id FROM stale)"
        );
        assert!(delete.bind_values().contains_key("_2_1_"));
    }

    #[test]
    fn test_reset() {
        let mut delete = delete("sqlite");
        delete
            .table("co_invoices")
            .where_with("inv_id = ", 1)
            .returning(["inv_id"]);
        delete.reset();

        assert_eq!(delete.table_name(), "");
        assert!(!delete.statement().contains("WHERE"));
        assert!(delete.bind_values().is_empty());
    }
}
