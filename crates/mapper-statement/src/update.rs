//! UPDATE statements.

use std::fmt::Display;

use tracing::trace;

use crate::{
    bind::{Bind, BindCounter},
    clause::{indent, Assignments, ClauseStore},
    dialect::Dialect,
    insert::{assign_column, assign_literal, Column},
    paging::DEFAULT_PER_PAGE,
    value::{ParamType, Value},
};

#[derive(Clone, Debug)]
pub struct Update {
    dialect: Dialect,
    bind: Bind,
    store: ClauseStore,
    table: String,
    assignments: Assignments,
}

impl Update {
    pub fn new(driver: &str) -> Self {
        Self::with_counter(Dialect::from_driver(driver), &BindCounter::global())
    }

    pub fn with_counter(dialect: Dialect, counter: &BindCounter) -> Self {
        Self {
            dialect,
            bind: Bind::new(counter),
            store: ClauseStore::new(DEFAULT_PER_PAGE),
            table: String::new(),
            assignments: Assignments::default(),
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

    /// `column = :column`, bound later.
    pub fn column(&mut self, column: &str) -> &mut Self {
        assign_column(&mut self.assignments, &mut self.bind, column, None);
        self
    }

    pub fn column_with(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        assign_column(
            &mut self.assignments,
            &mut self.bind,
            column,
            Some((value.into(), None)),
        );
        self
    }

    pub fn column_typed(
        &mut self,
        column: &str,
        value: impl Into<Value>,
        ty: ParamType,
    ) -> &mut Self {
        assign_column(
            &mut self.assignments,
            &mut self.bind,
            column,
            Some((value.into(), Some(ty))),
        );
        self
    }

    pub fn columns<C, I>(&mut self, columns: I) -> &mut Self
    where
        C: Into<Column>,
        I: IntoIterator<Item = C>,
    {
        for column in columns {
            match column.into() {
                Column::Name(name) => self.column(&name),
                Column::Value(name, value) => self.column_with(&name, value),
            };
        }
        self
    }

    /// `column = literal`; any value bound under the column name is dropped.
    pub fn set(&mut self, column: &str, literal: impl Display) -> &mut Self {
        assign_literal(
            &mut self.assignments,
            &mut self.bind,
            column,
            literal.to_string(),
        );
        self
    }

    pub fn set_null(&mut self, column: &str) -> &mut Self {
        self.set(column, "NULL")
    }

    pub fn has_columns(&self) -> bool {
        !self.assignments.is_empty()
    }

    pub fn reset_columns(&mut self) -> &mut Self {
        self.assignments.clear();
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        self.store.reset();
        self.bind.reset();
        self.table.clear();
        self.assignments.clear();
        self
    }

    pub fn statement(&self) -> String {
        let assignments: Vec<String> = self
            .assignments
            .iter()
            .map(|(column, value)| format!("{} = {value}", self.dialect.quote_identifier(column)))
            .collect();
        let paging = &self.store.paging;

        let sql = format!(
            "{}UPDATE{} {} SET{}{}{}{}",
            self.store.with.render(self.dialect),
            self.store.flags.render(),
            self.table,
            indent(&assignments, ","),
            self.store.where_.render("WHERE"),
            self.dialect.limit(paging.limit(), paging.offset()),
            self.store.render_returning()
        );
        trace!(sql = %sql, "rendered update");
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Param;

    fn update(driver: &str) -> Update {
        Update::with_counter(Dialect::from_driver(driver), &BindCounter::new())
    }

    #[test]
    fn test_statement() {
        let mut update = update("sqlite");
        update
            .table("co_invoices")
            .columns([
                Column::from("inv_id"),
                Column::from("inv_cst_id"),
                Column::from(("inv_total", 100.12)),
            ])
            .set_null("inv_status_flag")
            .set("inv_created_date", "NOW()")
            .where_("inv_total > :totalMax")
            .where_("inv_cst_id = :cstId")
            .or_where("inv_status_flag = :flag")
            .bind_many([("totalMax", 10), ("cstId", 4), ("flag", 1)]);

        assert_eq!(
            update.statement(),
            "UPDATE co_invoices SET \"inv_id\" = :inv_id, \"inv_cst_id\" = :inv_cst_id, \
             \"inv_total\" = :inv_total, \"inv_status_flag\" = NULL, \
             \"inv_created_date\" = NOW() WHERE inv_total > :totalMax \
             AND inv_cst_id = :cstId OR inv_status_flag = :flag"
        );
        assert_eq!(
            update.bind_values().keys().collect::<Vec<_>>(),
            vec!["inv_total", "totalMax", "cstId", "flag"]
        );
    }

    #[test]
    fn test_returning_and_limit() {
        let mut update = update("mysql");
        update
            .table("co_invoices")
            .column_with("inv_total", 0)
            .where_with("inv_id = ", 7)
            .limit(1)
            .returning(["inv_id", "inv_total"]);

        assert_eq!(
            update.statement(),
            "UPDATE co_invoices SET `inv_total` = :inv_total WHERE inv_id = :_1_1_ \
             LIMIT 1 RETURNING inv_id, inv_total"
        );
        assert_eq!(
            update.bind_values().get("inv_total"),
            Some(&Param::new(0, Some(ParamType::Int)))
        );
    }

    #[test]
    fn test_has_columns() {
        let mut update = update("sqlite");
        assert!(!update.has_columns());

        update.table("co_invoices").columns(["inv_id"]);
        assert!(update.has_columns());

        update.reset_columns();
        assert!(!update.has_columns());
    }

    #[test]
    fn test_with_cte() {
        let mut update = update("pgsql");
        update
            .with("totals", "SELECT inv_cst_id, SUM(inv_total) AS total FROM co_invoices GROUP BY inv_cst_id")
            .table("co_customers")
            .set("cst_total", "(SELECT total FROM totals WHERE inv_cst_id = cst_id)");

        assert_eq!(
            update.statement(),
            "WITH \"totals\" AS (SELECT inv_cst_id, SUM(inv_total) AS total FROM co_invoices \
             GROUP BY inv_cst_id) UPDATE co_customers SET \"cst_total\" = \
             (SELECT total FROM totals WHERE inv_cst_id = cst_id)"
        );
    }

    #[test]
    fn test_set_overrides_bound_column() {
        let mut update = update("sqlite");
        update
            .table("co_invoices")
            .column_with("inv_total", 5)
            .set("inv_total", "inv_total * 2");

        assert_eq!(
            update.statement(),
            "UPDATE co_invoices SET \"inv_total\" = inv_total * 2"
        );
        assert!(update.bind_values().is_empty());
    }
}
