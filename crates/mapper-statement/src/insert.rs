//! INSERT statements.

use std::fmt::Display;

use tracing::trace;

use crate::{
    bind::{Bind, BindCounter},
    clause::{indent, Assignments, ClauseStore},
    dialect::Dialect,
    paging::DEFAULT_PER_PAGE,
    value::{ParamType, Value},
};

/// A column entry for [`Insert::columns`] and `Update::columns`: either a
/// bare name bound later, or a name with its value.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Name(String),
    Value(String, Value),
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::Name(name.to_string())
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::Name(name)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Column {
    fn from((name, value): (K, V)) -> Self {
        Column::Value(name.into(), value.into())
    }
}

/// Points `column` at the `:column` placeholder, binding `value` if given.
pub(crate) fn assign_column(
    assignments: &mut Assignments,
    bind: &mut Bind,
    column: &str,
    value: Option<(Value, Option<ParamType>)>,
) {
    assignments.set(column, format!(":{column}"));
    match value {
        Some((value, Some(ty))) => bind.set_value_typed(column, value, ty),
        Some((value, None)) => bind.set_value(column, value),
        None => {}
    }
}

/// Sets `column` to a literal SQL fragment and drops any value bound for it.
pub(crate) fn assign_literal(
    assignments: &mut Assignments,
    bind: &mut Bind,
    column: &str,
    literal: String,
) {
    assignments.set(column, literal);
    bind.remove(column);
}

#[derive(Clone, Debug)]
pub struct Insert {
    dialect: Dialect,
    bind: Bind,
    store: ClauseStore,
    table: String,
    assignments: Assignments,
}

impl Insert {
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
    returning_methods!();

    /// Target table (`INSERT INTO table`).
    pub fn table(&mut self, table: &str) -> &mut Self {
        self.table = table.to_string();
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Adds `column` with a `:column` placeholder; bind it later with
    /// `bind_value`.
    pub fn column(&mut self, column: &str) -> &mut Self {
        assign_column(&mut self.assignments, &mut self.bind, column, None);
        self
    }

    /// Adds `column` and binds `value` under the column name.
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

    /// Uses `literal` verbatim as the column value, e.g. `NOW()`.
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
        let columns: Vec<String> = self
            .assignments
            .columns()
            .map(|c| self.dialect.quote_identifier(c))
            .collect();
        let values: Vec<&str> = self.assignments.fragments().collect();

        let sql = format!(
            "INSERT{} INTO {} ({}) VALUES ({}){}",
            self.store.flags.render(),
            quote_table(self.dialect, &self.table),
            indent(&columns, ",").trim_start(),
            indent(&values, ",").trim_start(),
            self.store.render_returning()
        );
        trace!(sql = %sql, "rendered insert");
        sql
    }
}

/// Quotes each dot separated part of a table name.
fn quote_table(dialect: Dialect, table: &str) -> String {
    table
        .split('.')
        .map(|part| dialect.quote_identifier(part))
        .collect::<Vec<_>>()
        .join(".")
}
