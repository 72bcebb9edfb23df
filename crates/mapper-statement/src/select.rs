//! SELECT statements.

use tracing::trace;

use crate::{
    bind::{Bind, BindCounter, Embedded, Inline},
    clause::{indent, ClauseStore, FromEntry, Source},
    condition::with_inline,
    dialect::Dialect,
    paging::DEFAULT_PER_PAGE,
};

/// A SELECT statement builder.
///
/// Mutators return `&mut Self` so calls chain; [`Select::statement`] renders
/// the SQL and [`Select::bind_values`] returns the values to bind with it.
///
/// ```
/// use mapper_statement::{BindCounter, Dialect, Select};
///
/// let counter = BindCounter::new();
/// let mut select = Select::with_counter(Dialect::Sqlite, &counter);
/// select
///     .columns(["inv_id", "inv_total"])
///     .from("co_invoices")
///     .where_with("inv_total > ", 100)
///     .order_by(["inv_id"])
///     .limit(10);
///
/// assert_eq!(
///     select.statement(),
///     "SELECT inv_id, inv_total FROM co_invoices WHERE inv_total > :_1_1_ ORDER BY inv_id LIMIT 10"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Select {
    dialect: Dialect,
    bind: Bind,
    store: ClauseStore,
    as_alias: String,
    for_update: bool,
}

impl Select {
    pub const JOIN_INNER: &'static str = "INNER";
    pub const JOIN_LEFT: &'static str = "LEFT";
    pub const JOIN_NATURAL: &'static str = "NATURAL";
    pub const JOIN_RIGHT: &'static str = "RIGHT";

    /// Creates a statement for `driver` on the process-wide bind counter.
    pub fn new(driver: &str) -> Self {
        Self::with_counter(Dialect::from_driver(driver), &BindCounter::global())
    }

    pub fn with_counter(dialect: Dialect, counter: &BindCounter) -> Self {
        Self {
            dialect,
            bind: Bind::new(counter),
            store: ClauseStore::new(DEFAULT_PER_PAGE),
            as_alias: String::new(),
            for_update: false,
        }
    }

    bind_methods!();
    paging_methods!();
    where_methods!();
    with_methods!();
    condition_methods!(
        having,
        having, having_with,
        and_having, and_having_with,
        or_having, or_having_with,
        append_having, append_having_with,
        reset_having
    );

    /// A fresh statement on the same driver and bind counter, meant to be
    /// embedded into this one.
    pub fn sub_select(&self) -> Select {
        let mut sub = Select::with_counter(self.dialect, self.bind.counter());
        sub.store
            .paging
            .set_default_per_page(self.store.paging.default_per_page());
        sub
    }

    pub fn columns<C, I>(&mut self, columns: I) -> &mut Self
    where
        C: Into<String>,
        I: IntoIterator<Item = C>,
    {
        self.store.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Adds `expression AS alias` columns.
    pub fn columns_as<E, A, I>(&mut self, columns: I) -> &mut Self
    where
        E: AsRef<str>,
        A: AsRef<str>,
        I: IntoIterator<Item = (E, A)>,
    {
        self.store.columns.extend(
            columns
                .into_iter()
                .map(|(expr, alias)| format!("{} AS {}", expr.as_ref(), alias.as_ref())),
        );
        self
    }

    pub fn has_columns(&self) -> bool {
        !self.store.columns.is_empty()
    }

    pub fn reset_columns(&mut self) -> &mut Self {
        self.store.columns.clear();
        self
    }

    /// Adds a FROM entry. A sub-select is embedded as rendered, so give it
    /// an alias with [`Select::as_alias`].
    pub fn from(&mut self, table: impl Into<Source>) -> &mut Self {
        let table = table.into().absorb(&mut self.bind);
        self.store.from.push(FromEntry::new(table));
        self
    }

    pub fn reset_from(&mut self) -> &mut Self {
        self.store.from.clear();
        self
    }

    /// Attaches a join to the last FROM entry.
    ///
    /// The kind is upper-cased and gets a `JOIN` suffix when missing. The
    /// condition gets an `ON ` prefix unless it already starts with `ON ` or
    /// `USING `.
    pub fn join(&mut self, kind: &str, table: impl Into<Source>, condition: &str) -> &mut Self {
        let condition = join_condition(condition);
        self.push_join(kind, table.into(), condition)
    }

    pub fn join_with(
        &mut self,
        kind: &str,
        table: impl Into<Source>,
        condition: &str,
        value: impl Into<Inline>,
    ) -> &mut Self {
        let table = table.into();
        let condition = join_condition(condition);
        let condition = with_inline(&mut self.bind, &condition, value.into());
        self.push_join(kind, table, condition)
    }

    /// Concatenates onto the last join, or onto the last table when it has
    /// no join yet.
    pub fn append_join(&mut self, condition: &str) -> &mut Self {
        self.last_join_text().push_str(condition);
        self
    }

    pub fn append_join_with(&mut self, condition: &str, value: impl Into<Inline>) -> &mut Self {
        let fragment = with_inline(&mut self.bind, condition, value.into());
        self.last_join_text().push_str(&fragment);
        self
    }

    pub fn group_by<C, I>(&mut self, columns: I) -> &mut Self
    where
        C: Into<String>,
        I: IntoIterator<Item = C>,
    {
        self.store.group.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn reset_group_by(&mut self) -> &mut Self {
        self.store.group.clear();
        self
    }

    pub fn order_by<C, I>(&mut self, columns: I) -> &mut Self
    where
        C: Into<String>,
        I: IntoIterator<Item = C>,
    {
        self.store.order.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn reset_order_by(&mut self) -> &mut Self {
        self.store.order.clear();
        self
    }

    pub fn distinct(&mut self, enable: bool) -> &mut Self {
        self.store.flags.set("DISTINCT", enable);
        self
    }

    pub fn for_update(&mut self, enable: bool) -> &mut Self {
        self.for_update = enable;
        self
    }

    /// Renders the statement as `(SELECT ...) AS alias`.
    pub fn as_alias(&mut self, alias: &str) -> &mut Self {
        self.as_alias = alias.to_string();
        self
    }

    pub fn reset_as(&mut self) -> &mut Self {
        self.as_alias.clear();
        self
    }

    /// Closes the current member with ` UNION ` and starts a new one.
    pub fn union(&mut self) -> &mut Self {
        self.push_union(" UNION ")
    }

    /// Closes the current member with ` UNION ALL ` and starts a new one.
    pub fn union_all(&mut self) -> &mut Self {
        self.push_union(" UNION ALL ")
    }

    /// Back to a freshly constructed statement, bound values included.
    pub fn reset(&mut self) -> &mut Self {
        self.store.reset();
        self.bind.reset();
        self.as_alias.clear();
        self.for_update = false;
        self
    }

    pub fn statement(&self) -> String {
        let sql = format!(
            "{}{}{}",
            self.store.with.render(self.dialect),
            self.store.union.concat(),
            self.current_statement()
        );
        trace!(sql = %sql, "rendered select");
        sql
    }

    /// Renders the statement and hands over its values, for embedding into
    /// another statement.
    pub fn into_embedded(self) -> Embedded {
        Embedded::new(self.statement(), self.bind.into_values())
    }

    fn current_statement(&self) -> String {
        let paging = &self.store.paging;
        let columns = if self.store.columns.is_empty() {
            " *".to_string()
        } else {
            indent(&self.store.columns, ",")
        };

        let mut sql = String::from("SELECT");
        sql.push_str(&self.store.flags.render());
        sql.push_str(&self.dialect.limit_early(paging.limit(), paging.offset()));
        sql.push_str(&columns);
        sql.push_str(&self.store.render_from());
        sql.push_str(&self.store.where_.render("WHERE"));
        sql.push_str(&self.store.render_by("GROUP", &self.store.group));
        sql.push_str(&self.store.having.render("HAVING"));
        sql.push_str(&self.store.render_by("ORDER", &self.store.order));
        sql.push_str(&self.dialect.limit(paging.limit(), paging.offset()));
        if self.for_update {
            sql.push_str(" FOR UPDATE");
        }

        if self.as_alias.is_empty() {
            sql
        } else {
            format!("({sql}) AS {}", self.as_alias)
        }
    }

    fn push_union(&mut self, suffix: &str) -> &mut Self {
        let member = format!("{}{suffix}", self.current_statement());
        self.store.union.push(member);
        self.store.reset_member();
        self.as_alias.clear();
        self.for_update = false;
        self
    }

    fn push_join(&mut self, kind: &str, table: Source, condition: String) -> &mut Self {
        let mut kind = kind.trim().to_uppercase();
        if !kind.ends_with("JOIN") {
            kind.push_str(" JOIN");
        }
        let table = table.absorb(&mut self.bind);

        let join = if condition.is_empty() {
            format!("{kind} {table}")
        } else {
            format!("{kind} {table} {condition}")
        };

        match self.store.from.last_mut() {
            Some(entry) => entry.joins.push(join),
            None => {
                let mut entry = FromEntry::new(String::new());
                entry.joins.push(join);
                self.store.from.push(entry);
            }
        }
        self
    }

    fn last_join_text(&mut self) -> &mut String {
        if self.store.from.is_empty() {
            self.store.from.push(FromEntry::new(String::new()));
        }
        let last = self.store.from.len() - 1;
        let entry = &mut self.store.from[last];
        if entry.joins.is_empty() {
            &mut entry.table
        } else {
            let last_join = entry.joins.len() - 1;
            &mut entry.joins[last_join]
        }
    }
}

impl From<Select> for Source {
    fn from(select: Select) -> Self {
        Source::Statement(select.into_embedded())
    }
}

impl From<Select> for Inline {
    fn from(select: Select) -> Self {
        Inline::Statement(select.into_embedded())
    }
}

fn join_condition(condition: &str) -> String {
    let condition = condition.trim_start();
    let upper = condition.to_uppercase();
    if condition.is_empty() || upper.starts_with("ON ") || upper.starts_with("USING ") {
        condition.to_string()
    } else {
        format!("ON {condition}")
    }
}
