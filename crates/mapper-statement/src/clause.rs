//! Clause storage shared by all statement kinds.

use crate::{
    bind::{Bind, Embedded},
    condition::Conditions,
    dialect::Dialect,
    paging::Paging,
};

/// Joins `items` with `glue` and a space, prefixed with a single space.
/// Empty input renders as an empty string.
pub(crate) fn indent<S: AsRef<str>>(items: &[S], glue: &str) -> String {
    if items.is_empty() {
        return String::new();
    }
    let sep = format!("{glue} ");
    let joined = items
        .iter()
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<_>>()
        .join(&sep);
    format!(" {joined}")
}

/// A table name, raw SQL text, or an embedded sub-statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    Raw(String),
    Statement(Embedded),
}

impl Source {
    /// Returns the SQL text, merging an embedded statement's values into `bind`.
    pub(crate) fn absorb(self, bind: &mut Bind) -> String {
        match self {
            Source::Raw(sql) => sql,
            Source::Statement(embedded) => {
                bind.merge(embedded.binds);
                embedded.sql
            }
        }
    }
}

impl From<&str> for Source {
    fn from(sql: &str) -> Self {
        Source::Raw(sql.to_string())
    }
}

impl From<String> for Source {
    fn from(sql: String) -> Self {
        Source::Raw(sql)
    }
}

impl From<Embedded> for Source {
    fn from(embedded: Embedded) -> Self {
        Source::Statement(embedded)
    }
}

/// Statement modifiers such as `DISTINCT` or `LOW_PRIORITY`.
///
/// Rendered in insertion order; enabling a flag twice keeps one copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags(Vec<String>);

impl Flags {
    pub fn set(&mut self, flag: &str, enable: bool) {
        let exists = self.contains(flag);
        if enable && !exists {
            self.0.push(flag.to_string());
        } else if !enable && exists {
            self.0.retain(|f| f != flag);
        }
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.0.iter().any(|f| f == flag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn render(&self) -> String {
        indent(&self.0, "")
    }
}

/// One comma separated entry of a `FROM` clause and the joins attached to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FromEntry {
    pub table: String,
    pub joins: Vec<String>,
}

impl FromEntry {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            joins: Vec::new(),
        }
    }

    fn render(&self) -> String {
        let rendered = format!("{}{}", self.table, indent(&self.joins, ""));
        rendered.trim_start().to_string()
    }
}

/// A named common table expression. The body is stored rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cte {
    pub name: String,
    pub columns: Vec<String>,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct With {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

impl With {
    /// Registers a CTE. Reusing a name replaces the earlier definition in place.
    pub fn set(&mut self, cte: Cte) {
        match self.ctes.iter_mut().find(|c| c.name == cte.name) {
            Some(existing) => *existing = cte,
            None => self.ctes.push(cte),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ctes.is_empty()
    }

    pub fn clear(&mut self) {
        self.ctes.clear();
        self.recursive = false;
    }

    /// Renders `WITH [RECURSIVE] ... ` including the trailing space, or
    /// nothing when no CTE is registered.
    pub fn render(&self, dialect: Dialect) -> String {
        if self.ctes.is_empty() {
            return String::new();
        }

        let ctes: Vec<String> = self
            .ctes
            .iter()
            .map(|cte| {
                let mut sql = dialect.quote_identifier(&cte.name);
                if !cte.columns.is_empty() {
                    let columns: Vec<String> = cte
                        .columns
                        .iter()
                        .map(|c| dialect.quote_identifier(c))
                        .collect();
                    sql.push_str(&format!(" ({})", columns.join(", ")));
                }
                sql.push_str(&format!(" AS ({})", cte.body));
                sql
            })
            .collect();

        let keyword = if self.recursive {
            "WITH RECURSIVE"
        } else {
            "WITH"
        };
        format!("{keyword}{} ", indent(&ctes, ","))
    }
}

/// Column to value-fragment assignments of INSERT and UPDATE, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignments(Vec<(String, String)>);

impl Assignments {
    pub fn set(&mut self, column: &str, fragment: impl Into<String>) {
        let fragment = fragment.into();
        match self.0.iter_mut().find(|(c, _)| c == column) {
            Some((_, existing)) => *existing = fragment,
            None => self.0.push((column.to_string(), fragment)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, f)| f.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(c, _)| c.as_str())
    }

    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, f)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(c, f)| (c.as_str(), f.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Every clause a statement can carry. Each renderer reads the parts it
/// supports and ignores the rest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClauseStore {
    pub columns: Vec<String>,
    pub from: Vec<FromEntry>,
    pub where_: Conditions,
    pub having: Conditions,
    pub group: Vec<String>,
    pub order: Vec<String>,
    pub flags: Flags,
    pub paging: Paging,
    pub with: With,
    pub union: Vec<String>,
    pub returning: Vec<String>,
}

impl ClauseStore {
    pub fn new(per_page: u64) -> Self {
        Self {
            paging: Paging::new(per_page),
            ..Default::default()
        }
    }

    /// Clears the clauses of the statement being built. CTEs and union
    /// members collected so far survive.
    pub fn reset_member(&mut self) {
        self.columns.clear();
        self.from.clear();
        self.where_.clear();
        self.having.clear();
        self.group.clear();
        self.order.clear();
        self.flags.clear();
        self.paging.reset();
        self.returning.clear();
    }

    pub fn reset(&mut self) {
        self.reset_member();
        self.with.clear();
        self.union.clear();
    }

    pub fn render_from(&self) -> String {
        if self.from.is_empty() {
            return String::new();
        }
        let entries: Vec<String> = self.from.iter().map(FromEntry::render).collect();
        format!(" FROM{}", indent(&entries, ","))
    }

    pub fn render_by(&self, keyword: &str, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        format!(" {keyword} BY{}", indent(items, ","))
    }

    pub fn render_returning(&self) -> String {
        if self.returning.is_empty() {
            return String::new();
        }
        format!(" RETURNING{}", indent(&self.returning, ","))
    }
}
