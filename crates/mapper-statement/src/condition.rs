//! WHERE / HAVING fragment accumulation.

use crate::{
    bind::{Bind, Inline},
    clause::indent,
    value::Value,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    fn prefix(self) -> &'static str {
        match self {
            Connective::And => "AND ",
            Connective::Or => "OR ",
        }
    }
}

/// Ordered condition fragments of one clause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conditions(Vec<String>);

impl Conditions {
    /// Adds a fragment. The connective is dropped on the first one.
    pub fn add(&mut self, connective: Connective, fragment: &str) {
        let prefix = if self.0.is_empty() {
            ""
        } else {
            connective.prefix()
        };
        self.0.push(format!("{prefix}{fragment}"));
    }

    /// Concatenates onto the last fragment, starting an empty one if needed.
    pub fn append(&mut self, fragment: &str) {
        match self.0.last_mut() {
            Some(last) => last.push_str(fragment),
            None => self.0.push(fragment.to_string()),
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Renders ` {keyword} frag1 frag2 ...`, or nothing when empty.
    pub fn render(&self, keyword: &str) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        format!(" {keyword}{}", indent(&self.0, ""))
    }
}

/// Appends the inline placeholder for `value` to `fragment`.
///
/// An empty list binds nothing and leaves the fragment untouched.
pub(crate) fn with_inline(bind: &mut Bind, fragment: &str, value: Inline) -> String {
    if value.is_empty_list() {
        return fragment.to_string();
    }
    format!("{fragment}{}", bind.inline(value))
}

/// One entry of a `where_equals` criteria list.
#[derive(Clone, Debug, PartialEq)]
pub enum Equals {
    /// Used verbatim.
    Raw(String),
    /// `column = value`, `column IN (...)` or `column IS NULL`.
    Column(String, Inline),
}

impl Equals {
    pub fn raw(fragment: impl Into<String>) -> Self {
        Equals::Raw(fragment.into())
    }

    pub fn column(column: impl Into<String>, value: impl Into<Inline>) -> Self {
        Equals::Column(column.into(), value.into())
    }

    /// Renders the fragment, binding whatever value it carries.
    pub(crate) fn render(self, bind: &mut Bind) -> String {
        match self {
            Equals::Raw(fragment) => fragment,
            Equals::Column(column, Inline::Scalar(Value::Null, _)) => {
                format!("{column} IS NULL")
            }
            Equals::Column(_, value) if value.is_empty_list() => "FALSE".to_string(),
            Equals::Column(column, value @ Inline::List(..)) => {
                format!("{column} IN {}", bind.inline(value))
            }
            Equals::Column(column, value) => format!("{column} = {}", bind.inline(value)),
        }
    }
}

impl From<&str> for Equals {
    fn from(fragment: &str) -> Self {
        Equals::raw(fragment)
    }
}

impl From<String> for Equals {
    fn from(fragment: String) -> Self {
        Equals::Raw(fragment)
    }
}

impl<C: Into<String>, V: Into<Inline>> From<(C, V)> for Equals {
    fn from((column, value): (C, V)) -> Self {
        Equals::column(column, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::BindCounter;

    #[test]
    fn test_first_fragment_drops_connective() {
        let mut conditions = Conditions::default();
        conditions.add(Connective::Or, "a = 1");
        conditions.add(Connective::And, "b = 2");
        conditions.add(Connective::Or, "c = 3");
        assert_eq!(conditions.render("WHERE"), " WHERE a = 1 AND b = 2 OR c = 3");
    }

    #[test]
    fn test_append_extends_last_fragment() {
        let mut conditions = Conditions::default();
        conditions.append("(a = 1");
        conditions.add(Connective::And, "b = 2");
        conditions.append(" OR b = 3)");
        assert_eq!(conditions.fragments(), &["(a = 1", "AND b = 2 OR b = 3)"]);
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(Conditions::default().render("HAVING"), "");
    }

    #[test]
    fn test_with_inline_skips_empty_list() {
        let counter = BindCounter::new();
        let mut bind = Bind::new(&counter);
        assert_eq!(
            with_inline(&mut bind, "a IN ", Inline::from(Vec::<i64>::new())),
            "a IN "
        );
        assert!(bind.values().is_empty());
        assert_eq!(with_inline(&mut bind, "a = ", 0.into()), "a = :_1_1_");
    }

    #[test]
    fn test_equals_render() {
        let counter = BindCounter::new();
        let mut bind = Bind::new(&counter);

        assert_eq!(Equals::raw("x = NOW()").render(&mut bind), "x = NOW()");
        assert_eq!(
            Equals::column("a", Value::Null).render(&mut bind),
            "a IS NULL"
        );
        assert_eq!(
            Equals::column("a", Vec::<i64>::new()).render(&mut bind),
            "FALSE"
        );
        assert_eq!(
            Equals::column("a", vec![1, 2]).render(&mut bind),
            "a IN (:_1_1_, :_1_2_)"
        );
        assert_eq!(Equals::from(("b", "x")).render(&mut bind), "b = :_1_3_");
    }
}
