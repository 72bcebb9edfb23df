//! Fetch operations a select query forwards to its connection.

use std::{fmt, str::FromStr};

use crate::error::QueryError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fetch {
    Affected,
    All,
    Assoc,
    Column,
    Group,
    Object,
    Objects,
    One,
    Pairs,
    Unique,
    Value,
    YieldAffected,
    YieldAll,
    YieldAssoc,
    YieldColumn,
    YieldObjects,
    YieldPairs,
    YieldUnique,
}

impl Fetch {
    pub const ALL: [Fetch; 18] = [
        Fetch::Affected,
        Fetch::All,
        Fetch::Assoc,
        Fetch::Column,
        Fetch::Group,
        Fetch::Object,
        Fetch::Objects,
        Fetch::One,
        Fetch::Pairs,
        Fetch::Unique,
        Fetch::Value,
        Fetch::YieldAffected,
        Fetch::YieldAll,
        Fetch::YieldAssoc,
        Fetch::YieldColumn,
        Fetch::YieldObjects,
        Fetch::YieldPairs,
        Fetch::YieldUnique,
    ];

    /// Method name on the connection, e.g. `fetchAll`.
    pub fn name(self) -> &'static str {
        match self {
            Fetch::Affected => "fetchAffected",
            Fetch::All => "fetchAll",
            Fetch::Assoc => "fetchAssoc",
            Fetch::Column => "fetchColumn",
            Fetch::Group => "fetchGroup",
            Fetch::Object => "fetchObject",
            Fetch::Objects => "fetchObjects",
            Fetch::One => "fetchOne",
            Fetch::Pairs => "fetchPairs",
            Fetch::Unique => "fetchUnique",
            Fetch::Value => "fetchValue",
            Fetch::YieldAffected => "yieldAffected",
            Fetch::YieldAll => "yieldAll",
            Fetch::YieldAssoc => "yieldAssoc",
            Fetch::YieldColumn => "yieldColumn",
            Fetch::YieldObjects => "yieldObjects",
            Fetch::YieldPairs => "yieldPairs",
            Fetch::YieldUnique => "yieldUnique",
        }
    }

    /// Whether the operation streams rows instead of collecting them.
    pub fn is_yield(self) -> bool {
        self.name().starts_with("yield")
    }
}

impl FromStr for Fetch {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fetch::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| QueryError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_parses_back() {
        for op in Fetch::ALL {
            assert_eq!(op.name().parse::<Fetch>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "fetchNothing".parse::<Fetch>().unwrap_err();
        assert!(matches!(err, QueryError::UnknownOperation(ref name) if name == "fetchNothing"));
        assert_eq!(err.to_string(), "Unknown method: [fetchNothing]");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!("FETCHALL".parse::<Fetch>().is_err());
    }

    #[test]
    fn test_is_yield() {
        assert!(Fetch::YieldPairs.is_yield());
        assert!(!Fetch::Pairs.is_yield());
    }
}
