//! Placeholder registry for a single statement.
//!
//! Every [`Bind`] draws an ordinal from a [`BindCounter`] when it is created
//! (and again when it is cloned). Inline placeholders are named
//! `_{ordinal}_{sequence}_`, so keys generated by two registries sharing a
//! counter never collide, which is what lets a parent statement absorb the
//! bindings of an embedded sub-select.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, LazyLock,
};

use tracing::trace;

use crate::value::{Param, ParamType, Value};

static GLOBAL_COUNTER: LazyLock<BindCounter> = LazyLock::new(BindCounter::new);

/// Shared source of registry ordinals.
///
/// Clones share the same underlying counter. Build a fresh one with
/// [`BindCounter::new`] to get deterministic placeholder names.
#[derive(Clone, Debug, Default)]
pub struct BindCounter(Arc<AtomicU64>);

impl BindCounter {
    pub fn new() -> Self {
        Self(Arc::new(AtomicU64::new(0)))
    }

    /// The process-wide counter used when no counter is given explicitly.
    pub fn global() -> Self {
        GLOBAL_COUNTER.clone()
    }

    /// Allocates the next ordinal, starting from 1.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Last ordinal handed out, 0 if none yet.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Insertion-ordered map of placeholder name to bound parameter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BindMap {
    entries: Vec<(String, Param)>,
}

impl BindMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `key`. An overwritten key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, param: Param) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = param,
            None => self.entries.push((key, param)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, param)| param)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Param> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Values as `(value, type)` pairs, ready to hand to a driver.
    pub fn to_pairs(&self) -> Vec<(String, (Value, ParamType))> {
        self.entries
            .iter()
            .map(|(k, p)| (k.clone(), (p.value.clone(), p.param_type)))
            .collect()
    }
}

impl IntoIterator for BindMap {
    type Item = (String, Param);
    type IntoIter = std::vec::IntoIter<(String, Param)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Param)> for BindMap {
    fn from_iter<I: IntoIterator<Item = (K, Param)>>(iter: I) -> Self {
        let mut map = BindMap::new();
        for (k, p) in iter {
            map.insert(k, p);
        }
        map
    }
}

/// Rendered SQL of a sub-statement along with the values it binds.
#[derive(Clone, Debug, PartialEq)]
pub struct Embedded {
    pub sql: String,
    pub binds: BindMap,
}

impl Embedded {
    pub fn new(sql: impl Into<String>, binds: BindMap) -> Self {
        Self {
            sql: sql.into(),
            binds,
        }
    }
}

/// Anything that can be turned into an inline placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum Inline {
    Scalar(Value, Option<ParamType>),
    List(Vec<Value>, Option<ParamType>),
    Statement(Embedded),
}

impl Inline {
    /// Forces the parameter type instead of inferring it.
    pub fn with_type(self, ty: ParamType) -> Self {
        match self {
            Inline::Scalar(v, _) => Inline::Scalar(v, Some(ty)),
            Inline::List(vs, _) => Inline::List(vs, Some(ty)),
            stmt => stmt,
        }
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Inline::List(vs, _) if vs.is_empty())
    }
}

macro_rules! inline_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Inline {
                fn from(v: $ty) -> Self {
                    Inline::Scalar(v.into(), None)
                }
            }
        )*
    };
}

inline_scalar!(
    Value, bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, String, &str, &String,
);

impl<T: Into<Value>> From<Option<T>> for Inline {
    fn from(v: Option<T>) -> Self {
        Inline::Scalar(v.into(), None)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Inline {
    fn from(vs: Vec<T>) -> Self {
        Inline::List(vs.into_iter().map(Into::into).collect(), None)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Inline {
    fn from(vs: [T; N]) -> Self {
        Inline::List(vs.into_iter().map(Into::into).collect(), None)
    }
}

impl From<Embedded> for Inline {
    fn from(e: Embedded) -> Self {
        Inline::Statement(e)
    }
}

/// Bound values of one statement.
#[derive(Debug)]
pub struct Bind {
    counter: BindCounter,
    prefix: u64,
    inline_count: u64,
    store: BindMap,
}

impl Bind {
    pub fn new(counter: &BindCounter) -> Self {
        Self {
            counter: counter.clone(),
            prefix: counter.next(),
            inline_count: 0,
            store: BindMap::new(),
        }
    }

    /// Ordinal drawn from the counter for this registry.
    pub fn prefix(&self) -> u64 {
        self.prefix
    }

    pub fn counter(&self) -> &BindCounter {
        &self.counter
    }

    pub fn values(&self) -> &BindMap {
        &self.store
    }

    pub fn into_values(self) -> BindMap {
        self.store
    }

    /// Binds `value` under `key`, inferring its type.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.store.insert(key, Param::new(value, None));
    }

    pub fn set_value_typed(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        ty: ParamType,
    ) {
        self.store.insert(key, Param::new(value, Some(ty)));
    }

    pub fn set_values<K, V, I>(&mut self, values: I)
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in values {
            self.set_value(key, value);
        }
    }

    /// Binds `value` under freshly generated key(s) and returns the SQL
    /// fragment to splice into the statement.
    ///
    /// Sub-statements are not bound themselves: their values are merged in
    /// and their SQL is returned wrapped in parentheses.
    pub fn inline(&mut self, value: impl Into<Inline>) -> String {
        match value.into() {
            Inline::Scalar(value, ty) => format!(":{}", self.inline_value(value, ty)),
            Inline::List(values, ty) => {
                let keys: Vec<String> = values
                    .into_iter()
                    .map(|value| format!(":{}", self.inline_value(value, ty)))
                    .collect();
                format!("({})", keys.join(", "))
            }
            Inline::Statement(embedded) => {
                self.merge(embedded.binds);
                format!("({})", embedded.sql)
            }
        }
    }

    /// Absorbs external values. On a key collision the incoming value wins.
    pub fn merge(&mut self, values: BindMap) {
        trace!(prefix = self.prefix, count = values.len(), "merging bind values");
        for (key, param) in values {
            self.store.insert(key, param);
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.store.remove(key);
    }

    /// Drops every value and restarts the inline sequence. The ordinal is kept.
    pub fn reset(&mut self) {
        self.inline_count = 0;
        self.store.clear();
    }

    fn inline_value(&mut self, value: Value, ty: Option<ParamType>) -> String {
        self.inline_count += 1;
        let key = format!("_{}_{}_", self.prefix, self.inline_count);
        self.store.insert(key.clone(), Param::new(value, ty));
        key
    }
}

impl Clone for Bind {
    fn clone(&self) -> Self {
        Self {
            counter: self.counter.clone(),
            prefix: self.counter.next(),
            inline_count: self.inline_count,
            store: self.store.clone(),
        }
    }
}
