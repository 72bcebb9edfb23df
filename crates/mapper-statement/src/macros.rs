//! Method generators shared by the statement types.
//!
//! Every statement is a struct with `store: ClauseStore`, `bind: Bind` and
//! `dialect: Dialect` fields; these macros expand inside its `impl` block.

/// Bind registry access, identifier quoting and flags.
macro_rules! bind_methods {
    () => {
        /// Binds `value` under a named placeholder, inferring its type.
        pub fn bind_value(
            &mut self,
            key: impl Into<String>,
            value: impl Into<$crate::value::Value>,
        ) -> &mut Self {
            self.bind.set_value(key, value);
            self
        }

        pub fn bind_value_typed(
            &mut self,
            key: impl Into<String>,
            value: impl Into<$crate::value::Value>,
            ty: $crate::value::ParamType,
        ) -> &mut Self {
            self.bind.set_value_typed(key, value, ty);
            self
        }

        pub fn bind_many<K, V, I>(&mut self, values: I) -> &mut Self
        where
            K: Into<String>,
            V: Into<$crate::value::Value>,
            I: IntoIterator<Item = (K, V)>,
        {
            self.bind.set_values(values);
            self
        }

        /// Binds `value` under generated key(s) and returns the placeholder
        /// text to splice into a fragment.
        pub fn bind_inline(&mut self, value: impl Into<$crate::bind::Inline>) -> String {
            self.bind.inline(value)
        }

        pub fn bind_values(&self) -> &$crate::bind::BindMap {
            self.bind.values()
        }

        pub fn bind_counter(&self) -> &$crate::bind::BindCounter {
            self.bind.counter()
        }

        pub fn dialect(&self) -> $crate::dialect::Dialect {
            self.dialect
        }

        pub fn quote_identifier(&self, name: &str) -> String {
            self.dialect.quote_identifier(name)
        }

        pub fn set_flag(&mut self, flag: &str, enable: bool) -> &mut Self {
            self.store.flags.set(flag, enable);
            self
        }

        pub fn has_flag(&self, flag: &str) -> bool {
            self.store.flags.contains(flag)
        }

        pub fn reset_flags(&mut self) -> &mut Self {
            self.store.flags.clear();
            self
        }
    };
}

/// LIMIT / OFFSET / page setters and getters.
macro_rules! paging_methods {
    () => {
        pub fn limit(&mut self, limit: u64) -> &mut Self {
            self.store.paging.set_limit(limit);
            self
        }

        pub fn offset(&mut self, offset: u64) -> &mut Self {
            self.store.paging.set_offset(offset);
            self
        }

        /// Selects a 1-based page; `0` removes any limit and offset.
        pub fn page(&mut self, page: u64) -> &mut Self {
            self.store.paging.set_page(page);
            self
        }

        pub fn per_page(&mut self, per_page: u64) -> &mut Self {
            self.store.paging.set_per_page(per_page);
            self
        }

        /// Per-page value used now and restored by `reset_limit`.
        pub fn default_per_page(&mut self, per_page: u64) -> &mut Self {
            self.store.paging.set_default_per_page(per_page);
            self
        }

        pub fn reset_limit(&mut self) -> &mut Self {
            self.store.paging.reset();
            self
        }

        pub fn limit_value(&self) -> u64 {
            self.store.paging.limit()
        }

        pub fn offset_value(&self) -> u64 {
            self.store.paging.offset()
        }

        pub fn page_value(&self) -> u64 {
            self.store.paging.page()
        }

        pub fn per_page_value(&self) -> u64 {
            self.store.paging.per_page()
        }
    };
}

/// The `and` / `or` / `append` family for one condition clause, each with a
/// variant that inlines a value after the fragment.
macro_rules! condition_methods {
    (
        $field:ident,
        $plain:ident, $plain_with:ident,
        $and:ident, $and_with:ident,
        $or:ident, $or_with:ident,
        $append:ident, $append_with:ident,
        $reset:ident
    ) => {
        pub fn $plain(&mut self, condition: &str) -> &mut Self {
            self.$and(condition)
        }

        pub fn $plain_with(
            &mut self,
            condition: &str,
            value: impl Into<$crate::bind::Inline>,
        ) -> &mut Self {
            self.$and_with(condition, value)
        }

        pub fn $and(&mut self, condition: &str) -> &mut Self {
            self.store
                .$field
                .add($crate::condition::Connective::And, condition);
            self
        }

        pub fn $and_with(
            &mut self,
            condition: &str,
            value: impl Into<$crate::bind::Inline>,
        ) -> &mut Self {
            let fragment =
                $crate::condition::with_inline(&mut self.bind, condition, value.into());
            self.store
                .$field
                .add($crate::condition::Connective::And, &fragment);
            self
        }

        pub fn $or(&mut self, condition: &str) -> &mut Self {
            self.store
                .$field
                .add($crate::condition::Connective::Or, condition);
            self
        }

        pub fn $or_with(
            &mut self,
            condition: &str,
            value: impl Into<$crate::bind::Inline>,
        ) -> &mut Self {
            let fragment =
                $crate::condition::with_inline(&mut self.bind, condition, value.into());
            self.store
                .$field
                .add($crate::condition::Connective::Or, &fragment);
            self
        }

        pub fn $append(&mut self, condition: &str) -> &mut Self {
            self.store.$field.append(condition);
            self
        }

        pub fn $append_with(
            &mut self,
            condition: &str,
            value: impl Into<$crate::bind::Inline>,
        ) -> &mut Self {
            let fragment =
                $crate::condition::with_inline(&mut self.bind, condition, value.into());
            self.store.$field.append(&fragment);
            self
        }

        pub fn $reset(&mut self) -> &mut Self {
            self.store.$field.clear();
            self
        }
    };
}

/// WHERE clause methods including `where_equals`.
macro_rules! where_methods {
    () => {
        condition_methods!(
            where_,
            where_, where_with,
            and_where, and_where_with,
            or_where, or_where_with,
            append_where, append_where_with,
            reset_where
        );

        /// AND-s one fragment per criterion: raw fragments verbatim, `IS NULL`
        /// for null, `IN (...)` for lists (`FALSE` when empty) and `=` for
        /// scalars.
        pub fn where_equals<E, I>(&mut self, criteria: I) -> &mut Self
        where
            E: Into<$crate::condition::Equals>,
            I: IntoIterator<Item = E>,
        {
            for criterion in criteria {
                let fragment = criterion.into().render(&mut self.bind);
                self.and_where(&fragment);
            }
            self
        }
    };
}

/// Common table expressions.
macro_rules! with_methods {
    () => {
        /// Registers a CTE. Statement bodies are rendered and their values
        /// merged immediately.
        pub fn with(
            &mut self,
            name: &str,
            body: impl Into<$crate::clause::Source>,
        ) -> &mut Self {
            self.with_columns(name, Vec::<String>::new(), body)
        }

        pub fn with_columns<C, I>(
            &mut self,
            name: &str,
            columns: I,
            body: impl Into<$crate::clause::Source>,
        ) -> &mut Self
        where
            C: Into<String>,
            I: IntoIterator<Item = C>,
        {
            let body = body.into().absorb(&mut self.bind);
            self.store.with.set($crate::clause::Cte {
                name: name.to_string(),
                columns: columns.into_iter().map(Into::into).collect(),
                body,
            });
            self
        }

        pub fn with_recursive(&mut self, recursive: bool) -> &mut Self {
            self.store.with.recursive = recursive;
            self
        }

        pub fn reset_with(&mut self) -> &mut Self {
            self.store.with.clear();
            self
        }
    };
}

/// `RETURNING` columns.
macro_rules! returning_methods {
    () => {
        pub fn returning<C, I>(&mut self, columns: I) -> &mut Self
        where
            C: Into<String>,
            I: IntoIterator<Item = C>,
        {
            self.store
                .returning
                .extend(columns.into_iter().map(Into::into));
            self
        }

        pub fn reset_returning(&mut self) -> &mut Self {
            self.store.returning.clear();
            self
        }
    };
}
