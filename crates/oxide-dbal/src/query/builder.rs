//! The query builder.
//!
//! Clauses are collected without validation and checked when the query
//! is compiled. A join may be added before the FROM it attaches to, as
//! long as the graph is complete by the time [`QueryBuilder::get_sql`]
//! runs.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::expression::{CompositeType, ExpressionBuilder, Predicate};
use crate::platform::{GenericPlatform, Platform};
use crate::value::{ParameterType, SqlValue, ToSqlValue};

use super::for_update::{ConflictResolutionMode, ForUpdate};
use super::from::FromClause;
use super::join::{Join, JoinType};
use super::limit::Limit;
use super::parameter::ParameterKey;

/// The kind of statement being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryType {
    /// `SELECT`.
    #[default]
    Select,
    /// `INSERT`.
    Insert,
    /// `UPDATE`.
    Update,
    /// `DELETE`.
    Delete,
}

/// Whether the cached SQL reflects the current clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheState {
    Clean,
    Dirty,
}

/// Builds SELECT, INSERT, UPDATE and DELETE statements.
///
/// Clause methods consume and return the builder. Parameters are created
/// through `&mut self` methods that return the placeholder to embed.
///
/// # Example
///
/// ```rust
/// use oxide_dbal::QueryBuilder;
///
/// let mut qb = QueryBuilder::default()
///     .select(["u.id", "p.id"])
///     .from("users", "u")
///     .inner_join("u", "phones", "p", "p.user_id=u.id")
///     .where_clause("u.active=1");
///
/// assert_eq!(
///     qb.get_sql().unwrap(),
///     "SELECT u.id, p.id FROM users u INNER JOIN phones p ON p.user_id=u.id WHERE u.active=1"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    platform: Arc<dyn Platform>,
    query_type: QueryType,
    select: Vec<String>,
    distinct: bool,
    from: Vec<FromClause>,
    table: String,
    joins: IndexMap<String, Vec<Join>>,
    set: Vec<String>,
    where_part: Option<Predicate>,
    group_by: Vec<String>,
    having: Option<Predicate>,
    order_by: Vec<String>,
    values: IndexMap<String, String>,
    limit: Limit,
    for_update: Option<ForUpdate>,
    params: IndexMap<ParameterKey, SqlValue>,
    param_types: IndexMap<ParameterKey, ParameterType>,
    named_counter: usize,
    positional_counter: usize,
    state: CacheState,
    sql: Option<String>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(Arc::new(GenericPlatform::new()))
    }
}

impl QueryBuilder {
    /// Creates a SELECT builder for the given platform.
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            platform,
            query_type: QueryType::Select,
            select: vec![],
            distinct: false,
            from: vec![],
            table: String::new(),
            joins: IndexMap::new(),
            set: vec![],
            where_part: None,
            group_by: vec![],
            having: None,
            order_by: vec![],
            values: IndexMap::new(),
            limit: Limit::default(),
            for_update: None,
            params: IndexMap::new(),
            param_types: IndexMap::new(),
            named_counter: 0,
            positional_counter: 0,
            state: CacheState::Dirty,
            sql: None,
        }
    }

    fn changed(mut self) -> Self {
        self.state = CacheState::Dirty;
        self
    }

    /// Returns the platform the query is compiled for.
    #[must_use]
    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    /// Returns the kind of statement being built.
    #[must_use]
    pub const fn query_type(&self) -> QueryType {
        self.query_type
    }

    /// Returns a helper for writing predicate text.
    #[must_use]
    pub const fn expr(&self) -> ExpressionBuilder {
        ExpressionBuilder::new()
    }

    // SELECT

    /// Turns the query into a SELECT and replaces the select list.
    ///
    /// An empty list only switches the statement type.
    #[must_use]
    pub fn select<I>(mut self, expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.query_type = QueryType::Select;
        let expressions: Vec<String> = expressions.into_iter().map(Into::into).collect();
        if !expressions.is_empty() {
            self.select = expressions;
        }
        self.changed()
    }

    /// Turns the query into a SELECT and appends to the select list.
    #[must_use]
    pub fn add_select<I>(mut self, expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.query_type = QueryType::Select;
        self.select.extend(expressions.into_iter().map(Into::into));
        self.changed()
    }

    /// Makes the SELECT return distinct rows.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self.changed()
    }

    /// Adds a FROM source.
    #[must_use]
    pub fn from<'a>(mut self, table: &str, alias: impl Into<Option<&'a str>>) -> Self {
        let alias = alias.into().map(String::from);
        self.from.push(FromClause::new(table, alias));
        self.changed()
    }

    /// Adds an INNER JOIN attached to `from_alias`.
    #[must_use]
    pub fn join<'a>(
        self,
        from_alias: &str,
        table: &str,
        alias: &str,
        condition: impl Into<Option<&'a str>>,
    ) -> Self {
        self.inner_join(from_alias, table, alias, condition)
    }

    /// Adds an INNER JOIN attached to `from_alias`.
    #[must_use]
    pub fn inner_join<'a>(
        self,
        from_alias: &str,
        table: &str,
        alias: &str,
        condition: impl Into<Option<&'a str>>,
    ) -> Self {
        self.add_join(JoinType::Inner, from_alias, table, alias, condition.into())
    }

    /// Adds a LEFT JOIN attached to `from_alias`.
    #[must_use]
    pub fn left_join<'a>(
        self,
        from_alias: &str,
        table: &str,
        alias: &str,
        condition: impl Into<Option<&'a str>>,
    ) -> Self {
        self.add_join(JoinType::Left, from_alias, table, alias, condition.into())
    }

    /// Adds a RIGHT JOIN attached to `from_alias`.
    #[must_use]
    pub fn right_join<'a>(
        self,
        from_alias: &str,
        table: &str,
        alias: &str,
        condition: impl Into<Option<&'a str>>,
    ) -> Self {
        self.add_join(JoinType::Right, from_alias, table, alias, condition.into())
    }

    fn add_join(
        mut self,
        kind: JoinType,
        from_alias: &str,
        table: &str,
        alias: &str,
        condition: Option<&str>,
    ) -> Self {
        let join = Join::new(kind, table, alias, condition.map(String::from));
        self.joins
            .entry(String::from(from_alias))
            .or_default()
            .push(join);
        self.changed()
    }

    // WHERE / HAVING

    /// Replaces the WHERE predicate.
    #[must_use]
    pub fn where_clause(mut self, predicate: impl Into<Predicate>) -> Self {
        self.where_part = Some(predicate.into());
        self.changed()
    }

    /// Combines the WHERE predicate with `predicate` using AND.
    #[must_use]
    pub fn and_where(mut self, predicate: impl Into<Predicate>) -> Self {
        self.where_part = Some(combine(
            self.where_part.take(),
            CompositeType::And,
            predicate.into(),
        ));
        self.changed()
    }

    /// Combines the WHERE predicate with `predicate` using OR.
    #[must_use]
    pub fn or_where(mut self, predicate: impl Into<Predicate>) -> Self {
        self.where_part = Some(combine(
            self.where_part.take(),
            CompositeType::Or,
            predicate.into(),
        ));
        self.changed()
    }

    /// Removes the WHERE predicate.
    #[must_use]
    pub fn reset_where(mut self) -> Self {
        self.where_part = None;
        self.changed()
    }

    /// Replaces the HAVING predicate.
    #[must_use]
    pub fn having(mut self, predicate: impl Into<Predicate>) -> Self {
        self.having = Some(predicate.into());
        self.changed()
    }

    /// Combines the HAVING predicate with `predicate` using AND.
    #[must_use]
    pub fn and_having(mut self, predicate: impl Into<Predicate>) -> Self {
        self.having = Some(combine(
            self.having.take(),
            CompositeType::And,
            predicate.into(),
        ));
        self.changed()
    }

    /// Combines the HAVING predicate with `predicate` using OR.
    #[must_use]
    pub fn or_having(mut self, predicate: impl Into<Predicate>) -> Self {
        self.having = Some(combine(
            self.having.take(),
            CompositeType::Or,
            predicate.into(),
        ));
        self.changed()
    }

    /// Removes the HAVING predicate.
    #[must_use]
    pub fn reset_having(mut self) -> Self {
        self.having = None;
        self.changed()
    }

    // GROUP BY / ORDER BY

    /// Replaces the GROUP BY list.
    #[must_use]
    pub fn group_by<I>(mut self, expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.group_by = expressions.into_iter().map(Into::into).collect();
        self.changed()
    }

    /// Appends to the GROUP BY list.
    #[must_use]
    pub fn add_group_by<I>(mut self, expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.group_by.extend(expressions.into_iter().map(Into::into));
        self.changed()
    }

    /// Removes the GROUP BY list.
    #[must_use]
    pub fn reset_group_by(mut self) -> Self {
        self.group_by.clear();
        self.changed()
    }

    /// Replaces the ORDER BY list with a single ordering.
    #[must_use]
    pub fn order_by<'a>(mut self, sort: &str, order: impl Into<Option<&'a str>>) -> Self {
        self.order_by = vec![ordering(sort, order.into())];
        self.changed()
    }

    /// Appends an ordering to the ORDER BY list.
    #[must_use]
    pub fn add_order_by<'a>(mut self, sort: &str, order: impl Into<Option<&'a str>>) -> Self {
        self.order_by.push(ordering(sort, order.into()));
        self.changed()
    }

    /// Removes the ORDER BY list.
    #[must_use]
    pub fn reset_order_by(mut self) -> Self {
        self.order_by.clear();
        self.changed()
    }

    // INSERT / UPDATE / DELETE

    /// Turns the query into an INSERT into `table`.
    #[must_use]
    pub fn insert(mut self, table: &str) -> Self {
        self.query_type = QueryType::Insert;
        self.table = String::from(table);
        self.changed()
    }

    /// Replaces the column/value pairs of an INSERT.
    #[must_use]
    pub fn values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.values = values
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect();
        self.changed()
    }

    /// Sets one column of an INSERT.
    #[must_use]
    pub fn set_value(mut self, column: &str, value: &str) -> Self {
        self.values.insert(String::from(column), String::from(value));
        self.changed()
    }

    /// Turns the query into an UPDATE of `table`.
    #[must_use]
    pub fn update(mut self, table: &str) -> Self {
        self.query_type = QueryType::Update;
        self.table = String::from(table);
        self.changed()
    }

    /// Adds a `column = value` assignment to an UPDATE.
    #[must_use]
    pub fn set(mut self, column: &str, value: &str) -> Self {
        self.set.push(format!("{column} = {value}"));
        self.changed()
    }

    /// Turns the query into a DELETE from `table`.
    #[must_use]
    pub fn delete(mut self, table: &str) -> Self {
        self.query_type = QueryType::Delete;
        self.table = String::from(table);
        self.changed()
    }

    // Pagination and locking

    /// Sets the number of rows to skip.
    #[must_use]
    pub fn set_first_result(mut self, first_result: usize) -> Self {
        self.limit = Limit::new(self.limit.max_results(), first_result);
        self.changed()
    }

    /// Sets the maximum number of rows to return. `None` removes the limit.
    #[must_use]
    pub fn set_max_results(mut self, max_results: Option<usize>) -> Self {
        self.limit = Limit::new(max_results, self.limit.first_result());
        self.changed()
    }

    /// Returns the number of rows skipped.
    #[must_use]
    pub const fn first_result(&self) -> usize {
        self.limit.first_result()
    }

    /// Returns the maximum number of rows returned.
    #[must_use]
    pub const fn max_results(&self) -> Option<usize> {
        self.limit.max_results()
    }

    /// Locks the selected rows.
    #[must_use]
    pub fn for_update(mut self, mode: ConflictResolutionMode) -> Self {
        self.for_update = Some(ForUpdate::new(mode));
        self.changed()
    }

    // Parameters

    /// Binds a value to a parameter key. Without an explicit type the
    /// parameter is bound as a string.
    #[must_use]
    pub fn set_parameter(
        mut self,
        key: impl Into<ParameterKey>,
        value: impl ToSqlValue,
        parameter_type: Option<ParameterType>,
    ) -> Self {
        self.bind(key.into(), value.to_sql_value(), parameter_type);
        self
    }

    /// Replaces all parameters and their types.
    #[must_use]
    pub fn set_parameters(
        mut self,
        params: IndexMap<ParameterKey, SqlValue>,
        types: IndexMap<ParameterKey, ParameterType>,
    ) -> Self {
        self.params = params;
        self.param_types = types;
        self
    }

    /// Binds `value` to a named parameter and returns its placeholder.
    ///
    /// Without a `placeholder`, a fresh `:dcValueN` name is generated.
    pub fn create_named_parameter(
        &mut self,
        value: impl ToSqlValue,
        parameter_type: Option<ParameterType>,
        placeholder: Option<&str>,
    ) -> String {
        let placeholder = match placeholder {
            Some(p) => String::from(p),
            None => {
                self.named_counter += 1;
                format!(":dcValue{}", self.named_counter)
            }
        };
        let name = placeholder.strip_prefix(':').unwrap_or(&placeholder);
        self.bind(
            ParameterKey::Named(String::from(name)),
            value.to_sql_value(),
            parameter_type,
        );
        placeholder
    }

    /// Binds `value` at the next free position and returns `?`.
    pub fn create_positional_parameter(
        &mut self,
        value: impl ToSqlValue,
        parameter_type: Option<ParameterType>,
    ) -> String {
        let position = self.positional_counter;
        self.positional_counter += 1;
        self.bind(
            ParameterKey::Positional(position),
            value.to_sql_value(),
            parameter_type,
        );
        String::from("?")
    }

    fn bind(&mut self, key: ParameterKey, value: SqlValue, parameter_type: Option<ParameterType>) {
        self.param_types
            .insert(key.clone(), parameter_type.unwrap_or_default());
        self.params.insert(key, value);
    }

    /// Returns all bound parameters in binding order.
    #[must_use]
    pub const fn get_parameters(&self) -> &IndexMap<ParameterKey, SqlValue> {
        &self.params
    }

    /// Returns the value bound to `key`.
    #[must_use]
    pub fn get_parameter(&self, key: &ParameterKey) -> Option<&SqlValue> {
        self.params.get(key)
    }

    /// Returns the types of all bound parameters.
    #[must_use]
    pub const fn get_parameter_types(&self) -> &IndexMap<ParameterKey, ParameterType> {
        &self.param_types
    }

    /// Returns the type of `key`, defaulting to [`ParameterType::String`].
    #[must_use]
    pub fn get_parameter_type(&self, key: &ParameterKey) -> ParameterType {
        self.param_types.get(key).copied().unwrap_or_default()
    }

    // Compilation

    /// Returns the SQL for the current clauses.
    ///
    /// The text is cached until the next clause change.
    ///
    /// # Errors
    ///
    /// See [`QueryBuilder::compile`].
    pub fn get_sql(&mut self) -> Result<String> {
        if self.state == CacheState::Clean {
            if let Some(sql) = &self.sql {
                trace!(sql = %sql, "Using cached SQL");
                return Ok(sql.clone());
            }
        }

        let sql = self.compile()?;
        debug!(sql = %sql, query_type = ?self.query_type, "Compiled query");
        self.sql = Some(sql.clone());
        self.state = CacheState::Clean;
        Ok(sql)
    }

    /// Compiles the current clauses without consulting the cache.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptySelectList`] for a SELECT without expressions.
    /// - [`Error::NonUniqueAlias`] if a join reuses a registered alias.
    /// - [`Error::UnknownAlias`] if a join attaches to an alias no FROM
    ///   or JOIN declares.
    /// - [`Error::NotSupported`] if the platform cannot lock rows as
    ///   requested.
    pub fn compile(&self) -> Result<String> {
        match self.query_type {
            QueryType::Select => self.compile_select(),
            QueryType::Insert => Ok(self.compile_insert()),
            QueryType::Update => Ok(self.compile_update()),
            QueryType::Delete => Ok(self.compile_delete()),
        }
    }

    fn compile_select(&self) -> Result<String> {
        if self.select.is_empty() {
            return Err(Error::EmptySelectList);
        }

        let mut sql = String::from("SELECT ");

        if self.distinct {
            sql.push_str("DISTINCT ");
        }

        sql.push_str(&self.select.join(", "));

        let from = self.from_clauses()?;
        if !from.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&from.join(", "));
        }

        self.push_where(&mut sql);

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if let Some(having) = &self.having {
            sql.push_str(&format!(" HAVING {having}"));
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        if self.limit.is_defined() {
            sql = self.platform.modify_limit_query(
                &sql,
                self.limit.max_results(),
                self.limit.first_result(),
            );
        }

        if let Some(lock) = self.for_update {
            let clause = self
                .platform
                .for_update_sql()
                .ok_or(Error::NotSupported("FOR UPDATE"))?;
            sql.push(' ');
            sql.push_str(clause);

            if lock.mode() == ConflictResolutionMode::SkipLocked {
                let clause = self
                    .platform
                    .skip_locked_sql()
                    .ok_or(Error::NotSupported("SKIP LOCKED"))?;
                sql.push(' ');
                sql.push_str(clause);
            }
        }

        Ok(sql)
    }

    fn compile_insert(&self) -> String {
        let columns: Vec<&str> = self.values.keys().map(String::as_str).collect();
        let values: Vec<&str> = self.values.values().map(String::as_str).collect();
        format!(
            "INSERT INTO {} ({}) VALUES({})",
            self.table,
            columns.join(", "),
            values.join(", ")
        )
    }

    fn compile_update(&self) -> String {
        let mut sql = format!("UPDATE {} SET {}", self.table, self.set.join(", "));
        self.push_where(&mut sql);
        sql
    }

    fn compile_delete(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.table);
        self.push_where(&mut sql);
        sql
    }

    fn push_where(&self, sql: &mut String) {
        if let Some(predicate) = &self.where_part {
            sql.push_str(&format!(" WHERE {predicate}"));
        }
    }

    /// Renders each FROM source followed by its linearized join tree.
    fn from_clauses(&self) -> Result<Vec<String>> {
        let mut known: IndexSet<String> = self
            .from
            .iter()
            .map(|from| String::from(from.reference()))
            .collect();

        let mut clauses = Vec::with_capacity(self.from.len());
        for from in &self.from {
            let mut clause = from.to_sql();
            self.push_joins(&mut clause, from.reference(), &mut known)?;
            clauses.push(clause);
        }

        self.verify_all_aliases_are_known(&known)?;

        Ok(clauses)
    }

    /// Emits every direct join of `from_alias`, then descends into each
    /// joined alias in registration order.
    fn push_joins(
        &self,
        sql: &mut String,
        from_alias: &str,
        known: &mut IndexSet<String>,
    ) -> Result<()> {
        let Some(joins) = self.joins.get(from_alias) else {
            return Ok(());
        };

        for join in joins {
            if known.contains(join.alias()) {
                return Err(Error::NonUniqueAlias {
                    alias: String::from(join.alias()),
                    known_aliases: known.iter().cloned().collect(),
                });
            }
            sql.push_str(&join.to_sql());
            known.insert(String::from(join.alias()));
        }

        for join in joins {
            self.push_joins(sql, join.alias(), known)?;
        }

        Ok(())
    }

    fn verify_all_aliases_are_known(&self, known: &IndexSet<String>) -> Result<()> {
        match self.joins.keys().find(|alias| !known.contains(alias.as_str())) {
            Some(alias) => Err(Error::UnknownAlias {
                alias: alias.clone(),
                known_aliases: known.iter().cloned().collect(),
            }),
            None => Ok(()),
        }
    }
}

/// Merges `predicate` into an existing predicate under `kind`. With no
/// existing predicate the new one is used as-is.
fn combine(existing: Option<Predicate>, kind: CompositeType, predicate: Predicate) -> Predicate {
    match existing {
        Some(existing) => existing.merge(kind, [predicate]),
        None => predicate,
    }
}

fn ordering(sort: &str, order: Option<&str>) -> String {
    match order {
        Some(order) => format!("{sort} {order}"),
        None => String::from(sort),
    }
}
