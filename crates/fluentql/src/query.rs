//! High-level fluent query surface.
//!
//! [`Query`] wraps a [`QueryBuilder`] and fills in the usual defaults: the
//! first `where_` opens the WHERE clause and `or_where`/`and_where` extend it,
//! aggregates are named after their function, fulltext scores are named `score`
//! and subqueries `result`.

use crate::error::QbResult;
use crate::exec::Executor;
use crate::ident::Column;
use crate::qb::{
    Aggregate, DEFAULT_AMOUNT, DEFAULT_OFFSET, FulltextMode, JoinType, Limit, Operator, Order,
    QueryBuilder, SortOrder, WhereType,
};
use crate::value::Value;
use std::sync::Arc;

const TARGET: &str = "fluentql.render";

/// A query under construction.
///
/// # Example
///
/// ```ignore
/// use fluentql::{Query, SortOrder};
///
/// let query = Query::new()
///     .select("tablename", &["id", "username", "email"])?
///     .where_("id", 1)?
///     .and_where("email", "someone@example.com")?
///     .or_where("id", 2)?
///     .order_by("id", SortOrder::Asc)
///     .prepare()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    builder: QueryBuilder,
    debug: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log the rendered statement at `INFO` on every prepare.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    pub fn into_builder(self) -> QueryBuilder {
        self.builder
    }

    fn map(mut self, f: impl FnOnce(QueryBuilder) -> QbResult<QueryBuilder>) -> QbResult<Self> {
        self.builder = f(self.builder)?;
        Ok(self)
    }

    // ==================== Statement heads ====================

    pub fn select(self, table: &str, keys: &[&str]) -> QbResult<Self> {
        self.map(|b| b.select(table, keys, &[]))
    }

    /// SELECT with one alias per key.
    pub fn select_as(self, table: &str, keys: &[&str], names: &[&str]) -> QbResult<Self> {
        self.map(|b| b.select(table, keys, names))
    }

    /// INSERT from `(column, value)` pairs.
    pub fn insert<I, K, V>(self, table: &str, values: I) -> QbResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.map(|b| b.insert_row(table, values))
    }

    /// UPDATE from `(column, value)` pairs.
    pub fn update<I, K, V>(self, table: &str, values: I) -> QbResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.map(|b| b.update_row(table, values))
    }

    pub fn delete(self, table: &str) -> QbResult<Self> {
        self.map(|b| b.delete(table))
    }

    pub fn truncate(self, table: &str) -> QbResult<Self> {
        self.map(|b| b.truncate(table))
    }

    // ==================== Select functions ====================

    /// `COUNT(table.key) AS count`
    pub fn count(self, table: &str, key: &str) -> QbResult<Self> {
        self.count_as(table, key, "count")
    }

    pub fn count_as(self, table: &str, key: &str, alias: &str) -> QbResult<Self> {
        self.map(|b| b.select_func(table, key, alias, Aggregate::Count))
    }

    /// `AVG(table.key) AS avg`
    pub fn avg(self, table: &str, key: &str) -> QbResult<Self> {
        self.avg_as(table, key, "avg")
    }

    pub fn avg_as(self, table: &str, key: &str, alias: &str) -> QbResult<Self> {
        self.map(|b| b.select_func(table, key, alias, Aggregate::Avg))
    }

    /// `SUM(table.key) AS sum`
    pub fn sum(self, table: &str, key: &str) -> QbResult<Self> {
        self.sum_as(table, key, "sum")
    }

    pub fn sum_as(self, table: &str, key: &str, alias: &str) -> QbResult<Self> {
        self.map(|b| b.select_func(table, key, alias, Aggregate::Sum))
    }

    /// Fulltext relevance key named `score`.
    pub fn fulltext(self, index: &str, against: &str, mode: FulltextMode) -> QbResult<Self> {
        self.fulltext_as(index, against, mode, "score")
    }

    pub fn fulltext_as(
        self,
        index: &str,
        against: &str,
        mode: FulltextMode,
        alias: &str,
    ) -> QbResult<Self> {
        self.map(|b| b.fulltext(index, against, mode, alias))
    }

    /// Embed `query` as a key named `result`.
    pub fn sub_query(self, query: Query) -> QbResult<Self> {
        self.sub_query_as(query, "result")
    }

    pub fn sub_query_as(self, query: Query, alias: &str) -> QbResult<Self> {
        let nested = Arc::new(query.builder);
        self.map(|b| b.sub_query(nested, alias))
    }

    // ==================== WHERE ====================

    /// Open the WHERE clause with `key = value`.
    pub fn where_(self, key: impl Into<Column>, value: impl Into<Value>) -> QbResult<Self> {
        self.where_op(key, value, Operator::Eq)
    }

    pub fn where_op(
        self,
        key: impl Into<Column>,
        value: impl Into<Value>,
        operator: Operator,
    ) -> QbResult<Self> {
        self.map(|b| b.where_(key, value, operator, WhereType::Default))
    }

    /// Start a new OR group with `key = value`.
    pub fn or_where(self, key: impl Into<Column>, value: impl Into<Value>) -> QbResult<Self> {
        self.or_where_op(key, value, Operator::Eq)
    }

    pub fn or_where_op(
        self,
        key: impl Into<Column>,
        value: impl Into<Value>,
        operator: Operator,
    ) -> QbResult<Self> {
        self.map(|b| b.where_(key, value, operator, WhereType::Or))
    }

    /// Extend the current group with `AND key = value`.
    pub fn and_where(self, key: impl Into<Column>, value: impl Into<Value>) -> QbResult<Self> {
        self.and_where_op(key, value, Operator::Eq)
    }

    pub fn and_where_op(
        self,
        key: impl Into<Column>,
        value: impl Into<Value>,
        operator: Operator,
    ) -> QbResult<Self> {
        self.map(|b| b.where_(key, value, operator, WhereType::And))
    }

    pub fn where_between(self, key: impl Into<Column>, min: i64, max: i64) -> QbResult<Self> {
        self.map(|b| b.where_between(key, min, max, WhereType::Default))
    }

    pub fn or_where_between(self, key: impl Into<Column>, min: i64, max: i64) -> QbResult<Self> {
        self.map(|b| b.where_between(key, min, max, WhereType::Or))
    }

    pub fn and_where_between(self, key: impl Into<Column>, min: i64, max: i64) -> QbResult<Self> {
        self.map(|b| b.where_between(key, min, max, WhereType::And))
    }

    pub fn where_fulltext(self, index: &str, against: &str, mode: FulltextMode) -> QbResult<Self> {
        self.map(|b| b.where_fulltext(index, against, mode, WhereType::Default))
    }

    pub fn or_where_fulltext(
        self,
        index: &str,
        against: &str,
        mode: FulltextMode,
    ) -> QbResult<Self> {
        self.map(|b| b.where_fulltext(index, against, mode, WhereType::Or))
    }

    pub fn and_where_fulltext(
        self,
        index: &str,
        against: &str,
        mode: FulltextMode,
    ) -> QbResult<Self> {
        self.map(|b| b.where_fulltext(index, against, mode, WhereType::And))
    }

    // ==================== JOIN ====================

    pub fn left_join(self, table: &str, key: &str, target: impl Into<Column>) -> QbResult<Self> {
        self.join_op(JoinType::Left, table, key, target, Operator::Eq)
    }

    pub fn right_join(self, table: &str, key: &str, target: impl Into<Column>) -> QbResult<Self> {
        self.join_op(JoinType::Right, table, key, target, Operator::Eq)
    }

    pub fn inner_join(self, table: &str, key: &str, target: impl Into<Column>) -> QbResult<Self> {
        self.join_op(JoinType::Inner, table, key, target, Operator::Eq)
    }

    /// Join with an explicit comparison operator.
    pub fn join_op(
        self,
        pos: JoinType,
        table: &str,
        key: &str,
        target: impl Into<Column>,
        operator: Operator,
    ) -> QbResult<Self> {
        self.map(|b| b.join(pos, table, key, target, operator))
    }

    // ==================== ORDER / LIMIT ====================

    pub fn order_by(mut self, key: impl Into<Column>, direction: SortOrder) -> Self {
        self.builder = self.builder.order_by(key, direction);
        self
    }

    pub fn order_by_asc(self, key: impl Into<Column>) -> Self {
        self.order_by(key, SortOrder::Asc)
    }

    pub fn order_by_desc(self, key: impl Into<Column>) -> Self {
        self.order_by(key, SortOrder::Desc)
    }

    pub fn order(mut self, order: Order) -> Self {
        self.builder = self.builder.order(order);
        self
    }

    /// `LIMIT offset, amount`; replaces any earlier limit.
    pub fn limit(self, offset: u64, amount: u64) -> QbResult<Self> {
        let limit = Limit::page(offset, amount)?;
        Ok(self.with_limit(limit))
    }

    /// `LIMIT 0, 25`
    pub fn first_page(self) -> Self {
        self.with_limit(Limit {
            offset: Some(DEFAULT_OFFSET),
            amount: Some(DEFAULT_AMOUNT),
        })
    }

    /// Set a raw [`Limit`], which may be half-specified and fail at render time.
    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.builder = self.builder.limit(limit);
        self
    }

    // ==================== Render / execute ====================

    /// Render without storing.
    pub fn render(&self) -> QbResult<String> {
        self.builder.render()
    }

    /// Render and store the SQL.
    pub fn prepare(mut self) -> QbResult<Self> {
        self.prepare_mut()?;
        Ok(self)
    }

    pub fn prepare_mut(&mut self) -> QbResult<&str> {
        let debug = self.debug;
        let sql = self.builder.prepare_mut()?;
        if debug {
            tracing::info!(target: TARGET, sql = %sql, "prepared query");
        }
        Ok(sql)
    }

    /// SQL stored by the last prepare.
    pub fn sql(&self) -> Option<&str> {
        self.builder.sql()
    }

    /// Run the prepared statement, rendering it first if it was never prepared.
    pub async fn execute<E: Executor>(&self, executor: &E) -> QbResult<E::Output> {
        match self.builder.sql() {
            Some(sql) => executor.execute(sql).await,
            None => {
                let sql = self.builder.render()?;
                executor.execute(&sql).await
            }
        }
    }

    /// Prepare, then execute.
    pub async fn go<E: Executor>(&mut self, executor: &E) -> QbResult<E::Output> {
        let sql = self.prepare_mut()?.to_string();
        executor.execute(&sql).await
    }

    /// Send `sql` to `executor` as-is, bypassing the builder entirely.
    pub async fn raw<E: Executor>(executor: &E, sql: &str) -> QbResult<E::Output> {
        executor.execute(sql).await
    }
}

impl From<QueryBuilder> for Query {
    fn from(builder: QueryBuilder) -> Self {
        Self {
            builder,
            debug: false,
        }
    }
}

impl From<Query> for Arc<QueryBuilder> {
    fn from(query: Query) -> Self {
        Arc::new(query.builder)
    }
}
