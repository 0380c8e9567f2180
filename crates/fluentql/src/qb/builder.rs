//! Clause accumulator.
//!
//! [`QueryBuilder`] collects typed clause records in call order. Each method
//! validates its own arguments, appends the derived record(s) and hands the
//! builder back. No SQL text is produced until [`QueryBuilder::prepare`].

use crate::error::{QbError, QbResult};
use crate::ident::{Column, Reference};
use crate::qb::condition::{Condition, Operator, Where, WhereType};
use crate::qb::join::{Join, JoinType};
use crate::qb::key::{Aggregate, FulltextMode, Key, KeyExpr};
use crate::qb::limit::Limit;
use crate::qb::order::{Order, SortOrder};
use crate::qb::statement::{QueryType, Statement};
use crate::value::Value;
use std::sync::Arc;

/// Builder state for one statement.
///
/// State is append-only: clause methods never remove or edit earlier records,
/// and `prepare()` stores the rendered SQL without clearing anything.
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    /// Statement head (set once)
    pub(crate) statement: Option<Statement>,
    /// WHERE predicates in call order
    pub(crate) wheres: Vec<Where>,
    /// JOIN clauses in call order
    pub(crate) joins: Vec<Join>,
    /// ORDER BY records in call order
    pub(crate) orders: Vec<Order>,
    /// LIMIT (last call wins)
    pub(crate) limit: Option<Limit>,
    /// Output of the last `prepare()`
    pub(crate) rendered: Option<String>,
}

fn require_name(name: &str, what: &'static str) -> QbResult<()> {
    if name.trim().is_empty() {
        return Err(QbError::EmptyIdentifier(what));
    }
    Ok(())
}

fn require_column(column: &Column, what: &'static str) -> QbResult<()> {
    if column.is_empty() {
        return Err(QbError::EmptyIdentifier(what));
    }
    Ok(())
}

/// UPDATE needs at least one `SET` assignment.
fn require_assignments(columns: &[Column]) -> QbResult<()> {
    if columns.is_empty() {
        return Err(QbError::NoAssignments);
    }
    Ok(())
}

/// Promote a select key to a reference: unqualified keys belong to `table`.
fn promote(table: &str, key: &str) -> Reference {
    Column::parse(key).qualify(table)
}

impl QueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Statement heads ====================

    fn set_statement(&mut self, statement: Statement) -> QbResult<()> {
        if let Some(current) = &self.statement {
            return Err(QbError::StatementConflict {
                current: current.query_type().as_str(),
                table: current.table().to_string(),
                requested: statement.query_type().as_str(),
            });
        }
        self.statement = Some(statement);
        Ok(())
    }

    /// Key list of the current SELECT, opening one on `table` if the builder is empty.
    fn select_keys_mut(&mut self, table: &str) -> QbResult<&mut Vec<Key>> {
        if self.statement.is_none() {
            self.statement = Some(Statement::Select {
                table: table.to_string(),
                keys: Vec::new(),
            });
        }
        if let Some(current) = &self.statement {
            if !matches!(current, Statement::Select { table: t, .. } if t == table) {
                return Err(QbError::StatementConflict {
                    current: current.query_type().as_str(),
                    table: current.table().to_string(),
                    requested: QueryType::Select.as_str(),
                });
            }
        }
        match self.statement.as_mut() {
            Some(Statement::Select { keys, .. }) => Ok(keys),
            _ => Err(QbError::UnknownQueryType),
        }
    }

    /// Key list of an existing SELECT.
    fn existing_select_keys_mut(&mut self, what: &'static str) -> QbResult<&mut Vec<Key>> {
        match self.statement.as_mut() {
            Some(Statement::Select { keys, .. }) => Ok(keys),
            _ => Err(QbError::RequiresSelect(what)),
        }
    }

    /// SELECT `keys` FROM `table`.
    ///
    /// `names`, when non-empty, aliases each key and must match `keys` in length.
    /// Keys without a `.` are qualified with `table`.
    pub fn select(mut self, table: &str, keys: &[&str], names: &[&str]) -> QbResult<Self> {
        require_name(table, "table")?;
        if !names.is_empty() && names.len() != keys.len() {
            return Err(QbError::ArityMismatch {
                expected: keys.len(),
                found: names.len(),
            });
        }
        let mut selected = Vec::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            require_name(key, "select key")?;
            let alias = names.get(i).map(|n| n.to_string());
            selected.push(Key::column(promote(table, key), alias));
        }
        self.set_statement(Statement::Select {
            table: table.to_string(),
            keys: selected,
        })?;
        Ok(self)
    }

    /// Append an aggregate key (`COUNT`, `AVG`, `SUM`) to a SELECT on `table`.
    ///
    /// Opens the SELECT if the builder is still empty.
    pub fn select_func(
        mut self,
        table: &str,
        key: &str,
        alias: &str,
        func: Aggregate,
    ) -> QbResult<Self> {
        require_name(table, "table")?;
        require_name(key, "function key")?;
        require_name(alias, "function alias")?;
        let column = promote(table, key);
        self.select_keys_mut(table)?
            .push(Key::aggregate(func, column, alias));
        Ok(self)
    }

    /// `COUNT(table.key) AS alias`
    pub fn count(self, table: &str, key: &str, alias: &str) -> QbResult<Self> {
        self.select_func(table, key, alias, Aggregate::Count)
    }

    /// `AVG(table.key) AS alias`
    pub fn avg(self, table: &str, key: &str, alias: &str) -> QbResult<Self> {
        self.select_func(table, key, alias, Aggregate::Avg)
    }

    /// `SUM(table.key) AS alias`
    pub fn sum(self, table: &str, key: &str, alias: &str) -> QbResult<Self> {
        self.select_func(table, key, alias, Aggregate::Sum)
    }

    /// Append a fulltext relevance key to the current SELECT.
    pub fn fulltext(
        mut self,
        index: &str,
        against: &str,
        mode: FulltextMode,
        alias: &str,
    ) -> QbResult<Self> {
        require_name(index, "fulltext index")?;
        require_name(alias, "fulltext alias")?;
        self.existing_select_keys_mut("fulltext")?.push(Key {
            expr: KeyExpr::Fulltext {
                index: index.to_string(),
                against: against.to_string(),
                mode,
            },
            alias: Some(alias.to_string()),
        });
        Ok(self)
    }

    /// Embed another builder as a subquery key of the current SELECT.
    pub fn sub_query(
        mut self,
        query: impl Into<Arc<QueryBuilder>>,
        alias: &str,
    ) -> QbResult<Self> {
        require_name(alias, "subquery alias")?;
        self.existing_select_keys_mut("subquery")?.push(Key {
            expr: KeyExpr::SubQuery(query.into()),
            alias: Some(alias.to_string()),
        });
        Ok(self)
    }

    fn columns_and_values(keys: &[&str], values: Vec<Value>) -> QbResult<(Vec<Column>, Vec<Value>)> {
        if keys.len() != values.len() {
            return Err(QbError::UnequalKeysAndValues {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut columns = Vec::with_capacity(keys.len());
        for key in keys {
            require_name(key, "column")?;
            columns.push(Column::parse(key));
        }
        Ok((columns, values))
    }

    fn split_pairs<I, K, V>(pairs: I) -> QbResult<(Vec<Column>, Vec<Value>)>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for (key, value) in pairs {
            require_name(key.as_ref(), "column")?;
            columns.push(Column::parse(key.as_ref()));
            values.push(value.into());
        }
        Ok((columns, values))
    }

    /// INSERT INTO `table` (`keys`) VALUES (`values`).
    pub fn insert(mut self, table: &str, keys: &[&str], values: Vec<Value>) -> QbResult<Self> {
        require_name(table, "table")?;
        let (columns, values) = Self::columns_and_values(keys, values)?;
        self.set_statement(Statement::Insert {
            table: table.to_string(),
            columns,
            values,
        })?;
        Ok(self)
    }

    /// INSERT from `(column, value)` pairs.
    pub fn insert_row<I, K, V>(mut self, table: &str, pairs: I) -> QbResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        require_name(table, "table")?;
        let (columns, values) = Self::split_pairs(pairs)?;
        self.set_statement(Statement::Insert {
            table: table.to_string(),
            columns,
            values,
        })?;
        Ok(self)
    }

    /// UPDATE `table` SET `key`=`value`, ...
    pub fn update(mut self, table: &str, keys: &[&str], values: Vec<Value>) -> QbResult<Self> {
        require_name(table, "table")?;
        let (columns, values) = Self::columns_and_values(keys, values)?;
        require_assignments(&columns)?;
        self.set_statement(Statement::Update {
            table: table.to_string(),
            assignments: columns.into_iter().zip(values).collect(),
        })?;
        Ok(self)
    }

    /// UPDATE from `(column, value)` pairs.
    pub fn update_row<I, K, V>(mut self, table: &str, pairs: I) -> QbResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        require_name(table, "table")?;
        let (columns, values) = Self::split_pairs(pairs)?;
        require_assignments(&columns)?;
        self.set_statement(Statement::Update {
            table: table.to_string(),
            assignments: columns.into_iter().zip(values).collect(),
        })?;
        Ok(self)
    }

    /// DELETE FROM `table`.
    pub fn delete(mut self, table: &str) -> QbResult<Self> {
        require_name(table, "table")?;
        self.set_statement(Statement::Delete {
            table: table.to_string(),
        })?;
        Ok(self)
    }

    /// TRUNCATE `table`.
    pub fn truncate(mut self, table: &str) -> QbResult<Self> {
        require_name(table, "table")?;
        self.set_statement(Statement::Truncate {
            table: table.to_string(),
        })?;
        Ok(self)
    }

    // ==================== WHERE ====================

    fn push_where(&mut self, kind: WhereType, condition: Condition) -> QbResult<()> {
        match (kind, self.wheres.is_empty()) {
            (WhereType::Default, false) => return Err(QbError::DuplicateInitialWhereClause),
            (WhereType::Or | WhereType::And, true) => return Err(QbError::NoInitialWhereClause),
            _ => {}
        }
        self.wheres.push(Where::new(kind, condition));
        Ok(())
    }

    /// Add a comparison predicate.
    ///
    /// The first predicate must use [`WhereType::Default`]; every later one must be
    /// [`WhereType::Or`] or [`WhereType::And`].
    pub fn where_(
        mut self,
        key: impl Into<Column>,
        value: impl Into<Value>,
        operator: Operator,
        kind: WhereType,
    ) -> QbResult<Self> {
        let column = key.into();
        require_column(&column, "where key")?;
        self.push_where(
            kind,
            Condition::Compare {
                column,
                operator,
                value: value.into(),
            },
        )?;
        Ok(self)
    }

    /// Add `key BETWEEN min AND max`; requires `min < max`.
    pub fn where_between(
        mut self,
        key: impl Into<Column>,
        min: i64,
        max: i64,
        kind: WhereType,
    ) -> QbResult<Self> {
        if min >= max {
            return Err(QbError::InvalidRange { min, max });
        }
        let column = key.into();
        require_column(&column, "where key")?;
        self.push_where(kind, Condition::Between { column, min, max })?;
        Ok(self)
    }

    /// Add `MATCH (index) AGAINST 'text' <mode>`.
    pub fn where_fulltext(
        mut self,
        index: &str,
        against: &str,
        mode: FulltextMode,
        kind: WhereType,
    ) -> QbResult<Self> {
        require_name(index, "fulltext index")?;
        self.push_where(
            kind,
            Condition::Match {
                index: index.to_string(),
                against: against.to_string(),
                mode,
            },
        )?;
        Ok(self)
    }

    // ==================== JOIN ====================

    /// Add a join on `table`.
    ///
    /// `key` is qualified with the joined table unless it contains a `.`; a bare
    /// `target` is qualified with the base table at render time.
    pub fn join(
        mut self,
        pos: JoinType,
        table: &str,
        key: &str,
        target: impl Into<Column>,
        operator: Operator,
    ) -> QbResult<Self> {
        require_name(table, "join table")?;
        require_name(key, "join key")?;
        let target = target.into();
        require_column(&target, "join target")?;
        self.joins
            .push(Join::new(pos, table, key, target).with_operator(operator));
        Ok(self)
    }

    /// Add LEFT JOIN with `=`.
    pub fn left_join(self, table: &str, key: &str, target: impl Into<Column>) -> QbResult<Self> {
        self.join(JoinType::Left, table, key, target, Operator::Eq)
    }

    /// Add RIGHT JOIN with `=`.
    pub fn right_join(self, table: &str, key: &str, target: impl Into<Column>) -> QbResult<Self> {
        self.join(JoinType::Right, table, key, target, Operator::Eq)
    }

    /// Add INNER JOIN with `=`.
    pub fn inner_join(self, table: &str, key: &str, target: impl Into<Column>) -> QbResult<Self> {
        self.join(JoinType::Inner, table, key, target, Operator::Eq)
    }

    // ==================== ORDER / LIMIT ====================

    /// Append one order key. Keys render in call order.
    pub fn order_by(mut self, key: impl Into<Column>, direction: SortOrder) -> Self {
        self.orders.push(Order::by(key, direction));
        self
    }

    /// Append a multi-key order record.
    pub fn order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Set LIMIT, replacing any earlier one.
    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    // ==================== Introspection ====================

    pub fn statement(&self) -> Option<&Statement> {
        self.statement.as_ref()
    }

    pub fn query_type(&self) -> Option<QueryType> {
        self.statement.as_ref().map(Statement::query_type)
    }

    pub fn table(&self) -> Option<&str> {
        self.statement.as_ref().map(Statement::table)
    }

    /// Selected keys; empty for non-SELECT statements.
    pub fn keys(&self) -> &[Key] {
        match &self.statement {
            Some(Statement::Select { keys, .. }) => keys,
            _ => &[],
        }
    }

    pub fn where_clauses(&self) -> &[Where] {
        &self.wheres
    }

    pub fn join_clauses(&self) -> &[Join] {
        &self.joins
    }

    pub fn order_clauses(&self) -> &[Order] {
        &self.orders
    }

    pub fn limit_clause(&self) -> Option<Limit> {
        self.limit
    }

    /// SQL stored by the last `prepare()`.
    pub fn sql(&self) -> Option<&str> {
        self.rendered.as_deref()
    }
}
