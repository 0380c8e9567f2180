//! SQL renderer.
//!
//! Rendering is a pure, single-pass translation of the builder state. Stages are
//! produced in a fixed order (head, joins, where, order, limit), empty stages are
//! dropped and the rest are joined with single spaces.

use crate::error::{QbError, QbResult};
use crate::ident::{escape, quote_literal};
use crate::qb::builder::QueryBuilder;
use crate::qb::condition::{Condition, Where};
use crate::qb::key::{Key, KeyExpr};
use crate::qb::statement::Statement;

const TARGET: &str = "fluentql.render";

fn render_alias(sql: &mut String, alias: Option<&str>) {
    if let Some(alias) = alias {
        sql.push_str(" AS ");
        sql.push_str(&escape(alias));
    }
}

fn render_key(key: &Key) -> QbResult<String> {
    let mut sql = match &key.expr {
        KeyExpr::Column(column) => column.escaped(),
        KeyExpr::Aggregate { func, column } => {
            format!("{}({})", func.as_sql(), column.escaped())
        }
        KeyExpr::Fulltext {
            index,
            against,
            mode,
        } => format!("MATCH ({index}) AGAINST {} {}", quote_literal(against), mode),
        KeyExpr::SubQuery(nested) => format!("({})", nested.render()?),
    };
    let alias = match &key.expr {
        KeyExpr::Column(_) => key.alias.as_deref(),
        // Function and subquery keys are always named.
        _ => Some(
            key.alias
                .as_deref()
                .or_else(|| key.func().map(|f| f.default_alias()))
                .unwrap_or("result"),
        ),
    };
    render_alias(&mut sql, alias);
    Ok(sql)
}

fn render_head(statement: &Statement) -> QbResult<String> {
    let sql = match statement {
        Statement::Select { table, keys } => {
            let key_list = if keys.is_empty() {
                "*".to_string()
            } else {
                keys.iter()
                    .map(render_key)
                    .collect::<QbResult<Vec<_>>>()?
                    .join(",")
            };
            format!("SELECT {} FROM {}", key_list, escape(table))
        }
        Statement::Insert {
            table,
            columns,
            values,
        } => {
            let columns: Vec<String> = columns.iter().map(|c| c.escaped()).collect();
            let values: Vec<String> = values.iter().map(|v| v.to_sql()).collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                escape(table),
                columns.join(","),
                values.join(",")
            )
        }
        Statement::Update { table, assignments } => {
            let set: Vec<String> = assignments
                .iter()
                .map(|(column, value)| format!("{}={}", column.escaped(), value.to_sql()))
                .collect();
            format!("UPDATE {} SET {}", escape(table), set.join(", "))
        }
        Statement::Delete { table } => format!("DELETE FROM {}", escape(table)),
        Statement::Truncate { table } => format!("TRUNCATE {}", escape(table)),
    };
    Ok(sql)
}

fn render_condition(condition: &Condition) -> String {
    match condition {
        Condition::Compare {
            column,
            operator,
            value,
        } => {
            let op = if value.is_null() {
                operator.for_null()
            } else {
                operator.as_sql()
            };
            format!("{} {} {}", column.escaped(), op, value.to_sql())
        }
        Condition::Between { column, min, max } => {
            format!("{} BETWEEN {} AND {}", column.escaped(), min, max)
        }
        Condition::Match {
            index,
            against,
            mode,
        } => format!("MATCH ({index}) AGAINST {} {}", quote_literal(against), mode),
    }
}

/// Split predicates into groups: `Default`/`Or` open a group, `And` extends it.
fn group_wheres(wheres: &[Where]) -> Vec<Vec<&Where>> {
    let mut groups: Vec<Vec<&Where>> = Vec::new();
    for clause in wheres {
        match groups.last_mut() {
            Some(group) if !clause.kind.starts_group() => group.push(clause),
            _ => groups.push(vec![clause]),
        }
    }
    groups
}

impl QueryBuilder {
    fn render_joins(&self, base_table: &str) -> String {
        self.joins
            .iter()
            .map(|join| {
                format!(
                    "{} JOIN {} ON {} {} {}",
                    join.pos,
                    escape(&join.table),
                    join.on.qualify(&join.table).escaped(),
                    join.operator,
                    join.target.qualify(base_table).escaped()
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render_where(&self) -> String {
        let groups = group_wheres(&self.wheres);
        if groups.is_empty() {
            return String::new();
        }
        let rendered: Vec<String> = groups
            .iter()
            .map(|group| {
                let preds: Vec<String> =
                    group.iter().map(|w| render_condition(&w.condition)).collect();
                format!("({})", preds.join(" AND "))
            })
            .collect();
        format!("WHERE {}", rendered.join(" OR "))
    }

    fn render_order(&self) -> String {
        let keys: Vec<String> = self
            .orders
            .iter()
            .flat_map(|order| order.pairs())
            .map(|(key, direction)| format!("{} {}", key.escaped(), direction))
            .collect();
        if keys.is_empty() {
            return String::new();
        }
        format!("ORDER BY {}", keys.join(", "))
    }

    /// Render the accumulated state into one SQL statement.
    ///
    /// Does not touch the builder; see [`QueryBuilder::prepare`] to store the result.
    pub fn render(&self) -> QbResult<String> {
        let statement = self.statement.as_ref().ok_or(QbError::UnknownQueryType)?;

        let head = render_head(statement)?;
        tracing::trace!(target: TARGET, stage = "head", sql = %head);

        let joins = self.render_joins(statement.table());
        tracing::trace!(target: TARGET, stage = "join", sql = %joins);

        let wheres = self.render_where();
        tracing::trace!(target: TARGET, stage = "where", sql = %wheres);

        let order = self.render_order();
        tracing::trace!(target: TARGET, stage = "order", sql = %order);

        let limit = match self.limit {
            Some(limit) => limit.to_sql()?.unwrap_or_default(),
            None => String::new(),
        };
        tracing::trace!(target: TARGET, stage = "limit", sql = %limit);

        let sql = [head, joins, wheres, order, limit]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let sql = sql.trim_end().to_string();

        tracing::debug!(
            target: TARGET,
            query_type = %statement.query_type(),
            table = statement.table(),
            sql = %sql,
            "rendered query"
        );
        Ok(sql)
    }

    /// Render and store the SQL, keeping the structured state for introspection.
    ///
    /// Calling it again on unchanged state yields the same string.
    pub fn prepare(mut self) -> QbResult<Self> {
        let sql = self.render()?;
        self.rendered = Some(sql);
        Ok(self)
    }

    /// Render into the stored SQL in place and return it.
    pub fn prepare_mut(&mut self) -> QbResult<&str> {
        let sql = self.render()?;
        Ok(self.rendered.insert(sql).as_str())
    }
}
