//! Selected output columns.

use crate::ident::Reference;
use crate::qb::builder::QueryBuilder;
use std::fmt;
use std::sync::Arc;

/// Aggregate or search function applied to a selected key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectFunction {
    Count,
    Avg,
    Sum,
    Fulltext,
}

impl SelectFunction {
    /// Alias used when the caller does not name the output column.
    pub fn default_alias(self) -> &'static str {
        match self {
            SelectFunction::Count => "count",
            SelectFunction::Avg => "avg",
            SelectFunction::Sum => "sum",
            SelectFunction::Fulltext => "score",
        }
    }
}

/// Aggregates that wrap a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Count,
    Avg,
    Sum,
}

impl Aggregate {
    pub fn as_sql(self) -> &'static str {
        match self {
            Aggregate::Count => "COUNT",
            Aggregate::Avg => "AVG",
            Aggregate::Sum => "SUM",
        }
    }

    pub fn function(self) -> SelectFunction {
        match self {
            Aggregate::Count => SelectFunction::Count,
            Aggregate::Avg => SelectFunction::Avg,
            Aggregate::Sum => SelectFunction::Sum,
        }
    }
}

/// MySQL fulltext search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FulltextMode {
    #[default]
    NaturalLanguage,
    Boolean,
}

impl FulltextMode {
    pub fn as_sql(self) -> &'static str {
        match self {
            FulltextMode::NaturalLanguage => "IN NATURAL LANGUAGE MODE",
            FulltextMode::Boolean => "IN BOOLEAN MODE",
        }
    }
}

impl fmt::Display for FulltextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// What a selected key evaluates to.
#[derive(Debug, Clone)]
pub enum KeyExpr {
    /// Plain column.
    Column(Reference),
    /// `FUNC(column)`.
    Aggregate { func: Aggregate, column: Reference },
    /// `MATCH (index) AGAINST 'text' <mode>`; `index` is emitted unescaped so it can
    /// name a multi-column fulltext index such as `title,body`.
    Fulltext {
        index: String,
        against: String,
        mode: FulltextMode,
    },
    /// A nested query, rendered in parentheses.
    SubQuery(Arc<QueryBuilder>),
}

/// A selected output column.
#[derive(Debug, Clone)]
pub struct Key {
    pub expr: KeyExpr,
    pub alias: Option<String>,
}

impl Key {
    pub fn column(column: Reference, alias: Option<String>) -> Self {
        Self {
            expr: KeyExpr::Column(column),
            alias,
        }
    }

    pub fn aggregate(func: Aggregate, column: Reference, alias: impl Into<String>) -> Self {
        Self {
            expr: KeyExpr::Aggregate { func, column },
            alias: Some(alias.into()),
        }
    }

    /// Function tag of this key, if any.
    pub fn func(&self) -> Option<SelectFunction> {
        match &self.expr {
            KeyExpr::Aggregate { func, .. } => Some(func.function()),
            KeyExpr::Fulltext { .. } => Some(SelectFunction::Fulltext),
            KeyExpr::Column(_) | KeyExpr::SubQuery(_) => None,
        }
    }

    /// The column this key reads, for plain and aggregate keys.
    pub fn reference(&self) -> Option<&Reference> {
        match &self.expr {
            KeyExpr::Column(r) | KeyExpr::Aggregate { column: r, .. } => Some(r),
            _ => None,
        }
    }
}
