//! WHERE predicates and comparison operators.

use crate::error::{QbError, QbResult};
use crate::ident::Column;
use crate::qb::key::FulltextMode;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// How a predicate attaches to the ones before it.
///
/// `Default` opens the first group, `Or` opens a new group, `And` joins the
/// current group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhereType {
    #[default]
    Default,
    Or,
    And,
}

impl WhereType {
    /// Whether a predicate of this type starts a new parenthesized group.
    pub fn starts_group(self) -> bool {
        matches!(self, WhereType::Default | WhereType::Or)
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    Eq,
    Lt,
    Gt,
    Lte,
    Gte,
    Ne,
    NotEq,
    NullSafeEq,
    Like,
    NotLike,
}

impl Operator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
            Operator::Ne => "!=",
            Operator::NotEq => "<>",
            Operator::NullSafeEq => "<=>",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
        }
    }

    /// Operator to emit when the right-hand side is `NULL`.
    pub(crate) fn for_null(self) -> &'static str {
        match self {
            Operator::Eq => "IS",
            Operator::Ne => "IS NOT",
            other => other.as_sql(),
        }
    }
}

impl FromStr for Operator {
    type Err = QbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim() {
            "=" => Operator::Eq,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Lte,
            ">=" => Operator::Gte,
            "!=" => Operator::Ne,
            "<>" => Operator::NotEq,
            "<=>" => Operator::NullSafeEq,
            other if other.eq_ignore_ascii_case("like") => Operator::Like,
            other if other.eq_ignore_ascii_case("not like") => Operator::NotLike,
            other => return Err(QbError::InvalidOperator(other.to_string())),
        };
        Ok(op)
    }
}

impl TryFrom<&str> for Operator {
    type Error = QbError;

    fn try_from(s: &str) -> QbResult<Self> {
        s.parse()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// The predicate body.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column op value`. The operator is stored as given; NULL substitution
    /// happens only when rendering.
    Compare {
        column: Column,
        operator: Operator,
        value: Value,
    },
    /// `column BETWEEN min AND max`, with `min < max`.
    Between { column: Column, min: i64, max: i64 },
    /// `MATCH (index) AGAINST 'text' <mode>`.
    Match {
        index: String,
        against: String,
        mode: FulltextMode,
    },
}

/// One accumulated WHERE record.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub kind: WhereType,
    pub condition: Condition,
}

impl Where {
    pub fn new(kind: WhereType, condition: Condition) -> Self {
        Self { kind, condition }
    }

    /// Operator keyword as accumulated (`BETWEEN` and `MATCH` for the special forms).
    pub fn operator(&self) -> &'static str {
        match &self.condition {
            Condition::Compare { operator, .. } => operator.as_sql(),
            Condition::Between { .. } => "BETWEEN",
            Condition::Match { .. } => "MATCH",
        }
    }
}
