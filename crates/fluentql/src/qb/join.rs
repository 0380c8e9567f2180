//! JOIN clauses.

use crate::ident::Column;
use crate::qb::condition::Operator;
use std::fmt;

/// Join position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Left,
    Right,
    Inner,
}

impl JoinType {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Inner => "INNER",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// `<pos> JOIN <table> ON <on> <operator> <target>`
///
/// A bare `on` column is qualified with the joined table; a bare `target` is
/// qualified with the base table of the statement, never with an earlier join.
/// Pass a [`Reference`](crate::ident::Reference) as target to compare against
/// another joined table.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub pos: JoinType,
    pub table: String,
    pub on: Column,
    pub target: Column,
    pub operator: Operator,
}

impl Join {
    pub fn new(
        pos: JoinType,
        table: impl Into<String>,
        on: impl Into<Column>,
        target: impl Into<Column>,
    ) -> Self {
        Self {
            pos,
            table: table.into(),
            on: on.into(),
            target: target.into(),
            operator: Operator::Eq,
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }
}
