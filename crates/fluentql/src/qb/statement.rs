//! Statement heads.

use crate::ident::Column;
use crate::qb::key::Key;
use crate::value::Value;
use std::fmt;

/// Discriminant of a [`Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    Truncate,
}

impl QueryType {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::Select => "SELECT",
            QueryType::Insert => "INSERT",
            QueryType::Update => "UPDATE",
            QueryType::Delete => "DELETE",
            QueryType::Truncate => "TRUNCATE",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The statement a builder renders, carrying only the fields its kind needs.
#[derive(Debug, Clone)]
pub enum Statement {
    Select {
        table: String,
        keys: Vec<Key>,
    },
    Insert {
        table: String,
        columns: Vec<Column>,
        values: Vec<Value>,
    },
    Update {
        table: String,
        assignments: Vec<(Column, Value)>,
    },
    Delete {
        table: String,
    },
    Truncate {
        table: String,
    },
}

impl Statement {
    pub fn query_type(&self) -> QueryType {
        match self {
            Statement::Select { .. } => QueryType::Select,
            Statement::Insert { .. } => QueryType::Insert,
            Statement::Update { .. } => QueryType::Update,
            Statement::Delete { .. } => QueryType::Delete,
            Statement::Truncate { .. } => QueryType::Truncate,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Statement::Select { table, .. }
            | Statement::Insert { table, .. }
            | Statement::Update { table, .. }
            | Statement::Delete { table }
            | Statement::Truncate { table } => table,
        }
    }
}
