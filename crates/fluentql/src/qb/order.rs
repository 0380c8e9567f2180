//! ORDER BY records.

use crate::error::{QbError, QbResult};
use crate::ident::Column;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A run of order keys with one direction per key.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    keys: Vec<Column>,
    directions: Vec<SortOrder>,
}

impl Order {
    /// Create an order record; `keys` and `directions` must have the same length.
    pub fn new(keys: Vec<Column>, directions: Vec<SortOrder>) -> QbResult<Self> {
        if keys.len() != directions.len() {
            return Err(QbError::ArityMismatch {
                expected: keys.len(),
                found: directions.len(),
            });
        }
        if keys.iter().any(Column::is_empty) {
            return Err(QbError::EmptyIdentifier("order key"));
        }
        Ok(Self { keys, directions })
    }

    /// Single-key order record.
    pub fn by(key: impl Into<Column>, direction: SortOrder) -> Self {
        Self {
            keys: vec![key.into()],
            directions: vec![direction],
        }
    }

    pub fn keys(&self) -> &[Column] {
        &self.keys
    }

    pub fn directions(&self) -> &[SortOrder] {
        &self.directions
    }

    /// `(key, direction)` pairs in declaration order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Column, SortOrder)> {
        self.keys.iter().zip(self.directions.iter().copied())
    }
}
