//! Clause accumulator and SQL renderer.
//!
//! [`QueryBuilder`] is the low-level surface: every WHERE call names its
//! [`WhereType`] explicitly and every alias is passed in. The [`Query`](crate::Query)
//! facade layers defaults on top of it.
//!
//! # Usage
//!
//! ```ignore
//! use fluentql::qb::{self, Operator, WhereType};
//!
//! let sql = qb::select("users", &["id", "name"], &[])?
//!     .where_("status", "active", Operator::Eq, WhereType::Default)?
//!     .where_("role", "admin", Operator::Eq, WhereType::Or)?
//!     .render()?;
//!
//! assert_eq!(
//!     sql,
//!     "SELECT `users`.`id`,`users`.`name` FROM `users` WHERE (`status` = 'active') OR (`role` = 'admin')"
//! );
//! # Ok::<(), fluentql::QbError>(())
//! ```

mod builder;
mod condition;
mod join;
mod key;
mod limit;
mod order;
mod render;
mod statement;

pub use builder::QueryBuilder;
pub use condition::{Condition, Operator, Where, WhereType};
pub use join::{Join, JoinType};
pub use key::{Aggregate, FulltextMode, Key, KeyExpr, SelectFunction};
pub use limit::{DEFAULT_AMOUNT, DEFAULT_OFFSET, Limit};
pub use order::{Order, SortOrder};
pub use statement::{QueryType, Statement};

use crate::error::QbResult;
use crate::value::Value;

/// Create a SELECT builder.
///
/// # Example
/// ```ignore
/// let qb = fluentql::qb::select("users", &["id"], &[])?;
/// ```
pub fn select(table: &str, keys: &[&str], names: &[&str]) -> QbResult<QueryBuilder> {
    QueryBuilder::new().select(table, keys, names)
}

/// Create an INSERT builder.
pub fn insert(table: &str, keys: &[&str], values: Vec<Value>) -> QbResult<QueryBuilder> {
    QueryBuilder::new().insert(table, keys, values)
}

/// Create an UPDATE builder.
pub fn update(table: &str, keys: &[&str], values: Vec<Value>) -> QbResult<QueryBuilder> {
    QueryBuilder::new().update(table, keys, values)
}

/// Create a DELETE builder.
///
/// No WHERE is required; a bare DELETE removes every row.
pub fn delete(table: &str) -> QbResult<QueryBuilder> {
    QueryBuilder::new().delete(table)
}

/// Create a TRUNCATE builder.
pub fn truncate(table: &str) -> QbResult<QueryBuilder> {
    QueryBuilder::new().truncate(table)
}
