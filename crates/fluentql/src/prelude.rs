//! Convenient imports for typical `fluentql` usage.
//!
//! ```ignore
//! use fluentql::prelude::*;
//! ```

pub use crate::{
    Column, ConnectionConfig, Executor, FulltextMode, Operator, QbError, QbResult, Query,
    QueryBuilder, SortOrder, Value, reference,
};

#[cfg(feature = "pool")]
pub use crate::create_pool;
