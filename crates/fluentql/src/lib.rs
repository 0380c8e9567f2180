//! # fluentql
//!
//! A fluent, clause-accumulating SQL query builder.
//!
//! ## Features
//!
//! - **Accumulate, then render**: clause calls only record typed clauses; SQL text
//!   is produced once, by `prepare()`
//! - **Grouped WHERE**: `where_`/`or_where`/`and_where` render as OR-joined groups
//!   of AND-joined predicates
//! - **Fulltext search**: `MATCH ... AGAINST` keys and predicates in natural
//!   language or boolean mode
//! - **Subqueries**: embed one builder inside another's select list
//! - **Injected execution**: any [`Executor`] runs the rendered statement;
//!   `tokio-postgres` clients, transactions and `deadpool` pools are bundled
//!
//! ## Example
//!
//! ```ignore
//! use fluentql::{Query, SortOrder};
//!
//! let query = Query::new()
//!     .select("users", &["id", "name"])?
//!     .where_("status", "active")?
//!     .and_where("age", 18)?
//!     .or_where("role", "admin")?
//!     .order_by("name", SortOrder::Asc)
//!     .limit(0, 10)?
//!     .prepare()?;
//!
//! assert_eq!(
//!     query.sql(),
//!     Some(
//!         "SELECT `users`.`id`,`users`.`name` FROM `users` \
//!          WHERE (`status` = 'active' AND `age` = 18) OR (`role` = 'admin') \
//!          ORDER BY `name` ASC LIMIT 0, 10"
//!     )
//! );
//!
//! let rows = query.execute(&client).await?;
//! ```

pub mod config;
pub mod error;
pub mod exec;
pub mod ident;
pub mod pool;
pub mod prelude;
pub mod qb;
pub mod query;
pub mod value;

pub use config::ConnectionConfig;
pub use error::{QbError, QbResult};
pub use exec::{Executor, Traced};
pub use ident::{Column, Reference, reference};
pub use pool::connect;
pub use qb::{
    FulltextMode, JoinType, Limit, Operator, Order, QueryBuilder, QueryType, SortOrder, WhereType,
};
pub use query::Query;
pub use value::Value;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_manager_config};
