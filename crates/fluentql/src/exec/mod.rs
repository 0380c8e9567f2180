//! Execution collaborators.
//!
//! An [`Executor`] receives a finished SQL string and returns whatever its
//! driver produced. The result payload is passed through untouched; nothing in
//! this crate inspects, retries or transforms it.
//!
//! The bundled implementations go through the simple (unparameterized) query
//! protocol of `tokio-postgres`, since rendered statements carry their values
//! inline. They only make sense against a server that accepts the rendered
//! dialect; anything else implements [`Executor`] directly.
//!
//! # Example
//!
//! ```ignore
//! use fluentql::{Executor, Query};
//!
//! let mut query = Query::new().select("users", &["id"])?.where_("id", 1)?;
//! let messages = query.go(&client).await?;
//! ```

mod traced;

pub use traced::Traced;

use crate::error::QbResult;
use tokio_postgres::SimpleQueryMessage;

/// Something that can run a rendered SQL statement.
///
/// Note that `tokio_postgres::Client` also has an inherent `execute` method
/// (for parameterized statements); call this one as `Executor::execute(&client, sql)`
/// when the receiver is concrete.
pub trait Executor: Send + Sync {
    /// Driver result payload, returned verbatim.
    type Output: Send;

    /// Run `sql` and return the driver's payload.
    fn execute(&self, sql: &str) -> impl std::future::Future<Output = QbResult<Self::Output>> + Send;
}

impl<E: Executor> Executor for &E {
    type Output = E::Output;

    fn execute(&self, sql: &str) -> impl std::future::Future<Output = QbResult<Self::Output>> + Send {
        E::execute(*self, sql)
    }
}

impl Executor for tokio_postgres::Client {
    type Output = Vec<SimpleQueryMessage>;

    async fn execute(&self, sql: &str) -> QbResult<Self::Output> {
        Ok(tokio_postgres::Client::simple_query(self, sql).await?)
    }
}

impl Executor for tokio_postgres::Transaction<'_> {
    type Output = Vec<SimpleQueryMessage>;

    async fn execute(&self, sql: &str) -> QbResult<Self::Output> {
        Ok(tokio_postgres::Transaction::simple_query(self, sql).await?)
    }
}

#[cfg(feature = "pool")]
impl Executor for deadpool_postgres::Client {
    type Output = Vec<SimpleQueryMessage>;

    async fn execute(&self, sql: &str) -> QbResult<Self::Output> {
        // Delegate to the deref target (ClientWrapper / tokio_postgres::Client).
        let client: &tokio_postgres::Client = self;
        Executor::execute(client, sql).await
    }
}

#[cfg(feature = "pool")]
impl Executor for deadpool_postgres::Transaction<'_> {
    type Output = Vec<SimpleQueryMessage>;

    async fn execute(&self, sql: &str) -> QbResult<Self::Output> {
        let tx: &tokio_postgres::Transaction<'_> = self;
        Executor::execute(tx, sql).await
    }
}

/// Checks out one connection per statement and returns it to the pool afterwards.
#[cfg(feature = "pool")]
impl Executor for deadpool_postgres::Pool {
    type Output = Vec<SimpleQueryMessage>;

    async fn execute(&self, sql: &str) -> QbResult<Self::Output> {
        let client = self.get().await?;
        Executor::execute(&client, sql).await
    }
}
