use super::Executor;
use crate::error::QbResult;
use tracing::Level;

const TARGET: &str = "fluentql.sql";

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// An [`Executor`] wrapper that emits the SQL it is about to run as a `tracing` event.
///
/// Events use the `fluentql.sql` target, so they can be filtered separately from
/// the renderer's `fluentql.render` events.
///
/// ```ignore
/// let traced = Traced::new(client).level(Level::INFO).max_sql_length(120);
/// query.go(&traced).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Traced<E> {
    inner: E,
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes, at a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl<E> Traced<E> {
    /// Wrap `inner` with the default level (`DEBUG`) and a 200 byte cap.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    fn emit(&self, sql: &str) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let shown = self.truncate_sql(sql);
        emit_at_level!(
            self.level,
            target: TARGET,
            sql_len = sql.len(),
            sql = %shown,
            "executing statement"
        );
    }
}

impl<E: Executor> Executor for Traced<E> {
    type Output = E::Output;

    async fn execute(&self, sql: &str) -> QbResult<Self::Output> {
        self.emit(sql);
        let result = self.inner.execute(sql).await;
        if let Err(err) = &result {
            tracing::debug!(target: TARGET, error = %err, "statement failed");
        }
        result
    }
}
