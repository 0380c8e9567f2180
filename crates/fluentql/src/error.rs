//! Error types for fluentql

use thiserror::Error;

/// Result type alias for fluentql operations
pub type QbResult<T> = Result<T, QbError>;

/// Errors raised while accumulating clauses, rendering SQL, or executing it.
///
/// Construction and render errors are never retryable: they describe a
/// malformed builder, not a transient condition.
#[derive(Debug, Error)]
pub enum QbError {
    /// Two parallel lists (keys/names, keys/directions) have different lengths
    #[error("Arity mismatch: expected {expected} items, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// An OR/AND predicate was added before any initial predicate
    #[error("There was no initial where clause found")]
    NoInitialWhereClause,

    /// A second initial predicate was added while a group already exists
    #[error("There already was an initial where clause")]
    DuplicateInitialWhereClause,

    /// BETWEEN bounds are not strictly increasing
    #[error("Invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: i64, max: i64 },

    /// Render attempted before any statement head was set
    #[error("Unknown query type: no statement was set")]
    UnknownQueryType,

    /// LIMIT amount given without an offset
    #[error("You can't set an amount without an offset")]
    AmountWithoutOffset,

    /// LIMIT offset given without an amount
    #[error("You can't set an offset without an amount")]
    OffsetWithoutAmount,

    /// LIMIT amount must be positive
    #[error("Invalid limit: amount must be at least 1")]
    InvalidLimit,

    /// INSERT/UPDATE keys and values have different lengths
    #[error("Expected equal amount of keys and values: {keys} keys, {values} values")]
    UnequalKeysAndValues { keys: usize, values: usize },

    /// UPDATE without any `SET` assignment
    #[error("An update needs at least one key to set")]
    NoAssignments,

    /// Unsupported comparison operator
    #[error("Invalid comparison operator: '{0}'")]
    InvalidOperator(String),

    /// Empty table or column name
    #[error("Empty identifier: {0}")]
    EmptyIdentifier(&'static str),

    /// A statement head was set on a builder that already has a different one
    #[error("Statement conflict: builder is already a {current} on `{table}`, cannot add {requested}")]
    StatementConflict {
        current: &'static str,
        table: String,
        requested: &'static str,
    },

    /// A SELECT-only clause was added to a builder that is not a SELECT
    #[error("{0} is only available for SELECT queries")]
    RequiresSelect(&'static str),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid connection configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl QbError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Check if this error was raised while building or rendering a query
    pub fn is_validation(&self) -> bool {
        !self.is_execution() && !matches!(self, Self::Config(_))
    }

    /// Check if this error came from the execution collaborator
    pub fn is_execution(&self) -> bool {
        match self {
            Self::Query(_) | Self::Connection(_) => true,
            #[cfg(feature = "pool")]
            Self::Pool(_) => true,
            _ => false,
        }
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for QbError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
