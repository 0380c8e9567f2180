//! Literal values embedded into rendered SQL.

use crate::ident::quote_literal;
use std::fmt;

/// A literal value for INSERT/UPDATE/WHERE.
///
/// Rendering rules:
/// - `Null` → `NULL`
/// - `Text` → single-quoted, with quotes and backslashes escaped
/// - numbers → emitted verbatim
/// - `Bool` → `TRUE` / `FALSE`
/// - `Raw` → emitted verbatim (SQL expressions such as `CURRENT_TIMESTAMP`)
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Raw(String),
}

impl Value {
    /// A raw SQL expression, emitted without quoting.
    pub fn raw(sql: impl Into<String>) -> Self {
        Value::Raw(sql.into())
    }

    /// `CURRENT_TIMESTAMP`
    pub fn current_timestamp() -> Self {
        Value::Raw("CURRENT_TIMESTAMP".to_string())
    }

    /// `Null`, or a float with no SQL literal (NaN, infinities).
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(n) => !n.is_finite(),
            _ => false,
        }
    }

    /// Render as a SQL literal.
    pub fn to_sql(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Float(n) if !n.is_finite() => "NULL".to_string(),
            Value::Float(n) => n.to_string(),
            Value::Text(s) => quote_literal(s),
            Value::Raw(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

macro_rules! impl_from_int {
    ($variant:ident => $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_int!(Int => i8, i16, i32, i64, u8, u16, u32);
impl_from_int!(UInt => u64);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Value::Float(v)
        } else {
            Value::Null
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::from(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
