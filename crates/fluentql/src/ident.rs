//! Identifier handling: table-qualified references and backtick escaping.
//!
//! Every identifier that ends up in rendered SQL goes through [`escape`], which wraps
//! each dot-delimited segment in backticks individually:
//!
//! ```ignore
//! use fluentql::ident::escape;
//!
//! assert_eq!(escape("users"), "`users`");
//! assert_eq!(escape("users.id"), "`users`.`id`");
//! ```

use std::fmt;

/// Escape an identifier, wrapping each `.`-separated segment in backticks.
///
/// Backticks inside a segment are doubled.
pub fn escape(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    push_escaped(&mut out, ident);
    out
}

/// Append the escaped form of `ident` to `out`.
///
/// A segment that is already wrapped in backticks is unquoted first, so escaping
/// an escaped identifier yields the same text.
pub(crate) fn push_escaped(out: &mut String, ident: &str) {
    for (i, segment) in ident.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push('`');
        match unquote(segment) {
            Some(inner) => push_doubled(out, &inner.replace("``", "`")),
            None => push_doubled(out, segment),
        }
        out.push('`');
    }
}

fn unquote(segment: &str) -> Option<&str> {
    if segment.len() >= 2 {
        segment.strip_prefix('`')?.strip_suffix('`')
    } else {
        None
    }
}

fn push_doubled(out: &mut String, segment: &str) {
    for c in segment.chars() {
        if c == '`' {
            out.push('`');
        }
        out.push(c);
    }
}

/// Quote a string literal: wrap in single quotes, doubling `'` and `\`.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// A table-qualified column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub table: String,
    pub key: String,
}

impl Reference {
    /// Create a reference to `table`.`key`.
    pub fn new(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Parse `table.key`. Returns `None` when there is no dot.
    pub fn parse(qualified: &str) -> Option<Self> {
        qualified
            .split_once('.')
            .map(|(table, key)| Self::new(table, key))
    }

    /// Render as `` `table`.`key` ``.
    pub fn escaped(&self) -> String {
        let mut out = String::with_capacity(self.table.len() + self.key.len() + 5);
        push_escaped(&mut out, &self.table);
        out.push('.');
        push_escaped(&mut out, &self.key);
        out
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.key)
    }
}

/// Shorthand for [`Reference::new`].
pub fn reference(table: impl Into<String>, key: impl Into<String>) -> Reference {
    Reference::new(table, key)
}

/// A column as written by the caller: either bare or already table-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    Bare(String),
    Qualified(Reference),
}

impl Column {
    /// Parse a key; anything containing `.` is treated as pre-qualified.
    pub fn parse(key: &str) -> Self {
        match Reference::parse(key) {
            Some(r) => Column::Qualified(r),
            None => Column::Bare(key.to_string()),
        }
    }

    /// Qualify a bare column with `table`; qualified columns are kept as-is.
    pub fn qualify(&self, table: &str) -> Reference {
        match self {
            Column::Bare(key) => Reference::new(table, key.clone()),
            Column::Qualified(r) => r.clone(),
        }
    }

    /// Render the column, bare columns without a table prefix.
    pub fn escaped(&self) -> String {
        match self {
            Column::Bare(key) => escape(key),
            Column::Qualified(r) => r.escaped(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Column::Bare(key) => key.is_empty(),
            Column::Qualified(r) => r.table.is_empty() || r.key.is_empty(),
        }
    }
}

impl From<&str> for Column {
    fn from(key: &str) -> Self {
        Column::parse(key)
    }
}

impl From<String> for Column {
    fn from(key: String) -> Self {
        Column::parse(&key)
    }
}

impl From<&String> for Column {
    fn from(key: &String) -> Self {
        Column::parse(key)
    }
}

impl From<Reference> for Column {
    fn from(r: Reference) -> Self {
        Column::Qualified(r)
    }
}

impl From<&Reference> for Column {
    fn from(r: &Reference) -> Self {
        Column::Qualified(r.clone())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Bare(key) => f.write_str(key),
            Column::Qualified(r) => r.fmt(f),
        }
    }
}
