//! Typed values and their SQL literal rendering.

use crate::dialect::Dialect;
use crate::escape::{EscapeMode, push_quoted};
use std::fmt;

/// Marker for text that is already valid SQL.
///
/// A `SqlVar` is emitted exactly as given: no quoting, no escaping. Use it for
/// function calls (`current_timestamp`) or references to other columns
/// (`other_table.col`). Create one with [`var`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlVar(String);

impl SqlVar {
    /// The raw SQL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SqlVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wrap raw SQL text so it is emitted verbatim.
///
/// # Example
/// ```
/// use chainsql::{SqlBuilder, var};
///
/// let mut sb = SqlBuilder::default();
/// sb.fields(["created_at"])
///     .values([var("current_timestamp")])
///     .insert_into("events")
///     .build_insert();
/// assert_eq!(sb.sql(), "INSERT INTO events (created_at) VALUES (current_timestamp)");
/// ```
pub fn var(sql: impl Into<String>) -> SqlVar {
    SqlVar(sql.into())
}

/// A value that can appear on the right-hand side of a predicate, in a SET list
/// or in an INSERT row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text: escaped and single-quoted.
    Str(String),
    /// Raw SQL: emitted as-is.
    Verbatim(SqlVar),
    /// `NULL`
    Null,
    /// Numbers and booleans, already in textual form, emitted unquoted.
    Scalar(String),
}

impl Value {
    /// Check if this is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render as a SQL literal for `dialect`.
    pub fn to_literal(&self, dialect: Dialect) -> String {
        let mut out = String::new();
        self.write_literal(&mut out, dialect.escape_mode());
        out
    }

    pub(crate) fn write_literal(&self, out: &mut String, mode: EscapeMode) {
        match self {
            Value::Str(s) => push_quoted(out, s, mode),
            Value::Verbatim(v) => out.push_str(v.as_str()),
            Value::Null => out.push_str("NULL"),
            Value::Scalar(s) => out.push_str(s),
        }
    }
}

impl From<SqlVar> for Value {
    fn from(v: SqlVar) -> Self {
        Value::Verbatim(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(if b { "true" } else { "false" }.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Scalar(v.to_string())
                }
            }
        )*
    };
}

impl_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => b.into(),
            serde_json::Value::Number(n) => Value::Scalar(n.to_string()),
            serde_json::Value::String(s) => Value::Str(s),
            other => Value::Str(other.to_string()),
        }
    }
}

impl From<chrono::NaiveDate> for Value {
    fn from(d: chrono::NaiveDate) -> Self {
        Value::Str(d.format("%Y-%m-%d").to_string())
    }
}

impl From<chrono::NaiveDateTime> for Value {
    fn from(dt: chrono::NaiveDateTime) -> Self {
        Value::Str(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string())
    }
}

impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
        dt.naive_utc().into()
    }
}

impl From<uuid::Uuid> for Value {
    fn from(id: uuid::Uuid) -> Self {
        Value::Str(id.hyphenated().to_string())
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(d: rust_decimal::Decimal) -> Self {
        Value::Scalar(d.to_string())
    }
}

/// Build a `Vec<Value>` row from heterogeneous expressions.
///
/// # Example
/// ```
/// use chainsql::{Value, row, var};
///
/// let r = row![1, "x", None::<i32>, var("now()")];
/// assert_eq!(r[2], Value::Null);
/// ```
#[macro_export]
macro_rules! row {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}
