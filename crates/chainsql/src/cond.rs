//! Sub-conditions for multi-part JOIN, WHERE and HAVING predicates.

use crate::dialect::Dialect;
use crate::escape::escape_str;
use crate::value::Value;

/// Boolean connector placed in front of a condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Connector {
    /// SQL keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// A `(connector, expr, operator, value)` tuple.
///
/// The connector only matters when the condition is not the first one of its
/// clause; the first condition is always rendered without a connector.
#[derive(Debug, Clone, PartialEq)]
pub struct SubCond {
    pub connector: Connector,
    pub expr: String,
    pub op: String,
    pub value: Value,
}

impl SubCond {
    /// Create a sub-condition with an explicit connector.
    pub fn new(
        connector: Connector,
        expr: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            connector,
            expr: expr.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    /// Render `expr op literal` (without connector).
    ///
    /// The left-hand expression and the operator go through the same escaping as
    /// string literals, without quotes.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut out = escape_str(&self.expr, dialect);
        out.push(' ');
        out.push_str(&escape_str(&self.op, dialect));
        out.push(' ');
        self.value.write_literal(&mut out, dialect.escape_mode());
        out
    }

    pub(crate) fn is_complete(&self) -> bool {
        !self.expr.is_empty() && !self.op.is_empty()
    }
}

/// AND-tagged sub-condition.
///
/// # Example
/// ```
/// use chainsql::{SqlBuilder, on, on_and, var};
///
/// let mut sb = SqlBuilder::default();
/// sb.select(["*"])
///     .from(["user a"])
///     .join_ons("priv c", [on("a.id", "=", 1), on_and("a.def", "=", var("c.def"))])
///     .build_select();
/// assert_eq!(sb.sql(), "SELECT * FROM user a JOIN priv c ON a.id = 1 AND a.def = c.def");
/// ```
pub fn on(expr: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> SubCond {
    SubCond::new(Connector::And, expr, op, value)
}

/// AND-tagged sub-condition (alias of [`on`]).
pub fn on_and(expr: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> SubCond {
    SubCond::new(Connector::And, expr, op, value)
}

/// OR-tagged sub-condition.
pub fn on_or(expr: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> SubCond {
    SubCond::new(Connector::Or, expr, op, value)
}

/// Join rendered conditions, dropping the connector of the first one.
pub(crate) fn join_conds<'a>(
    conds: impl IntoIterator<Item = &'a SubCond>,
    dialect: Dialect,
) -> String {
    let mut out = String::new();
    for (i, cond) in conds.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
            out.push_str(cond.connector.as_str());
            out.push(' ');
        }
        out.push_str(&cond.to_sql(dialect));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::var;

    #[test]
    fn renders_expr_op_literal() {
        assert_eq!(on("abc", "=", 1).to_sql(Dialect::MySql), "abc = 1");
        assert_eq!(on("ghi", "like", "%ghi%").to_sql(Dialect::MySql), "ghi like '%ghi%'");
        assert_eq!(on("jkl", "is not", None::<i32>).to_sql(Dialect::MySql), "jkl is not NULL");
        assert_eq!(on("a.x", "=", var("b.x")).to_sql(Dialect::Oracle), "a.x = b.x");
    }

    #[test]
    fn left_side_is_escaped() {
        assert_eq!(on("te\"st", "=", 1).to_sql(Dialect::MySql), r#"te\"st = 1"#);
        assert_eq!(on("te\"st", "=", 1).to_sql(Dialect::Sqlite), r#"te""st = 1"#);
    }

    #[test]
    fn first_connector_is_dropped() {
        let conds = [on_or("a", "=", 1), on_and("b", "=", 2), on_or("c", "=", 3)];
        assert_eq!(join_conds(&conds, Dialect::MySql), "a = 1 AND b = 2 OR c = 3");
    }

    #[test]
    fn constructors_tag_connector() {
        assert_eq!(on("a", "=", 1).connector, Connector::And);
        assert_eq!(on_and("a", "=", 1).connector, Connector::And);
        assert_eq!(on_or("a", "=", 1).connector, Connector::Or);
    }

    #[test]
    fn completeness() {
        assert!(on("a", "=", 1).is_complete());
        assert!(!on("", "=", 1).is_complete());
        assert!(!on("a", "", 1).is_complete());
    }
}
