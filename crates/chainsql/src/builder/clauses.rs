//! Clause accumulators.

use super::SqlBuilder;
use crate::cond::{Connector, SubCond, join_conds, on};
use crate::error::UsageError;
use crate::escape::escape;
use crate::value::Value;

/// JOIN flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Join,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    /// SQL keyword(s).
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Join => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

impl SqlBuilder {
    /// Escape a list of identifiers, or report why the list is unusable.
    fn escape_idents<I, S>(
        &mut self,
        clause: &'static str,
        what: &'static str,
        items: I,
    ) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mode = self.dialect.escape_mode();
        let mut out = Vec::new();
        for item in items {
            let item = item.as_ref();
            if item.is_empty() {
                self.violate(UsageError::empty_element(clause, what));
                return None;
            }
            out.push(escape(item, mode));
        }
        if out.is_empty() {
            self.violate(UsageError::empty_argument(clause, what));
            return None;
        }
        Some(out)
    }

    fn escape_ident(&mut self, clause: &'static str, what: &'static str, item: &str) -> Option<String> {
        if item.is_empty() {
            self.violate(UsageError::empty_element(clause, what));
            return None;
        }
        Some(escape(item, self.dialect.escape_mode()))
    }

    /// Collect sub-conditions, rejecting an empty list or incomplete entries.
    fn check_conds(
        &mut self,
        clause: &'static str,
        conds: impl IntoIterator<Item = SubCond>,
    ) -> Option<Vec<SubCond>> {
        let conds: Vec<SubCond> = conds.into_iter().collect();
        if conds.is_empty() {
            self.violate(UsageError::empty_argument(clause, "condition"));
            return None;
        }
        if !conds.iter().all(SubCond::is_complete) {
            self.violate(UsageError::empty_element(clause, "condition expression or operator"));
            return None;
        }
        Some(conds)
    }

    // ==================== SELECT list ====================

    /// Toggle `SELECT DISTINCT`.
    pub fn distinct(&mut self, on: bool) -> &mut Self {
        self.distinct = on;
        self
    }

    /// Append selected columns or expressions.
    pub fn select<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(cols) = self.escape_idents("SELECT", "column", cols) {
            self.selects.extend(cols);
        }
        self
    }

    // ==================== Sources ====================

    /// Append source tables.
    pub fn from<I, S>(&mut self, tables: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(tables) = self.escape_idents("FROM", "table", tables) {
            self.froms.extend(tables);
        }
        self
    }

    /// Replace the source list with a single table.
    pub fn from_one(&mut self, table: &str) -> &mut Self {
        if let Some(table) = self.escape_ident("FROM", "table", table) {
            self.froms.clear();
            self.froms.push(table);
        }
        self
    }

    // ==================== JOIN ====================

    /// Add a join of `kind`; with no conditions the join has no `ON` part.
    pub fn join_with(
        &mut self,
        kind: JoinKind,
        table: &str,
        conds: impl IntoIterator<Item = SubCond>,
    ) -> &mut Self {
        let Some(table) = self.escape_ident(kind.keyword(), "join table", table) else {
            return self;
        };
        let conds: Vec<SubCond> = conds.into_iter().collect();
        if !conds.iter().all(SubCond::is_complete) {
            self.violate(UsageError::empty_element(
                kind.keyword(),
                "condition expression or operator",
            ));
            return self;
        }

        let mut clause = format!("{} {}", kind.keyword(), table);
        if !conds.is_empty() {
            clause.push_str(" ON ");
            clause.push_str(&join_conds(&conds, self.dialect));
        }
        self.joins.push(clause);
        self
    }

    fn join_ons_kind(
        &mut self,
        kind: JoinKind,
        table: &str,
        conds: impl IntoIterator<Item = SubCond>,
    ) -> &mut Self {
        match self.check_conds(kind.keyword(), conds) {
            Some(conds) => self.join_with(kind, table, conds),
            None => self,
        }
    }

    /// `JOIN table`
    pub fn join(&mut self, table: &str) -> &mut Self {
        self.join_with(JoinKind::Join, table, [])
    }

    /// `JOIN table ON expr op value`
    pub fn join_on(&mut self, table: &str, expr: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        self.join_with(JoinKind::Join, table, [on(expr, op, value)])
    }

    /// `JOIN table ON c1 [AND|OR] c2 ...`
    pub fn join_ons(&mut self, table: &str, conds: impl IntoIterator<Item = SubCond>) -> &mut Self {
        self.join_ons_kind(JoinKind::Join, table, conds)
    }

    /// `INNER JOIN table`
    pub fn inner_join(&mut self, table: &str) -> &mut Self {
        self.join_with(JoinKind::Inner, table, [])
    }

    /// `INNER JOIN table ON expr op value`
    pub fn inner_join_on(&mut self, table: &str, expr: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        self.join_with(JoinKind::Inner, table, [on(expr, op, value)])
    }

    /// `INNER JOIN table ON c1 [AND|OR] c2 ...`
    pub fn inner_join_ons(&mut self, table: &str, conds: impl IntoIterator<Item = SubCond>) -> &mut Self {
        self.join_ons_kind(JoinKind::Inner, table, conds)
    }

    /// `LEFT JOIN table`
    pub fn left_join(&mut self, table: &str) -> &mut Self {
        self.join_with(JoinKind::Left, table, [])
    }

    /// `LEFT JOIN table ON expr op value`
    pub fn left_join_on(&mut self, table: &str, expr: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        self.join_with(JoinKind::Left, table, [on(expr, op, value)])
    }

    /// `LEFT JOIN table ON c1 [AND|OR] c2 ...`
    pub fn left_join_ons(&mut self, table: &str, conds: impl IntoIterator<Item = SubCond>) -> &mut Self {
        self.join_ons_kind(JoinKind::Left, table, conds)
    }

    /// `RIGHT JOIN table`
    pub fn right_join(&mut self, table: &str) -> &mut Self {
        self.join_with(JoinKind::Right, table, [])
    }

    /// `RIGHT JOIN table ON expr op value`
    pub fn right_join_on(&mut self, table: &str, expr: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        self.join_with(JoinKind::Right, table, [on(expr, op, value)])
    }

    /// `RIGHT JOIN table ON c1 [AND|OR] c2 ...`
    pub fn right_join_ons(&mut self, table: &str, conds: impl IntoIterator<Item = SubCond>) -> &mut Self {
        self.join_ons_kind(JoinKind::Right, table, conds)
    }

    /// `FULL JOIN table`
    pub fn full_join(&mut self, table: &str) -> &mut Self {
        self.join_with(JoinKind::Full, table, [])
    }

    /// `FULL JOIN table ON expr op value`
    pub fn full_join_on(&mut self, table: &str, expr: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        self.join_with(JoinKind::Full, table, [on(expr, op, value)])
    }

    /// `FULL JOIN table ON c1 [AND|OR] c2 ...`
    pub fn full_join_ons(&mut self, table: &str, conds: impl IntoIterator<Item = SubCond>) -> &mut Self {
        self.join_ons_kind(JoinKind::Full, table, conds)
    }

    // ==================== WHERE ====================

    fn push_predicate(&mut self, connector: Connector, predicate: String) {
        if self.wheres.is_empty() {
            self.wheres.push(predicate);
        } else {
            self.wheres.push(format!("{} {}", connector.as_str(), predicate));
        }
    }

    /// Add `expr op value`, joined with AND to earlier predicates.
    pub fn and_where(&mut self, expr: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        self.wheres([SubCond::new(Connector::And, expr, op, value)])
    }

    /// Add `expr op value`, joined with OR to earlier predicates.
    pub fn or_where(&mut self, expr: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        self.wheres([SubCond::new(Connector::Or, expr, op, value)])
    }

    /// Add several sub-conditions, each with its own connector.
    pub fn wheres(&mut self, conds: impl IntoIterator<Item = SubCond>) -> &mut Self {
        if let Some(conds) = self.check_conds("WHERE", conds) {
            for cond in conds {
                let predicate = cond.to_sql(self.dialect);
                self.push_predicate(cond.connector, predicate);
            }
        }
        self
    }

    fn push_raw(&mut self, connector: Connector, sql: &str) -> &mut Self {
        if sql.is_empty() {
            self.violate(UsageError::empty_argument("WHERE", "condition"));
        } else {
            self.push_predicate(connector, sql.to_string());
        }
        self
    }

    /// Add a raw SQL predicate (AND). The text is not escaped.
    pub fn where_raw(&mut self, sql: &str) -> &mut Self {
        self.push_raw(Connector::And, sql)
    }

    /// Alias of [`where_raw`](Self::where_raw).
    pub fn and_where_raw(&mut self, sql: &str) -> &mut Self {
        self.push_raw(Connector::And, sql)
    }

    /// Add a raw SQL predicate (OR). The text is not escaped.
    pub fn or_where_raw(&mut self, sql: &str) -> &mut Self {
        self.push_raw(Connector::Or, sql)
    }

    // ==================== GROUP BY / ORDER BY ====================

    /// Append GROUP BY columns.
    pub fn group_by<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(cols) = self.escape_idents("GROUP BY", "column", cols) {
            self.groups.extend(cols);
        }
        self
    }

    fn push_order<I, S>(&mut self, cols: I, direction: &str) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(cols) = self.escape_idents("ORDER BY", "column", cols) {
            self.orders.push(format!("{} {}", cols.join(","), direction));
        }
        self
    }

    /// Same as [`order_by_asc`](Self::order_by_asc).
    pub fn order_by<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push_order(cols, "ASC")
    }

    /// Append `cols ASC`.
    pub fn order_by_asc<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push_order(cols, "ASC")
    }

    /// Append `cols DESC`.
    pub fn order_by_desc<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push_order(cols, "DESC")
    }

    // ==================== HAVING ====================

    fn push_having(&mut self, conds: impl IntoIterator<Item = SubCond>) -> &mut Self {
        if self.groups.is_empty() {
            self.violate(UsageError::HavingWithoutGroupBy);
            return self;
        }
        let Some(conds) = self.check_conds("HAVING", conds) else {
            return self;
        };

        let mut having = std::mem::take(&mut self.having);
        for cond in &conds {
            if !having.is_empty() {
                having.push(' ');
                having.push_str(cond.connector.as_str());
                having.push(' ');
            }
            having.push_str(&cond.to_sql(self.dialect));
        }
        self.having = having;
        self
    }

    /// Add `expr op value` to HAVING, joined with AND. Requires GROUP BY.
    pub fn having(&mut self, expr: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        self.push_having([SubCond::new(Connector::And, expr, op, value)])
    }

    /// Add `expr op value` to HAVING, joined with OR. Requires GROUP BY.
    pub fn having_or(&mut self, expr: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        self.push_having([SubCond::new(Connector::Or, expr, op, value)])
    }

    /// Add several HAVING sub-conditions. Requires GROUP BY.
    pub fn havings(&mut self, conds: impl IntoIterator<Item = SubCond>) -> &mut Self {
        self.push_having(conds)
    }

    // ==================== LIMIT / TOP ====================

    fn check_limit(&mut self) -> bool {
        if self.dialect.supports_limit() {
            return true;
        }
        self.violate(UsageError::UnsupportedDialect {
            clause: "LIMIT",
            supported: "mysql, sqlite",
            dialect: self.dialect,
        });
        false
    }

    /// `LIMIT count` (MySQL, SQLite).
    pub fn limit(&mut self, count: u64) -> &mut Self {
        if self.check_limit() {
            self.limit = count.to_string();
        }
        self
    }

    /// `LIMIT offset,count` (MySQL, SQLite).
    pub fn limit_offset(&mut self, offset: u64, count: u64) -> &mut Self {
        if self.check_limit() {
            self.limit = format!("{offset},{count}");
        }
        self
    }

    /// `SELECT TOP n` (MSSQL), `n >= 1`.
    pub fn top(&mut self, n: u64) -> &mut Self {
        if !self.dialect.supports_top() {
            self.violate(UsageError::UnsupportedDialect {
                clause: "TOP",
                supported: "mssql",
                dialect: self.dialect,
            });
        } else if n == 0 {
            self.violate(UsageError::InvalidTop(n));
        } else {
            self.top = n.to_string();
        }
        self
    }

    // ==================== UPDATE SET ====================

    /// Add one `column=value` assignment.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        if let Some(column) = self.escape_ident("SET", "column", column) {
            self.sets.push((column, value.into()));
        }
        self
    }

    /// Add several assignments at once.
    pub fn sets<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let (columns, values): (Vec<K>, Vec<V>) = pairs.into_iter().unzip();
        if let Some(columns) = self.escape_idents("SET", "column", columns) {
            self.sets
                .extend(columns.into_iter().zip(values.into_iter().map(Into::into)));
        }
        self
    }

    // ==================== INSERT ====================

    /// Set the INSERT target table.
    pub fn insert_into(&mut self, table: &str) -> &mut Self {
        if let Some(table) = self.escape_ident("INTO", "table", table) {
            self.into = table;
        }
        self
    }

    /// Append INSERT fields. Not allowed once values have been added.
    pub fn fields<I, S>(&mut self, cols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.values.is_empty() {
            self.violate(UsageError::FieldsAfterValues);
            return self;
        }
        if let Some(cols) = self.escape_idents("FIELDS", "field", cols) {
            self.fields.extend(cols);
        }
        self
    }

    fn check_row(&mut self, row: &[Value]) -> bool {
        if row.is_empty() {
            self.violate(UsageError::empty_argument("VALUES", "value"));
            return false;
        }
        if row.len() != self.fields.len() {
            self.violate(UsageError::ArityMismatch {
                expected: self.fields.len(),
                found: row.len(),
            });
            return false;
        }
        true
    }

    /// Append one value row; its length must equal the field count.
    pub fn values<I, V>(&mut self, row: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let row: Vec<Value> = row.into_iter().map(Into::into).collect();
        if self.check_row(&row) {
            self.values.push(row);
        }
        self
    }

    /// Append several value rows; nothing is appended if any row is invalid.
    pub fn values_rows<I>(&mut self, rows: I) -> &mut Self
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        let rows: Vec<Vec<Value>> = rows.into_iter().collect();
        if rows.is_empty() {
            self.violate(UsageError::empty_argument("VALUES", "row"));
            return self;
        }
        for row in &rows {
            if !self.check_row(row) {
                return self;
            }
        }
        self.values.extend(rows);
        self
    }
}
