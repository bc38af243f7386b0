//! Statement serializers.
//!
//! Each `build_*` method checks its precondition, then reads the builder state in
//! a fixed clause order. Under [`ViolationPolicy::Log`](crate::ViolationPolicy::Log)
//! an unmet precondition is recorded and the statement is still rendered from
//! whatever state exists.

use super::{SqlBuilder, StatementKind};
use crate::error::UsageError;
use crate::escape::EscapeMode;
use crate::value::Value;

fn push_row(out: &mut String, row: &[Value], mode: EscapeMode) {
    out.push('(');
    for (i, v) in row.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        v.write_literal(out, mode);
    }
    out.push(')');
}

impl SqlBuilder {
    // ==================== Preconditions ====================

    /// Target for DELETE/UPDATE: the only source, or the default table.
    fn single_source(&self) -> Option<&str> {
        match self.froms.as_slice() {
            [only] => Some(only.as_str()),
            _ => self.table_name(),
        }
    }

    fn insert_target(&self) -> Option<&str> {
        if self.into.is_empty() {
            self.table_name()
        } else {
            Some(self.into.as_str())
        }
    }

    /// Selected columns plus a source list or default table.
    pub fn can_build_select(&self) -> bool {
        !self.selects.is_empty() && (!self.froms.is_empty() || self.table_name().is_some())
    }

    /// Exactly one source or a default table.
    pub fn can_build_delete(&self) -> bool {
        self.single_source().is_some()
    }

    /// A single target table and at least one assignment.
    pub fn can_build_update(&self) -> bool {
        self.single_source().is_some() && !self.sets.is_empty()
    }

    /// A target table, fields and at least one value row.
    pub fn can_build_insert(&self) -> bool {
        self.insert_target().is_some() && !self.fields.is_empty() && !self.values.is_empty()
    }

    fn push_where(&self, sql: &mut String) {
        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.wheres.join(" "));
        }
    }

    fn finish(&mut self, kind: StatementKind, sql: String) -> &mut Self {
        tracing::debug!(
            target: "chainsql.sql",
            statement = %kind,
            dialect = %self.dialect,
            sql = %sql,
            "built statement"
        );
        self.built = sql;
        self
    }

    // ==================== SELECT ====================

    /// Render a SELECT statement.
    ///
    /// Clause order: `SELECT [DISTINCT] [TOP n] cols FROM sources [joins]
    /// [WHERE] [ORDER BY] [GROUP BY] [HAVING] [LIMIT]`.
    pub fn build_select(&mut self) -> &mut Self {
        if !self.can_build_select() {
            self.violate(UsageError::cannot_build(
                StatementKind::Select,
                "no columns selected or no source table set",
            ));
        }

        let mut sql = String::from("SELECT");
        if self.distinct {
            sql.push_str(" DISTINCT");
        }
        if self.dialect.supports_top() && !self.top.is_empty() {
            sql.push_str(" TOP ");
            sql.push_str(&self.top);
        }

        sql.push(' ');
        sql.push_str(&self.selects.join(","));

        if !self.froms.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&self.froms.join(","));
        } else if let Some(table) = self.table_name() {
            sql.push_str(" FROM ");
            sql.push_str(table);
        }

        if !self.joins.is_empty() {
            sql.push(' ');
            sql.push_str(&self.joins.join(" "));
        }

        self.push_where(&mut sql);

        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.orders.join(","));
        }

        if !self.groups.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.groups.join(","));
        }

        if !self.having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&self.having);
        }

        if self.dialect.supports_limit() && !self.limit.is_empty() {
            sql.push_str(" LIMIT ");
            sql.push_str(&self.limit);
        }

        self.finish(StatementKind::Select, sql)
    }

    // ==================== DELETE ====================

    /// Render `DELETE FROM target [WHERE ...]`.
    pub fn build_delete(&mut self) -> &mut Self {
        if !self.can_build_delete() {
            self.violate(UsageError::cannot_build(
                StatementKind::Delete,
                "needs exactly one source table or a default table",
            ));
        }

        let mut sql = String::from("DELETE FROM");
        if let Some(target) = self.single_source() {
            sql.push(' ');
            sql.push_str(target);
        }
        self.push_where(&mut sql);

        self.finish(StatementKind::Delete, sql)
    }

    // ==================== UPDATE ====================

    /// Render `UPDATE target SET col=value,... [WHERE ...]`.
    ///
    /// Multi-table UPDATE is not supported: with several sources the default
    /// table is used.
    pub fn build_update(&mut self) -> &mut Self {
        if !self.can_build_update() {
            self.violate(UsageError::cannot_build(
                StatementKind::Update,
                "needs exactly one target table and at least one SET pair",
            ));
        }

        let mode = self.dialect.escape_mode();
        let mut sql = String::from("UPDATE");
        if let Some(target) = self.single_source() {
            sql.push(' ');
            sql.push_str(target);
        }

        sql.push_str(" SET ");
        for (i, (column, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                sql.push(',');
            }
            sql.push_str(column);
            sql.push('=');
            value.write_literal(&mut sql, mode);
        }

        self.push_where(&mut sql);

        self.finish(StatementKind::Update, sql)
    }

    // ==================== INSERT ====================

    fn insert_head(&self, keyword: &str) -> String {
        let mut sql = String::from(keyword);
        if let Some(target) = self.insert_target() {
            sql.push(' ');
            sql.push_str(target);
        }
        sql.push_str(" (");
        sql.push_str(&self.fields.join(","));
        sql.push_str(") VALUES ");
        sql
    }

    fn check_insert(&mut self, kind: StatementKind) {
        if !self.can_build_insert() {
            self.violate(UsageError::cannot_build(
                kind,
                "needs a target table, fields and at least one value row",
            ));
        }
    }

    fn render_first_row(&mut self, kind: StatementKind, keyword: &str) -> &mut Self {
        let mut sql = self.insert_head(keyword);
        let row = self.values.first().map(Vec::as_slice).unwrap_or_default();
        push_row(&mut sql, row, self.dialect.escape_mode());
        self.finish(kind, sql)
    }

    /// Render `INSERT INTO target (fields) VALUES (row)`.
    ///
    /// Only the **first** accumulated row is used; extra rows are silently
    /// ignored. Use [`build_bulk_insert`](Self::build_bulk_insert) to write them all.
    pub fn build_insert(&mut self) -> &mut Self {
        self.check_insert(StatementKind::Insert);
        self.render_first_row(StatementKind::Insert, "INSERT INTO")
    }

    /// Render `INSERT INTO target (fields) VALUES (row1),(row2),...`.
    pub fn build_bulk_insert(&mut self) -> &mut Self {
        self.check_insert(StatementKind::BulkInsert);

        let mode = self.dialect.escape_mode();
        let mut sql = self.insert_head("INSERT INTO");
        for (i, row) in self.values.iter().enumerate() {
            if i > 0 {
                sql.push(',');
            }
            push_row(&mut sql, row, mode);
        }

        self.finish(StatementKind::BulkInsert, sql)
    }

    /// Render `INSERT OR REPLACE INTO target (fields) VALUES (row)` (SQLite only).
    ///
    /// Like [`build_insert`](Self::build_insert), only the first row is used.
    pub fn build_insert_or_replace(&mut self) -> &mut Self {
        if !self.dialect.supports_insert_or_replace() {
            self.violate(UsageError::UnsupportedDialect {
                clause: "INSERT OR REPLACE",
                supported: "sqlite",
                dialect: self.dialect,
            });
        }
        self.check_insert(StatementKind::InsertOrReplace);
        self.render_first_row(StatementKind::InsertOrReplace, "INSERT OR REPLACE INTO")
    }
}
