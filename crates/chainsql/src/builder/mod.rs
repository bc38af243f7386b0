//! The statement builder.
//!
//! [`SqlBuilder`] accumulates clause fragments through chainable `&mut self`
//! methods and serializes them into one SQL string with one of the `build_*`
//! methods.
//!
//! ## Design
//!
//! - Identifier fragments (columns, tables, predicate left-hand sides) are escaped
//!   when they are added, with the dialect active at that moment.
//! - Values in SET lists and INSERT rows are rendered when the statement is built.
//! - Misuse is reported through the builder's [`ViolationPolicy`]: panic by default,
//!   or log and continue. A rejected call never changes the builder's state.

mod clauses;
mod render;

pub use clauses::JoinKind;

use crate::config::BuilderConfig;
use crate::dialect::Dialect;
use crate::error::{UsageError, UsageResult, ViolationPolicy};
use crate::value::Value;
use std::fmt;

/// Kind of statement a serializer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Delete,
    Update,
    Insert,
    BulkInsert,
    InsertOrReplace,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Select => "SELECT",
            StatementKind::Delete => "DELETE",
            StatementKind::Update => "UPDATE",
            StatementKind::Insert => "INSERT",
            StatementKind::BulkInsert => "bulk INSERT",
            StatementKind::InsertOrReplace => "INSERT OR REPLACE",
        })
    }
}

/// Mutable SQL statement builder.
///
/// # Example
/// ```
/// use chainsql::{Dialect, SqlBuilder};
///
/// let mut sb = SqlBuilder::new(Dialect::MySql);
/// sb.select(["id", "name"])
///     .from(["users"])
///     .and_where("status", "=", "active")
///     .order_by_desc(["id"])
///     .limit(10)
///     .build_select();
///
/// assert_eq!(
///     sb.sql(),
///     "SELECT id,name FROM users WHERE status = 'active' ORDER BY id DESC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SqlBuilder {
    dialect: Dialect,
    policy: ViolationPolicy,

    // Defaults, kept across clear()
    db_name: String,
    table_name: String,

    // SELECT / DELETE
    distinct: bool,
    selects: Vec<String>,
    froms: Vec<String>,
    joins: Vec<String>,
    wheres: Vec<String>,
    orders: Vec<String>,
    groups: Vec<String>,
    having: String,
    limit: String,
    top: String,

    // INSERT
    into: String,
    fields: Vec<String>,
    values: Vec<Vec<Value>>,

    // UPDATE
    sets: Vec<(String, Value)>,

    built: String,
    violations: Vec<UsageError>,
}

impl Default for SqlBuilder {
    fn default() -> Self {
        Self::with_config(BuilderConfig::default())
    }
}

impl SqlBuilder {
    /// Create a builder for `dialect` that panics on misuse.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_config(BuilderConfig::new().dialect(dialect))
    }

    /// Create a builder from a driver name, falling back to MySQL if unknown.
    pub fn for_driver(name: &str) -> Self {
        Self::new(Dialect::parse_or_default(name))
    }

    /// Create a builder from a full configuration.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            dialect: config.dialect,
            policy: config.on_violation,
            db_name: String::new(),
            table_name: String::new(),
            distinct: false,
            selects: Vec::new(),
            froms: Vec::new(),
            joins: Vec::new(),
            wheres: Vec::new(),
            orders: Vec::new(),
            groups: Vec::new(),
            having: String::new(),
            limit: String::new(),
            top: String::new(),
            into: String::new(),
            fields: Vec::new(),
            values: Vec::new(),
            sets: Vec::new(),
            built: String::new(),
            violations: Vec::new(),
        }
    }

    /// Reset every clause and the rendered output.
    ///
    /// Dialect, violation policy and the default database/table are kept.
    pub fn clear(&mut self) -> &mut Self {
        self.distinct = false;
        self.selects.clear();
        self.froms.clear();
        self.joins.clear();
        self.wheres.clear();
        self.orders.clear();
        self.groups.clear();
        self.having.clear();
        self.limit.clear();
        self.top.clear();
        self.into.clear();
        self.fields.clear();
        self.values.clear();
        self.sets.clear();
        self.built.clear();
        self.violations.clear();
        self
    }

    // ==================== Dialect & defaults ====================

    /// Active dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Switch dialect.
    ///
    /// Fragments already added keep the escaping of the previous dialect.
    pub fn set_dialect(&mut self, dialect: Dialect) -> &mut Self {
        self.dialect = dialect;
        self
    }

    /// Switch dialect by driver name; unknown names are a usage violation.
    pub fn set_driver(&mut self, name: &str) -> &mut Self {
        match name.parse() {
            Ok(dialect) => self.dialect = dialect,
            Err(err) => self.violate(err),
        }
        self
    }

    /// Active violation policy.
    pub fn policy(&self) -> ViolationPolicy {
        self.policy
    }

    /// Change the violation policy.
    pub fn set_policy(&mut self, policy: ViolationPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Set the default database name (empty input is ignored).
    pub fn set_db_name(&mut self, name: &str) -> &mut Self {
        if !name.is_empty() {
            self.db_name = name.to_string();
        }
        self
    }

    /// Set the default table, used when no source or insert target is given
    /// (empty input is ignored).
    pub fn set_table_name(&mut self, name: &str) -> &mut Self {
        if !name.is_empty() {
            self.table_name = name.to_string();
        }
        self
    }

    /// Default database name, if set.
    pub fn db_name(&self) -> Option<&str> {
        (!self.db_name.is_empty()).then_some(self.db_name.as_str())
    }

    /// Default table name, if set.
    pub fn table_name(&self) -> Option<&str> {
        (!self.table_name.is_empty()).then_some(self.table_name.as_str())
    }

    // ==================== Introspection ====================

    /// Whether `DISTINCT` is on.
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Number of INSERT fields.
    pub fn fields_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of accumulated value rows.
    pub fn rows_count(&self) -> usize {
        self.values.len()
    }

    /// Last rendered SQL, empty if nothing was built yet.
    pub fn sql(&self) -> &str {
        &self.built
    }

    /// Whether a statement has been rendered.
    pub fn has_sql(&self) -> bool {
        !self.built.is_empty()
    }

    /// Violations recorded under [`ViolationPolicy::Log`].
    pub fn violations(&self) -> &[UsageError] {
        &self.violations
    }

    /// Return the first recorded violation, if any.
    pub fn validate(&self) -> UsageResult<()> {
        match self.violations.first() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub(crate) fn violate(&mut self, err: UsageError) {
        let err = self.policy.apply(err);
        self.violations.push(err);
    }
}
