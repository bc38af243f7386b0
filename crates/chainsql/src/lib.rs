//! # chainsql
//!
//! A chainable SQL text builder for MySQL, MSSQL, Oracle, PostgreSQL and SQLite.
//!
//! ## Features
//!
//! - **Text only**: builds SQL strings; nothing is parsed or executed
//! - **Chainable**: every clause method takes `&mut self` and returns it
//! - **Dialect-aware**: `LIMIT`, `TOP` and `INSERT OR REPLACE` are gated per dialect,
//!   string literals are escaped with the dialect's table
//! - **Typed values**: [`Value`] distinguishes text, raw SQL ([`var`]), `NULL` and scalars
//! - **Explicit misuse policy**: panic (default) or log and continue, chosen per builder
//!
//! ## Usage
//!
//! ```
//! use chainsql::{SqlBuilder, on, on_and, row, var};
//!
//! // SELECT
//! let mut sb = SqlBuilder::default();
//! sb.select(["u.id", "u.name"])
//!     .from(["users u"])
//!     .left_join_ons("orders o", [on("o.user_id", "=", var("u.id")), on_and("o.state", "=", "paid")])
//!     .and_where("u.active", "=", true)
//!     .build_select();
//! assert_eq!(
//!     sb.sql(),
//!     "SELECT u.id,u.name FROM users u LEFT JOIN orders o ON o.user_id = u.id AND o.state = 'paid' WHERE u.active = true"
//! );
//!
//! // Bulk INSERT
//! sb.clear();
//! sb.fields(["id", "name"])
//!     .values(row![1, "alice"])
//!     .values(row![2, "bob"])
//!     .insert_into("users")
//!     .build_bulk_insert();
//! assert_eq!(sb.sql(), "INSERT INTO users (id,name) VALUES (1,'alice'),(2,'bob')");
//! ```
//!
//! ## Escaping caveat
//!
//! Column and table names go through the same escaping as string literals, but are
//! not quoted. This keeps output compatible with callers that rely on it; it is not
//! identifier quoting and should not be treated as protection for untrusted names.

pub mod builder;
pub mod cond;
pub mod config;
pub mod dialect;
pub mod error;
pub mod escape;
pub mod value;

pub use builder::{JoinKind, SqlBuilder, StatementKind};
pub use cond::{Connector, SubCond, on, on_and, on_or};
pub use config::BuilderConfig;
pub use dialect::Dialect;
pub use error::{UsageError, UsageResult, ViolationPolicy};
pub use escape::{EscapeMode, escape, escape_str};
pub use value::{SqlVar, Value, var};
