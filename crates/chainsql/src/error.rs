//! Error types for chainsql

use crate::builder::StatementKind;
use crate::dialect::Dialect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for chainsql operations
pub type UsageResult<T> = Result<T, UsageError>;

/// A caller-side misuse of the builder.
///
/// This is the only error kind the crate has: nothing here touches I/O, so every
/// failure is a precondition the calling code broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// A required argument list was empty
    #[error("{clause}: at least one {what} must be supplied")]
    EmptyArgument {
        clause: &'static str,
        what: &'static str,
    },

    /// One element of an argument list was an empty string
    #[error("{clause}: {what} cannot be empty")]
    EmptyElement {
        clause: &'static str,
        what: &'static str,
    },

    /// Clause is not available under the active dialect
    #[error("{clause} is only supported by {supported}, not {dialect}")]
    UnsupportedDialect {
        clause: &'static str,
        supported: &'static str,
        dialect: Dialect,
    },

    /// TOP needs a positive row count
    #[error("TOP must be >= 1, got {0}")]
    InvalidTop(u64),

    /// A value row does not match the field list
    #[error("value count {found} does not match field count {expected}")]
    ArityMismatch { expected: usize, found: usize },

    /// Fields were appended after value rows exist
    #[error("cannot add fields after values have been added")]
    FieldsAfterValues,

    /// HAVING used before GROUP BY
    #[error("HAVING requires GROUP BY to be set first")]
    HavingWithoutGroupBy,

    /// Serializer precondition not met
    #[error("cannot build {statement}: {reason}")]
    CannotBuild {
        statement: StatementKind,
        reason: &'static str,
    },

    /// Driver name outside the supported set
    #[error("unknown dialect '{0}'")]
    UnknownDialect(String),
}

impl UsageError {
    pub(crate) fn empty_argument(clause: &'static str, what: &'static str) -> Self {
        Self::EmptyArgument { clause, what }
    }

    pub(crate) fn empty_element(clause: &'static str, what: &'static str) -> Self {
        Self::EmptyElement { clause, what }
    }

    pub(crate) fn cannot_build(statement: StatementKind, reason: &'static str) -> Self {
        Self::CannotBuild { statement, reason }
    }

    /// Check if this error came from a serializer precondition
    pub fn is_build_error(&self) -> bool {
        matches!(self, Self::CannotBuild { .. })
    }

    /// Check if this error is a dialect restriction
    pub fn is_dialect_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedDialect { .. } | Self::UnknownDialect(_)
        )
    }
}

/// What a builder does when it detects a [`UsageError`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationPolicy {
    /// Panic with the error message (default).
    #[default]
    Panic,
    /// Emit a `tracing` error event, record the error and keep going.
    ///
    /// The builder may then produce incomplete SQL; check
    /// [`SqlBuilder::validate`](crate::SqlBuilder::validate) before use.
    Log,
}

impl ViolationPolicy {
    /// Apply the policy to a violation.
    ///
    /// Returns the error back when execution is allowed to continue.
    pub(crate) fn apply(self, err: UsageError) -> UsageError {
        match self {
            Self::Panic => panic!("{err}"),
            Self::Log => {
                tracing::error!(
                    target: "chainsql.usage",
                    violation = %err,
                    "usage violation, continuing with partial builder state"
                );
                err
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_precondition() {
        let err = UsageError::UnsupportedDialect {
            clause: "LIMIT",
            supported: "mysql, sqlite",
            dialect: Dialect::MsSql,
        };
        assert_eq!(err.to_string(), "LIMIT is only supported by mysql, sqlite, not mssql");

        let err = UsageError::ArityMismatch {
            expected: 2,
            found: 3,
        };
        assert_eq!(err.to_string(), "value count 3 does not match field count 2");
    }

    #[test]
    fn classifies_errors() {
        assert!(UsageError::cannot_build(StatementKind::Select, "no columns").is_build_error());
        assert!(UsageError::UnknownDialect("db2".into()).is_dialect_error());
        assert!(!UsageError::FieldsAfterValues.is_dialect_error());
    }

    #[test]
    fn log_policy_hands_error_back() {
        let err = ViolationPolicy::Log.apply(UsageError::HavingWithoutGroupBy);
        assert_eq!(err, UsageError::HavingWithoutGroupBy);
    }

    #[test]
    #[should_panic(expected = "HAVING requires GROUP BY")]
    fn panic_policy_panics() {
        ViolationPolicy::Panic.apply(UsageError::HavingWithoutGroupBy);
    }
}
