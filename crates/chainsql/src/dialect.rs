//! Supported SQL dialects.

use crate::error::UsageError;
use crate::escape::EscapeMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SQL engine a builder renders for.
///
/// The dialect gates which clauses are available (`LIMIT`, `TOP`,
/// `INSERT OR REPLACE`) and which escaping table string literals go through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    MySql,
    MsSql,
    Oracle,
    #[serde(alias = "postgres")]
    PostgreSql,
    Sqlite,
}

impl Dialect {
    /// All supported dialects.
    pub const ALL: [Dialect; 5] = [
        Dialect::MySql,
        Dialect::MsSql,
        Dialect::Oracle,
        Dialect::PostgreSql,
        Dialect::Sqlite,
    ];

    /// Canonical lowercase driver name.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::MsSql => "mssql",
            Dialect::Oracle => "oracle",
            Dialect::PostgreSql => "postgresql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Parse a driver name, falling back to MySQL for anything unknown.
    pub fn parse_or_default(name: &str) -> Self {
        match name.parse() {
            Ok(dialect) => dialect,
            Err(err) => {
                tracing::warn!(
                    target: "chainsql.dialect",
                    error = %err,
                    fallback = Dialect::MySql.as_str(),
                    "falling back to default dialect"
                );
                Dialect::MySql
            }
        }
    }

    /// Escaping table used for string literals and identifiers.
    pub fn escape_mode(self) -> EscapeMode {
        match self {
            Dialect::MySql => EscapeMode::Backslash,
            _ => EscapeMode::Standard,
        }
    }

    /// `LIMIT n` / `LIMIT offset,n`
    pub fn supports_limit(self) -> bool {
        matches!(self, Dialect::MySql | Dialect::Sqlite)
    }

    /// `SELECT TOP n`
    pub fn supports_top(self) -> bool {
        self == Dialect::MsSql
    }

    /// `INSERT OR REPLACE INTO`
    pub fn supports_insert_or_replace(self) -> bool {
        self == Dialect::Sqlite
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "mssql" => Ok(Dialect::MsSql),
            "oracle" => Ok(Dialect::Oracle),
            "postgresql" | "postgres" => Ok(Dialect::PostgreSql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(UsageError::UnknownDialect(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("MySQL".parse::<Dialect>(), Ok(Dialect::MySql));
        assert_eq!("SQLite".parse::<Dialect>(), Ok(Dialect::Sqlite));
        assert_eq!("postgres".parse::<Dialect>(), Ok(Dialect::PostgreSql));
        assert_eq!(" mssql ".parse::<Dialect>(), Ok(Dialect::MsSql));
    }

    #[test]
    fn rejects_unknown_driver() {
        assert_eq!(
            "db2".parse::<Dialect>(),
            Err(UsageError::UnknownDialect("db2".to_string()))
        );
        assert_eq!(Dialect::parse_or_default("db2"), Dialect::MySql);
        assert_eq!(Dialect::parse_or_default(""), Dialect::MySql);
    }

    #[test]
    fn display_round_trips() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>(), Ok(dialect));
        }
    }

    #[test]
    fn clause_gating() {
        let limit: Vec<_> = Dialect::ALL.into_iter().filter(|d| d.supports_limit()).collect();
        assert_eq!(limit, vec![Dialect::MySql, Dialect::Sqlite]);

        let top: Vec<_> = Dialect::ALL.into_iter().filter(|d| d.supports_top()).collect();
        assert_eq!(top, vec![Dialect::MsSql]);

        assert!(Dialect::Sqlite.supports_insert_or_replace());
        assert!(!Dialect::MySql.supports_insert_or_replace());
    }

    #[test]
    fn only_mysql_uses_backslash_escaping() {
        for dialect in Dialect::ALL {
            let expected = if dialect == Dialect::MySql {
                EscapeMode::Backslash
            } else {
                EscapeMode::Standard
            };
            assert_eq!(dialect.escape_mode(), expected);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Dialect::PostgreSql).unwrap(), "\"postgresql\"");
        let d: Dialect = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(d, Dialect::PostgreSql);
    }
}
