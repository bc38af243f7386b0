use crate::dialect::Dialect;
use crate::error::ViolationPolicy;
use serde::{Deserialize, Serialize};

/// Construction-time configuration for [`SqlBuilder`](crate::SqlBuilder).
///
/// Defaults to MySQL with the panicking violation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Dialect the builder renders for.
    pub dialect: Dialect,
    /// What happens on a usage violation.
    pub on_violation: ViolationPolicy,
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dialect.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the violation policy.
    pub fn on_violation(mut self, policy: ViolationPolicy) -> Self {
        self.on_violation = policy;
        self
    }

    /// Log violations instead of panicking.
    pub fn log_violations(self) -> Self {
        self.on_violation(ViolationPolicy::Log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = BuilderConfig::new();
        assert_eq!(cfg.dialect, Dialect::MySql);
        assert_eq!(cfg.on_violation, ViolationPolicy::Panic);
    }

    #[test]
    fn setters_chain() {
        let cfg = BuilderConfig::new().dialect(Dialect::Sqlite).log_violations();
        assert_eq!(cfg.dialect, Dialect::Sqlite);
        assert_eq!(cfg.on_violation, ViolationPolicy::Log);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let cfg: BuilderConfig = serde_json::from_str(r#"{"dialect":"mssql"}"#).unwrap();
        assert_eq!(cfg, BuilderConfig::new().dialect(Dialect::MsSql));

        let cfg: BuilderConfig = serde_json::from_str(r#"{"on_violation":"log"}"#).unwrap();
        assert_eq!(cfg.on_violation, ViolationPolicy::Log);
        assert_eq!(cfg.dialect, Dialect::MySql);
    }
}
