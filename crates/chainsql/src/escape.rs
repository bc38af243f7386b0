//! String escaping for SQL literals.
//!
//! Two tables exist: MySQL's backslash style and the standard style used by every
//! other dialect. Both are applied in a single pass, so each special character is
//! substituted exactly once.
//!
//! | char      | Backslash | Standard |
//! |-----------|-----------|----------|
//! | `\`       | `\\`      | `\\`     |
//! | `'`       | `\'`      | `''`     |
//! | `"`       | `\"`      | `""`     |
//! | NUL       | `\0`      | `\0`     |
//! | LF        | `\n`      | `\n`     |
//! | CR        | `\r`      | `\r`     |
//! | Ctrl-Z    | `\Z`      | `\Z`     |

use crate::dialect::Dialect;

/// Escaping table selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeMode {
    /// MySQL: quotes are escaped with a backslash.
    Backslash,
    /// Everything else: quotes are doubled.
    Standard,
}

/// Escape `value` using the table of `dialect`.
///
/// # Example
/// ```
/// use chainsql::{Dialect, escape_str};
///
/// assert_eq!(escape_str("o'clock", Dialect::MySql), r"o\'clock");
/// assert_eq!(escape_str("o'clock", Dialect::PostgreSql), "o''clock");
/// ```
pub fn escape_str(value: &str, dialect: Dialect) -> String {
    escape(value, dialect.escape_mode())
}

/// Escape `value` using an explicit table.
pub fn escape(value: &str, mode: EscapeMode) -> String {
    let mut out = String::with_capacity(value.len());
    push_escaped(&mut out, value, mode);
    out
}

pub(crate) fn push_escaped(out: &mut String, value: &str, mode: EscapeMode) {
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => match mode {
                EscapeMode::Backslash => out.push_str("\\'"),
                EscapeMode::Standard => out.push_str("''"),
            },
            '"' => match mode {
                EscapeMode::Backslash => out.push_str("\\\""),
                EscapeMode::Standard => out.push_str("\"\""),
            },
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x1a' => out.push_str("\\Z"),
            c => out.push(c),
        }
    }
}

/// Escape and wrap in single quotes.
pub(crate) fn push_quoted(out: &mut String, value: &str, mode: EscapeMode) {
    out.push('\'');
    push_escaped(out, value, mode);
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape("users", EscapeMode::Backslash), "users");
        assert_eq!(escape("count(Host)", EscapeMode::Standard), "count(Host)");
        assert_eq!(escape("", EscapeMode::Standard), "");
    }

    #[test]
    fn backslash_table() {
        let m = EscapeMode::Backslash;
        assert_eq!(escape(r"a\b", m), r"a\\b");
        assert_eq!(escape("it's", m), r"it\'s");
        assert_eq!(escape(r#"say "hi""#, m), r#"say \"hi\""#);
        assert_eq!(escape("a\0b", m), r"a\0b");
        assert_eq!(escape("a\nb\rc", m), r"a\nb\rc");
        assert_eq!(escape("a\x1ab", m), r"a\Zb");
    }

    #[test]
    fn standard_table() {
        let m = EscapeMode::Standard;
        assert_eq!(escape(r"a\b", m), r"a\\b");
        assert_eq!(escape("it's", m), "it''s");
        assert_eq!(escape(r#"say "hi""#, m), r#"say ""hi"""#);
        assert_eq!(escape("a\0b", m), r"a\0b");
        assert_eq!(escape("a\nb\rc", m), r"a\nb\rc");
        assert_eq!(escape("a\x1ab", m), r"a\Zb");
    }

    #[test]
    fn each_occurrence_is_substituted_once() {
        // A backslash produced by escaping a quote must not be escaped again.
        assert_eq!(escape(r"\'", EscapeMode::Backslash), r"\\\'");
        assert_eq!(escape("''", EscapeMode::Standard), "''''");
        assert_eq!(escape(r"\\", EscapeMode::Standard), r"\\\\");
    }

    #[test]
    fn escaping_is_not_idempotent() {
        let once = escape("'", EscapeMode::Backslash);
        let twice = escape(&once, EscapeMode::Backslash);
        assert_eq!(once, r"\'");
        assert_eq!(twice, r"\\\'");
    }

    #[test]
    fn multibyte_text_passes_through() {
        assert_eq!(escape("café ☕", EscapeMode::Backslash), "café ☕");
    }

    #[test]
    fn escape_str_follows_dialect() {
        assert_eq!(escape_str("o'clock", Dialect::MySql), r"o\'clock");
        assert_eq!(escape_str("o'clock", Dialect::Oracle), "o''clock");
        assert_eq!(escape_str("o'clock", Dialect::Sqlite), "o''clock");
    }

    #[test]
    fn quoted_wraps_in_single_quotes() {
        let mut out = String::new();
        push_quoted(&mut out, "o'clock", EscapeMode::Standard);
        assert_eq!(out, "'o''clock'");
    }
}
