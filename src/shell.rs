//! Shell quoting and loose flag truthiness used when composing Drush arguments

/// Quote a value as a single shell word.
///
/// The value is wrapped in single quotes and every embedded single quote is
/// emitted as `'\''`, so the result is safe to splice into a `sh -c` line.
#[must_use]
pub fn escape_arg(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for c in value.chars() {
        if c == '\'' {
            escaped.push_str("'\\''");
        } else {
            escaped.push(c);
        }
    }
    escaped.push('\'');
    escaped
}

/// A loosely typed flag value, as it may arrive from a config file or a caller.
///
/// Truthiness follows the usual scripting convention: `false`, `0`, `""`,
/// `"0"` and a missing value are falsy, everything else is truthy.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FlagValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl FlagValue {
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Null => false,
            FlagValue::Bool(b) => *b,
            FlagValue::Int(i) => *i != 0,
            FlagValue::Str(s) => !(s.is_empty() || s == "0"),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        FlagValue::Int(value)
    }
}

impl From<i32> for FlagValue {
    fn from(value: i32) -> Self {
        FlagValue::Int(i64::from(value))
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Str(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Str(value)
    }
}

impl<T: Into<FlagValue>> From<Option<T>> for FlagValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FlagValue::Null, Into::into)
    }
}
