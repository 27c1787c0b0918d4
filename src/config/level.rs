use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use super::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{0}'")]
pub struct UnknownLevel(pub String);

/// Severity names accepted for `log_level`, ordered most verbose first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Numeric severity, as used by syslog-style `log_level: 20` settings.
    pub fn numeric(self) -> u64 {
        match self {
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warning => 30,
            Self::Error => 40,
            Self::Critical => 50,
        }
    }

    pub fn from_numeric(n: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.numeric() == n)
    }

    /// `EnvFilter` directive for this level. There is no `critical` in
    /// tracing, so it collapses into `error`.
    pub fn filter_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

/// Normalizes a raw `log_level` value to an uppercase level name.
///
/// Strings are uppercased even when they name no known level. Integers must
/// be one of the standard numeric severities.
pub(crate) fn normalize_level(value: &Value) -> Result<String, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: "log_level".to_string(),
        reason: reason.to_string(),
    };

    match value {
        Value::Null => Err(ConfigError::ConfigAbsent("log_level".to_string())),
        Value::String(s) => Ok(s.trim().to_uppercase()),
        Value::Number(n) => n
            .as_u64()
            .and_then(LogLevel::from_numeric)
            .map(|level| level.as_str().to_string())
            .ok_or_else(|| invalid(&format!("unknown numeric level {n}"))),
        _ => Err(invalid("expected a level name or number")),
    }
}
