//! Crate error types.
//!
//! The simulation itself never fails; stale callbacks and updates on removed
//! entities are silent no-ops. The only fallible surface is loading and
//! validating [`crate::Settings`].

use std::fmt;

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    Io(std::io::Error),

    /// The settings document is not valid JSON for [`crate::Settings`].
    Parse(serde_json::Error),

    /// A field holds a value the simulation cannot run with.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the constraint.
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read settings: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse settings: {err}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid setting `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message_names_field() {
        let err = ConfigError::Invalid {
            field: "speeds",
            reason: "must not be empty",
        };
        assert_eq!(err.to_string(), "invalid setting `speeds`: must not be empty");
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ConfigError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to parse settings"));
    }
}
