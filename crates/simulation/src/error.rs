// ---------------------------------------------------------------------------
// ConfigError: startup configuration failures
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while validating [`GameParams`](crate::game_params::GameParams)
/// or building the lane pool from them.
///
/// All variants are fatal: the run loop cannot start without a lane template,
/// a vehicle template and sane pool sizes.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required template (`"lane"` or `"vehicle"`) was not provided.
    MissingTemplate(&'static str),
    /// A numeric parameter is outside its allowed range.
    InvalidValue { field: &'static str, reason: String },
    /// The params document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingTemplate(name) => {
                write!(f, "Missing required {name} template")
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for {field}: {reason}")
            }
            ConfigError::Parse(msg) => write!(f, "Could not parse game params: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
