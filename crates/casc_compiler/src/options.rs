//! Compiler options, read from JSON with camelCase keys.
//!
//! ```json
//! { "maxCallDepth": 256 }
//! ```

use std::path::Path;

use casc_evaluator::DEFAULT_MAX_CALL_DEPTH;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CompilerOptions {
    /// Nested user function calls allowed before evaluation aborts.
    pub max_call_depth: usize,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse options from a JSON string. Missing keys take their defaults.
pub fn parse_options(content: &str) -> Result<CompilerOptions, OptionsError> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_options_file(path: impl AsRef<Path>) -> Result<CompilerOptions, OptionsError> {
    let content = std::fs::read_to_string(path)?;
    parse_options(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_takes_defaults() {
        let options = parse_options("{}").unwrap();
        assert_eq!(options, CompilerOptions::default());
        assert_eq!(options.max_call_depth, 256);
    }

    #[test]
    fn test_camel_case_keys() {
        let options = parse_options(r#"{ "maxCallDepth": 16 }"#).unwrap();
        assert_eq!(options.max_call_depth, 16);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = parse_options(r#"{ "max_call_depth": 16 }"#);
        assert!(matches!(result, Err(OptionsError::Json(_))));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(parse_options(r#"{ "maxCallDepth": "deep" }"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = parse_options_file("/nonexistent/casc-options.json");
        assert!(matches!(result, Err(OptionsError::Io(_))));
    }

    #[test]
    fn test_round_trip_through_json() {
        let options = CompilerOptions { max_call_depth: 3 };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"maxCallDepth":3}"#);
    }
}
