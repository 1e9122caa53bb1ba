//! From trait implementations for GitScopeError conversions

use super::types::GitScopeError;

impl From<std::io::Error> for GitScopeError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for GitScopeError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}
