//! Constructor methods for GitScopeError

use super::types::GitScopeError;

impl GitScopeError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create an IO error with message
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            context: None,
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
            context: None,
        }
    }

    /// Create a JSON error with message
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
            context: None,
        }
    }

    /// Create a new timeout error
    pub fn timeout(millis: u64) -> Self {
        Self::Timeout {
            millis,
            context: None,
        }
    }

    /// Create a corrupted-entry error for the file at `path`
    pub fn corrupted(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Corrupted {
            message: message.into(),
            path: Some(path.into()),
            context: None,
        }
    }

    /// Create an invalid input error with field name
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
            context: None,
        }
    }

    /// Create a category mismatch error
    pub fn category_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::CategoryMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            context: None,
        }
    }

    /// Add context to any error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let ctx = Some(context.into());
        match &mut self {
            Self::Config { context: c, .. } => *c = ctx,
            Self::Io { context: c, .. } => *c = ctx,
            Self::Json { context: c, .. } => *c = ctx,
            Self::Timeout { context: c, .. } => *c = ctx,
            Self::Corrupted { context: c, .. } => *c = ctx,
            Self::InvalidInput { context: c, .. } => *c = ctx,
            Self::Other { context: c, .. } => *c = ctx,
            Self::UnknownCategory(_) | Self::CategoryMismatch { .. } => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_sets_context() {
        let err = GitScopeError::io("disk full").with_context("persisting entry");
        assert_eq!(err.context(), Some("persisting entry"));
        assert_eq!(err.error_code(), "GITSCOPE_IO");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_programmer_errors_ignore_context() {
        let err = GitScopeError::category_mismatch("analysis_result", "repository_info")
            .with_context("ignored");
        assert!(err.context().is_none());
        assert!(err.is_programmer_error());
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Payload of kind repository_info cannot be stored under category analysis_result"
        );
    }
}
