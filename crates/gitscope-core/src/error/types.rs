//! Core error type for gitscope

use thiserror::Error;

/// Result type alias for gitscope operations
pub type GitScopeResult<T> = Result<T, GitScopeError>;

/// Main error type for gitscope
#[derive(Error, Debug, Clone)]
pub enum GitScopeError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// A disk operation exceeded the configured I/O timeout
    #[error("Operation timed out after {millis}ms")]
    Timeout {
        millis: u64,
        context: Option<String>,
    },

    /// A persisted cache entry could not be decoded
    #[error("Corrupted cache entry: {message}")]
    Corrupted {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// Category name that is not one of the known cache categories
    #[error("Unknown cache category: {0}")]
    UnknownCategory(String),

    /// Payload variant does not belong to the category it was filed under
    #[error("Payload of kind {actual} cannot be stored under category {expected}")]
    CategoryMismatch {
        expected: String,
        actual: String,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}

impl GitScopeError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "GITSCOPE_CONFIG",
            Self::Io { .. } => "GITSCOPE_IO",
            Self::Json { .. } => "GITSCOPE_JSON",
            Self::Timeout { .. } => "GITSCOPE_TIMEOUT",
            Self::Corrupted { .. } => "GITSCOPE_CORRUPTED",
            Self::InvalidInput { .. } => "GITSCOPE_INVALID_INPUT",
            Self::UnknownCategory(_) => "GITSCOPE_UNKNOWN_CATEGORY",
            Self::CategoryMismatch { .. } => "GITSCOPE_CATEGORY_MISMATCH",
            Self::Other { .. } => "GITSCOPE_OTHER",
        }
    }

    /// Context attached to the error, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::Io { context, .. }
            | Self::Json { context, .. }
            | Self::Timeout { context, .. }
            | Self::Corrupted { context, .. }
            | Self::InvalidInput { context, .. }
            | Self::Other { context, .. } => context.as_deref(),
            Self::UnknownCategory(_) | Self::CategoryMismatch { .. } => None,
        }
    }

    /// Whether retrying the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Timeout { .. })
    }

    /// Whether the error signals a caller bug rather than an environmental failure
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory(_) | Self::CategoryMismatch { .. } | Self::InvalidInput { .. }
        )
    }
}
