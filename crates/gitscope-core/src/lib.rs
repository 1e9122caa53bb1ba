//! gitscope core library
//!
//! This crate provides the two building blocks behind GitHub analysis tool
//! calls: a two-tier (memory + disk) cache for repository metadata and
//! analysis results, and a per-conversation context tracker that relates
//! new messages to previously analyzed projects.

pub mod cache;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod locator;
mod maintenance;
pub mod payload;

// Re-export commonly used types
pub use cache::{CacheStats, CacheStorage, Category, DiskStorage, TieredCache};
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use config::{CacheConfig, ContextConfig, GitScopeConfig, LoggingConfig};
pub use context::{ContextResult, ContextStats, ContextTracker, FollowUp};
pub use error::{GitScopeError, GitScopeResult};
pub use locator::GitHubTarget;
pub use payload::{AnalysisResult, Payload, RepositoryInfo, RepositorySummary};
