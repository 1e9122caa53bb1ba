//! Two-tier cache for GitHub data
//!
//! Repository metadata, analysis results and user repository listings are
//! kept in a bounded in-memory map backed by one JSON file per entry on
//! disk. Each category has its own TTL:
//!
//! | Category            | Default TTL |
//! |---------------------|-------------|
//! | `repository_info`   | 24 hours    |
//! | `analysis_result`   | 7 days      |
//! | `user_repositories` | 6 hours     |

mod manager;
mod memory;
mod storage;
mod types;


pub use manager::TieredCache;
pub use memory::MemoryStorage;
pub use storage::{CacheStorage, DiskScan, DiskStorage, PurgeReport};
pub use types::{CacheEntry, CacheKey, CacheStats, Category};
