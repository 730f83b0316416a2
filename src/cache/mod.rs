//! Cache
//!
//! Este módulo contiene los sistemas de cache.

pub mod cache_config;
pub mod dashboard_cache;
pub mod redis_client;

pub use cache_config::{CacheConfig, CacheOperations};
