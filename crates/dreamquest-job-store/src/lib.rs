//! `JobStore` backends.
//!
//! Both store each record as one JSON string under `job:<id>` and apply the
//! TTL on every write.

pub mod memory_job_store;
pub mod redis_job_store;

pub use memory_job_store::InMemoryJobStore;
pub use redis_job_store::RedisJobStore;
