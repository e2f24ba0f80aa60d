//! 存储层模块
//!
//! 提供数据持久化服务，支持 SurrealDB 和进程内存储。

#[cfg(feature = "surrealdb")]
pub mod surrealdb;

pub mod factory;
pub mod memory;
pub mod repository;
pub mod store;

pub use factory::StorageFactory;
pub use store::RecordStore;
