//! tokenstore-adapter-memory - 内存文档集合适配器
//!
//! 进程内实现的 `DocumentCollection`，语义与 MongoDB 集合保持一致，
//! 用于测试和不需要持久化的场景。

mod collection;
mod matcher;

pub use collection::*;
pub use matcher::*;
