//! tokenstore-adapter-mongodb - MongoDB 适配器
//!
//! 提供基于官方驱动的 `DocumentCollection` 实现，以及 access token 存储 `AccessTokenStore`

mod collection;
mod config;
mod connection;
mod filter;
mod health;
mod metrics;
mod store;

pub use collection::*;
pub use config::*;
pub use connection::*;
pub use filter::*;
pub use health::*;
pub use store::*;
