//! ports - 抽象 trait 层
//!
//! 定义 access token 存储的抽象接口：上游认证策略使用的
//! `AccessTokenDatabase`，以及适配器依赖的文档集合能力 `DocumentCollection`

mod access_token_database;
mod collection;
mod filter;
mod record;

pub use access_token_database::*;
pub use collection::*;
pub use filter::*;
pub use record::*;

pub use bson::{Bson, Document};
