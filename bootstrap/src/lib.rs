//! tokenstore-bootstrap - 统一启动骨架
//!
//! 宿主服务复用的启动逻辑：加载配置后初始化日志、指标，
//! 建立 MongoDB 连接并提供 access token 存储

mod infrastructure;
mod runtime;

pub use infrastructure::*;
pub use runtime::*;
