//! Access Token 存储接口

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokenstore_errors::AppResult;

use crate::AccessTokenRecord;

/// Access Token 存储接口
///
/// 认证策略通过它读写 access token，具体后端可替换。
#[async_trait]
pub trait AccessTokenDatabase<R: AccessTokenRecord>: Send + Sync {
    /// 根据 token 查找
    ///
    /// `max_age` 为可接受的最早创建时间（含边界），早于该时间创建的 token 视为不存在。
    /// 未找到返回 `Ok(None)`。
    async fn get_by_token(
        &self,
        token: &str,
        max_age: Option<DateTime<Utc>>,
    ) -> AppResult<Option<R>>;

    /// 创建 token，token 已存在时返回 `AppError::DuplicateKey`
    async fn create(&self, access_token: R) -> AppResult<R>;

    /// 按 token 整体替换记录，未匹配时不做任何事
    async fn update(&self, access_token: R) -> AppResult<R>;

    /// 按 token 删除记录，未匹配时不报错
    async fn delete(&self, access_token: &R) -> AppResult<()>;
}
