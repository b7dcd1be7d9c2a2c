//! Access Token 记录

use bson::Document;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokenstore_common::{UserId, now_millis, truncate_to_millis};
use tokenstore_errors::{AppError, AppResult};

/// token 字段名，唯一索引建立在该字段上
pub const TOKEN_FIELD: &str = "token";
/// 用户 ID 字段名
pub const USER_ID_FIELD: &str = "user_id";
/// 创建时间字段名
pub const CREATED_AT_FIELD: &str = "created_at";

/// Access Token 记录能力
///
/// 存储层对记录结构是开放的：只要求存在 `token`、`user_id`、`created_at`
/// 三个字段，其余字段原样保存。
///
/// `created_at` 必须序列化为 BSON datetime，否则按创建时间过滤不生效，
/// 自定义结构可以使用
/// `#[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]`。
/// `user_id` 按 BSON 二进制 UUID（subtype 4）存储，与已有集合中的数据兼容，
/// 自定义结构使用 `#[serde(with = "tokenstore_ports::user_id_as_binary")]`。
/// 创建时间应先截断到毫秒，否则读回的记录与写入的不相等。
pub trait AccessTokenRecord: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// token 值
    fn token(&self) -> &str;

    /// 所属用户
    fn user_id(&self) -> UserId;

    /// 创建时间
    fn created_at(&self) -> DateTime<Utc>;

    /// 转换为存储文档
    fn to_document(&self) -> AppResult<Document> {
        bson::to_document(self).map_err(|e| {
            AppError::serialization(format!("Failed to encode access token: {}", e))
        })
    }

    /// 从存储文档还原
    fn from_document(document: Document) -> AppResult<Self> {
        bson::from_document(document).map_err(|e| {
            AppError::serialization(format!("Failed to decode access token: {}", e))
        })
    }
}

/// `UserId` 与 BSON 二进制 UUID 之间的转换
pub mod user_id_as_binary {
    use bson::serde_helpers::uuid_1_as_binary;
    use serde::{Deserializer, Serializer};
    use tokenstore_common::UserId;

    pub fn serialize<S: Serializer>(user_id: &UserId, serializer: S) -> Result<S::Ok, S::Error> {
        uuid_1_as_binary::serialize(user_id.as_uuid(), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<UserId, D::Error> {
        uuid_1_as_binary::deserialize(deserializer).map(UserId::from_uuid)
    }
}

/// 默认的 Access Token 记录结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAccessToken {
    /// Token 字符串
    pub token: String,
    /// 用户 ID
    #[serde(with = "user_id_as_binary")]
    pub user_id: UserId,
    /// 创建时间，只通过截断到毫秒的方法写入
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl BaseAccessToken {
    /// 创建新的 Access Token，创建时间为当前时间
    pub fn new(token: impl Into<String>, user_id: UserId) -> Self {
        Self {
            token: token.into(),
            user_id,
            created_at: now_millis(),
        }
    }

    /// 指定创建时间（截断到毫秒）
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.set_created_at(created_at);
        self
    }

    /// 修改创建时间（截断到毫秒）
    pub fn set_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = truncate_to_millis(created_at);
    }
}

impl AccessTokenRecord for BaseAccessToken {
    fn token(&self) -> &str {
        &self.token
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
