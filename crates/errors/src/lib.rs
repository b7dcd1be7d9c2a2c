//! tokenstore-errors - 统一错误处理
//!
//! 基于 RFC 7807 Problem Details 规范。
//! 存储适配器把各自驱动的错误翻译成这里的变体，
//! 上层只需要区分 `DuplicateKey` 和其他存储错误。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 唯一约束冲突
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn duplicate_key(msg: impl Into<String>) -> Self {
        Self::DuplicateKey(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 是否为唯一约束冲突
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateKey(_) => 409,
            Self::Database(_) => 500,
            Self::Serialization(_) => 500,
            Self::Configuration(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        ProblemDetails {
            r#type: self.problem_type(),
            title: self.problem_title(),
            status: self.status_code(),
            detail: self.to_string(),
            instance: None,
        }
    }

    fn problem_type(&self) -> String {
        let slug = match self {
            Self::DuplicateKey(_) => "duplicate-key",
            Self::Database(_) => "database",
            Self::Serialization(_) => "serialization",
            Self::Configuration(_) => "configuration",
            Self::Internal(_) => "internal",
        };
        format!("https://api.tokenstore.dev/problems/{}", slug)
    }

    fn problem_title(&self) -> String {
        match self {
            Self::DuplicateKey(_) => "Duplicate Key".to_string(),
            Self::Database(_) => "Database Error".to_string(),
            Self::Serialization(_) => "Serialization Error".to_string(),
            Self::Configuration(_) => "Configuration Error".to_string(),
            Self::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
