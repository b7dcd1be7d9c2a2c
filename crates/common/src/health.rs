//! 通用健康检查模块
//!
//! 提供健康检查的通用 trait 和基础类型

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 基础健康检查结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseHealthResult {
    /// 是否健康
    pub healthy: bool,
    /// 延迟（毫秒）
    pub latency_ms: Option<u64>,
    /// 错误信息
    pub error: Option<String>,
}

impl BaseHealthResult {
    /// 创建健康结果
    pub fn healthy(latency_ms: u64) -> Self {
        Self {
            healthy: true,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    /// 创建不健康结果
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            latency_ms: None,
            error: Some(error.into()),
        }
    }

    /// 创建超时结果
    pub fn timeout() -> Self {
        Self {
            healthy: false,
            latency_ms: None,
            error: Some("Health check timed out".to_string()),
        }
    }
}

/// 带详细信息的健康检查结果
#[derive(Debug, Clone)]
pub struct HealthCheckResult<D> {
    /// 基础结果
    pub base: BaseHealthResult,
    /// 详细信息
    pub details: Option<D>,
}

impl<D> HealthCheckResult<D> {
    /// 创建健康结果
    pub fn healthy(latency_ms: u64, details: D) -> Self {
        Self {
            base: BaseHealthResult::healthy(latency_ms),
            details: Some(details),
        }
    }

    /// 创建不健康结果
    pub fn unhealthy(error: impl Into<String>, details: Option<D>) -> Self {
        Self {
            base: BaseHealthResult::unhealthy(error),
            details,
        }
    }

    /// 创建超时结果
    pub fn timeout(details: Option<D>) -> Self {
        Self {
            base: BaseHealthResult::timeout(),
            details,
        }
    }

    /// 是否健康
    pub fn is_healthy(&self) -> bool {
        self.base.healthy
    }

    /// 获取延迟
    pub fn latency_ms(&self) -> Option<u64> {
        self.base.latency_ms
    }

    /// 获取错误信息
    pub fn error(&self) -> Option<&str> {
        self.base.error.as_deref()
    }
}

/// 健康检查 trait
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// 详细信息类型
    type Details: Send + Sync;

    /// 执行健康检查
    async fn check(&self) -> HealthCheckResult<Self::Details>;

    /// 获取组件名称
    fn component_name(&self) -> &'static str;

    /// 快速健康检查（仅检查是否可用）
    async fn quick_check(&self) -> bool {
        self.check().await.is_healthy()
    }
}
