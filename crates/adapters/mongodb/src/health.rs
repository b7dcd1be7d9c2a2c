//! MongoDB 健康检查模块

use std::time::{Duration, Instant};

use async_trait::async_trait;
use mongodb::Client;
use tokenstore_common::{HealthCheck, HealthCheckResult};
use tracing::{debug, warn};

use crate::connection::check_connection;

/// 健康检查详细信息
#[derive(Debug, Clone)]
pub struct MongoHealthDetails {
    /// 被检查的数据库
    pub database: String,
}

/// MongoDB 健康检查器
pub struct MongoHealthChecker {
    client: Client,
    database: String,
    timeout: Duration,
}

impl MongoHealthChecker {
    /// 创建新的健康检查器
    pub fn new(client: Client, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
            timeout: Duration::from_secs(5),
        }
    }

    /// 设置超时时间
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn details(&self) -> MongoHealthDetails {
        MongoHealthDetails {
            database: self.database.clone(),
        }
    }
}

#[async_trait]
impl HealthCheck for MongoHealthChecker {
    type Details = MongoHealthDetails;

    async fn check(&self) -> HealthCheckResult<MongoHealthDetails> {
        let start = Instant::now();
        let result =
            tokio::time::timeout(self.timeout, check_connection(&self.client, &self.database))
                .await;

        match result {
            Ok(Ok(())) => {
                let latency = start.elapsed().as_millis() as u64;
                debug!(latency_ms = latency, "MongoDB health check passed");
                HealthCheckResult::healthy(latency, self.details())
            }
            Ok(Err(e)) => {
                warn!(error = %e, "MongoDB health check failed");
                HealthCheckResult::unhealthy(e.to_string(), Some(self.details()))
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "MongoDB health check timed out"
                );
                HealthCheckResult::timeout(Some(self.details()))
            }
        }
    }

    fn component_name(&self) -> &'static str {
        "mongodb"
    }
}
