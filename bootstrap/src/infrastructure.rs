//! 基础设施资源管理
//!
//! 统一管理 access token 存储依赖的 MongoDB 资源

use std::sync::Arc;

use mongodb::Client;
use tokenstore_adapter_mongodb::{
    AccessTokenStore, MongoCollection, MongoConfig, MongoHealthChecker, check_connection,
    connect, open_collection,
};
use tokenstore_common::HealthCheck;
use tokenstore_config::AppConfig;
use tokenstore_errors::AppResult;
use tokenstore_ports::AccessTokenRecord;
use tokenstore_telemetry::HealthStatus;
use tracing::info;

/// 基础设施资源容器
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// MongoDB 连接参数
    mongo_config: MongoConfig,
    /// MongoDB 客户端
    client: Client,
    /// access token 集合
    access_tokens: Arc<MongoCollection>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 连接失败直接返回错误，不做重试。
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let mongo_config = MongoConfig::from(&config.mongodb);
        let client = connect(&mongo_config).await?;
        check_connection(&client, &mongo_config.database).await?;
        info!(
            database = %mongo_config.database,
            collection = %mongo_config.collection,
            "MongoDB connection verified"
        );

        let access_tokens = Arc::new(open_collection(&client, &mongo_config));

        Ok(Self {
            config,
            mongo_config,
            client,
            access_tokens,
        })
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 MongoDB 客户端
    pub fn mongo_client(&self) -> Client {
        self.client.clone()
    }

    /// 获取 access token 集合
    pub fn access_token_collection(&self) -> Arc<MongoCollection> {
        self.access_tokens.clone()
    }

    /// 为给定记录结构创建 access token 存储
    ///
    /// 多个 store 共享同一集合句柄，各自维护初始化标记。
    pub fn access_token_store<R: AccessTokenRecord>(&self) -> AccessTokenStore<R> {
        AccessTokenStore::new(self.access_tokens.clone())
    }

    /// 汇总基础设施健康状态
    pub async fn health_status(&self) -> HealthStatus {
        let checker =
            MongoHealthChecker::new(self.client.clone(), self.mongo_config.database.clone());
        let result = checker.check().await;

        let mut status = HealthStatus::new();
        status.add_check(
            checker.component_name(),
            result.is_healthy(),
            result.error().map(str::to_string),
        );
        status
    }
}
