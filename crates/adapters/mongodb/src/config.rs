//! MongoDB 连接配置

use std::fmt;
use std::time::Duration;

use secrecy::ExposeSecret;
use tokenstore_config::MongoDbConfig;

/// MongoDB 连接配置
#[derive(Clone)]
pub struct MongoConfig {
    /// 连接字符串，可能包含凭据
    pub url: String,
    /// 数据库名
    pub database: String,
    /// access token 集合名
    pub collection: String,
    /// 服务器选择超时
    pub server_selection_timeout: Duration,
    /// 上报给服务器的应用名
    pub app_name: Option<String>,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "tokenstore".to_string(),
            collection: "access_tokens".to_string(),
            server_selection_timeout: Duration::from_secs(10),
            app_name: None,
        }
    }
}

impl MongoConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Default::default()
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }
}

impl From<&MongoDbConfig> for MongoConfig {
    fn from(config: &MongoDbConfig) -> Self {
        Self {
            url: config.url.expose_secret().clone(),
            database: config.database.clone(),
            collection: config.access_token_collection.clone(),
            server_selection_timeout: Duration::from_millis(config.server_selection_timeout_ms),
            app_name: config.app_name.clone(),
        }
    }
}

impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("url", &"[REDACTED]")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("server_selection_timeout", &self.server_selection_timeout)
            .field("app_name", &self.app_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn test_from_settings() {
        let settings = MongoDbConfig {
            url: Secret::new("mongodb://user:pass@db:27017".to_string()),
            database: "auth".to_string(),
            access_token_collection: "tokens".to_string(),
            server_selection_timeout_ms: 2_500,
            app_name: Some("auth-api".to_string()),
        };

        let config = MongoConfig::from(&settings);
        assert_eq!(config.url, "mongodb://user:pass@db:27017");
        assert_eq!(config.database, "auth");
        assert_eq!(config.collection, "tokens");
        assert_eq!(config.server_selection_timeout, Duration::from_millis(2_500));
        assert_eq!(config.app_name.as_deref(), Some("auth-api"));
    }

    #[test]
    fn test_builder_and_redaction() {
        let config = MongoConfig::new("mongodb://user:pass@db:27017", "auth")
            .with_collection("tokens")
            .with_server_selection_timeout(Duration::from_secs(3))
            .with_app_name("auth-api");

        assert_eq!(config.collection, "tokens");
        assert_eq!(config.server_selection_timeout, Duration::from_secs(3));

        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("pass@"));
        assert!(debug_output.contains("[REDACTED]"));
    }
}
