//! 服务运行时

use metrics_exporter_prometheus::PrometheusHandle;
use tokenstore_config::AppConfig;
use tokenstore_errors::{AppError, AppResult};
use tokenstore_telemetry::{init_metrics, init_tracing, init_tracing_json};
use tracing::info;

/// 服务运行时配置
pub struct RuntimeConfig {
    pub config_dir: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            config_dir: "config".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// 加载应用配置
    pub fn load(&self) -> AppResult<AppConfig> {
        AppConfig::load(&self.config_dir).map_err(|e| AppError::configuration(e.to_string()))
    }
}

/// 初始化服务运行时
pub fn init_runtime(config: &AppConfig) {
    // 初始化 tracing
    if config.telemetry.json || config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
}

/// 安装 Prometheus 指标记录器
pub fn init_runtime_metrics() -> AppResult<PrometheusHandle> {
    init_metrics()
        .map_err(|e| AppError::internal(format!("Failed to install metrics recorder: {}", e)))
}
