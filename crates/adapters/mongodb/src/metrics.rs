//! Access Token 存储指标

use metrics::counter;

/// 记录一次存储操作
pub(crate) fn record_operation(operation: &'static str) {
    counter!("access_token_store_operations_total", "operation" => operation).increment(1);
}

/// 记录唯一约束冲突
pub(crate) fn record_duplicate_key() {
    counter!("access_token_store_duplicate_keys_total").increment(1);
}

/// 记录唯一索引创建请求
pub(crate) fn record_index_creation() {
    counter!("access_token_store_index_creations_total").increment(1);
}
