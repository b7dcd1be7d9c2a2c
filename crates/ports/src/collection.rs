//! 文档集合 trait 定义

use async_trait::async_trait;
use bson::Document;
use tokenstore_errors::AppResult;

use crate::Filter;

/// 文档集合
///
/// 对单个无模式集合的最小操作集合。实现需要保证并发安全，
/// 并把唯一约束冲突报告为 `AppError::DuplicateKey`。
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// 查找第一条匹配的文档
    async fn find_one(&self, filter: &Filter) -> AppResult<Option<Document>>;

    /// 插入一条文档
    async fn insert_one(&self, document: Document) -> AppResult<()>;

    /// 替换第一条匹配的文档，返回匹配数量（不做 upsert）
    async fn replace_one(&self, filter: &Filter, replacement: Document) -> AppResult<u64>;

    /// 删除第一条匹配的文档，返回删除数量
    async fn delete_one(&self, filter: &Filter) -> AppResult<u64>;

    /// 在字段上创建唯一索引，已存在时视为成功
    async fn create_unique_index(&self, field: &str) -> AppResult<()>;
}
