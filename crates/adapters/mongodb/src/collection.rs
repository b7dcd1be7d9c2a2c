//! MongoDB 文档集合实现

use async_trait::async_trait;
use bson::Document;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::{Collection, IndexModel, options::IndexOptions};
use tokenstore_errors::{AppError, AppResult};
use tokenstore_ports::{DocumentCollection, Filter};
use tracing::debug;

use crate::filter::to_query;

/// MongoDB 唯一约束冲突错误码
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// 基于 MongoDB 驱动的文档集合
#[derive(Debug, Clone)]
pub struct MongoCollection {
    inner: Collection<Document>,
}

impl MongoCollection {
    pub fn new(inner: Collection<Document>) -> Self {
        Self { inner }
    }

    /// 底层驱动集合
    pub fn inner(&self) -> &Collection<Document> {
        &self.inner
    }

    /// 集合名称
    pub fn name(&self) -> &str {
        self.inner.name()
    }
}

/// 提取服务器返回的错误码
fn server_error_code(err: &MongoError) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
        ErrorKind::Command(command_error) => Some(command_error.code),
        _ => None,
    }
}

/// 转换驱动错误，唯一约束冲突单独区分
fn map_mongo_error(context: &str, err: MongoError) -> AppError {
    if server_error_code(&err) == Some(DUPLICATE_KEY_CODE) {
        AppError::duplicate_key(err.to_string())
    } else {
        AppError::database(format!("{}: {}", context, err))
    }
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    async fn find_one(&self, filter: &Filter) -> AppResult<Option<Document>> {
        self.inner
            .find_one(to_query(filter))
            .await
            .map_err(|e| map_mongo_error("MongoDB find_one failed", e))
    }

    async fn insert_one(&self, document: Document) -> AppResult<()> {
        self.inner
            .insert_one(document)
            .await
            .map_err(|e| map_mongo_error("MongoDB insert_one failed", e))?;
        Ok(())
    }

    async fn replace_one(&self, filter: &Filter, replacement: Document) -> AppResult<u64> {
        let result = self
            .inner
            .replace_one(to_query(filter), replacement)
            .await
            .map_err(|e| map_mongo_error("MongoDB replace_one failed", e))?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, filter: &Filter) -> AppResult<u64> {
        let result = self
            .inner
            .delete_one(to_query(filter))
            .await
            .map_err(|e| map_mongo_error("MongoDB delete_one failed", e))?;
        Ok(result.deleted_count)
    }

    async fn create_unique_index(&self, field: &str) -> AppResult<()> {
        let mut keys = Document::new();
        keys.insert(field, 1);

        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let result = self
            .inner
            .create_index(index)
            .await
            .map_err(|e| map_mongo_error("MongoDB create_index failed", e))?;

        debug!(
            collection = %self.inner.name(),
            index = %result.index_name,
            "Unique index ensured"
        );
        Ok(())
    }
}
