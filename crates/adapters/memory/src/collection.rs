//! 内存文档集合实现

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use parking_lot::RwLock;
use tokenstore_errors::{AppError, AppResult};
use tokenstore_ports::{DocumentCollection, Filter};
use tracing::debug;

use crate::matcher::matches;

const ID_FIELD: &str = "_id";

#[derive(Debug, Default)]
struct CollectionState {
    documents: Vec<Document>,
    unique_fields: Vec<String>,
}

impl CollectionState {
    /// 查找与候选文档在唯一字段上冲突的字段，`skip` 为被替换文档的位置
    fn conflicting_field(&self, candidate: &Document, skip: Option<usize>) -> Option<&str> {
        self.unique_fields.iter().map(String::as_str).find(|field| {
            let value = index_key(candidate, field);
            self.documents
                .iter()
                .enumerate()
                .filter(|(position, _)| Some(*position) != skip)
                .any(|(_, existing)| index_key(existing, field) == value)
        })
    }
}

/// 唯一索引中缺失字段按 null 处理
fn index_key<'a>(document: &'a Document, field: &str) -> &'a Bson {
    document.get(field).unwrap_or(&Bson::Null)
}

/// 内存文档集合
///
/// 唯一索引只在 `create_unique_index` 之后生效，与 MongoDB 行为一致。
#[derive(Debug)]
pub struct InMemoryCollection {
    name: String,
    state: RwLock<CollectionState>,
    index_creation_attempts: AtomicUsize,
}

impl InMemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(CollectionState::default()),
            index_creation_attempts: AtomicUsize::new(0),
        }
    }

    /// 集合名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 文档数量
    pub fn len(&self) -> usize {
        self.state.read().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 当前全部文档的快照
    pub fn documents(&self) -> Vec<Document> {
        self.state.read().documents.clone()
    }

    /// 清空文档，保留索引
    pub fn clear(&self) {
        self.state.write().documents.clear();
    }

    /// 已建立唯一索引的字段
    pub fn unique_indexes(&self) -> Vec<String> {
        self.state.read().unique_fields.clone()
    }

    /// 创建索引请求的累计次数（包括重复请求）
    pub fn index_creation_attempts(&self) -> usize {
        self.index_creation_attempts.load(Ordering::SeqCst)
    }

    fn duplicate_key_error(&self, field: &str, document: &Document) -> AppError {
        AppError::duplicate_key(format!(
            "E11000 duplicate key error collection: {} index: {}_1 dup key: {{ {}: {} }}",
            self.name,
            field,
            field,
            index_key(document, field)
        ))
    }
}

#[async_trait]
impl DocumentCollection for InMemoryCollection {
    async fn find_one(&self, filter: &Filter) -> AppResult<Option<Document>> {
        let state = self.state.read();
        Ok(state
            .documents
            .iter()
            .find(|document| matches(filter, document))
            .cloned())
    }

    async fn insert_one(&self, mut document: Document) -> AppResult<()> {
        if !document.contains_key(ID_FIELD) {
            document.insert(ID_FIELD, ObjectId::new());
        }

        let mut state = self.state.write();
        if let Some(field) = state.conflicting_field(&document, None) {
            return Err(self.duplicate_key_error(field, &document));
        }
        state.documents.push(document);
        Ok(())
    }

    async fn replace_one(&self, filter: &Filter, mut replacement: Document) -> AppResult<u64> {
        let mut state = self.state.write();
        let Some(position) = state
            .documents
            .iter()
            .position(|document| matches(filter, document))
        else {
            return Ok(0);
        };

        // 替换后保留原文档的 _id
        if let Some(id) = state.documents[position].get(ID_FIELD).cloned() {
            replacement.insert(ID_FIELD, id);
        }
        if let Some(field) = state.conflicting_field(&replacement, Some(position)) {
            return Err(self.duplicate_key_error(field, &replacement));
        }
        state.documents[position] = replacement;
        Ok(1)
    }

    async fn delete_one(&self, filter: &Filter) -> AppResult<u64> {
        let mut state = self.state.write();
        match state
            .documents
            .iter()
            .position(|document| matches(filter, document))
        {
            Some(position) => {
                state.documents.remove(position);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn create_unique_index(&self, field: &str) -> AppResult<()> {
        self.index_creation_attempts.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.write();
        if state.unique_fields.iter().any(|existing| existing == field) {
            debug!(collection = %self.name, field, "Unique index already exists");
            return Ok(());
        }

        // 已有数据违反约束时拒绝建索引
        for (position, document) in state.documents.iter().enumerate() {
            let value = index_key(document, field);
            let duplicated = state.documents[position + 1..]
                .iter()
                .any(|other| index_key(other, field) == value);
            if duplicated {
                return Err(self.duplicate_key_error(field, document));
            }
        }

        state.unique_fields.push(field.to_string());
        debug!(collection = %self.name, field, "Unique index created");
        Ok(())
    }
}
