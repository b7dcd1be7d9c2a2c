//! MongoDB Access Token 存储

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokenstore_errors::AppResult;
use tokenstore_ports::{
    AccessTokenDatabase, AccessTokenRecord, CREATED_AT_FIELD, DocumentCollection, Filter,
    TOKEN_FIELD,
};
use tracing::{debug, info};

use crate::MongoCollection;
use crate::metrics::{record_duplicate_key, record_index_creation, record_operation};

/// Access Token 存储
///
/// 把四个存储操作翻译成对单个集合的查询。第一次操作前在 `token`
/// 字段上建立唯一索引；初始化标记没有加锁，并发的首次调用可能各自发出
/// 一次建索引请求，依赖数据库侧建索引的幂等性保证正确。
///
/// 默认使用 MongoDB 集合，任何 `DocumentCollection` 实现都可以替换。
pub struct AccessTokenStore<R, C = MongoCollection> {
    collection: Arc<C>,
    initialized: AtomicBool,
    _record: PhantomData<fn() -> R>,
}

impl<R, C> AccessTokenStore<R, C>
where
    R: AccessTokenRecord,
    C: DocumentCollection,
{
    pub fn new(collection: Arc<C>) -> Self {
        Self {
            collection,
            initialized: AtomicBool::new(false),
            _record: PhantomData,
        }
    }

    /// 底层集合
    pub fn collection(&self) -> &Arc<C> {
        &self.collection
    }

    /// 唯一索引是否已确认存在
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    async fn ensure_initialized(&self) -> AppResult<()> {
        if !self.initialized.load(Ordering::Acquire) {
            record_index_creation();
            self.collection.create_unique_index(TOKEN_FIELD).await?;
            self.initialized.store(true, Ordering::Release);
            info!(field = TOKEN_FIELD, "Access token unique index initialized");
        }
        Ok(())
    }

    fn token_filter(token: &str, max_age: Option<DateTime<Utc>>) -> Filter {
        let filter = Filter::new().equals(TOKEN_FIELD, token);
        match max_age {
            Some(max_age) => filter.at_least(CREATED_AT_FIELD, max_age),
            None => filter,
        }
    }
}

#[async_trait]
impl<R, C> AccessTokenDatabase<R> for AccessTokenStore<R, C>
where
    R: AccessTokenRecord,
    C: DocumentCollection,
{
    async fn get_by_token(
        &self,
        token: &str,
        max_age: Option<DateTime<Utc>>,
    ) -> AppResult<Option<R>> {
        self.ensure_initialized().await?;
        record_operation("get_by_token");
        debug!(has_max_age = max_age.is_some(), "Finding access token");

        let filter = Self::token_filter(token, max_age);
        match self.collection.find_one(&filter).await? {
            Some(document) => Ok(Some(R::from_document(document)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, access_token: R) -> AppResult<R> {
        self.ensure_initialized().await?;
        record_operation("create");
        debug!(user_id = %access_token.user_id(), "Creating access token");

        let document = access_token.to_document()?;
        self.collection
            .insert_one(document)
            .await
            .inspect_err(|e| {
                if e.is_duplicate_key() {
                    record_duplicate_key();
                }
            })?;
        Ok(access_token)
    }

    async fn update(&self, access_token: R) -> AppResult<R> {
        self.ensure_initialized().await?;
        record_operation("update");
        debug!(user_id = %access_token.user_id(), "Updating access token");

        let filter = Self::token_filter(access_token.token(), None);
        let document = access_token.to_document()?;
        let matched = self.collection.replace_one(&filter, document).await?;
        if matched == 0 {
            debug!("No access token matched for update");
        }
        Ok(access_token)
    }

    async fn delete(&self, access_token: &R) -> AppResult<()> {
        self.ensure_initialized().await?;
        record_operation("delete");
        debug!(user_id = %access_token.user_id(), "Deleting access token");

        let filter = Self::token_filter(access_token.token(), None);
        let deleted = self.collection.delete_one(&filter).await?;
        if deleted == 0 {
            debug!("No access token matched for delete");
        }
        Ok(())
    }
}
