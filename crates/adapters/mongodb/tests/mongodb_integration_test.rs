//! MongoDB 集成测试
//!
//! 需要可用的 MongoDB 实例，默认连接 `mongodb://localhost:27017`，
//! 可通过 `MONGODB_URL` 覆盖。运行方式：
//!
//! ```text
//! cargo test -p tokenstore-adapter-mongodb --test mongodb_integration_test -- --ignored
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use futures::future::join_all;
use tokenstore_adapter_mongodb::{
    AccessTokenStore, MongoCollection, MongoConfig, MongoHealthChecker, check_connection,
    connect, open_collection,
};
use tokenstore_common::{HealthCheck, UserId, new_id};
use tokenstore_ports::{AccessTokenDatabase, AccessTokenRecord, BaseAccessToken};

/// 每个测试使用独立集合，避免互相影响
async fn setup() -> (MongoConfig, mongodb::Client, Arc<MongoCollection>) {
    dotenvy::dotenv().ok();
    let url = env::var("MONGODB_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let config = MongoConfig::new(url, "test_database_access_token")
        .with_collection(format!("access_tokens_{}", new_id().simple()))
        .with_server_selection_timeout(StdDuration::from_secs(10));

    let client = connect(&config).await.expect("Failed to create MongoDB client");
    check_connection(&client, &config.database)
        .await
        .expect("MongoDB not available");

    let collection = Arc::new(open_collection(&client, &config));
    (config, client, collection)
}

async fn teardown(collection: &MongoCollection) {
    collection
        .inner()
        .drop()
        .await
        .expect("Failed to drop test collection");
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_queries() {
    let (_, _, collection) = setup().await;
    let store: AccessTokenStore<BaseAccessToken> = AccessTokenStore::new(collection.clone());
    let user_id = UserId::new();

    // Create
    let access_token = store
        .create(BaseAccessToken::new("TOKEN", user_id))
        .await
        .expect("Failed to create access token");
    assert_eq!(access_token.token, "TOKEN");
    assert_eq!(access_token.user_id, user_id);

    // Update
    let mut access_token = access_token;
    access_token.set_created_at(Utc::now());
    let access_token = store
        .update(access_token)
        .await
        .expect("Failed to update access token");

    // Get by token
    let found = store.get_by_token("TOKEN", None).await.unwrap();
    assert_eq!(found, Some(access_token.clone()));

    // Get by token expired
    let expired = store
        .get_by_token("TOKEN", Some(Utc::now() + Duration::hours(1)))
        .await
        .unwrap();
    assert!(expired.is_none());

    // Get by token not expired
    let fresh = store
        .get_by_token("TOKEN", Some(Utc::now() - Duration::hours(1)))
        .await
        .unwrap();
    assert!(fresh.is_some());

    // Boundary
    let boundary = store
        .get_by_token("TOKEN", Some(access_token.created_at()))
        .await
        .unwrap();
    assert!(boundary.is_some());

    // Get by token unknown
    let unknown = store.get_by_token("NOT_EXISTING_TOKEN", None).await.unwrap();
    assert!(unknown.is_none());

    // Duplicate key when inserting existing token
    let err = store.create(access_token.clone()).await.unwrap_err();
    assert!(err.is_duplicate_key());

    // Delete token
    store.delete(&access_token).await.unwrap();
    let deleted = store.get_by_token("TOKEN", None).await.unwrap();
    assert!(deleted.is_none());

    teardown(&collection).await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_update_missing_token_does_not_upsert() {
    let (_, _, collection) = setup().await;
    let store: AccessTokenStore<BaseAccessToken> = AccessTokenStore::new(collection.clone());

    store
        .update(BaseAccessToken::new("MISSING", UserId::new()))
        .await
        .unwrap();

    let count = collection.inner().count_documents(bson::doc! {}).await.unwrap();
    assert_eq!(count, 0);

    teardown(&collection).await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_concurrent_initialization() {
    let (_, _, collection) = setup().await;
    let store: Arc<AccessTokenStore<BaseAccessToken>> =
        Arc::new(AccessTokenStore::new(collection.clone()));

    let lookups = (0..8).map(|i| {
        let store = store.clone();
        async move { store.get_by_token(&format!("TOKEN-{i}"), None).await }
    });
    for result in join_all(lookups).await {
        assert!(result.unwrap().is_none());
    }
    assert!(store.is_initialized());

    // 再建一个 store，重复建索引同样成功
    let second: AccessTokenStore<BaseAccessToken> = AccessTokenStore::new(collection.clone());
    second.get_by_token("TOKEN", None).await.unwrap();

    teardown(&collection).await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_health_check() {
    let (config, client, collection) = setup().await;

    let checker = MongoHealthChecker::new(client, config.database.clone());
    let result = checker.check().await;
    assert!(result.is_healthy());
    assert!(result.latency_ms().is_some());

    teardown(&collection).await;
}
