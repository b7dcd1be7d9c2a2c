//! MongoDB 连接管理

use bson::{Document, doc};
use mongodb::Client;
use mongodb::options::ClientOptions;
use tokenstore_errors::{AppError, AppResult};
use tracing::info;

use crate::{MongoCollection, MongoConfig};

/// 创建 MongoDB 客户端
///
/// 连接池由驱动内部管理，客户端可以克隆共享。
pub async fn connect(config: &MongoConfig) -> AppResult<Client> {
    let mut options = ClientOptions::parse(&config.url).await.map_err(|e| {
        AppError::configuration(format!("Invalid MongoDB connection string: {}", e))
    })?;
    options.server_selection_timeout = Some(config.server_selection_timeout);
    if let Some(app_name) = &config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)
        .map_err(|e| AppError::database(format!("Failed to create MongoDB client: {}", e)))?;

    info!(database = %config.database, "MongoDB client created");
    Ok(client)
}

/// 打开 access token 集合
pub fn open_collection(client: &Client, config: &MongoConfig) -> MongoCollection {
    MongoCollection::new(
        client
            .database(&config.database)
            .collection::<Document>(&config.collection),
    )
}

/// 检查 MongoDB 连接
pub async fn check_connection(client: &Client, database: &str) -> AppResult<()> {
    client
        .database(database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| AppError::database(format!("MongoDB health check failed: {}", e)))?;
    Ok(())
}
