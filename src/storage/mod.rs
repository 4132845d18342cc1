use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::{EventSink, SeaOrmStorage};
pub use models::{
    EventKind, Link, LinkChanges, NewEvent, NewLink, Profile, ProfileRecord, ReorderOutcome,
    VisitorMeta,
};

pub struct StorageFactory;

impl StorageFactory {
    /// 按数据库配置创建存储并执行迁移
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let backend_type = backend::infer_backend_from_url(&config.database_url)?;
        let storage = SeaOrmStorage::new(config, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
