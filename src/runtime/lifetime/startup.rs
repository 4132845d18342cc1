use crate::config::StaticConfig;
use crate::services::{AnalyticsService, LinkService, ProfileService};
use crate::storage::{SeaOrmStorage, StorageFactory};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// 服务器运行期间共享的组件
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: Arc<LinkService>,
    pub profile_service: Arc<ProfileService>,
    pub analytics_service: Arc<AnalyticsService>,
}

impl StartupContext {
    /// 基于已创建的存储装配各服务
    pub fn from_storage(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(storage.clone())),
            profile_service: Arc::new(ProfileService::new(storage.clone())),
            analytics_service: Arc::new(AnalyticsService::new(
                storage.clone(),
                config.analytics.clone(),
            )),
            storage,
        }
    }
}

/// 准备服务器启动的上下文：连接存储、执行迁移、创建服务
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let context = StartupContext::from_storage(storage, config);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
