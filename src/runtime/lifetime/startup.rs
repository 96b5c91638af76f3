use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::services::RotationService;
use crate::storage::{CatalogKind, CatalogStore, CounterStore, SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub catalog: Arc<dyn CatalogStore>,
    pub rotation_service: Arc<RotationService>,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）和轮播服务
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let catalog: Arc<dyn CatalogStore> = storage.clone();
    let counters: Arc<dyn CounterStore> = storage.clone();

    // 没有 group 时挂载 banner 不会产生任何 rotation
    match catalog.list(CatalogKind::Group).await {
        Ok(groups) if groups.is_empty() => {
            warn!("No audience groups registered yet; add_banner will attach nothing until groups exist")
        }
        Ok(groups) => info!("{} audience groups registered", groups.len()),
        Err(e) => warn!("Could not count audience groups: {}", e),
    }

    let rotation_service = Arc::new(RotationService::from_config(counters, &config.rotation));
    info!(
        "Rotation service ready (request timeout {} ms)",
        config.rotation.request_timeout_ms
    );

    debug!("Pre-startup completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        storage,
        catalog,
        rotation_service,
    })
}
