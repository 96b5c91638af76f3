use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;
pub mod traits;

pub use backend::SeaOrmStorage;
pub use models::{CatalogEntry, CatalogKind, Rotation, RotationStatus};
pub use traits::{CatalogStore, CounterStore};

pub struct StorageFactory;

impl StorageFactory {
    /// 打开存储并运行迁移，数据库类型从 URL 推断
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let storage = SeaOrmStorage::new(config).await?;
        Ok(Arc::new(storage))
    }
}
