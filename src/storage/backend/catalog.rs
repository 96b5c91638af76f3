//! banners / slots / groups 参考表的读写
//!
//! 三张表结构相同（id + description），用宏生成各自的 upsert / list。

use async_trait::async_trait;
use sea_orm::{EntityTrait, QueryOrder, sea_query::OnConflict};
use tracing::info;
use uuid::Uuid;

use super::SeaOrmStorage;
use super::converters::model_to_catalog_entry;
use crate::errors::{Result, RotatorError};
use crate::storage::{CatalogEntry, CatalogKind, CatalogStore};

use migration::entities::{banner, group, slot};

macro_rules! upsert_entry {
    ($db:expr, $entity:ident, $id:expr, $description:expr) => {{
        let model = $entity::ActiveModel {
            id: sea_orm::ActiveValue::Set($id),
            description: sea_orm::ActiveValue::Set($description.to_string()),
        };
        $entity::Entity::insert(model)
            .on_conflict(
                OnConflict::column($entity::Column::Id)
                    .update_column($entity::Column::Description)
                    .to_owned(),
            )
            .exec($db)
            .await?;
    }};
}

macro_rules! list_entries {
    ($db:expr, $entity:ident) => {{
        $entity::Entity::find()
            .order_by_asc($entity::Column::Id)
            .all($db)
            .await?
            .into_iter()
            .map(|m| model_to_catalog_entry(m.id, m.description))
            .collect::<Vec<CatalogEntry>>()
    }};
}

#[async_trait]
impl CatalogStore for SeaOrmStorage {
    async fn register(
        &self,
        kind: CatalogKind,
        id: Uuid,
        description: &str,
    ) -> Result<CatalogEntry> {
        if description.trim().is_empty() {
            return Err(RotatorError::invalid_argument(format!(
                "{} description must not be empty",
                kind.as_str()
            )));
        }

        match kind {
            CatalogKind::Banner => upsert_entry!(&self.db, banner, id, description),
            CatalogKind::Slot => upsert_entry!(&self.db, slot, id, description),
            CatalogKind::Group => upsert_entry!(&self.db, group, id, description),
        }

        info!("Registered {} {}", kind.as_str(), id);
        Ok(model_to_catalog_entry(id, description.to_string()))
    }

    async fn list(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
        let mut entries = match kind {
            CatalogKind::Banner => list_entries!(&self.db, banner),
            CatalogKind::Slot => list_entries!(&self.db, slot),
            CatalogKind::Group => list_entries!(&self.db, group),
        };
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }
}
