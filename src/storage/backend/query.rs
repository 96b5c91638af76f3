//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations on `rotations`.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::SeaOrmStorage;
use super::converters::model_to_rotation;
use crate::errors::Result;
use crate::storage::Rotation;

use migration::entities::rotation;

impl SeaOrmStorage {
    pub(super) async fn load_active(&self, slot_id: Uuid, group_id: Uuid) -> Result<Vec<Rotation>> {
        let models = rotation::Entity::find()
            .filter(rotation::Column::SlotId.eq(slot_id))
            .filter(rotation::Column::GroupId.eq(group_id))
            .filter(rotation::Column::DeactivatedAt.is_null())
            .order_by_asc(rotation::Column::BannerId)
            .all(&self.db)
            .await?;

        let mut rotations: Vec<Rotation> = models.into_iter().map(model_to_rotation).collect();
        // UUID 在各数据库中的排序方式不同（文本/二进制），统一按 Uuid 的字节序
        rotations.sort_by_key(|r| r.banner_id);
        Ok(rotations)
    }

    pub(super) async fn load_rotation(
        &self,
        banner_id: Uuid,
        slot_id: Uuid,
        group_id: Uuid,
    ) -> Result<Option<Rotation>> {
        let model = rotation::Entity::find()
            .filter(rotation::Column::BannerId.eq(banner_id))
            .filter(rotation::Column::SlotId.eq(slot_id))
            .filter(rotation::Column::GroupId.eq(group_id))
            .one(&self.db)
            .await?;

        Ok(model.map(model_to_rotation))
    }

    pub(super) async fn load_slot(&self, slot_id: Uuid) -> Result<Vec<Rotation>> {
        let models = rotation::Entity::find()
            .filter(rotation::Column::SlotId.eq(slot_id))
            .order_by_asc(rotation::Column::BannerId)
            .order_by_asc(rotation::Column::GroupId)
            .all(&self.db)
            .await?;

        let mut rotations: Vec<Rotation> = models.into_iter().map(model_to_rotation).collect();
        rotations.sort_by_key(|r| (r.banner_id, r.group_id));
        Ok(rotations)
    }
}
