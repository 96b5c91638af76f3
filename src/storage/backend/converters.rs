//! 领域模型与数据库行之间的转换
//!
//! `RotationStatus` 只在这里与 `deactivated_at` 互相映射。

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::storage::{CatalogEntry, Rotation, RotationStatus};
use migration::entities::rotation;

/// 将 Sea-ORM Model 转换为 Rotation
pub fn model_to_rotation(model: rotation::Model) -> Rotation {
    Rotation {
        id: model.id,
        banner_id: model.banner_id,
        slot_id: model.slot_id,
        group_id: model.group_id,
        shows: model.shows.max(0) as u64,
        clicks: model.clicks.max(0) as u64,
        status: status_from_deactivated_at(model.deactivated_at),
    }
}

pub fn status_from_deactivated_at(deactivated_at: Option<DateTime<Utc>>) -> RotationStatus {
    match deactivated_at {
        None => RotationStatus::Active,
        Some(_) => RotationStatus::Inactive,
    }
}

/// Inactive 映射为 `now`，Active 映射为 NULL
pub fn deactivated_at_for(status: RotationStatus, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match status {
        RotationStatus::Active => None,
        RotationStatus::Inactive => Some(now),
    }
}

/// 新三元组的插入模型（计数为 0，Active）
pub fn new_rotation_model(banner_id: Uuid, slot_id: Uuid, group_id: Uuid) -> rotation::ActiveModel {
    use sea_orm::ActiveValue::Set;

    let fresh = Rotation::new(banner_id, slot_id, group_id);
    rotation::ActiveModel {
        id: Set(fresh.id),
        banner_id: Set(fresh.banner_id),
        slot_id: Set(fresh.slot_id),
        group_id: Set(fresh.group_id),
        shows: Set(fresh.shows as i64),
        clicks: Set(fresh.clicks as i64),
        deactivated_at: Set(deactivated_at_for(fresh.status, Utc::now())),
    }
}

pub fn model_to_catalog_entry(id: Uuid, description: String) -> CatalogEntry {
    CatalogEntry { id, description }
}
