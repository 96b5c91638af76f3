//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations on `rotations`.
//! Counter increments are a single `UPDATE ... SET col = col + 1` so they
//! stay atomic per row without a transaction.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, ExprTrait, QueryFilter, QuerySelect,
    sea_query::{Expr, OnConflict},
};
use tracing::{debug, info};
use uuid::Uuid;

use super::SeaOrmStorage;
use super::converters::{deactivated_at_for, new_rotation_model};
use crate::errors::{Result, RotatorError};
use crate::storage::RotationStatus;

use migration::entities::{group, rotation};

/// 自增的计数列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Counter {
    Shows,
    Clicks,
}

impl Counter {
    fn column(self) -> rotation::Column {
        match self {
            Counter::Shows => rotation::Column::Shows,
            Counter::Clicks => rotation::Column::Clicks,
        }
    }
}

impl SeaOrmStorage {
    /// 重新激活已有行，再为缺失的 group 插入新行
    ///
    /// 返回 (重新激活的行数, 新插入的行数)
    pub(super) async fn attach_banner(&self, banner_id: Uuid, slot_id: Uuid) -> Result<(u64, usize)> {
        let reactivated = rotation::Entity::update_many()
            .col_expr(
                rotation::Column::DeactivatedAt,
                Expr::value(deactivated_at_for(RotationStatus::Active, Utc::now())),
            )
            .filter(rotation::Column::BannerId.eq(banner_id))
            .filter(rotation::Column::SlotId.eq(slot_id))
            .filter(rotation::Column::DeactivatedAt.is_not_null())
            .exec(&self.db)
            .await?
            .rows_affected;

        let groups: Vec<Uuid> = group::Entity::find()
            .select_only()
            .column(group::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;

        let existing: HashSet<Uuid> = rotation::Entity::find()
            .select_only()
            .column(rotation::Column::GroupId)
            .filter(rotation::Column::BannerId.eq(banner_id))
            .filter(rotation::Column::SlotId.eq(slot_id))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        let missing: Vec<rotation::ActiveModel> = groups
            .into_iter()
            .filter(|group_id| !existing.contains(group_id))
            .map(|group_id| new_rotation_model(banner_id, slot_id, group_id))
            .collect();

        let inserted = missing.len();
        if inserted == 0 {
            debug!(
                "Banner {} already attached to slot {} for every group",
                banner_id, slot_id
            );
            return Ok((reactivated, 0));
        }

        // 并发激活同一对时由唯一索引兜底
        let result = rotation::Entity::insert_many(missing)
            .on_conflict(
                OnConflict::columns([
                    rotation::Column::BannerId,
                    rotation::Column::SlotId,
                    rotation::Column::GroupId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e.into()),
        }

        info!(
            "Banner {} attached to slot {} ({} reactivated, {} inserted)",
            banner_id, slot_id, reactivated, inserted
        );
        Ok((reactivated, inserted))
    }

    /// 软删除；已停用的行保留原来的停用时间
    pub(super) async fn detach_banner(&self, slot_id: Uuid, banner_id: Uuid) -> Result<u64> {
        let result = rotation::Entity::update_many()
            .col_expr(
                rotation::Column::DeactivatedAt,
                Expr::value(deactivated_at_for(RotationStatus::Inactive, Utc::now())),
            )
            .filter(rotation::Column::BannerId.eq(banner_id))
            .filter(rotation::Column::SlotId.eq(slot_id))
            .filter(rotation::Column::DeactivatedAt.is_null())
            .exec(&self.db)
            .await?;

        info!(
            "Banner {} detached from slot {} ({} rows)",
            banner_id, slot_id, result.rows_affected
        );
        Ok(result.rows_affected)
    }

    /// 原子自增；状态不变（停用的行也会计数）
    pub(super) async fn increment(
        &self,
        counter: Counter,
        slot_id: Uuid,
        banner_id: Uuid,
        group_id: Uuid,
    ) -> Result<()> {
        let column = counter.column();
        let result = rotation::Entity::update_many()
            .col_expr(column, Expr::col(column).add(1i64))
            .filter(rotation::Column::BannerId.eq(banner_id))
            .filter(rotation::Column::SlotId.eq(slot_id))
            .filter(rotation::Column::GroupId.eq(group_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(RotatorError::not_found(format!(
                "no rotation for banner {} in slot {} and group {}",
                banner_id, slot_id, group_id
            )));
        }

        debug!(
            "{:?} +1 for banner {} slot {} group {}",
            counter, banner_id, slot_id, group_id
        );
        Ok(())
    }
}
