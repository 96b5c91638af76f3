//! Rotation entity: per (banner, slot, group) show/click counters
//!
//! `deactivated_at` is the soft-delete marker. `NULL` means the banner is
//! currently attached to the slot.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rotations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub banner_id: Uuid,
    pub slot_id: Uuid,
    pub group_id: Uuid,
    pub shows: i64,
    pub clicks: i64,
    pub deactivated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
