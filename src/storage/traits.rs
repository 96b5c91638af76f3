use async_trait::async_trait;
use uuid::Uuid;

use super::models::{CatalogEntry, CatalogKind, Rotation};
use crate::errors::Result;

/// Durable per-(banner, slot, group) counters with soft delete.
///
/// Implementations must make every counter increment atomic per row. Nothing
/// here is transactional across rows: callers that read and then write (the
/// choose path) accept that another request may have moved the counters in
/// between.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Attach `banner_id` to `slot_id` for every known group.
    ///
    /// Existing rows for the pair are reactivated with their counters intact,
    /// missing ones are inserted with zero counters. Calling it twice is a
    /// no-op the second time.
    async fn activate(&self, banner_id: Uuid, slot_id: Uuid) -> Result<()>;

    /// Soft-delete every rotation of the pair. Counters are kept.
    async fn deactivate(&self, slot_id: Uuid, banner_id: Uuid) -> Result<()>;

    /// `clicks += 1`. `NotFound` when the triple has never been activated.
    async fn record_click(&self, slot_id: Uuid, banner_id: Uuid, group_id: Uuid) -> Result<()>;

    /// `shows += 1`. `NotFound` when the triple has never been activated.
    async fn record_show(&self, slot_id: Uuid, banner_id: Uuid, group_id: Uuid) -> Result<()>;

    /// Active rotations of a slot for one group, ordered by banner id.
    async fn active_rotations(&self, slot_id: Uuid, group_id: Uuid) -> Result<Vec<Rotation>>;

    async fn get_rotation(
        &self,
        banner_id: Uuid,
        slot_id: Uuid,
        group_id: Uuid,
    ) -> Result<Option<Rotation>>;

    /// Every rotation of a slot, active and inactive.
    async fn slot_rotations(&self, slot_id: Uuid) -> Result<Vec<Rotation>>;
}

/// banners / slots / groups 参考表
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// 插入或更新描述；返回写入后的条目
    async fn register(
        &self,
        kind: CatalogKind,
        id: Uuid,
        description: &str,
    ) -> Result<CatalogEntry>;

    async fn list(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>>;
}
