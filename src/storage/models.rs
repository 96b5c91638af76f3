use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rotation 的状态（软删除在存储层映射为 `deactivated_at`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationStatus {
    Active,
    Inactive,
}

impl RotationStatus {
    pub fn is_active(self) -> bool {
        matches!(self, RotationStatus::Active)
    }
}

/// Show/click counters of one banner in one slot for one audience group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    pub id: Uuid,
    pub banner_id: Uuid,
    pub slot_id: Uuid,
    pub group_id: Uuid,
    pub shows: u64,
    pub clicks: u64,
    pub status: RotationStatus,
}

impl Rotation {
    /// 新挂载的 rotation：计数为 0，状态 Active
    pub fn new(banner_id: Uuid, slot_id: Uuid, group_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            banner_id,
            slot_id,
            group_id,
            shows: 0,
            clicks: 0,
            status: RotationStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// banners / slots / groups 表中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Banner,
    Slot,
    Group,
}

impl CatalogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::Banner => "banner",
            CatalogKind::Slot => "slot",
            CatalogKind::Group => "group",
        }
    }
}
