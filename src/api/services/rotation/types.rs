//! Rotation API 类型定义

use serde::{Deserialize, Serialize};

use crate::storage::{CatalogEntry, Rotation, RotationStatus};

/// 统一响应包装 `{code, message, data}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

/// click / choice 请求体
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GroupRequest {
    pub group_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChoiceResponse {
    pub banner_id: String,
}

/// add / remove / click 的返回
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BannerSlotResponse {
    pub slot_id: String,
    pub banner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// 点击接口不回读存储，不携带状态
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RotationStatus>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RotationResponse {
    pub id: String,
    pub banner_id: String,
    pub slot_id: String,
    pub group_id: String,
    pub shows: u64,
    pub clicks: u64,
    pub status: RotationStatus,
}

impl From<Rotation> for RotationResponse {
    fn from(rotation: Rotation) -> Self {
        Self {
            id: rotation.id.to_string(),
            banner_id: rotation.banner_id.to_string(),
            slot_id: rotation.slot_id.to_string(),
            group_id: rotation.group_id.to_string(),
            shows: rotation.shows,
            clicks: rotation.clicks,
            status: rotation.status,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SlotStatsResponse {
    pub slot_id: String,
    pub total_shows: u64,
    pub total_clicks: u64,
    pub rotations: Vec<RotationResponse>,
}

/// 注册 banner / slot / group；id 缺省时自动生成
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegisterRequest {
    pub id: Option<String>,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CatalogEntryResponse {
    pub id: String,
    pub description: String,
}

impl From<CatalogEntry> for CatalogEntryResponse {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            description: entry.description,
        }
    }
}
