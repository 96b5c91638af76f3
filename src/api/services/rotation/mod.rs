//! Rotation API 服务模块
//!
//! 该模块包含轮播 API 的所有端点：
//! - banner 挂载/卸载
//! - 点击记录与 banner 选择
//! - slot 计数查看
//! - banner / slot / group 目录

mod banner_ops;
mod catalog;
pub mod error_code;
mod helpers;
pub mod routes;
mod types;

pub use types::*;

pub use helpers::{api_result, error_from_rotator, error_response, parse_id, success_response};

pub use error_code::ErrorCode;

pub use banner_ops::{add_banner, choose_banner, click_banner, remove_banner, slot_stats};

pub use catalog::{
    list_banners, list_groups, list_slots, register_banner, register_group, register_slot,
};

pub use routes::rotation_v1_routes;
