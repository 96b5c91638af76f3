//! Rotation API 路由配置
//!
//! 所有路由挂在 `/v1` 下。

use actix_web::web;

use super::banner_ops::{add_banner, choose_banner, click_banner, remove_banner, slot_stats};
use super::catalog::{
    list_banners, list_groups, list_slots, register_banner, register_group, register_slot,
};

/// 轮播路由 `/slots`
///
/// 包含：
/// - PUT /slots/{slot_id}/banners/{banner_id} - 挂载 banner
/// - DELETE /slots/{slot_id}/banners/{banner_id} - 卸载 banner（保留计数）
/// - POST /slots/{slot_id}/banners/{banner_id}/clicks - 记录点击
/// - POST /slots/{slot_id}/choice - 选择 banner 并记录展示
/// - GET /slots/{slot_id}/rotations - 查看计数
pub fn slots_routes() -> actix_web::Scope {
    web::scope("/slots")
        .route("", web::get().to(list_slots))
        .route("", web::post().to(register_slot))
        .route(
            "/{slot_id}/banners/{banner_id}/clicks",
            web::post().to(click_banner),
        )
        .route("/{slot_id}/banners/{banner_id}", web::put().to(add_banner))
        .route(
            "/{slot_id}/banners/{banner_id}",
            web::delete().to(remove_banner),
        )
        .route("/{slot_id}/choice", web::post().to(choose_banner))
        .route("/{slot_id}/rotations", web::get().to(slot_stats))
}

/// 目录路由 `/banners`
pub fn banners_routes() -> actix_web::Scope {
    web::scope("/banners")
        .route("", web::get().to(list_banners))
        .route("", web::post().to(register_banner))
}

/// 目录路由 `/groups`
pub fn groups_routes() -> actix_web::Scope {
    web::scope("/groups")
        .route("", web::get().to(list_groups))
        .route("", web::post().to(register_group))
}

/// `/v1` 下的全部路由
pub fn rotation_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(slots_routes())
        .service(banners_routes())
        .service(groups_routes())
}
