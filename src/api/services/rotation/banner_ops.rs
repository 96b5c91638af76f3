//! Rotation API：挂载、卸载、点击、选择、统计

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{info, trace};
use uuid::Uuid;

use crate::errors::RotatorError;
use crate::selection::ucb;
use crate::services::RotationService;
use crate::storage::RotationStatus;

use super::helpers::{api_result, error_from_rotator, parse_id};
use super::types::{
    BannerSlotResponse, ChoiceResponse, GroupRequest, RotationResponse, SlotStatsResponse,
};

fn parse_slot_banner(path: web::Path<(String, String)>) -> Result<(Uuid, Uuid), RotatorError> {
    let (slot_raw, banner_raw) = path.into_inner();
    Ok((
        parse_id("slot_id", &slot_raw)?,
        parse_id("banner_id", &banner_raw)?,
    ))
}

/// PUT /v1/slots/{slot_id}/banners/{banner_id}
pub async fn add_banner(
    path: web::Path<(String, String)>,
    service: web::Data<Arc<RotationService>>,
) -> ActixResult<impl Responder> {
    let result = async {
        let (slot_id, banner_id) = parse_slot_banner(path)?;
        service.add_banner(banner_id, slot_id).await?;
        Ok::<_, RotatorError>(BannerSlotResponse {
            slot_id: slot_id.to_string(),
            banner_id: banner_id.to_string(),
            group_id: None,
            status: Some(RotationStatus::Active),
        })
    }
    .await;

    Ok(api_result(result))
}

/// DELETE /v1/slots/{slot_id}/banners/{banner_id}
pub async fn remove_banner(
    path: web::Path<(String, String)>,
    service: web::Data<Arc<RotationService>>,
) -> ActixResult<impl Responder> {
    let result = async {
        let (slot_id, banner_id) = parse_slot_banner(path)?;
        service.remove_banner(slot_id, banner_id).await?;
        Ok::<_, RotatorError>(BannerSlotResponse {
            slot_id: slot_id.to_string(),
            banner_id: banner_id.to_string(),
            group_id: None,
            status: Some(RotationStatus::Inactive),
        })
    }
    .await;

    Ok(api_result(result))
}

/// POST /v1/slots/{slot_id}/banners/{banner_id}/clicks
pub async fn click_banner(
    path: web::Path<(String, String)>,
    body: web::Json<GroupRequest>,
    service: web::Data<Arc<RotationService>>,
) -> ActixResult<impl Responder> {
    let result = async {
        let (slot_id, banner_id) = parse_slot_banner(path)?;
        let group_id = parse_id("group_id", &body.group_id)?;
        service.click_banner(slot_id, banner_id, group_id).await?;
        trace!(
            "Rotation API: click banner {} slot {} group {}",
            banner_id, slot_id, group_id
        );

        Ok::<_, RotatorError>(BannerSlotResponse {
            slot_id: slot_id.to_string(),
            banner_id: banner_id.to_string(),
            group_id: Some(group_id.to_string()),
            status: None,
        })
    }
    .await;

    Ok(api_result(result))
}

/// POST /v1/slots/{slot_id}/choice
pub async fn choose_banner(
    path: web::Path<String>,
    body: web::Json<GroupRequest>,
    service: web::Data<Arc<RotationService>>,
) -> ActixResult<impl Responder> {
    let result = async {
        let slot_id = parse_id("slot_id", &path.into_inner())?;
        let group_id = parse_id("group_id", &body.group_id)?;
        let banner_id = service.choose_banner(slot_id, group_id).await?;
        Ok::<_, RotatorError>(ChoiceResponse {
            banner_id: banner_id.to_string(),
        })
    }
    .await;

    Ok(api_result(result))
}

/// GET /v1/slots/{slot_id}/rotations
pub async fn slot_stats(
    path: web::Path<String>,
    service: web::Data<Arc<RotationService>>,
) -> ActixResult<HttpResponse> {
    let slot_id = match parse_id("slot_id", &path.into_inner()) {
        Ok(id) => id,
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    let rotations = match service.slot_stats(slot_id).await {
        Ok(rotations) => rotations,
        Err(e) => return Ok(error_from_rotator(&e)),
    };

    let total_shows = ucb::total_shows(&rotations);
    let total_clicks = rotations
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.clicks));

    info!(
        "Rotation API: slot {} has {} rotations ({} shows, {} clicks)",
        slot_id,
        rotations.len(),
        total_shows,
        total_clicks
    );

    Ok(api_result(Ok::<_, RotatorError>(SlotStatsResponse {
        slot_id: slot_id.to_string(),
        total_shows,
        total_clicks,
        rotations: rotations.into_iter().map(RotationResponse::from).collect(),
    })))
}
