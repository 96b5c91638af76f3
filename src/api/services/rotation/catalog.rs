//! Rotation API：banner / slot / group 目录

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::RotatorError;
use crate::storage::{CatalogKind, CatalogStore};

use super::helpers::{api_result, created_response, error_from_rotator, parse_id};
use super::types::{CatalogEntryResponse, RegisterRequest};

async fn register(
    kind: CatalogKind,
    body: RegisterRequest,
    catalog: &dyn CatalogStore,
) -> HttpResponse {
    let id = match body.id.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => match parse_id("id", raw) {
            Ok(id) => id,
            Err(e) => return error_from_rotator(&e),
        },
        None => Uuid::new_v4(),
    };

    match catalog.register(kind, id, &body.description).await {
        Ok(entry) => created_response(CatalogEntryResponse::from(entry)),
        Err(e) => error_from_rotator(&e.with_context(&format!("register_{}", kind.as_str()))),
    }
}

async fn list(kind: CatalogKind, catalog: &dyn CatalogStore) -> HttpResponse {
    let result = catalog.list(kind).await.map(|entries| {
        entries
            .into_iter()
            .map(CatalogEntryResponse::from)
            .collect::<Vec<_>>()
    });
    api_result::<_, RotatorError>(result)
}

/// POST /v1/banners
pub async fn register_banner(
    body: web::Json<RegisterRequest>,
    catalog: web::Data<Arc<dyn CatalogStore>>,
) -> ActixResult<impl Responder> {
    Ok(register(CatalogKind::Banner, body.into_inner(), catalog.get_ref().as_ref()).await)
}

/// POST /v1/slots
pub async fn register_slot(
    body: web::Json<RegisterRequest>,
    catalog: web::Data<Arc<dyn CatalogStore>>,
) -> ActixResult<impl Responder> {
    Ok(register(CatalogKind::Slot, body.into_inner(), catalog.get_ref().as_ref()).await)
}

/// POST /v1/groups
pub async fn register_group(
    body: web::Json<RegisterRequest>,
    catalog: web::Data<Arc<dyn CatalogStore>>,
) -> ActixResult<impl Responder> {
    Ok(register(CatalogKind::Group, body.into_inner(), catalog.get_ref().as_ref()).await)
}

/// GET /v1/banners
pub async fn list_banners(
    catalog: web::Data<Arc<dyn CatalogStore>>,
) -> ActixResult<impl Responder> {
    Ok(list(CatalogKind::Banner, catalog.get_ref().as_ref()).await)
}

/// GET /v1/slots
pub async fn list_slots(catalog: web::Data<Arc<dyn CatalogStore>>) -> ActixResult<impl Responder> {
    Ok(list(CatalogKind::Slot, catalog.get_ref().as_ref()).await)
}

/// GET /v1/groups
pub async fn list_groups(
    catalog: web::Data<Arc<dyn CatalogStore>>,
) -> ActixResult<impl Responder> {
    Ok(list(CatalogKind::Group, catalog.get_ref().as_ref()).await)
}
