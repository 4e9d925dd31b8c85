use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a009_case_status::aggregate::{CaseStatus, CaseStatusDto};
use contracts::domain::common::AggregateRoot;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a009_case_status;
use crate::shared::error::{parse_uuid, ServiceError};

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/case_status?include_inactive=true
pub async fn list_all(
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<CaseStatus>>, ServiceError> {
    Ok(Json(
        a009_case_status::service::list(query.include_inactive).await?,
    ))
}

/// GET /api/case_status/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<CaseStatus>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a009_case_status::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(CaseStatus::collection_name(), id))
}

/// POST /api/case_status
pub async fn upsert(Json(dto): Json<CaseStatusDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a009_case_status::service::update(dto).await?;
        id
    } else {
        a009_case_status::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/case_status/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a009_case_status::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(CaseStatus::collection_name(), id))
    }
}
