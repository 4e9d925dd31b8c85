use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a007_legal_framework::aggregate::{LegalFramework, LegalFrameworkDto};
use contracts::domain::common::AggregateRoot;
use serde_json::json;

use crate::domain::a007_legal_framework;
use crate::shared::error::{parse_uuid, ServiceError};

/// GET /api/legal_framework
pub async fn list_all() -> Result<Json<Vec<LegalFramework>>, ServiceError> {
    Ok(Json(a007_legal_framework::service::list_all().await?))
}

/// GET /api/legal_framework/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<LegalFramework>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a007_legal_framework::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(LegalFramework::collection_name(), id))
}

/// POST /api/legal_framework
pub async fn upsert(Json(dto): Json<LegalFrameworkDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a007_legal_framework::service::update(dto).await?;
        id
    } else {
        a007_legal_framework::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/legal_framework/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a007_legal_framework::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(LegalFramework::collection_name(), id))
    }
}
