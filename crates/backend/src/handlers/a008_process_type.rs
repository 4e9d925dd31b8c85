use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a008_process_type::aggregate::{ProcessType, ProcessTypeDto};
use contracts::domain::common::AggregateRoot;
use serde_json::json;

use crate::domain::a008_process_type;
use crate::shared::error::{parse_uuid, ServiceError};

/// GET /api/process_type
pub async fn list_all() -> Result<Json<Vec<ProcessType>>, ServiceError> {
    Ok(Json(a008_process_type::service::list_all().await?))
}

/// GET /api/process_type/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<ProcessType>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a008_process_type::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(ProcessType::collection_name(), id))
}

/// POST /api/process_type
pub async fn upsert(Json(dto): Json<ProcessTypeDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a008_process_type::service::update(dto).await?;
        id
    } else {
        a008_process_type::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/process_type/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a008_process_type::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(ProcessType::collection_name(), id))
    }
}
