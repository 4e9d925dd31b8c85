use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a010_main_process::aggregate::{
    ChangeMainStatusRequest, MainProcess, MainProcessDto,
};
use contracts::domain::common::AggregateRoot;
use serde_json::json;

use crate::domain::a010_main_process;
use crate::shared::error::{parse_uuid, ServiceError};

/// GET /api/main_process
pub async fn list_all() -> Result<Json<Vec<MainProcess>>, ServiceError> {
    Ok(Json(a010_main_process::service::list_all().await?))
}

/// GET /api/main_process/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<MainProcess>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a010_main_process::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(MainProcess::collection_name(), id))
}

/// POST /api/main_process
pub async fn upsert(Json(dto): Json<MainProcessDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a010_main_process::service::update(dto).await?;
        id
    } else {
        a010_main_process::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/main_process/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a010_main_process::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(MainProcess::collection_name(), id))
    }
}

/// POST /api/main_process/:id/status
pub async fn change_status(
    Path(id): Path<String>,
    Json(request): Json<ChangeMainStatusRequest>,
) -> Result<Json<MainProcess>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(
        a010_main_process::service::change_main_status(
            uuid,
            &request.status,
            request.expected_version,
        )
        .await?,
    ))
}
