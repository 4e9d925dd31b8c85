use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a013_task::aggregate::{Task, TaskDto};
use contracts::domain::common::AggregateRoot;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a013_task;
use crate::shared::error::{parse_uuid, ServiceError};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub individual_process_id: Option<String>,
    pub main_process_id: Option<String>,
}

/// GET /api/task
pub async fn list_all(
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Task>>, ServiceError> {
    let items = a013_task::service::list(
        query.individual_process_id.as_deref(),
        query.main_process_id.as_deref(),
    )
    .await?;
    Ok(Json(items))
}

/// GET /api/task/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Task>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a013_task::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(Task::collection_name(), id))
}

/// POST /api/task
pub async fn upsert(Json(dto): Json<TaskDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a013_task::service::update(dto).await?;
        id
    } else {
        a013_task::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/task/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a013_task::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(Task::collection_name(), id))
    }
}

/// POST /api/task/:id/complete
pub async fn complete(Path(id): Path<String>) -> Result<Json<Task>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a013_task::service::complete(uuid).await?))
}
