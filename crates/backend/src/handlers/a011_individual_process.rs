use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a011_individual_process::aggregate::{
    IndividualProcess, IndividualProcessDto,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::workflow::IndividualProcessFieldsPatch;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a011_individual_process;
use crate::shared::error::{parse_uuid, ServiceError};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub main_process_id: Option<String>,
}

/// GET /api/individual_process
pub async fn list_all(
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<IndividualProcess>>, ServiceError> {
    let items = a011_individual_process::service::list(query.main_process_id.as_deref()).await?;
    Ok(Json(items))
}

/// GET /api/individual_process/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<IndividualProcess>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a011_individual_process::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(IndividualProcess::collection_name(), id))
}

/// POST /api/individual_process
pub async fn upsert(Json(dto): Json<IndividualProcessDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a011_individual_process::service::update(dto).await?;
        id
    } else {
        a011_individual_process::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/individual_process/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a011_individual_process::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(IndividualProcess::collection_name(), id))
    }
}

/// PATCH /api/individual_process/:id/fields
pub async fn update_fields(
    Path(id): Path<String>,
    Json(patch): Json<IndividualProcessFieldsPatch>,
) -> Result<Json<IndividualProcess>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(
        a011_individual_process::service::update_fields(uuid, patch).await?,
    ))
}
