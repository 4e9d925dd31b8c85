use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a005_passport::aggregate::{Passport, PassportDto};
use contracts::domain::common::AggregateRoot;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a005_passport;
use crate::shared::error::{parse_uuid, ServiceError};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub person_id: Option<String>,
}

/// GET /api/passport
pub async fn list_all(
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Passport>>, ServiceError> {
    let items = a005_passport::service::list(query.person_id.as_deref()).await?;
    Ok(Json(items))
}

/// GET /api/passport/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Passport>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a005_passport::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(Passport::collection_name(), id))
}

/// POST /api/passport
pub async fn upsert(Json(dto): Json<PassportDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a005_passport::service::update(dto).await?;
        id
    } else {
        a005_passport::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/passport/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a005_passport::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(Passport::collection_name(), id))
    }
}
