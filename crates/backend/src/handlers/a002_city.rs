use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_city::aggregate::{City, CityDto};
use contracts::domain::common::AggregateRoot;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a002_city;
use crate::shared::error::{parse_uuid, ServiceError};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub country_id: Option<String>,
}

/// GET /api/city
pub async fn list_all(
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<City>>, ServiceError> {
    let items = a002_city::service::list(query.country_id.as_deref()).await?;
    Ok(Json(items))
}

/// GET /api/city/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<City>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a002_city::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(City::collection_name(), id))
}

/// POST /api/city
pub async fn upsert(Json(dto): Json<CityDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a002_city::service::update(dto).await?;
        id
    } else {
        a002_city::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/city/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a002_city::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(City::collection_name(), id))
    }
}
