use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_country::aggregate::{Country, CountryDto};
use contracts::domain::common::AggregateRoot;
use serde_json::json;

use crate::domain::a001_country;
use crate::shared::error::{parse_uuid, ServiceError};

/// GET /api/country
pub async fn list_all() -> Result<Json<Vec<Country>>, ServiceError> {
    Ok(Json(a001_country::service::list_all().await?))
}

/// GET /api/country/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Country>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a001_country::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(Country::collection_name(), id))
}

/// POST /api/country
pub async fn upsert(Json(dto): Json<CountryDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a001_country::service::update(dto).await?;
        id
    } else {
        a001_country::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/country/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a001_country::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(Country::collection_name(), id))
    }
}
