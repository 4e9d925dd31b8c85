use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a004_person::aggregate::{Person, PersonDto};
use contracts::domain::common::AggregateRoot;
use serde_json::json;

use crate::domain::a004_person;
use crate::shared::error::{parse_uuid, ServiceError};

/// GET /api/person
pub async fn list_all() -> Result<Json<Vec<Person>>, ServiceError> {
    Ok(Json(a004_person::service::list_all().await?))
}

/// GET /api/person/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Person>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a004_person::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(Person::collection_name(), id))
}

/// POST /api/person
pub async fn upsert(Json(dto): Json<PersonDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a004_person::service::update(dto).await?;
        id
    } else {
        a004_person::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/person/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a004_person::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(Person::collection_name(), id))
    }
}
