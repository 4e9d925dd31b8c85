use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_company::aggregate::{Company, CompanyDto};
use contracts::domain::common::AggregateRoot;
use serde_json::json;

use crate::domain::a003_company;
use crate::shared::error::{parse_uuid, ServiceError};

/// GET /api/company
pub async fn list_all() -> Result<Json<Vec<Company>>, ServiceError> {
    Ok(Json(a003_company::service::list_all().await?))
}

/// GET /api/company/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Company>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a003_company::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(Company::collection_name(), id))
}

/// POST /api/company
pub async fn upsert(Json(dto): Json<CompanyDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a003_company::service::update(dto).await?;
        id
    } else {
        a003_company::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/company/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a003_company::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(Company::collection_name(), id))
    }
}
