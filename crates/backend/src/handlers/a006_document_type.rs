use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a006_document_type::aggregate::{DocumentType, DocumentTypeDto};
use contracts::domain::common::AggregateRoot;
use serde_json::json;

use crate::domain::a006_document_type;
use crate::shared::error::{parse_uuid, ServiceError};

/// GET /api/document_type
pub async fn list_all() -> Result<Json<Vec<DocumentType>>, ServiceError> {
    Ok(Json(a006_document_type::service::list_all().await?))
}

/// GET /api/document_type/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<DocumentType>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a006_document_type::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(DocumentType::collection_name(), id))
}

/// POST /api/document_type
pub async fn upsert(Json(dto): Json<DocumentTypeDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a006_document_type::service::update(dto).await?;
        id
    } else {
        a006_document_type::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/document_type/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a006_document_type::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(DocumentType::collection_name(), id))
    }
}
