use axum::{extract::Path, Json};
use contracts::shared::field_registry::{fields_for, FieldRegistryEntry, RegistryEntity};
use contracts::shared::validation::ValidationError;
use contracts::shared::workflow::{
    allowed_next_statuses, FillableField, ProcessKind, FILLABLE_FIELDS,
};
use serde::Serialize;

use crate::shared::error::ServiceError;

#[derive(Debug, Serialize)]
pub struct NextStatuses {
    pub kind: &'static str,
    pub status: String,
    pub next: Vec<&'static str>,
}

/// GET /api/workflow/:kind/:status/next
pub async fn next_statuses(
    Path((kind, status)): Path<(String, String)>,
) -> Result<Json<NextStatuses>, ServiceError> {
    let kind = ProcessKind::from_code(&kind).ok_or(ValidationError::UnknownValue {
        field: "kind",
        value: kind,
    })?;
    let next = allowed_next_statuses(kind, &status)
        .ok_or_else(|| ServiceError::not_found("status", &status))?;
    Ok(Json(NextStatuses {
        kind: kind.code(),
        status,
        next: next.to_vec(),
    }))
}

/// GET /api/registry/fields/:entity
pub async fn entity_fields(
    Path(entity): Path<String>,
) -> Result<Json<&'static [FieldRegistryEntry]>, ServiceError> {
    let entity = RegistryEntity::from_code(&entity)
        .ok_or_else(|| ServiceError::not_found("registry entity", &entity))?;
    Ok(Json(fields_for(entity)))
}

/// GET /api/registry/fillable_fields
pub async fn fillable_fields() -> Json<&'static [FillableField]> {
    Json(FILLABLE_FIELDS)
}
