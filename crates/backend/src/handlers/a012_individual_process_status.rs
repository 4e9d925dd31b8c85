use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a012_individual_process_status::aggregate::{
    AddStatusRecordDto, IndividualProcessStatus,
};

use crate::domain::a012_individual_process_status::service;
use crate::shared::error::{parse_uuid, ServiceError};

/// GET /api/individual_process/:id/status_history
pub async fn list_status_history(
    Path(id): Path<String>,
) -> Result<Json<Vec<IndividualProcessStatus>>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(service::list_status_history(uuid).await?))
}

/// POST /api/individual_process/:id/status_history
pub async fn add_status_record(
    Path(id): Path<String>,
    Json(dto): Json<AddStatusRecordDto>,
) -> Result<(StatusCode, Json<IndividualProcessStatus>), ServiceError> {
    let uuid = parse_uuid(&id)?;
    let record = service::add_status_record(uuid, dto).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/individual_process_status/:id
pub async fn remove_status_record(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    service::remove_status_record(uuid).await?;
    Ok(StatusCode::OK)
}
